//! Service registry: the single source of truth for known cloud services.
//!
//! Every service the pipeline can recognize is described by a
//! [`ServiceDescriptor`]: its canonical key, its [`Category`], a display label,
//! a glyph and the detection patterns used by the recognizer. Renderers and the
//! recognizer read service semantics from here and nowhere else.
//!
//! The built-in table is initialized once per process and never mutated, so it
//! can be shared freely across threads.
//!
//! # Example
//!
//! ```
//! # use cloudsketch_core::registry::{Category, ServiceRegistry};
//! let registry = ServiceRegistry::builtin();
//!
//! let s3 = registry.lookup("s3").expect("s3 is built in");
//! assert_eq!(s3.category(), Category::Data);
//! assert_eq!(s3.label(), "S3 Bucket");
//! assert!(registry.lookup("mainframe").is_none());
//! ```

use std::{fmt, sync::OnceLock};

use log::debug;
use serde::{Deserialize, Serialize};

/// Glyph used for services that do not declare one.
pub const DEFAULT_GLYPH: &str = "📋";

static BUILTIN: OnceLock<ServiceRegistry> = OnceLock::new();

/// The coarse architectural tier a service belongs to.
///
/// Variants are declared in layer order; the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// End users and the public internet.
    Presentation,
    /// DNS, CDN, load balancing, gateways and virtual networks.
    Network,
    /// Virtual machines and managed functions.
    Compute,
    /// Relational, document and object stores.
    Data,
    /// Identity and access management.
    Security,
    /// Monitoring and operations.
    Management,
}

impl Category {
    /// Returns the layer number used by the layout assigner.
    ///
    /// Security and Management share the last layer.
    pub fn layer(self) -> usize {
        match self {
            Self::Presentation => 0,
            Self::Network => 1,
            Self::Compute => 2,
            Self::Data => 3,
            Self::Security | Self::Management => 4,
        }
    }

    /// Returns the human-readable name of this category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Presentation => "Presentation",
            Self::Network => "Network",
            Self::Compute => "Compute",
            Self::Data => "Data",
            Self::Security => "Security",
            Self::Management => "Management",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable description of one known cloud service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    key: String,
    category: Category,
    label: String,
    glyph: String,
    patterns: Vec<String>,
}

impl ServiceDescriptor {
    /// Creates a new descriptor.
    ///
    /// # Arguments
    ///
    /// * `key` - Canonical service key, e.g. `ec2`.
    /// * `category` - Architectural tier of the service.
    /// * `label` - Display label, e.g. `EC2 Instance`.
    /// * `glyph` - Short icon shown before the label.
    /// * `patterns` - Regular expression sources matched against lower-cased plan text.
    pub fn new(
        key: impl Into<String>,
        category: Category,
        label: impl Into<String>,
        glyph: impl Into<String>,
        patterns: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            category,
            label: label.into(),
            glyph: glyph.into(),
            patterns,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Returns the detection pattern sources, in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Ordered table of [`ServiceDescriptor`]s.
///
/// Declaration order is significant: recognition output, layer contents and
/// fallback listings all follow it.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    /// Creates a registry from an explicit list of descriptors.
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self { services }
    }

    /// Returns the process-wide built-in registry.
    pub fn builtin() -> &'static ServiceRegistry {
        BUILTIN.get_or_init(|| Self::new(builtin_services()))
    }

    /// Returns a copy of this registry with `extra` descriptors appended.
    ///
    /// Keys are not validated here; duplicates and malformed patterns are
    /// reported when a recognizer is built from the registry.
    pub fn with_services(&self, extra: impl IntoIterator<Item = ServiceDescriptor>) -> Self {
        let mut services = self.services.clone();
        services.extend(extra);
        debug!(
            builtin = self.services.len(),
            total = services.len();
            "Extended service registry"
        );
        Self { services }
    }

    /// Looks up a descriptor by its canonical key.
    pub fn lookup(&self, key: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|service| service.key == key)
    }

    /// Returns all descriptors in declaration order.
    pub fn all(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

fn builtin_services() -> Vec<ServiceDescriptor> {
    // (key, category, label, glyph, patterns)
    const TABLE: &[(&str, Category, &str, &str, &[&str])] = &[
        ("users", Category::Presentation, "Users", "👥", &[r"users?|clients?|customers?"]),
        ("internet", Category::Presentation, "Internet", "🌐", &[r"internet|web|public"]),
        ("cloudfront", Category::Network, "CloudFront CDN", "🚀", &[r"cloudfront|cdn|content delivery"]),
        ("route53", Category::Network, "Route 53 DNS", "🌍", &[r"route\s?53|dns|domain"]),
        ("loadbalancer", Category::Network, "Load Balancer", "⚖️", &[r"load\s?balancer|elb|alb"]),
        ("ec2", Category::Compute, "EC2 Instance", "🖥️", &[r"ec2|server|instance|compute"]),
        ("lambda", Category::Compute, "Lambda Function", "⚡", &[r"lambda|function|serverless"]),
        ("rds", Category::Data, "RDS Database", "🗄️", &[r"rds|database|mysql|postgres|aurora"]),
        ("dynamodb", Category::Data, "DynamoDB", "📊", &[r"dynamodb|nosql|document database"]),
        ("s3", Category::Data, "S3 Bucket", "📦", &[r"s3|bucket|storage|static files"]),
        ("apigateway", Category::Network, "API Gateway", "🔌", &[r"api\s?gateway|api|rest api"]),
        ("vpc", Category::Network, "VPC", "🏠", &[r"vpc|virtual private cloud|network"]),
        ("iam", Category::Security, "IAM", "🔐", &[r"iam|identity|access|authentication"]),
        ("cloudwatch", Category::Management, "CloudWatch", "📈", &[r"cloudwatch|monitoring|logs|metrics"]),
    ];

    TABLE
        .iter()
        .map(|(key, category, label, glyph, patterns)| {
            ServiceDescriptor::new(
                *key,
                *category,
                *label,
                *glyph,
                patterns.iter().map(|pattern| pattern.to_string()).collect(),
            )
        })
        .collect()
}
