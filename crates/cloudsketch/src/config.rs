//! Configuration types for cloudsketch diagram generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from any
//! serde format. The CLI reads them from TOML:
//!
//! ```toml
//! [diagram]
//! title = "Payments Platform"
//!
//! [[services]]
//! key = "sqs"
//! category = "compute"
//! label = "SQS Queue"
//! glyph = "📬"
//! patterns = ["sqs", "queue"]
//! ```
//!
//! # Example
//!
//! ```
//! # use cloudsketch::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.diagram().title(), "AWS Architecture");
//! assert!(config.services().is_empty());
//! ```

use serde::Deserialize;

use cloudsketch_core::registry::{Category, DEFAULT_GLYPH, ServiceDescriptor, ServiceRegistry};

/// Title used when neither the caller nor the configuration supplies one.
pub const DEFAULT_TITLE: &str = "AWS Architecture";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram presentation section.
    #[serde(default)]
    diagram: DiagramConfig,

    /// Extra services appended to the built-in registry.
    #[serde(default)]
    services: Vec<ServiceConfig>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`].
    ///
    /// # Arguments
    ///
    /// * `diagram` - Diagram presentation settings.
    /// * `services` - Services appended after the built-in ones.
    pub fn new(diagram: DiagramConfig, services: Vec<ServiceConfig>) -> Self {
        Self { diagram, services }
    }

    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    pub fn services(&self) -> &[ServiceConfig] {
        &self.services
    }

    /// Builds the service registry: the built-in services followed by the
    /// configured ones.
    pub fn registry(&self) -> ServiceRegistry {
        ServiceRegistry::builtin().with_services(self.services.iter().map(ServiceConfig::to_descriptor))
    }
}

/// Diagram presentation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagramConfig {
    /// Default title for generated diagrams.
    #[serde(default)]
    title: Option<String>,
}

impl DiagramConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Returns the configured title, or [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }
}

/// A user-defined service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    key: String,
    category: Category,
    label: String,
    #[serde(default)]
    glyph: Option<String>,
    /// Detection patterns; an empty list detects the key itself.
    #[serde(default)]
    patterns: Vec<String>,
}

impl ServiceConfig {
    pub fn new(
        key: impl Into<String>,
        category: Category,
        label: impl Into<String>,
        glyph: Option<String>,
        patterns: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            category,
            label: label.into(),
            glyph,
            patterns,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Converts this entry into a registry descriptor, filling in the default
    /// glyph and patterns.
    pub fn to_descriptor(&self) -> ServiceDescriptor {
        let patterns = if self.patterns.is_empty() {
            vec![self.key.clone()]
        } else {
            self.patterns.clone()
        };
        ServiceDescriptor::new(
            self.key.clone(),
            self.category,
            self.label.clone(),
            self.glyph.as_deref().unwrap_or(DEFAULT_GLYPH),
            patterns,
        )
    }
}
