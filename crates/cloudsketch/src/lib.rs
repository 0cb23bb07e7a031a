//! Cloudsketch - architecture diagrams from free-text cloud plans.
//!
//! A plan such as *"users call api gateway which invokes lambda backed by
//! dynamodb"* is scanned for known cloud services, connected through a fixed
//! flow table and textual phrasings, grouped into layers and rendered three
//! ways: box-drawing text, a Mermaid flowchart and a PlantUML component
//! diagram.
//!
//! ```
//! use cloudsketch::{DiagramBuilder, Outcome, RenderTarget};
//!
//! let builder = DiagramBuilder::default();
//! let result = builder.generate("a static website using s3 and cloudfront", "Site");
//!
//! assert_eq!(result.outcome(), Outcome::Recognized);
//! assert!(result.get(RenderTarget::FlowchartMarkup).unwrap().contains("cloudfront --> s3"));
//! ```

pub mod config;
pub mod export;
pub mod layout;

mod error;
mod result;

pub use cloudsketch_core::{graph, registry};

pub use error::CloudsketchError;
pub use export::{RenderTarget, Renderer};
pub use layout::LayoutStrategy;
pub use result::{DiagramResult, Outcome};

use std::{collections::BTreeMap, sync::OnceLock};

use log::{debug, info, trace, warn};

use cloudsketch_core::{graph::Graph, registry::ServiceRegistry};
use cloudsketch_parser::{Analyzer, error::Error as RecognizeError};

use config::AppConfig;
use export::fallback;

/// Target whose renderer also writes the plain-text summary.
const SUMMARY_TARGET: RenderTarget = RenderTarget::TextBox;

/// Builder running the full plan-to-diagram pipeline.
///
/// The registry is compiled once, in [`DiagramBuilder::new`]. A builder is
/// immutable afterwards and may be shared between threads.
///
/// # Examples
///
/// ```
/// use cloudsketch::{DiagramBuilder, RenderTarget, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let result = builder.generate("ec2 with an rds database", "");
///
/// assert_eq!(result.title(), "AWS Architecture");
/// assert!(result.get(RenderTarget::TextBox).unwrap().contains("EC2 Instance"));
/// ```
#[derive(Debug)]
pub struct DiagramBuilder {
    config: AppConfig,
    registry: ServiceRegistry,
    analyzer: Result<Analyzer, RecognizeError>,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DiagramBuilder {
    /// Creates a builder for the registry described by `config`.
    ///
    /// An invalid configured service does not fail construction. Every
    /// subsequent [`generate`](Self::generate) call degrades to the generic
    /// fallback diagram instead, and [`try_generate`](Self::try_generate)
    /// reports the error.
    pub fn new(config: AppConfig) -> Self {
        let registry = config.registry();
        let analyzer = Analyzer::new(&registry);
        match &analyzer {
            Ok(_) => debug!(services = registry.len(); "Service registry compiled"),
            Err(err) => warn!(err:%, code:% = err.code(); "Service registry rejected"),
        }

        Self {
            config,
            registry,
            analyzer,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Generates every rendering of `plan_text`.
    ///
    /// This never fails. A plan without recognizable services yields the
    /// generic pipeline ([`Outcome::Empty`]); an internal failure yields the
    /// same pipeline plus a best-effort component list
    /// ([`Outcome::Degraded`]).
    ///
    /// # Arguments
    ///
    /// * `plan_text` - Free-text architecture plan.
    /// * `title` - Diagram title; an empty title uses the configured default.
    pub fn generate(&self, plan_text: &str, title: &str) -> DiagramResult {
        match self.try_generate(plan_text, title) {
            Ok(result) => result,
            Err(err) => {
                warn!(err:%; "Diagram generation failed, drawing generic pipeline");
                self.fallback(plan_text, self.resolve_title(title), Outcome::Degraded)
            }
        }
    }

    /// Like [`generate`](Self::generate), but reports internal failures.
    ///
    /// # Errors
    ///
    /// Returns [`CloudsketchError::Recognize`] when the configured registry
    /// could not be compiled.
    pub fn try_generate(
        &self,
        plan_text: &str,
        title: &str,
    ) -> Result<DiagramResult, CloudsketchError> {
        let title = self.resolve_title(title);
        info!(chars = plan_text.len(); "Generating diagrams");

        let analyzer = self
            .analyzer
            .as_ref()
            .map_err(|err| CloudsketchError::Recognize(err.clone()))?;

        let graph = analyzer.analyze(plan_text);
        if graph.is_empty() {
            info!("No components recognized, drawing generic pipeline");
            return Ok(self.fallback(plan_text, title, Outcome::Empty));
        }

        let layers = layout::assign_layers(&graph);
        let strategy = LayoutStrategy::for_component_count(graph.len());
        debug!(
            components = graph.len(),
            edges = graph.edges().len(),
            layers = layers.len(),
            strategy = strategy.name();
            "Layout assigned"
        );
        let graph = graph.with_layers(layers);
        trace!(graph:?; "Layered graph");

        let per_target = render_all(&graph, strategy, title);
        let summary = SUMMARY_TARGET.renderer().summary(&graph);

        info!(outcome = "recognized"; "Diagrams generated");
        Ok(DiagramResult::new(
            title,
            per_target,
            summary,
            Outcome::Recognized,
        ))
    }

    fn fallback(&self, plan_text: &str, title: &str, outcome: Outcome) -> DiagramResult {
        let graph = Graph::default();
        let per_target = render_all(&graph, LayoutStrategy::Simple, title);
        let summary = format!(
            "{}\n{}",
            SUMMARY_TARGET.renderer().summary(&graph),
            fallback::detected_components(plan_text, &self.registry)
        );
        DiagramResult::new(title, per_target, summary, outcome)
    }

    fn resolve_title<'a>(&'a self, title: &'a str) -> &'a str {
        if title.trim().is_empty() {
            self.config.diagram().title()
        } else {
            title
        }
    }
}

/// Generates diagrams with the built-in registry and default configuration.
///
/// Shorthand for [`DiagramBuilder::generate`] on a process-wide default
/// builder.
pub fn generate(plan_text: &str, title: &str) -> DiagramResult {
    static DEFAULT: OnceLock<DiagramBuilder> = OnceLock::new();
    DEFAULT
        .get_or_init(DiagramBuilder::default)
        .generate(plan_text, title)
}

fn render_all(
    graph: &Graph,
    strategy: LayoutStrategy,
    title: &str,
) -> BTreeMap<RenderTarget, String> {
    RenderTarget::ALL
        .into_iter()
        .map(|target| (target, target.renderer().render(graph, strategy, title)))
        .collect()
}

#[cfg(test)]
mod tests {
    use cloudsketch_core::registry::Category;

    use super::*;
    use crate::config::{DiagramConfig, ServiceConfig};

    #[test]
    fn test_recognized_plan() {
        let result = generate("users -> api gateway -> lambda -> dynamodb", "Serverless");
        assert_eq!(result.outcome(), Outcome::Recognized);
        assert_eq!(result.title(), "Serverless");

        let markup = result.get(RenderTarget::ComponentMarkup).unwrap();
        assert!(markup.contains("apigateway --> lambda : invokes"));
        assert!(result.text_summary().contains("Lambda Function → DynamoDB (queries)"));
    }

    #[test]
    fn test_empty_plan_uses_fallback() {
        let result = generate("", "Test");
        assert_eq!(result.outcome(), Outcome::Empty);
        for target in RenderTarget::ALL {
            let text = result.get(target).unwrap();
            assert!(text.contains("Users/Clients"), "{target} lacks the generic pipeline");
        }
        assert!(result.text_summary().contains("Generic cloud infrastructure components"));
    }

    #[test]
    fn test_empty_title_uses_configured_title() {
        let builder = DiagramBuilder::new(AppConfig::new(DiagramConfig::new("Platform"), vec![]));
        assert_eq!(builder.generate("s3", "").title(), "Platform");
        assert_eq!(builder.generate("s3", "   ").title(), "Platform");
        assert_eq!(generate("s3", "").title(), "AWS Architecture");
    }

    #[test]
    fn test_invalid_service_degrades() {
        let config = AppConfig::new(
            DiagramConfig::default(),
            vec![ServiceConfig::new(
                "broken",
                Category::Compute,
                "Broken",
                None,
                vec!["(unclosed".to_string()],
            )],
        );
        let builder = DiagramBuilder::new(config);

        let result = builder.generate("ec2 with rds", "T");
        assert_eq!(result.outcome(), Outcome::Degraded);
        assert!(result.get(RenderTarget::TextBox).unwrap().contains("Data Flow: Users"));
        assert!(result.text_summary().contains("• EC2 Instance (Compute)"));
        assert!(result.text_summary().contains("• RDS Database (Data)"));

        let err = builder.try_generate("ec2 with rds", "T").unwrap_err();
        assert!(matches!(err, CloudsketchError::Recognize(_)));
    }

    #[test]
    fn test_custom_service_is_drawn() {
        let config = AppConfig::new(
            DiagramConfig::default(),
            vec![ServiceConfig::new(
                "sqs",
                Category::Compute,
                "SQS Queue",
                Some("📬".to_string()),
                vec!["sqs|queue".to_string()],
            )],
        );
        let builder = DiagramBuilder::new(config);
        let result = builder.generate("lambda sends to sqs", "Queue");

        assert_eq!(result.outcome(), Outcome::Recognized);
        let flowchart = result.get(RenderTarget::FlowchartMarkup).unwrap();
        assert!(flowchart.contains("sqs[📬 SQS Queue]"));
        assert!(flowchart.contains("lambda --> sqs"));
    }

    #[test]
    fn test_repeated_service_is_distinct_in_every_target() {
        let result = generate(
            "users hit cloudfront; lambda lambda write dynamodb and s3 via apigateway",
            "T",
        );
        let text = result.get(RenderTarget::TextBox).unwrap();
        assert!(text.contains("COMPLEX ARCHITECTURE"));
        for index in [1, 2] {
            assert!(text.contains(&format!("Lambda Function {index}")));
            assert!(
                result
                    .get(RenderTarget::FlowchartMarkup)
                    .unwrap()
                    .contains(&format!("lambda_{index}[⚡ Lambda Function {index}]"))
            );
            assert!(
                result
                    .get(RenderTarget::ComponentMarkup)
                    .unwrap()
                    .contains(&format!("as lambda_{index}\n"))
            );
        }
    }

    #[test]
    fn test_key_shaped_like_instance_id_degrades() {
        let config = AppConfig::new(
            DiagramConfig::default(),
            vec![ServiceConfig::new(
                "ec2_2",
                Category::Compute,
                "Spare Instance",
                None,
                vec!["spare".to_string()],
            )],
        );
        let builder = DiagramBuilder::new(config);

        let result = builder.generate("ec2 and ec2 plus a spare", "T");
        assert_eq!(result.outcome(), Outcome::Degraded);
        let err = builder.try_generate("ec2 and ec2 plus a spare", "T").unwrap_err();
        assert!(matches!(
            err,
            CloudsketchError::Recognize(RecognizeError::InstanceIdCollision { .. })
        ));
    }

    #[test]
    fn test_builder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagramBuilder>();
    }
}
