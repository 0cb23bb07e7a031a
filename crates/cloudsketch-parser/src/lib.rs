//! Plan-text analysis for cloudsketch.
//!
//! This crate turns a free-text architecture plan into a [`Graph`] of
//! recognized services and the edges between them:
//!
//! ```text
//! Plan Text
//!     ↓ recognize (entity recognition)
//! Components
//!     ↓ infer (flow table + textual phrasings)
//! Graph
//! ```
//!
//! # Example
//!
//! ```
//! # use cloudsketch_core::registry::ServiceRegistry;
//! # use cloudsketch_parser::Analyzer;
//! let analyzer = Analyzer::new(ServiceRegistry::builtin()).unwrap();
//! let graph = analyzer.analyze("a static website using s3 and cloudfront");
//!
//! assert!(graph.contains("s3"));
//! assert!(graph.contains("cloudfront"));
//! assert!(
//!     graph
//!         .edges()
//!         .iter()
//!         .any(|e| e.source_id() == "cloudfront" && e.target_id() == "s3")
//! );
//! ```

pub mod error;
pub mod recognize;
pub mod relations;

pub use recognize::{Recognizer, normalize};
pub use relations::RelationInferencer;

use log::debug;

use cloudsketch_core::{graph::Graph, registry::ServiceRegistry};

/// Recognizer and relationship inferencer compiled for one registry.
#[derive(Debug)]
pub struct Analyzer {
    recognizer: Recognizer,
    inferencer: RelationInferencer,
}

impl Analyzer {
    /// Compiles the analyzer for `registry`.
    ///
    /// # Errors
    ///
    /// Returns an [`error::Error`] if the registry contains an invalid key, a
    /// duplicate key or a detection pattern that does not compile.
    pub fn new(registry: &ServiceRegistry) -> error::Result<Self> {
        Ok(Self {
            recognizer: Recognizer::new(registry)?,
            inferencer: RelationInferencer::new()?,
        })
    }

    /// Builds the graph of `plan_text`, without layers.
    pub fn analyze(&self, plan_text: &str) -> Graph {
        let mut graph = Graph::new(self.recognizer.recognize(plan_text));
        for edge in self
            .inferencer
            .infer(plan_text, &graph, &self.recognizer)
        {
            graph.add_edge(edge);
        }

        debug!(
            components = graph.len(),
            edges = graph.edges().len();
            "Plan analyzed"
        );
        graph
    }
}
