//! Render backends for cloudsketch graphs.
//!
//! This module provides the [`Renderer`] trait implemented by every output
//! dialect. It is the final stage in the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Plan Text
//!     ↓ recognize
//! Components
//!     ↓ infer
//! Graph
//!     ↓ layout
//! Layered Graph + LayoutStrategy
//!     ↓ render (this module)
//! Diagram Text
//! ```
//!
//! # Available Backends
//!
//! - [`text_box`]: fixed-width Unicode box drawing
//! - [`flowchart`]: Mermaid flowchart markup
//! - [`component_markup`]: PlantUML component markup
//!
//! Renderers are pure: identical inputs produce byte-identical output. Each
//! draws a generic five-stage pipeline when the graph has no components.

pub mod component_markup;
pub mod fallback;
pub mod flowchart;
pub mod summary;
pub mod text_box;

use std::fmt;

use serde::{Deserialize, Serialize};

use cloudsketch_core::graph::Graph;

use crate::layout::LayoutStrategy;

/// Output dialect of a renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RenderTarget {
    /// Fixed-width Unicode box-drawing text.
    TextBox,
    /// Mermaid flowchart markup.
    FlowchartMarkup,
    /// PlantUML component markup.
    ComponentMarkup,
}

impl RenderTarget {
    /// All targets, in output order.
    pub const ALL: [RenderTarget; 3] = [
        RenderTarget::TextBox,
        RenderTarget::FlowchartMarkup,
        RenderTarget::ComponentMarkup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TextBox => "text-box",
            Self::FlowchartMarkup => "flowchart-markup",
            Self::ComponentMarkup => "component-markup",
        }
    }

    /// Returns the info string used for fenced Markdown code blocks.
    pub fn fence_language(self) -> &'static str {
        match self {
            Self::TextBox => "text",
            Self::FlowchartMarkup => "mermaid",
            Self::ComponentMarkup => "plantuml",
        }
    }

    /// Returns the conventional file extension, without the dot.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::TextBox => "txt",
            Self::FlowchartMarkup => "mmd",
            Self::ComponentMarkup => "puml",
        }
    }

    /// Returns the renderer producing this target.
    pub fn renderer(self) -> &'static dyn Renderer {
        match self {
            Self::TextBox => &text_box::TextBoxRenderer,
            Self::FlowchartMarkup => &flowchart::FlowchartRenderer,
            Self::ComponentMarkup => &component_markup::ComponentMarkupRenderer,
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstraction for diagram render backends.
///
/// Implementors serialize a layered [`Graph`] into one output dialect.
pub trait Renderer: Sync {
    /// The dialect this renderer produces.
    fn target(&self) -> RenderTarget;

    /// Renders `graph` with the given `title`.
    ///
    /// # Arguments
    ///
    /// * `graph` - Components, edges and layers to draw. Graphs without
    ///   layers are drawn as if [`crate::layout::assign_layers`] had run.
    /// * `strategy` - Template selection; markup renderers ignore it.
    /// * `title` - Display title of the diagram.
    fn render(&self, graph: &Graph, strategy: LayoutStrategy, title: &str) -> String;

    /// Plain-text summary: components by layer, then `source → target (label)`
    /// lines.
    fn summary(&self, graph: &Graph) -> String {
        summary::text_summary(graph)
    }
}
