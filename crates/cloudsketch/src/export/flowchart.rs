//! Mermaid flowchart renderer.
//!
//! Emits a top-down `flowchart TD` with one node per component, one arrow per
//! edge, and one style class per category. Edge labels are not drawn here;
//! they appear in the component markup and the summary.

use std::fmt::Write as _;

use cloudsketch_core::{graph::Graph, registry::Category};

use super::{RenderTarget, Renderer, fallback::STAGES};
use crate::layout::LayoutStrategy;

/// `(class name, fill, stroke)` per category.
const CLASS_STYLES: [(Category, &str, &str); 6] = [
    (Category::Presentation, "#4CAF50", "#2E7D32"),
    (Category::Network, "#2196F3", "#1565C0"),
    (Category::Compute, "#FF5722", "#D84315"),
    (Category::Data, "#795548", "#5D4037"),
    (Category::Security, "#FF9900", "#232F3E"),
    (Category::Management, "#9C27B0", "#6A1B9A"),
];

/// Renders graphs as Mermaid flowcharts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartRenderer;

impl Renderer for FlowchartRenderer {
    fn target(&self) -> RenderTarget {
        RenderTarget::FlowchartMarkup
    }

    fn render(&self, graph: &Graph, _strategy: LayoutStrategy, title: &str) -> String {
        let mut out = front_matter(title);
        out.push_str("flowchart TD\n");

        let nodes: Vec<(&str, String, Category)> = if graph.is_empty() {
            STAGES
                .iter()
                .map(|stage| (stage.id, format!("{} {}", stage.glyph, stage.label), stage.category))
                .collect()
        } else {
            graph
                .components()
                .map(|c| (c.id(), format!("{} {}", c.glyph(), c.label()), c.category()))
                .collect()
        };

        out.push_str("    %% Nodes\n");
        for (id, label, _) in &nodes {
            let _ = writeln!(out, "    {id}[{}]", escape_label(label));
        }

        out.push_str("\n    %% Relationships\n");
        if graph.is_empty() {
            for pair in STAGES.windows(2) {
                let _ = writeln!(out, "    {} --> {}", pair[0].id, pair[1].id);
            }
        } else {
            for edge in graph.edges() {
                let _ = writeln!(out, "    {} --> {}", edge.source_id(), edge.target_id());
            }
        }

        out.push_str("\n    %% Styling\n");
        for (category, fill, stroke) in CLASS_STYLES {
            let _ = writeln!(
                out,
                "    classDef {} fill:{fill},stroke:{stroke},color:#fff",
                class_name(category)
            );
        }
        out.push('\n');
        for (id, _, category) in &nodes {
            let _ = writeln!(out, "    class {id} {}", class_name(*category));
        }

        out
    }
}

fn class_name(category: Category) -> &'static str {
    match category {
        Category::Presentation => "presentation",
        Category::Network => "network",
        Category::Compute => "compute",
        Category::Data => "data",
        Category::Security => "security",
        Category::Management => "management",
    }
}

fn front_matter(title: &str) -> String {
    let title: String = title
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect();
    let title = title.replace('\\', "\\\\").replace('"', "\\\"");
    format!("---\ntitle: \"{title}\"\n---\n")
}

/// Replaces characters that would end or alter a node label with Mermaid
/// entity codes.
fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '#' => out.push_str("#35;"),
            '"' => out.push_str("#quot;"),
            '[' => out.push_str("#91;"),
            ']' => out.push_str("#93;"),
            '(' => out.push_str("#40;"),
            ')' => out.push_str("#41;"),
            '{' => out.push_str("#123;"),
            '}' => out.push_str("#125;"),
            '|' => out.push_str("#124;"),
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            ';' => out.push_str("#59;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}
