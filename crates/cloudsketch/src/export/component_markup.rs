//! PlantUML component markup renderer.
//!
//! Element keywords follow the category: compute services are `node`s, data
//! services are `database`s, presentation endpoints are `actor`s and
//! everything else is a `component`. When a graph has both compute and data
//! services, those two groups are wrapped in `package` blocks.

use std::fmt::Write as _;

use cloudsketch_core::{
    graph::{Component, Graph},
    registry::Category,
};

use super::{RenderTarget, Renderer, fallback::STAGES};
use crate::layout::LayoutStrategy;

const THEME: &str = "aws-orange";

/// Renders graphs as PlantUML component diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentMarkupRenderer;

impl Renderer for ComponentMarkupRenderer {
    fn target(&self) -> RenderTarget {
        RenderTarget::ComponentMarkup
    }

    fn render(&self, graph: &Graph, _strategy: LayoutStrategy, title: &str) -> String {
        let mut out = String::from("@startuml\n");
        let _ = writeln!(out, "!theme {THEME}");
        let _ = writeln!(out, "title {}", single_line(title));
        out.push('\n');

        if graph.is_empty() {
            render_fallback(&mut out);
        } else {
            render_components(&mut out, graph);
            out.push_str("\n' Relationships\n");
            for edge in graph.edges() {
                let _ = writeln!(
                    out,
                    "{} --> {} : {}",
                    edge.source_id(),
                    edge.target_id(),
                    single_line(edge.relation_label())
                );
            }
        }

        out.push_str("\n@enduml\n");
        out
    }
}

fn render_components(out: &mut String, graph: &Graph) {
    out.push_str("' Components\n");

    let in_group = |category: Category| {
        graph
            .components()
            .filter(|component| component.category() == category)
            .collect::<Vec<&Component>>()
    };
    let compute = in_group(Category::Compute);
    let data = in_group(Category::Data);

    if compute.is_empty() || data.is_empty() {
        for component in graph.components() {
            declare(out, component, "");
        }
        return;
    }

    for component in graph
        .components()
        .filter(|c| !matches!(c.category(), Category::Compute | Category::Data))
    {
        declare(out, component, "");
    }
    for (name, members) in [("Compute Layer", compute), ("Data Layer", data)] {
        let _ = writeln!(out, "\npackage \"{name}\" {{");
        for component in members {
            declare(out, component, "  ");
        }
        out.push_str("}\n");
    }
}

fn declare(out: &mut String, component: &Component, indent: &str) {
    let label = format!("{} {}", component.glyph(), component.label());
    let _ = writeln!(
        out,
        "{indent}{} \"{}\" as {}",
        keyword(component.category()),
        escape(&label),
        component.id()
    );
}

fn render_fallback(out: &mut String) {
    out.push_str("' Components\n");
    for stage in &STAGES {
        let label = format!("{} {}", stage.glyph, stage.label);
        let _ = writeln!(
            out,
            "{} \"{}\" as {}",
            keyword(stage.category),
            escape(&label),
            stage.id
        );
    }

    out.push_str("\n' Relationships\n");
    for pair in STAGES.windows(2) {
        let _ = writeln!(out, "{} --> {}", pair[0].id, pair[1].id);
    }
}

fn keyword(category: Category) -> &'static str {
    match category {
        Category::Compute => "node",
        Category::Data => "database",
        Category::Presentation => "actor",
        Category::Network | Category::Security | Category::Management => "component",
    }
}

/// Escapes a quoted element name.
fn escape(label: &str) -> String {
    single_line(label)
        .replace('\\', "<U+005C>")
        .replace('"', "<U+0022>")
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect()
}
