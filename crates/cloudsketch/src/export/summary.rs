//! Plain-text summary shared by all renderers.

use std::fmt::Write as _;

use cloudsketch_core::{
    graph::{Component, Graph},
    registry::Category,
};

const CATEGORIES: [Category; 6] = [
    Category::Presentation,
    Category::Network,
    Category::Compute,
    Category::Data,
    Category::Security,
    Category::Management,
];

/// Summarizes `graph`: components grouped by category, then one
/// `source → target (label)` line per edge.
///
/// # Example
///
/// ```text
/// Architecture Summary:
/// ==================================================
///
/// Network Layer:
/// • 🚀 CloudFront CDN
///
/// Data Layer:
/// • 📦 S3 Bucket
///
/// Data Flow:
/// • CloudFront CDN → S3 Bucket (serves from)
/// ```
pub fn text_summary(graph: &Graph) -> String {
    let mut out = String::from("Architecture Summary:\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    if graph.is_empty() {
        out.push_str("\nNo components recognized.\n");
        return out;
    }

    for category in CATEGORIES {
        let members: Vec<&Component> = graph
            .components()
            .filter(|component| component.category() == category)
            .collect();
        if members.is_empty() {
            continue;
        }

        let _ = writeln!(out, "\n{category} Layer:");
        for component in members {
            let _ = writeln!(out, "• {} {}", component.glyph(), component.label());
        }
    }

    out.push_str("\nData Flow:\n");
    if graph.edges().is_empty() {
        out.push_str("• No relationships inferred\n");
    }
    for edge in graph.edges() {
        let source = graph
            .component(edge.source_id())
            .map_or(edge.source_id(), Component::label);
        let target = graph
            .component(edge.target_id())
            .map_or(edge.target_id(), Component::label);
        let _ = writeln!(out, "• {source} → {target} ({})", edge.relation_label());
    }

    out
}

#[cfg(test)]
mod tests {
    use cloudsketch_core::{graph::Edge, registry::ServiceRegistry};

    use super::*;

    #[test]
    fn test_summary_layout() {
        let registry = ServiceRegistry::builtin();
        let mut graph = Graph::new([
            Component::single(registry.lookup("cloudfront").unwrap()),
            Component::single(registry.lookup("s3").unwrap()),
        ]);
        graph.add_edge(Edge::new("cloudfront", "s3", "serves from"));

        let expected = "\
Architecture Summary:
==================================================

Network Layer:
• 🚀 CloudFront CDN

Data Layer:
• 📦 S3 Bucket

Data Flow:
• CloudFront CDN → S3 Bucket (serves from)
";
        assert_eq!(text_summary(&graph), expected);
    }

    #[test]
    fn test_summary_without_edges() {
        let registry = ServiceRegistry::builtin();
        let graph = Graph::new([Component::single(registry.lookup("iam").unwrap())]);
        let summary = text_summary(&graph);
        assert!(summary.contains("Security Layer:\n• 🔐 IAM\n"));
        assert!(summary.ends_with("• No relationships inferred\n"));
    }

    #[test]
    fn test_summary_of_empty_graph() {
        assert!(text_summary(&Graph::default()).ends_with("No components recognized.\n"));
    }
}
