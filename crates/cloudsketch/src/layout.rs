//! Layer assignment and layout strategy selection.
//!
//! Components are grouped into [`Layer`]s by the layer number of their
//! category ([`Category::layer`]), in ascending order. Within a layer,
//! components keep recognition order, which follows registry declaration
//! order.
//!
//! Layers are a visual grouping only. An edge may point from a higher layer to
//! a lower one and is drawn as given.
//!
//! [`Category::layer`]: cloudsketch_core::registry::Category::layer

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use cloudsketch_core::graph::{Graph, Layer};

/// Text-box template chosen from the number of components.
///
/// Only the text-box renderer varies with the strategy; markup renderers
/// always draw the full layered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// Up to three components in a single vertical chain.
    Simple,
    /// Four to six components, layer by layer, two per row.
    Medium,
    /// More than six components in a presentation/business/data grid.
    Complex,
}

impl LayoutStrategy {
    /// Largest component count drawn with [`LayoutStrategy::Simple`].
    pub const SIMPLE_MAX: usize = 3;
    /// Largest component count drawn with [`LayoutStrategy::Medium`].
    pub const MEDIUM_MAX: usize = 6;

    /// Selects the strategy for a graph of `count` components.
    pub fn for_component_count(count: usize) -> Self {
        if count <= Self::SIMPLE_MAX {
            Self::Simple
        } else if count <= Self::MEDIUM_MAX {
            Self::Medium
        } else {
            Self::Complex
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Groups the components of `graph` into layers ordered by layer number.
///
/// Empty layer numbers are skipped, so the result holds only non-empty layers.
pub fn assign_layers(graph: &Graph) -> Vec<Layer> {
    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for component in graph.components() {
        groups
            .entry(component.category().layer())
            .or_default()
            .push(component.id().to_string());
    }

    groups
        .into_iter()
        .map(|(level, component_ids)| Layer::new(level, component_ids))
        .collect()
}

#[cfg(test)]
mod tests {
    use cloudsketch_core::{graph::Component, registry::ServiceRegistry};

    use super::*;

    fn graph_of(keys: &[&str]) -> Graph {
        let registry = ServiceRegistry::builtin();
        Graph::new(
            keys.iter()
                .map(|key| Component::single(registry.lookup(key).unwrap())),
        )
    }

    #[test]
    fn test_strategy_thresholds() {
        assert_eq!(LayoutStrategy::for_component_count(0), LayoutStrategy::Simple);
        assert_eq!(LayoutStrategy::for_component_count(2), LayoutStrategy::Simple);
        assert_eq!(LayoutStrategy::for_component_count(3), LayoutStrategy::Simple);
        assert_eq!(LayoutStrategy::for_component_count(4), LayoutStrategy::Medium);
        assert_eq!(LayoutStrategy::for_component_count(5), LayoutStrategy::Medium);
        assert_eq!(LayoutStrategy::for_component_count(6), LayoutStrategy::Medium);
        assert_eq!(LayoutStrategy::for_component_count(7), LayoutStrategy::Complex);
        assert_eq!(LayoutStrategy::for_component_count(8), LayoutStrategy::Complex);
    }

    #[test]
    fn test_layers_follow_category_priority() {
        let graph = graph_of(&["users", "cloudfront", "ec2", "rds", "s3", "apigateway", "iam", "cloudwatch"]);
        let layers = assign_layers(&graph);

        let levels: Vec<_> = layers.iter().map(Layer::level).collect();
        assert_eq!(levels, [0, 1, 2, 3, 4]);

        assert_eq!(layers[1].component_ids(), ["cloudfront", "apigateway"]);
        assert_eq!(layers[3].component_ids(), ["rds", "s3"]);
        // Security and Management share the last layer.
        assert_eq!(layers[4].component_ids(), ["iam", "cloudwatch"]);
    }

    #[test]
    fn test_missing_categories_are_skipped() {
        let graph = graph_of(&["users", "s3"]);
        let layers = assign_layers(&graph);
        let levels: Vec<_> = layers.iter().map(Layer::level).collect();
        assert_eq!(levels, [0, 3]);
    }

    #[test]
    fn test_every_component_in_exactly_one_layer() {
        let graph = graph_of(&["internet", "route53", "lambda", "dynamodb", "vpc"]);
        let layers = assign_layers(&graph);
        let mut ids: Vec<_> = layers
            .iter()
            .flat_map(|layer| layer.component_ids().iter().map(String::as_str))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, ["dynamodb", "internet", "lambda", "route53", "vpc"]);
    }

    #[test]
    fn test_empty_graph_has_no_layers() {
        assert!(assign_layers(&Graph::default()).is_empty());
    }
}
