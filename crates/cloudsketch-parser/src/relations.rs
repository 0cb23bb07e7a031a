//! Relationship inference between recognized components.
//!
//! Edges come from two sources, in this order:
//!
//! 1. The static flow table: conventional adjacencies between services, used
//!    when both services were recognized.
//! 2. Textual phrasings such as `x connects to y`, `x sends to y` or
//!    `x -> y`, used when both words resolve to recognized components.
//!
//! The union keeps one edge per `(source, target)` pair; the first label seen
//! wins. A service with several instances is represented by its first instance.
//! Edges only ever connect components of the graph they were inferred for.

use std::collections::HashSet;

use log::{debug, trace};
use regex::Regex;

use cloudsketch_core::graph::{Edge, Graph};

use crate::{
    error::{Error, Result},
    recognize::{Recognizer, normalize},
};

/// Conventional adjacencies as `(source key, target key, label)`.
pub const FLOW_TABLE: &[(&str, &str, &str)] = &[
    ("users", "internet", "requests"),
    ("internet", "route53", "DNS lookup"),
    ("route53", "cloudfront", "routes to"),
    ("internet", "cloudfront", "requests"),
    ("cloudfront", "s3", "serves from"),
    ("internet", "loadbalancer", "requests"),
    ("loadbalancer", "ec2", "distributes to"),
    ("ec2", "rds", "queries"),
    ("ec2", "dynamodb", "reads/writes"),
    ("users", "apigateway", "API calls"),
    ("apigateway", "lambda", "invokes"),
    ("lambda", "dynamodb", "queries"),
    ("lambda", "rds", "queries"),
    ("ec2", "s3", "stores/retrieves"),
    ("lambda", "s3", "stores/retrieves"),
];

/// `(pattern, label, reversed)`; reversed phrasings name the target first.
const PHRASINGS: &[(&str, &str, bool)] = &[
    (r"(\w+)\s+connects?\s+to\s+(\w+)", "connects", false),
    (r"(\w+)\s+sends?\s+to\s+(\w+)", "sends", false),
    (r"(\w+)\s+receives?\s+from\s+(\w+)", "receives", true),
    (r"(\w+)\s*(?:->|→)\s*(\w+)", "flows", false),
    (r"(\w+)\s+through\s+(\w+)", "through", false),
];

#[derive(Debug)]
struct Phrasing {
    regex: Regex,
    label: &'static str,
    reversed: bool,
}

/// Infers directed edges between the components of a graph.
#[derive(Debug)]
pub struct RelationInferencer {
    phrasings: Vec<Phrasing>,
}

impl RelationInferencer {
    /// Compiles the textual phrasing patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if a phrasing does not compile.
    pub fn new() -> Result<Self> {
        let phrasings = PHRASINGS
            .iter()
            .map(|&(pattern, label, reversed)| -> Result<Phrasing> {
                let regex = Regex::new(pattern)
                    .map_err(|err| Error::invalid_pattern(label, pattern, err))?;
                Ok(Phrasing {
                    regex,
                    label,
                    reversed,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { phrasings })
    }

    /// Infers the edges between the components of `graph`.
    ///
    /// `recognizer` resolves words of textual phrasings to services; it
    /// should be the recognizer `graph` was built with.
    pub fn infer(&self, plan_text: &str, graph: &Graph, recognizer: &Recognizer) -> Vec<Edge> {
        let mut edges = EdgeSet::default();

        for (source_key, target_key, label) in FLOW_TABLE {
            let source = graph.first_instance(source_key);
            let target = graph.first_instance(target_key);
            if let (Some(source), Some(target)) = (source, target) {
                edges.insert(Edge::new(source.id(), target.id(), *label));
            }
        }
        let from_table = edges.len();

        let normalized = normalize(plan_text);
        for phrasing in &self.phrasings {
            for (first, second) in chained_captures(&phrasing.regex, &normalized) {
                let (source_word, target_word) = if phrasing.reversed {
                    (second, first)
                } else {
                    (first, second)
                };

                let source = resolve(source_word, graph, recognizer);
                let target = resolve(target_word, graph, recognizer);
                if let (Some(source), Some(target)) = (source, target) {
                    trace!(source, target, label = phrasing.label; "Textual relation");
                    edges.insert(Edge::new(source, target, phrasing.label));
                }
            }
        }

        debug!(
            from_table,
            from_text = edges.len() - from_table;
            "Relationships inferred"
        );
        edges.into_edges()
    }
}

/// Insertion-ordered edges, unique by `(source, target)`.
#[derive(Debug, Default)]
struct EdgeSet {
    edges: Vec<Edge>,
    seen: HashSet<(String, String)>,
}

impl EdgeSet {
    fn insert(&mut self, edge: Edge) {
        let pair = (edge.source_id().to_string(), edge.target_id().to_string());
        if self.seen.insert(pair) {
            self.edges.push(edge);
        }
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

/// Returns the id of the component named by `word`, if it is in `graph`.
///
/// Component ids (`ec2_2`) resolve to themselves; service keys and pattern
/// words (`server`) resolve to the service's first instance.
fn resolve<'g>(word: &str, graph: &'g Graph, recognizer: &Recognizer) -> Option<&'g str> {
    if let Some(component) = graph.component(word) {
        return Some(component.id());
    }
    let service_key = recognizer.service_for_word(word)?;
    graph.first_instance(service_key).map(|component| component.id())
}

/// Collects `(first, second)` capture pairs, letting the second word of one
/// match start the next so that `a -> b -> c` yields both hops.
fn chained_captures<'t>(regex: &Regex, text: &'t str) -> Vec<(&'t str, &'t str)> {
    let mut pairs = Vec::new();
    let mut start = 0;

    while let Some(captures) = regex.captures_at(text, start) {
        let (Some(first), Some(second)) = (captures.get(1), captures.get(2)) else {
            break;
        };
        pairs.push((first.as_str(), second.as_str()));
        start = second.start();
    }

    pairs
}

#[cfg(test)]
mod tests {
    use cloudsketch_core::registry::ServiceRegistry;

    use super::*;

    fn infer(text: &str) -> (Graph, Vec<Edge>) {
        let recognizer = Recognizer::new(ServiceRegistry::builtin()).unwrap();
        let graph = Graph::new(recognizer.recognize(text));
        let edges = RelationInferencer::new()
            .unwrap()
            .infer(text, &graph, &recognizer);
        (graph, edges)
    }

    fn pairs(edges: &[Edge]) -> Vec<(&str, &str)> {
        edges
            .iter()
            .map(|edge| (edge.source_id(), edge.target_id()))
            .collect()
    }

    #[test]
    fn test_static_flow_table() {
        let (_, edges) = infer("a static website using s3 and cloudfront");
        let edge = edges
            .iter()
            .find(|e| e.source_id() == "cloudfront" && e.target_id() == "s3")
            .expect("cloudfront -> s3 edge");
        assert_eq!(edge.relation_label(), "serves from");
    }

    #[test]
    fn test_static_flow_requires_both_endpoints() {
        let (_, edges) = infer("only cloudfront here");
        assert!(edges.is_empty());
    }

    #[test]
    fn test_multiple_instances_use_first_instance() {
        let (_, edges) = infer("ec2 and ec2 query rds");
        assert_eq!(pairs(&edges), [("ec2_1", "rds")]);
    }

    #[test]
    fn test_textual_connects_to() {
        let (_, edges) = infer("iam connects to cloudwatch");
        assert_eq!(pairs(&edges), [("iam", "cloudwatch")]);
        assert_eq!(edges[0].relation_label(), "connects");
    }

    #[test]
    fn test_textual_receives_from_is_reversed() {
        let (_, edges) = infer("cloudwatch receives from iam");
        assert_eq!(pairs(&edges), [("iam", "cloudwatch")]);
        assert_eq!(edges[0].relation_label(), "receives");
    }

    #[test]
    fn test_arrow_chain() {
        let (_, edges) = infer("iam -> vpc → cloudwatch");
        assert_eq!(pairs(&edges), [("iam", "vpc"), ("vpc", "cloudwatch")]);
        assert!(edges.iter().all(|e| e.relation_label() == "flows"));
    }

    #[test]
    fn test_pattern_words_resolve_to_services() {
        let (_, edges) = infer("the server sends to monitoring");
        assert_eq!(pairs(&edges), [("ec2", "cloudwatch")]);
    }

    #[test]
    fn test_instance_ids_resolve_to_themselves() {
        let (_, edges) = infer("ec2 ec2 ec2; ec2_3 sends to ec2_2");
        assert!(pairs(&edges).contains(&("ec2_3", "ec2_2")));
    }

    #[test]
    fn test_unknown_words_are_ignored() {
        let (_, edges) = infer("s3 connects to mainframe");
        assert!(edges.is_empty());
    }

    #[test]
    fn test_duplicates_keep_first_label() {
        let (_, edges) = infer("cloudfront -> s3");
        assert_eq!(pairs(&edges), [("cloudfront", "s3")]);
        assert_eq!(edges[0].relation_label(), "serves from");
    }

    #[test]
    fn test_edges_reference_graph_components() {
        let (graph, edges) = infer(
            "users -> cloudfront -> s3; apigateway -> lambda -> dynamodb; ec2 uses rds",
        );
        assert!(!edges.is_empty());
        for edge in &edges {
            assert!(graph.contains(edge.source_id()));
            assert!(graph.contains(edge.target_id()));
        }
    }
}
