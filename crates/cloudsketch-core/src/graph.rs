//! Component graph built for a single diagram request.
//!
//! This module provides the data handed from recognition to rendering:
//! - [`Component`]: One recognized service instance
//! - [`Edge`]: A directed, labelled relationship between two components
//! - [`Layer`]: Component ids sharing a layout layer
//! - [`Graph`]: Components in recognition order, edges in inference order and
//!   the layers attached by the layout assigner
//!
//! A graph is created fresh per request and is never shared between requests.

use indexmap::IndexMap;

use crate::registry::{Category, ServiceDescriptor};

/// One recognized service instance.
///
/// The category and glyph are copied from the [`ServiceDescriptor`] the
/// component was recognized from, so a graph needs no registry to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    id: String,
    service_key: String,
    label: String,
    instance_index: Option<usize>,
    category: Category,
    glyph: String,
}

impl Component {
    /// Creates the only instance of `service`, identified by its key.
    pub fn single(service: &ServiceDescriptor) -> Self {
        Self {
            id: service.key().to_string(),
            service_key: service.key().to_string(),
            label: service.label().to_string(),
            instance_index: None,
            category: service.category(),
            glyph: service.glyph().to_string(),
        }
    }

    /// Creates the `index`-th (1-based) of several instances of `service`.
    ///
    /// The id is `{key}_{index}` and the label `{Label} {index}`.
    pub fn instance(service: &ServiceDescriptor, index: usize) -> Self {
        Self {
            id: format!("{}_{index}", service.key()),
            service_key: service.key().to_string(),
            label: format!("{} {index}", service.label()),
            instance_index: Some(index),
            category: service.category(),
            glyph: service.glyph().to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the 1-based instance index, or `None` for a single instance.
    pub fn instance_index(&self) -> Option<usize> {
        self.instance_index
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }
}

/// A directed relationship between two components of the same graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source_id: String,
    target_id: String,
    relation_label: String,
}

impl Edge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation_label: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation_label: relation_label.into(),
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn relation_label(&self) -> &str {
        &self.relation_label
    }
}

/// Component ids grouped into one layout layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    level: usize,
    component_ids: Vec<String>,
}

impl Layer {
    pub fn new(level: usize, component_ids: Vec<String>) -> Self {
        Self {
            level,
            component_ids,
        }
    }

    /// Returns the layer number (see [`Category::layer`]).
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn component_ids(&self) -> &[String] {
        &self.component_ids
    }
}

/// Components, edges and layers of one diagram.
///
/// Components keep recognition order. Edges may only reference components of
/// the same graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    components: IndexMap<String, Component>,
    edges: Vec<Edge>,
    layers: Vec<Layer>,
}

impl Graph {
    /// Creates a graph without edges from recognized components.
    ///
    /// A later component with an id already present replaces the earlier one.
    pub fn new(components: impl IntoIterator<Item = Component>) -> Self {
        Self {
            components: components
                .into_iter()
                .map(|component| (component.id.clone(), component))
                .collect(),
            edges: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Appends an edge.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either endpoint is not a component of this
    /// graph. Edge producers only emit edges between recognized ids; the check
    /// catches violations of that during development.
    pub fn add_edge(&mut self, edge: Edge) {
        debug_assert!(
            self.components.contains_key(edge.source_id()),
            "Adding edge: source {} does not exist for {edge:?}",
            edge.source_id(),
        );
        debug_assert!(
            self.components.contains_key(edge.target_id()),
            "Adding edge: target {} does not exist for {edge:?}",
            edge.target_id(),
        );
        self.edges.push(edge);
    }

    /// Returns this graph with the given layers attached.
    pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
        self.layers = layers;
        self
    }

    /// Returns an iterator over components in recognition order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Returns the first instance recognized for `service_key`, if any.
    pub fn first_instance(&self, service_key: &str) -> Option<&Component> {
        self.components
            .values()
            .find(|component| component.service_key == service_key)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
