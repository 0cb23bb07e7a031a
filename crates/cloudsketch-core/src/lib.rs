//! Cloudsketch Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! cloudsketch pipeline. It includes:
//!
//! - **Registry**: The static table of known cloud services ([`registry::ServiceRegistry`])
//! - **Categories**: Architectural tiers driving layout and styling ([`registry::Category`])
//! - **Graph**: Recognized components, inferred edges and layers ([`graph`] module)

pub mod graph;
pub mod registry;
