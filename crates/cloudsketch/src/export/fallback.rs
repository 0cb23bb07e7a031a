//! Generic pipeline drawn when no components are available.
//!
//! All renderers draw the same five stages so that a fallback result looks
//! alike across targets.

use std::fmt::Write as _;

use cloudsketch_core::registry::{Category, ServiceRegistry};

/// One stage of the generic pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub id: &'static str,
    pub glyph: &'static str,
    pub label: &'static str,
    pub short_label: &'static str,
    /// Category used for styling the stage.
    pub category: Category,
}

/// Users → Gateway → App → Data → Storage.
pub const STAGES: [Stage; 5] = [
    Stage {
        id: "users",
        glyph: "👥",
        label: "Users/Clients",
        short_label: "Users",
        category: Category::Presentation,
    },
    Stage {
        id: "gateway",
        glyph: "🌐",
        label: "Internet Gateway / Load Balancer",
        short_label: "Gateway",
        category: Category::Network,
    },
    Stage {
        id: "app",
        glyph: "🖥️",
        label: "Application Layer",
        short_label: "App",
        category: Category::Compute,
    },
    Stage {
        id: "data",
        glyph: "🗄️",
        label: "Data Layer",
        short_label: "Data",
        category: Category::Data,
    },
    Stage {
        id: "storage",
        glyph: "📦",
        label: "Storage Layer",
        short_label: "Storage",
        category: Category::Data,
    },
];

/// Returns `Users → Gateway → App → Data → Storage`.
pub fn data_flow() -> String {
    STAGES
        .iter()
        .map(|stage| stage.short_label)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Lists the services whose key occurs in the raw plan text.
///
/// This is a plain substring scan over the lower-cased text, independent of
/// detection patterns, so it works even when recognition could not run.
pub fn detected_components(plan_text: &str, registry: &ServiceRegistry) -> String {
    let lowered = plan_text.to_lowercase();
    let mut out = String::from("Architecture Components Detected:\n");

    let mut found = false;
    for service in registry.all() {
        if !service.key().is_empty() && lowered.contains(service.key()) {
            found = true;
            let _ = writeln!(out, "• {} ({})", service.label(), service.category());
        }
    }
    if !found {
        out.push_str("• Generic cloud infrastructure components\n");
    }

    out
}
