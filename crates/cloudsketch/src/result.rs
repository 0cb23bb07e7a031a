//! The combined output of one [`generate`](crate::DiagramBuilder::generate)
//! call.

use std::{collections::BTreeMap, fmt::Write as _};

use serde::Serialize;

use crate::export::RenderTarget;

/// How a [`DiagramResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// At least one component was recognized and drawn.
    Recognized,
    /// Recognition found nothing; the generic pipeline was drawn.
    Empty,
    /// An internal failure occurred; the generic pipeline was drawn together
    /// with a best-effort component list.
    Degraded,
}

impl Outcome {
    /// Returns true when the generic pipeline stands in for the plan.
    pub fn is_fallback(self) -> bool {
        !matches!(self, Self::Recognized)
    }
}

/// One rendering per [`RenderTarget`] plus a plain-text summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramResult {
    title: String,
    per_target: BTreeMap<RenderTarget, String>,
    text_summary: String,
    outcome: Outcome,
}

impl DiagramResult {
    pub(crate) fn new(
        title: impl Into<String>,
        per_target: BTreeMap<RenderTarget, String>,
        text_summary: String,
        outcome: Outcome,
    ) -> Self {
        Self {
            title: title.into(),
            per_target,
            text_summary,
            outcome,
        }
    }

    /// Returns the resolved diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the rendering for `target`.
    pub fn get(&self, target: RenderTarget) -> Option<&str> {
        self.per_target.get(&target).map(String::as_str)
    }

    /// Iterates over all renderings in [`RenderTarget::ALL`] order.
    pub fn renderings(&self) -> impl Iterator<Item = (RenderTarget, &str)> {
        self.per_target
            .iter()
            .map(|(target, text)| (*target, text.as_str()))
    }

    pub fn text_summary(&self) -> &str {
        &self.text_summary
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Formats the result as a Markdown document.
    ///
    /// Each rendering is wrapped in a fenced code block tagged with its
    /// language and followed by viewing instructions; the summary comes last.
    pub fn to_markdown(&self) -> String {
        self.to_markdown_for(&RenderTarget::ALL)
    }

    /// Like [`to_markdown`](Self::to_markdown), restricted to `targets`.
    pub fn to_markdown_for(&self, targets: &[RenderTarget]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);

        for (target, text) in self
            .renderings()
            .filter(|(target, _)| targets.contains(target))
        {
            let _ = writeln!(out, "## {}\n", heading(target));
            let _ = writeln!(out, "```{}", target.fence_language());
            out.push_str(text.trim_end_matches('\n'));
            out.push_str("\n```\n\n");
            if let Some(hint) = viewing_hint(target) {
                let _ = writeln!(out, "{hint}\n");
            }
        }

        out.push_str("## Summary\n\n```text\n");
        out.push_str(self.text_summary.trim_end_matches('\n'));
        out.push_str("\n```\n");
        out
    }
}

fn heading(target: RenderTarget) -> &'static str {
    match target {
        RenderTarget::TextBox => "Text Diagram",
        RenderTarget::FlowchartMarkup => "Mermaid Flowchart",
        RenderTarget::ComponentMarkup => "PlantUML Component Diagram",
    }
}

fn viewing_hint(target: RenderTarget) -> Option<&'static str> {
    match target {
        RenderTarget::TextBox => None,
        RenderTarget::FlowchartMarkup => Some(
            "To view this diagram, paste the code into https://mermaid.live/ \
             or embed it in GitHub/GitLab Markdown.",
        ),
        RenderTarget::ComponentMarkup => Some(
            "To view this diagram, paste the code into http://www.plantuml.com/plantuml/ \
             or open it with a PlantUML plugin in your IDE.",
        ),
    }
}
