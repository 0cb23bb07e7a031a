//! Fixed-width Unicode box-drawing renderer.
//!
//! The template depends on the [`LayoutStrategy`]:
//!
//! - `simple`: one vertical chain of components
//! - `medium`: one block per layer, two components per row joined by `←→`
//! - `complex`: a presentation / business / data grid, with security and
//!   management services listed below it
//!
//! Every frame line has the same display width. Labels that do not fit their
//! cell are cut at the cell boundary without an ellipsis. The instance number
//! of a repeated service is never cut, so `Lambda Function 1` and
//! `Lambda Function 2` stay distinct.

use unicode_width::UnicodeWidthStr;

use cloudsketch_core::{
    graph::{Component, Graph},
    registry::Category,
};

use super::{
    RenderTarget, Renderer,
    fallback::{self, STAGES},
};
use crate::layout::{self, LayoutStrategy};

const SIMPLE_WIDTH: usize = 45;
const MEDIUM_WIDTH: usize = 61;
const COMPLEX_WIDTH: usize = 69;
const FALLBACK_WIDTH: usize = 62;

const SIMPLE_CELL: usize = 40;
const MEDIUM_CELL: usize = 26;

const COLUMN: usize = 21;
const COLUMN_GAP: usize = 2;
const GRID_MARGIN: usize = 1;

/// Renders graphs as box-drawing text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBoxRenderer;

impl Renderer for TextBoxRenderer {
    fn target(&self) -> RenderTarget {
        RenderTarget::TextBox
    }

    fn render(&self, graph: &Graph, strategy: LayoutStrategy, title: &str) -> String {
        if graph.is_empty() {
            return render_fallback(title);
        }

        let ordered = ordered_components(graph);
        let mut lines = title_banner(title);
        lines.push(String::new());

        let frame = match strategy {
            LayoutStrategy::Simple => simple_frame(&ordered),
            LayoutStrategy::Medium => medium_frame(graph),
            LayoutStrategy::Complex => complex_frame(&ordered),
        };
        lines.extend(frame.into_lines());
        lines.join("\n")
    }
}

/// Box-drawing glyph set.
struct BoxStyle {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    tee_right: char,
    tee_left: char,
}

const LIGHT: BoxStyle = BoxStyle {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
    tee_right: '├',
    tee_left: '┤',
};

const DOUBLE: BoxStyle = BoxStyle {
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    horizontal: '═',
    vertical: '║',
    tee_right: '╠',
    tee_left: '╣',
};

/// A framed block of rows with a fixed inner width.
struct Frame {
    style: &'static BoxStyle,
    inner: usize,
    lines: Vec<String>,
}

impl Frame {
    fn new(style: &'static BoxStyle, inner: usize) -> Self {
        let mut frame = Self {
            style,
            inner,
            lines: Vec::new(),
        };
        frame.rule(style.top_left, style.top_right);
        frame
    }

    fn rule(&mut self, left: char, right: char) {
        let horizontal = self.style.horizontal.to_string().repeat(self.inner);
        self.lines.push(format!("{left}{horizontal}{right}"));
    }

    fn divider(&mut self) {
        self.rule(self.style.tee_right, self.style.tee_left);
    }

    /// Adds a left-aligned row, cut or padded to the inner width.
    fn row(&mut self, content: &str) {
        let vertical = self.style.vertical;
        self.lines
            .push(format!("{vertical}{}{vertical}", fit(content, self.inner)));
    }

    fn centered(&mut self, content: &str) {
        let vertical = self.style.vertical;
        self.lines
            .push(format!("{vertical}{}{vertical}", center(content, self.inner)));
    }

    fn blank(&mut self) {
        self.row("");
    }

    fn into_lines(mut self) -> Vec<String> {
        self.rule(self.style.bottom_left, self.style.bottom_right);
        self.lines
    }
}

/// Cuts `text` to at most `width` display columns.
pub fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if out.width() > width {
            out.pop();
            break;
        }
    }
    out
}

/// Cuts or right-pads `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let padding = width.saturating_sub(out.width());
    out.extend(std::iter::repeat_n(' ', padding));
    out
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let free = width.saturating_sub(text.width());
    let left = free / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(free - left))
}

/// Glyph and label of `component`, cut to `width` columns.
///
/// For an instance of a repeated service only the base label is cut; the
/// trailing instance number always survives.
fn cell_text(component: &Component, width: usize) -> String {
    let Some(index) = component.instance_index() else {
        return truncate(&format!("{} {}", component.glyph(), component.label()), width);
    };

    let suffix = format!(" {index}");
    let base = component
        .label()
        .strip_suffix(suffix.as_str())
        .unwrap_or(component.label());
    let head = truncate(
        &format!("{} {base}", component.glyph()),
        width.saturating_sub(suffix.width()),
    );
    format!("{head}{suffix}")
}

/// Replaces line breaks so `text` fits on one frame row.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect()
}

fn title_banner(title: &str) -> Vec<String> {
    let title = single_line(title);
    let rule = "═".repeat(title.width() + 4);
    vec![
        format!("╔{rule}╗"),
        format!("║  {title}  ║"),
        format!("╚{rule}╝"),
    ]
}

/// Components in layer order, falling back to fresh layers when the graph
/// carries none.
fn ordered_components(graph: &Graph) -> Vec<&Component> {
    let computed;
    let layers = if graph.layers().is_empty() {
        computed = layout::assign_layers(graph);
        &computed[..]
    } else {
        graph.layers()
    };

    layers
        .iter()
        .flat_map(|layer| layer.component_ids())
        .filter_map(|id| graph.component(id))
        .collect()
}

fn simple_frame(components: &[&Component]) -> Frame {
    let mut frame = Frame::new(&LIGHT, SIMPLE_WIDTH);
    frame.centered("SIMPLE ARCHITECTURE");
    frame.divider();
    frame.blank();

    for (index, component) in components.iter().enumerate() {
        if index > 0 {
            frame.row("     │");
            frame.row("     ▼");
        }
        frame.row(&format!("  {}", cell_text(component, SIMPLE_CELL)));
    }

    frame.blank();
    frame
}

fn medium_frame(graph: &Graph) -> Frame {
    let mut frame = Frame::new(&LIGHT, MEDIUM_WIDTH);
    frame.centered("MEDIUM ARCHITECTURE");
    frame.divider();
    frame.blank();

    let computed;
    let layers = if graph.layers().is_empty() {
        computed = layout::assign_layers(graph);
        &computed[..]
    } else {
        graph.layers()
    };

    for (index, layer) in layers.iter().enumerate() {
        if index > 0 {
            frame.centered("│");
            frame.centered("▼");
        }

        let members: Vec<&Component> = layer
            .component_ids()
            .iter()
            .filter_map(|id| graph.component(id))
            .collect();
        for pair in members.chunks(2) {
            match pair {
                [left, right] => frame.row(&format!(
                    "  {} ←→ {}",
                    fit(&cell_text(left, MEDIUM_CELL), MEDIUM_CELL),
                    fit(&cell_text(right, MEDIUM_CELL), MEDIUM_CELL)
                )),
                [single] => frame.centered(&cell_text(single, MEDIUM_CELL)),
                _ => {}
            }
        }
    }

    frame.blank();
    frame
}

fn complex_frame(components: &[&Component]) -> Frame {
    let mut frame = Frame::new(&LIGHT, COMPLEX_WIDTH);
    frame.centered("COMPLEX ARCHITECTURE");
    frame.divider();
    frame.blank();

    let box_inner = COLUMN - 2;
    let headers = [("PRESENTATION", "LAYER"), ("BUSINESS", "LAYER"), ("DATA", "LAYER")];
    frame.row(&grid_line(headers.map(|_| {
        format!("┌{}┐", "─".repeat(box_inner))
    })));
    frame.row(&grid_line(
        headers.map(|(name, _)| format!("│{}│", center(name, box_inner))),
    ));
    frame.row(&grid_line(
        headers.map(|(_, suffix)| format!("│{}│", center(suffix, box_inner))),
    ));
    frame.row(&grid_line(headers.map(|_| {
        format!("└{}┘", "─".repeat(box_inner))
    })));
    frame.row(&connector_line());

    let column = |categories: &[Category]| {
        components
            .iter()
            .copied()
            .filter(|component| categories.contains(&component.category()))
            .collect::<Vec<&Component>>()
    };
    let presentation = column(&[Category::Presentation, Category::Network]);
    let business = column(&[Category::Compute]);
    let data = column(&[Category::Data]);
    let shared = column(&[Category::Security, Category::Management]);

    let rows = presentation.len().max(business.len()).max(data.len());
    for index in 0..rows {
        let cells = [&presentation, &business, &data]
            .map(|members| members.get(index).map(|c| cell_text(c, COLUMN)).unwrap_or_default());
        frame.row(&grid_line(cells));
        if index + 1 < rows {
            frame.row(&connector_line());
        }
    }

    if !shared.is_empty() {
        frame.blank();
        frame.centered("SHARED SERVICES");
        for chunk in shared.chunks(3) {
            let cells =
                [0, 1, 2].map(|i| chunk.get(i).map(|c| cell_text(c, COLUMN)).unwrap_or_default());
            frame.row(&grid_line(cells));
        }
    }

    frame.blank();
    frame
}

/// Lays three cells out on the grid columns.
fn grid_line(cells: [String; 3]) -> String {
    let columns: Vec<String> = cells.iter().map(|cell| fit(cell, COLUMN)).collect();
    format!(
        "{}{}",
        " ".repeat(GRID_MARGIN),
        columns.join(&" ".repeat(COLUMN_GAP))
    )
}

fn connector_line() -> String {
    grid_line(std::array::from_fn(|_| center("│", COLUMN)))
}

fn render_fallback(title: &str) -> String {
    let mut frame = Frame::new(&DOUBLE, FALLBACK_WIDTH);
    frame.centered(&single_line(title));
    frame.divider();
    frame.blank();

    for (index, stage) in STAGES.iter().enumerate() {
        if index > 0 {
            frame.row("     │");
            frame.row("     ▼");
        }
        frame.row(&format!("  {} {}", stage.glyph, stage.label));
    }

    frame.blank();
    frame.row(&format!("  Data Flow: {}", fallback::data_flow()));
    frame.blank();
    frame.into_lines().join("\n")
}
