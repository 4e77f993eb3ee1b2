//! Plain text outline output.
//!
//! One block per slide, separated by a blank line. The first line names
//! the slide; each placed element follows, indented by two spaces.
//!
//! ```text
//! Slide 1: Demo [title]
//!   A short subtitle
//!
//! Slide 2: Points [content]
//!   • One
//!     • Nested
//! ```

use crate::write_file;
use deck_core::placement::PlacedContent;
use deck_core::{ListItem, RenderBackend, Result, SlidePlan};
use std::path::Path;

const INDENT: &str = "  ";

/// Writes a text outline of the deck.
#[derive(Debug, Clone, Default)]
pub struct OutlineBackend {
    slides: Vec<String>,
}

impl OutlineBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outline so far, with a trailing newline unless empty.
    pub fn text(&self) -> String {
        if self.slides.is_empty() {
            String::new()
        } else {
            format!("{}\n", self.slides.join("\n\n"))
        }
    }
}

impl RenderBackend for OutlineBackend {
    fn render(&mut self, plan: &SlidePlan) -> Result<()> {
        self.slides.push(format_slide(plan));
        Ok(())
    }

    fn finalize(&mut self, output: &Path) -> Result<()> {
        write_file(output, &self.text())
    }
}

/// Format one slide as outline lines joined by newlines.
pub fn format_slide(plan: &SlidePlan) -> String {
    let mut lines = vec![format!(
        "Slide {}: {} [{}]",
        plan.number, plan.title.text, plan.layout
    )];

    if let Some(subtitle) = &plan.subtitle {
        lines.push(format!("{}{}", INDENT, subtitle.text));
    }

    for element in &plan.elements {
        lines.extend(
            format_content(&element.content)
                .into_iter()
                .map(|line| format!("{}{}", INDENT, line)),
        );
    }

    if !plan.notes.is_empty() {
        lines.push(format!("{}Notes: {}", INDENT, plan.notes));
    }

    lines.join("\n")
}

fn format_content(content: &PlacedContent) -> Vec<String> {
    match content {
        PlacedContent::Heading { text, level } => {
            vec![format!("{} {}", "#".repeat(usize::from(*level)), text)]
        }
        PlacedContent::Paragraph { text } => vec![text.clone()],
        PlacedContent::List { items, numbered } => format_list(items, *numbered),
        PlacedContent::Code { text, language, .. } => {
            let mut lines = vec![format!("```{}", language)];
            lines.extend(text.split('\n').map(str::to_string));
            lines.push("```".to_string());
            lines
        }
        PlacedContent::Table(table) => {
            let header = (!table.headers.is_empty()).then(|| table.headers.join(" | "));
            header
                .into_iter()
                .chain(table.rows.iter().map(|row| row.join(" | ")))
                .collect()
        }
        PlacedContent::Image { path, alt_text } => {
            vec![format!("[image: {}]({})", alt_text, path)]
        }
        PlacedContent::Chart(chart) => {
            let mut lines = vec![format!("Chart: {}", chart.data.categories.join(", "))];
            lines.extend(chart.data.series.iter().map(|series| {
                let values: Vec<String> = series.values.iter().map(f64::to_string).collect();
                format!("{}{}: {}", INDENT, series.name, values.join(", "))
            }));
            lines
        }
    }
}

/// Bullets use `•`; numbered items count from 1 within their indent level.
fn format_list(items: &[ListItem], numbered: bool) -> Vec<String> {
    let mut counters: Vec<usize> = Vec::new();

    items
        .iter()
        .map(|item| {
            let pad = INDENT.repeat(item.indent);
            if !numbered {
                return format!("{}• {}", pad, item.text);
            }

            counters.truncate(item.indent + 1);
            counters.resize(item.indent + 1, 0);
            counters[item.indent] += 1;
            format!("{}{}. {}", pad, counters[item.indent], item.text)
        })
        .collect()
}
