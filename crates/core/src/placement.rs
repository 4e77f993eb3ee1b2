//! Element placement.
//!
//! Computes where each element of a slide goes on the canvas. Elements flow
//! top to bottom inside a column; each one's height comes from a per-type
//! estimate and the cursor then advances by that height plus a gap. Once
//! the cursor has passed the bottom margin the rest of the column is
//! dropped and one overflow warning is recorded for the slide.

use crate::canvas::{hundredths, Canvas, Emu, Rect};
use crate::chart::ChartPlan;
use crate::media::{ImageInfo, ImageProbe};
use crate::types::{ContentElement, LayoutHint, ListItem, SlideData, TableData};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PARAGRAPH_HEIGHT: Emu = hundredths(50);
pub const HEADING_HEIGHT: Emu = hundredths(40);
pub const LIST_LINE_HEIGHT: Emu = hundredths(35);
pub const CODE_LINE_HEIGHT: Emu = hundredths(25);
pub const CODE_PADDING: Emu = hundredths(30);
pub const TABLE_ROW_HEIGHT: Emu = hundredths(40);
pub const MAX_IMAGE_HEIGHT: Emu = hundredths(400);

/// Code blocks show at most this many lines.
pub const MAX_CODE_LINES: usize = 15;

const CONTENT_GAP: Emu = hundredths(20);
const COLUMN_GAP: Emu = hundredths(15);
const IMAGE_LAYOUT_GAP: Emu = hundredths(10);
const COLUMN_GUTTER: Emu = hundredths(50);

const TITLE_TOP: Emu = hundredths(30);
const TITLE_HEIGHT: Emu = hundredths(80);
const TITLE_SLIDE_TITLE_TOP: Emu = hundredths(250);
const TITLE_SLIDE_TITLE_HEIGHT: Emu = hundredths(150);
const SUBTITLE_HEIGHT: Emu = hundredths(100);

const IMAGE_BOX_INSET: Emu = hundredths(200);
const IMAGE_BOX_TOP: Emu = hundredths(150);
const IMAGE_EXTRAS_TOP: Emu = hundredths(550);
const IMAGE_EXTRAS_MAX: usize = 2;

const CHART_BOX_INSET: Emu = hundredths(100);
const CHART_BOX_TOP: Emu = hundredths(150);
const CHART_HEIGHT: Emu = hundredths(500);

/// Element content as it will be displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacedContent {
    Heading {
        text: String,
        level: u8,
    },
    Paragraph {
        text: String,
    },
    List {
        items: Vec<ListItem>,
        numbered: bool,
    },
    Code {
        /// Displayed text, with a marker line when truncated.
        text: String,
        language: String,
        /// Lines cut off by the line cap.
        hidden_lines: usize,
    },
    Table(TableData),
    Image {
        path: String,
        alt_text: String,
    },
    Chart(ChartPlan),
}

/// One placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Index of the source element in the slide.
    pub element: usize,
    pub frame: Rect,
    pub content: PlacedContent,
}

/// Placement result for a whole slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLayout {
    pub title_frame: Rect,

    /// Present on title slides with a subtitle.
    pub subtitle_frame: Option<Rect>,

    /// Placed elements, in placement order.
    pub placements: Vec<Placement>,

    /// Number of elements that were not placed.
    pub dropped: usize,
}

/// Computes element positions for slides on a fixed canvas.
pub struct PlacementEngine<'a> {
    canvas: Canvas,
    probe: &'a dyn ImageProbe,
}

/// A column to flow elements into.
#[derive(Debug, Clone, Copy)]
struct Column {
    left: Emu,
    top: Emu,
    width: Emu,
    gap: Emu,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(canvas: Canvas, probe: &'a dyn ImageProbe) -> Self {
        Self { canvas, probe }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Place every element of a slide according to its layout hint.
    ///
    /// Warnings (overflow, missing images) are appended to `warnings`.
    pub fn place(&self, slide: &SlideData, warnings: &mut Vec<String>) -> SlideLayout {
        match slide.layout_hint {
            LayoutHint::Title => self.place_title(slide, warnings),
            LayoutHint::Content => self.place_content(slide, warnings),
            LayoutHint::TwoColumn => self.place_two_column(slide, warnings),
            LayoutHint::Image => self.place_image(slide, warnings),
            LayoutHint::Chart => self.place_chart(slide, warnings),
        }
    }

    fn title_frame(&self) -> Rect {
        Rect::new(
            self.canvas.margin_left,
            TITLE_TOP,
            self.canvas.content_width(),
            TITLE_HEIGHT,
        )
    }

    fn layout(&self, placements: Vec<Placement>, dropped: usize) -> SlideLayout {
        SlideLayout {
            title_frame: self.title_frame(),
            subtitle_frame: None,
            placements,
            dropped,
        }
    }

    /// Title slides show only the centred title and subtitle.
    fn place_title(&self, slide: &SlideData, warnings: &mut Vec<String>) -> SlideLayout {
        let left = self.canvas.margin_left;
        let width = self.canvas.content_width();

        if !slide.elements.is_empty() {
            warn(
                warnings,
                format!(
                    "{} elements on title slide '{}' are not shown",
                    slide.elements.len(),
                    slide.title
                ),
            );
        }

        let title_frame = Rect::new(left, TITLE_SLIDE_TITLE_TOP, width, TITLE_SLIDE_TITLE_HEIGHT);

        SlideLayout {
            title_frame,
            subtitle_frame: slide
                .subtitle()
                .map(|_| Rect::new(left, title_frame.bottom(), width, SUBTITLE_HEIGHT)),
            placements: Vec::new(),
            dropped: slide.elements.len(),
        }
    }

    fn place_content(&self, slide: &SlideData, warnings: &mut Vec<String>) -> SlideLayout {
        let column = Column {
            left: self.canvas.margin_left,
            top: self.canvas.margin_top,
            width: self.canvas.content_width(),
            gap: CONTENT_GAP,
        };
        let elements: Vec<_> = slide.elements.iter().enumerate().collect();

        let (placements, dropped) = self.flow(&elements, column, warnings);
        warn_overflow(dropped, &slide.title, warnings);
        self.layout(placements, dropped)
    }

    /// Split at `floor(n / 2)`; each half flows in its own column.
    fn place_two_column(&self, slide: &SlideData, warnings: &mut Vec<String>) -> SlideLayout {
        let elements: Vec<_> = slide.elements.iter().enumerate().collect();
        let (left_half, right_half) = elements.split_at(elements.len() / 2);

        let column_width = (self.canvas.content_width() - COLUMN_GUTTER) / 2;
        let left_column = Column {
            left: self.canvas.margin_left,
            top: self.canvas.margin_top,
            width: column_width,
            gap: COLUMN_GAP,
        };
        let right_column = Column {
            left: self.canvas.margin_left + column_width + COLUMN_GUTTER,
            ..left_column
        };

        let (mut placements, left_dropped) = self.flow(left_half, left_column, warnings);
        let (right, right_dropped) = self.flow(right_half, right_column, warnings);
        placements.extend(right);

        let dropped = left_dropped + right_dropped;
        warn_overflow(dropped, &slide.title, warnings);
        self.layout(placements, dropped)
    }

    /// The first image gets a large centred box; up to two other elements
    /// flow beneath it.
    fn place_image(&self, slide: &SlideData, warnings: &mut Vec<String>) -> SlideLayout {
        let hero = slide
            .elements
            .iter()
            .position(|e| matches!(e, ContentElement::Image { .. }));

        let mut placements = Vec::new();
        if let Some(index) = hero {
            let frame = Rect::new(
                IMAGE_BOX_INSET,
                IMAGE_BOX_TOP,
                self.canvas.width - 2 * IMAGE_BOX_INSET,
                0,
            );
            let (placement, _) = self.place_element(index, &slide.elements[index], frame, warnings);
            placements.extend(placement);
        }

        let others: Vec<_> = slide
            .elements
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != hero)
            .collect();
        let shown = others.len().min(IMAGE_EXTRAS_MAX);
        let column = Column {
            left: self.canvas.margin_left,
            top: IMAGE_EXTRAS_TOP,
            width: self.canvas.content_width(),
            gap: IMAGE_LAYOUT_GAP,
        };

        let (extras, dropped) = self.flow(&others[..shown], column, warnings);
        warn_overflow(dropped, &slide.title, warnings);
        placements.extend(extras);

        self.layout(placements, dropped + others.len() - shown)
    }

    /// The first chart or table fills the chart box. Tables are converted to
    /// charts when they have a category column, at least one value column
    /// and at least one row; otherwise they are shown as tables.
    fn place_chart(&self, slide: &SlideData, warnings: &mut Vec<String>) -> SlideLayout {
        let frame = Rect::new(
            CHART_BOX_INSET,
            CHART_BOX_TOP,
            self.canvas.width - 2 * CHART_BOX_INSET,
            CHART_HEIGHT,
        );

        let source = slide.elements.iter().enumerate().find(|(_, e)| {
            matches!(e, ContentElement::ChartData(_) | ContentElement::Table(_))
        });

        let placement = match source {
            Some((index, ContentElement::Table(table))) => match ChartPlan::from_table(table) {
                Some(chart) => Some(Placement {
                    element: index,
                    frame,
                    content: PlacedContent::Chart(chart),
                }),
                None => {
                    log::debug!("Table on '{}' cannot be charted, showing as table", slide.title);
                    self.place_element(index, &slide.elements[index], frame, warnings)
                        .0
                }
            },
            Some((index, ContentElement::ChartData(data))) => Some(Placement {
                element: index,
                frame,
                content: PlacedContent::Chart(ChartPlan::from_data(data.clone())),
            }),
            _ => None,
        };

        let placed = usize::from(placement.is_some());
        let dropped = slide.elements.len() - placed;
        if dropped > 0 {
            warn(
                warnings,
                format!(
                    "{} elements on chart slide '{}' are not shown",
                    dropped, slide.title
                ),
            );
        }

        self.layout(placement.into_iter().collect(), dropped)
    }

    /// Flow elements down a column. Returns the placements and the number
    /// of elements dropped by overflow.
    fn flow(
        &self,
        elements: &[(usize, &ContentElement)],
        column: Column,
        warnings: &mut Vec<String>,
    ) -> (Vec<Placement>, usize) {
        let limit = self.canvas.content_limit();
        let mut cursor = column.top;
        let mut placements = Vec::new();

        for (n, (index, element)) in elements.iter().enumerate() {
            if cursor > limit {
                return (placements, elements.len() - n);
            }

            let frame = Rect::new(column.left, cursor, column.width, 0);
            let (placement, height) = self.place_element(*index, element, frame, warnings);
            placements.extend(placement);
            cursor += height + column.gap;
        }

        (placements, 0)
    }

    /// Place one element into a container whose left, top and width are
    /// taken from `container`. Returns the placement (if anything is shown)
    /// and the height consumed.
    fn place_element(
        &self,
        index: usize,
        element: &ContentElement,
        container: Rect,
        warnings: &mut Vec<String>,
    ) -> (Option<Placement>, Emu) {
        let sized = |height: Emu, content: PlacedContent| {
            let frame = Rect {
                height,
                ..container
            };
            (
                Some(Placement {
                    element: index,
                    frame,
                    content,
                }),
                height,
            )
        };

        match element {
            ContentElement::Paragraph { text } => sized(
                PARAGRAPH_HEIGHT,
                PlacedContent::Paragraph { text: text.clone() },
            ),
            ContentElement::Heading { text, level } => sized(
                HEADING_HEIGHT,
                PlacedContent::Heading {
                    text: text.clone(),
                    level: *level,
                },
            ),
            ContentElement::BulletList { items } | ContentElement::NumberedList { items } => {
                sized(
                    LIST_LINE_HEIGHT * items.len() as Emu,
                    PlacedContent::List {
                        items: items.clone(),
                        numbered: matches!(element, ContentElement::NumberedList { .. }),
                    },
                )
            }
            ContentElement::CodeBlock { code, language } => {
                let (text, shown, hidden_lines) = truncate_code(code);
                sized(
                    code_height(shown),
                    PlacedContent::Code {
                        text,
                        language: language.clone(),
                        hidden_lines,
                    },
                )
            }
            ContentElement::Table(table) => {
                let height = table_height(table);
                if height == 0 {
                    return (None, 0);
                }
                sized(height, PlacedContent::Table(table.clone()))
            }
            ContentElement::Image { path, alt_text } => {
                let info = self.probe.probe(Path::new(path));
                if info == ImageInfo::Missing {
                    warn(warnings, format!("Image not found: {}", path));
                    return (None, 0);
                }

                let frame = fit_image(info, container);
                (
                    Some(Placement {
                        element: index,
                        frame,
                        content: PlacedContent::Image {
                            path: path.clone(),
                            alt_text: alt_text.clone(),
                        },
                    }),
                    frame.height,
                )
            }
            ContentElement::ChartData(data) => sized(
                CHART_HEIGHT,
                PlacedContent::Chart(ChartPlan::from_data(data.clone())),
            ),
        }
    }
}

fn warn(warnings: &mut Vec<String>, message: String) {
    log::warn!("{}", message);
    warnings.push(message);
}

/// Record the overflow warning once for a slide that lost elements.
fn warn_overflow(dropped: usize, title: &str, warnings: &mut Vec<String>) {
    if dropped > 0 {
        log::debug!("{} elements overflow on slide '{}'", dropped, title);
        warn(warnings, format!("Content overflow on slide: {}", title));
    }
}

/// Cap a code block at [`MAX_CODE_LINES`]. Returns the display text, the
/// number of lines shown and the number hidden.
fn truncate_code(code: &str) -> (String, usize, usize) {
    let lines: Vec<&str> = code.split('\n').collect();
    let shown = lines.len().min(MAX_CODE_LINES);
    let hidden = lines.len() - shown;

    let mut text = lines[..shown].join("\n");
    if hidden > 0 {
        text.push_str(&format!("\n... ({} more lines)", hidden));
    }

    (text, shown, hidden)
}

/// `line_height * min(lines, 15) + padding`.
pub fn code_height(shown_lines: usize) -> Emu {
    CODE_LINE_HEIGHT * shown_lines.min(MAX_CODE_LINES) as Emu + CODE_PADDING
}

/// `row_height * (header + data rows)`; zero for a table with no columns.
pub fn table_height(table: &TableData) -> Emu {
    if table.column_count() == 0 {
        return 0;
    }
    TABLE_ROW_HEIGHT * table.row_count() as Emu
}

/// Fit an image into the container width, bounded by [`MAX_IMAGE_HEIGHT`].
///
/// When the aspect-constrained height would exceed the bound, the height is
/// capped and the width derived from it, centred in the container. With
/// unknown dimensions the image takes the full width and maximum height.
pub fn fit_image(info: ImageInfo, container: Rect) -> Rect {
    let (width, height) = match info.aspect_ratio() {
        Some(aspect) => {
            let natural_height = container.width as f64 / aspect;
            if natural_height > MAX_IMAGE_HEIGHT as f64 {
                let width = (MAX_IMAGE_HEIGHT as f64 * aspect).round() as Emu;
                (width, MAX_IMAGE_HEIGHT)
            } else {
                (container.width, natural_height.round() as Emu)
            }
        }
        None => (container.width, MAX_IMAGE_HEIGHT),
    };

    Rect::new(
        container.left + (container.width - width) / 2,
        container.top,
        width,
        height,
    )
}
