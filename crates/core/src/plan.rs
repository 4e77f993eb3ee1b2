//! Slide plans: placed, styled slides ready for a rendering backend.

use crate::canvas::{hundredths, Canvas, Emu, Rect};
use crate::media::ImageProbe;
use crate::placement::{PlacedContent, PlacementEngine};
use crate::style::{ElementStyle, Rgb, StyleRole, Theme};
use crate::types::{LayoutHint, SlideData};
use serde::{Deserialize, Serialize};

const ERROR_NOTE_HEIGHT: Emu = hundredths(100);

/// A positioned, styled run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedText {
    pub text: String,
    pub frame: Rect,
    pub style: ElementStyle,
}

/// A positioned, styled content element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedElement {
    pub frame: Rect,
    pub content: PlacedContent,
    pub style: ElementStyle,

    /// Header row style, for tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_style: Option<ElementStyle>,
}

/// Everything a backend needs to draw one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlidePlan {
    /// 1-based position in the deck.
    pub number: usize,
    pub layout: LayoutHint,
    pub background: Rgb,
    pub title: PlannedText,
    pub subtitle: Option<PlannedText>,
    pub elements: Vec<PlannedElement>,
    pub notes: String,
}

/// Builds slide plans from finished slides.
pub struct SlidePlanner<'a> {
    engine: PlacementEngine<'a>,
    theme: &'a Theme,
}

impl<'a> SlidePlanner<'a> {
    pub fn new(canvas: Canvas, theme: &'a Theme, probe: &'a dyn ImageProbe) -> Self {
        Self {
            engine: PlacementEngine::new(canvas, probe),
            theme,
        }
    }

    /// Place and style a slide. Placement warnings go to `warnings`.
    pub fn plan(&self, number: usize, slide: &SlideData, warnings: &mut Vec<String>) -> SlidePlan {
        let layout = self.engine.place(slide, warnings);

        let title_role = if slide.layout_hint == LayoutHint::Title {
            StyleRole::TitleSlideTitle
        } else {
            StyleRole::SlideTitle
        };

        let subtitle = slide
            .subtitle()
            .zip(layout.subtitle_frame)
            .map(|(text, frame)| PlannedText {
                text: text.to_string(),
                frame,
                style: self.theme.style(StyleRole::Subtitle),
            });

        let elements = layout
            .placements
            .into_iter()
            .map(|placement| {
                let role = match (&placement.content, &slide.elements[placement.element]) {
                    (PlacedContent::Chart(_), _) => StyleRole::Chart,
                    (_, element) => StyleRole::for_element(element),
                };
                let header_style = matches!(placement.content, PlacedContent::Table(_))
                    .then(|| self.theme.style(StyleRole::TableHeader));

                PlannedElement {
                    frame: placement.frame,
                    content: placement.content,
                    style: self.theme.style(role),
                    header_style,
                }
            })
            .collect();

        SlidePlan {
            number,
            layout: slide.layout_hint,
            background: self.theme.background_color,
            title: PlannedText {
                text: slide.title.clone(),
                frame: layout.title_frame,
                style: self.theme.style(title_role),
            },
            subtitle,
            elements,
            notes: slide.notes.clone(),
        }
    }

    /// A minimal stand-in slide: the title and an error note.
    pub fn fallback(&self, number: usize, slide: &SlideData, error: &str) -> SlidePlan {
        let canvas = self.engine.canvas();
        let stub = SlideData::new(slide.title.clone());
        let mut ignored = Vec::new();
        let mut plan = self.plan(number, &stub, &mut ignored);

        plan.elements.push(PlannedElement {
            frame: Rect::new(
                canvas.margin_left,
                canvas.margin_top,
                canvas.content_width(),
                ERROR_NOTE_HEIGHT,
            ),
            content: PlacedContent::Paragraph {
                text: format!("[Content generation error: {}]", error),
            },
            style: self.theme.style(StyleRole::ErrorNote),
            header_style: None,
        });

        plan
    }
}
