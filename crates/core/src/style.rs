//! Themes and per-element visual styles.

use crate::error::{Error, Result};
use crate::types::ContentElement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the theme used when none (or an unknown one) is requested.
pub const DEFAULT_THEME: &str = "business";

/// Names of the built-in themes, in display order.
pub const BUILTIN_THEMES: &[&str] = &["business", "tech_dark", "education", "neumorphism"];

/// Monospace font used for code blocks regardless of theme.
pub const CODE_FONT: &str = "Consolas";

/// Font size of the title on a title slide.
const TITLE_SLIDE_TITLE_SIZE: u32 = 44;

/// Font size of a title slide's subtitle.
const SUBTITLE_SIZE: u32 = 24;

/// Font size of the note on a fallback slide.
const ERROR_NOTE_SIZE: u32 = 12;

/// Smallest font size a sub-heading may get.
const MIN_HEADING_SIZE: u32 = 14;

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Colour of the note on a fallback slide.
    pub const ERROR: Rgb = Rgb(200, 100, 100);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colours, fonts and sizes for a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name.
    pub name: String,
    pub background_color: Rgb,
    pub title_color: Rgb,
    pub text_color: Rgb,
    pub accent_color: Rgb,
    pub code_bg_color: Rgb,
    pub title_font: String,
    pub body_font: String,
    /// Sizes are in points.
    pub title_size: u32,
    pub body_size: u32,
    pub code_size: u32,
}

impl Theme {
    /// Look up a built-in theme by its key (`business`, `tech_dark`, ...).
    pub fn builtin(key: &str) -> Option<Theme> {
        let (name, background, title, text, accent, code_bg, title_font, body_font) = match key {
            "business" => (
                "Business",
                Rgb(255, 255, 255),
                Rgb(44, 62, 80),
                Rgb(52, 73, 94),
                Rgb(41, 128, 185),
                Rgb(236, 240, 241),
                "Arial",
                "Arial",
            ),
            "tech_dark" => (
                "Tech Dark",
                Rgb(30, 30, 30),
                Rgb(255, 255, 255),
                Rgb(220, 220, 220),
                Rgb(0, 200, 150),
                Rgb(45, 45, 45),
                "Consolas",
                "Segoe UI",
            ),
            "education" => (
                "Education",
                Rgb(255, 250, 240),
                Rgb(70, 130, 180),
                Rgb(60, 60, 60),
                Rgb(255, 140, 0),
                Rgb(245, 245, 245),
                "Georgia",
                "Verdana",
            ),
            "neumorphism" => (
                "Neumorphism",
                Rgb(240, 243, 249),
                Rgb(45, 55, 72),
                Rgb(74, 85, 104),
                Rgb(66, 153, 225),
                Rgb(226, 232, 240),
                "Arial",
                "Arial",
            ),
            _ => return None,
        };

        Some(Theme {
            name: name.to_string(),
            background_color: background,
            title_color: title,
            text_color: text,
            accent_color: accent,
            code_bg_color: code_bg,
            title_font: title_font.to_string(),
            body_font: body_font.to_string(),
            title_size: 36,
            body_size: 18,
            code_size: 14,
        })
    }

    /// Look up a built-in theme, falling back to the default theme.
    ///
    /// The second value is `false` when the fallback was used.
    pub fn lookup(key: &str) -> (Theme, bool) {
        match Self::builtin(key) {
            Some(theme) => (theme, true),
            None => {
                log::warn!("Unknown theme '{}', using '{}'", key, DEFAULT_THEME);
                (Theme::default(), false)
            }
        }
    }

    /// Parse a theme from its JSON representation.
    pub fn from_json(json: &str) -> Result<Theme> {
        serde_json::from_str(json).map_err(|e| Error::ThemeError(e.to_string()))
    }

    /// Resolve the style for a role under this theme.
    pub fn style(&self, role: StyleRole) -> ElementStyle {
        let body = ElementStyle {
            font_name: self.body_font.clone(),
            font_size: self.body_size,
            color: self.text_color,
            background: None,
            bold: false,
            align: TextAlign::Left,
        };

        match role {
            StyleRole::SlideTitle => ElementStyle {
                font_name: self.title_font.clone(),
                font_size: self.title_size,
                color: self.title_color,
                bold: true,
                ..body
            },
            StyleRole::TitleSlideTitle => ElementStyle {
                font_name: self.title_font.clone(),
                font_size: TITLE_SLIDE_TITLE_SIZE,
                color: self.title_color,
                bold: true,
                align: TextAlign::Center,
                ..body
            },
            StyleRole::Subtitle => ElementStyle {
                font_size: SUBTITLE_SIZE,
                align: TextAlign::Center,
                ..body
            },
            StyleRole::Heading(level) => ElementStyle {
                font_name: self.title_font.clone(),
                font_size: heading_size(self.body_size, level),
                color: self.title_color,
                bold: true,
                ..body
            },
            StyleRole::Paragraph | StyleRole::List | StyleRole::Image => body,
            StyleRole::Code => ElementStyle {
                font_name: CODE_FONT.to_string(),
                font_size: self.code_size,
                background: Some(self.code_bg_color),
                ..body
            },
            StyleRole::TableHeader => ElementStyle {
                font_size: self.body_size.saturating_sub(2),
                color: Rgb::WHITE,
                background: Some(self.accent_color),
                bold: true,
                ..body
            },
            StyleRole::TableBody => ElementStyle {
                font_size: self.body_size.saturating_sub(2),
                ..body
            },
            StyleRole::Chart => ElementStyle {
                background: Some(self.accent_color),
                ..body
            },
            StyleRole::ErrorNote => ElementStyle {
                font_size: ERROR_NOTE_SIZE,
                color: Rgb::ERROR,
                ..body
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(DEFAULT_THEME).expect("default theme is built in")
    }
}

/// `max(14, body + (6 - level) * 2)`.
fn heading_size(body_size: u32, level: u8) -> u32 {
    let steps = 6u32.saturating_sub(u32::from(level));
    (body_size + steps * 2).max(MIN_HEADING_SIZE)
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// What a piece of slide content is, for styling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    SlideTitle,
    TitleSlideTitle,
    Subtitle,
    Heading(u8),
    Paragraph,
    List,
    Code,
    TableHeader,
    TableBody,
    Image,
    Chart,
    ErrorNote,
}

impl StyleRole {
    /// Role of a content element's body.
    pub fn for_element(element: &ContentElement) -> Self {
        match element {
            ContentElement::Heading { level, .. } => Self::Heading(*level),
            ContentElement::Paragraph { .. } => Self::Paragraph,
            ContentElement::BulletList { .. } | ContentElement::NumberedList { .. } => Self::List,
            ContentElement::CodeBlock { .. } => Self::Code,
            ContentElement::Table(_) => Self::TableBody,
            ContentElement::Image { .. } => Self::Image,
            ContentElement::ChartData(_) => Self::Chart,
        }
    }
}

/// Resolved visual style of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub font_name: String,
    /// Points.
    pub font_size: u32,
    pub color: Rgb,
    /// Fill behind the element, if any.
    pub background: Option<Rgb>,
    pub bold: bool,
    pub align: TextAlign,
}
