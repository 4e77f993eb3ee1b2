//! Domain types for representing a parsed slide deck.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of content kinds a slide element can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Heading,
    Paragraph,
    BulletList,
    NumberedList,
    CodeBlock,
    Table,
    Image,
    ChartData,
}

impl ContentType {
    /// Stable lowercase name, as used in serialized plans.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::BulletList => "bullet_list",
            Self::NumberedList => "numbered_list",
            Self::CodeBlock => "code_block",
            Self::Table => "table",
            Self::Image => "image",
            Self::ChartData => "chart_data",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a bullet or numbered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text with the marker removed.
    pub text: String,

    /// Nesting level: leading whitespace length floor-divided by 2.
    pub indent: usize,
}

impl ListItem {
    /// Create a new list item.
    pub fn new(text: impl Into<String>, indent: usize) -> Self {
        Self {
            text: text.into(),
            indent,
        }
    }
}

/// Header and body cells of a pipe table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Whether the table has a header row.
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Number of columns, taken from the header or else the first row.
    pub fn column_count(&self) -> usize {
        if self.has_header() {
            self.headers.len()
        } else {
            self.rows.first().map_or(0, Vec::len)
        }
    }

    /// Number of rendered rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(self.has_header())
    }
}

/// A single named series of numeric chart values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Category/series chart data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// A typed content element of a slide.
///
/// Each variant carries the payload for its content type, including the
/// heading level, code language and image alt text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentElement {
    Heading { text: String, level: u8 },
    Paragraph { text: String },
    BulletList { items: Vec<ListItem> },
    NumberedList { items: Vec<ListItem> },
    CodeBlock { code: String, language: String },
    Table(TableData),
    Image { path: String, alt_text: String },
    ChartData(ChartData),
}

impl ContentElement {
    /// The content type of this element.
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Heading { .. } => ContentType::Heading,
            Self::Paragraph { .. } => ContentType::Paragraph,
            Self::BulletList { .. } => ContentType::BulletList,
            Self::NumberedList { .. } => ContentType::NumberedList,
            Self::CodeBlock { .. } => ContentType::CodeBlock,
            Self::Table(_) => ContentType::Table,
            Self::Image { .. } => ContentType::Image,
            Self::ChartData(_) => ContentType::ChartData,
        }
    }

    /// Shorthand for a paragraph element.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }
}

/// The visual template chosen for a slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutHint {
    Title,
    #[default]
    Content,
    TwoColumn,
    Image,
    Chart,
}

impl LayoutHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::TwoColumn => "two_column",
            Self::Image => "image",
            Self::Chart => "chart",
        }
    }
}

impl fmt::Display for LayoutHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data for a single slide, in the order its content was encountered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideData {
    pub title: String,

    /// Only ever set on a `Title` slide, from the first paragraph seen
    /// while the slide still had no elements.
    pub subtitle: String,

    /// Content elements in source order.
    pub elements: Vec<ContentElement>,

    pub layout_hint: LayoutHint,

    /// Speaker notes.
    pub notes: String,
}

impl SlideData {
    /// Create a new content slide with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create a new title slide.
    pub fn title_slide(title: impl Into<String>) -> Self {
        Self {
            layout_hint: LayoutHint::Title,
            ..Self::new(title)
        }
    }

    /// Append an element, keeping source order.
    pub fn push(&mut self, element: ContentElement) {
        self.elements.push(element);
    }

    /// Whether any element has the given content type.
    pub fn has(&self, content_type: ContentType) -> bool {
        self.elements
            .iter()
            .any(|e| e.content_type() == content_type)
    }

    /// Subtitle, if one was captured.
    pub fn subtitle(&self) -> Option<&str> {
        Some(self.subtitle.as_str()).filter(|s| !s.is_empty())
    }
}

/// Result of parsing a Markdown document: the deck plus any warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDeck {
    /// Slides in document order.
    pub slides: Vec<SlideData>,

    /// Warnings recorded while parsing, in encounter order.
    pub warnings: Vec<String>,
}

impl ParsedDeck {
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_row_count_includes_header() {
        let table = TableData {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]],
        };
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);

        let headless = TableData {
            headers: Vec::new(),
            rows: vec![vec!["1".into(), "2".into(), "3".into()]],
        };
        assert_eq!(headless.row_count(), 1);
        assert_eq!(headless.column_count(), 3);
    }

    #[test]
    fn test_element_content_type() {
        assert_eq!(
            ContentElement::paragraph("hi").content_type(),
            ContentType::Paragraph
        );
        assert_eq!(
            ContentElement::Table(TableData::default()).content_type(),
            ContentType::Table
        );
    }

    #[test]
    fn test_element_serializes_with_type_tag() {
        let element = ContentElement::Heading {
            text: "Intro".into(),
            level: 3,
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 3);
    }

    #[test]
    fn test_subtitle_accessor() {
        let mut slide = SlideData::title_slide("Deck");
        assert_eq!(slide.subtitle(), None);
        slide.subtitle = "Sub".into();
        assert_eq!(slide.subtitle(), Some("Sub"));
    }

    #[test]
    fn test_layout_hint_names() {
        assert_eq!(LayoutHint::TwoColumn.to_string(), "two_column");
        assert_eq!(LayoutHint::default(), LayoutHint::Content);
    }
}
