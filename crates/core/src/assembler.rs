//! Groups a block stream into slides.
//!
//! Level 1 and 2 headings open slides; everything else lands on the slide
//! that is currently open. The open slide is explicit state owned by the
//! assembler value, so each document gets a fresh one.

use crate::blocks::Block;
use crate::types::{ContentElement, LayoutHint, SlideData};

/// Title given to a slide opened by content that precedes any heading.
pub const UNTITLED_SLIDE_TITLE: &str = "Untitled";

/// URL schemes that mark an image reference as non-local.
const REMOTE_IMAGE_PREFIXES: &[&str] = &["http://", "https://", "data:"];

/// Whether an image path points at the local file system.
pub fn is_local_image(path: &str) -> bool {
    !REMOTE_IMAGE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Stateful slide builder fed one block at a time.
#[derive(Debug, Default)]
pub struct SlideAssembler {
    current: Option<SlideData>,
    slides: Vec<SlideData>,
    warnings: Vec<String>,
}

impl SlideAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one block.
    pub fn push(&mut self, block: Block) {
        match block {
            Block::Heading { level, text } if level <= 2 => self.open_slide(level, text),
            Block::Heading { level, text } => {
                self.current_slide()
                    .push(ContentElement::Heading { text, level });
            }
            Block::Paragraph(text) => self.add_paragraph(text),
            Block::Image { alt_text, path } => self.add_image(path, alt_text),
            Block::Code { language, code } => {
                self.current_slide()
                    .push(ContentElement::CodeBlock { code, language });
            }
            Block::Table(table) => self.current_slide().push(ContentElement::Table(table)),
            Block::BulletList(items) => {
                self.current_slide()
                    .push(ContentElement::BulletList { items });
            }
            Block::NumberedList(items) => {
                self.current_slide()
                    .push(ContentElement::NumberedList { items });
            }
        }
    }

    /// Close the open slide and return the deck with its warnings.
    pub fn finish(mut self) -> (Vec<SlideData>, Vec<String>) {
        if let Some(slide) = self.current.take() {
            self.slides.push(slide);
        }
        (self.slides, self.warnings)
    }

    /// Finalize the open slide (if any) and start a new one.
    fn open_slide(&mut self, level: u8, title: String) {
        if let Some(slide) = self.current.take() {
            log::debug!("Closing slide '{}' with {} elements", slide.title, slide.elements.len());
            self.slides.push(slide);
        }

        self.current = Some(if level == 1 {
            SlideData::title_slide(title)
        } else {
            SlideData::new(title)
        });
    }

    /// The open slide, lazily creating an untitled one.
    fn current_slide(&mut self) -> &mut SlideData {
        self.current
            .get_or_insert_with(|| SlideData::new(UNTITLED_SLIDE_TITLE))
    }

    /// The first paragraph of a still-empty title slide is its subtitle.
    fn add_paragraph(&mut self, text: String) {
        let slide = self.current_slide();

        if slide.layout_hint == LayoutHint::Title
            && slide.subtitle.is_empty()
            && slide.elements.is_empty()
        {
            slide.subtitle = text;
        } else {
            slide.push(ContentElement::Paragraph { text });
        }
    }

    fn add_image(&mut self, path: String, alt_text: String) {
        // A dropped image still opens the untitled slide.
        self.current_slide();

        if !is_local_image(&path) {
            let warning = format!("Skipped non-local image: {}", path);
            log::warn!("{}", warning);
            self.warnings.push(warning);
            return;
        }

        self.current_slide()
            .push(ContentElement::Image { path, alt_text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, ListItem, TableData};

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    fn assemble(blocks: Vec<Block>) -> (Vec<SlideData>, Vec<String>) {
        let mut assembler = SlideAssembler::new();
        for block in blocks {
            assembler.push(block);
        }
        assembler.finish()
    }

    #[test]
    fn test_headings_open_slides_in_order() {
        let (slides, _) = assemble(vec![
            heading(1, "Deck"),
            heading(2, "First"),
            heading(2, "Second"),
        ]);

        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Deck", "First", "Second"]);
        assert_eq!(slides[0].layout_hint, LayoutHint::Title);
        assert_eq!(slides[1].layout_hint, LayoutHint::Content);
    }

    #[test]
    fn test_first_paragraph_of_title_slide_is_subtitle() {
        let (slides, _) = assemble(vec![
            heading(1, "Deck"),
            Block::Paragraph("Subtitle".into()),
            Block::Paragraph("Body".into()),
        ]);

        assert_eq!(slides[0].subtitle, "Subtitle");
        assert_eq!(slides[0].elements, vec![ContentElement::paragraph("Body")]);
    }

    #[test]
    fn test_subtitle_requires_empty_slide() {
        let (slides, _) = assemble(vec![
            heading(1, "Deck"),
            heading(3, "Section"),
            Block::Paragraph("Not a subtitle".into()),
        ]);

        assert!(slides[0].subtitle.is_empty());
        assert_eq!(slides[0].elements.len(), 2);
    }

    #[test]
    fn test_level_two_slide_never_gets_subtitle() {
        let (slides, _) = assemble(vec![heading(2, "Points"), Block::Paragraph("Text".into())]);

        assert!(slides[0].subtitle.is_empty());
        assert_eq!(slides[0].elements, vec![ContentElement::paragraph("Text")]);
    }

    #[test]
    fn test_content_before_heading_opens_untitled_slide() {
        let (slides, _) = assemble(vec![
            Block::BulletList(vec![ListItem::new("a", 0)]),
            heading(2, "Next"),
        ]);

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, UNTITLED_SLIDE_TITLE);
        assert_eq!(slides[0].elements[0].content_type(), ContentType::BulletList);
    }

    #[test]
    fn test_sub_heading_keeps_level() {
        let (slides, _) = assemble(vec![heading(2, "Slide"), heading(4, "Detail")]);

        assert_eq!(
            slides[0].elements,
            vec![ContentElement::Heading {
                text: "Detail".into(),
                level: 4
            }]
        );
    }

    #[test]
    fn test_remote_images_are_dropped_with_one_warning_each() {
        let image = |path: &str| Block::Image {
            alt_text: String::new(),
            path: path.into(),
        };
        let (slides, warnings) = assemble(vec![
            heading(2, "Pictures"),
            image("http://example.com/a.png"),
            image("https://example.com/b.png"),
            image("data:image/png;base64,AAAA"),
            image("local.png"),
        ]);

        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0], "Skipped non-local image: http://example.com/a.png");
        assert_eq!(
            slides[0].elements,
            vec![ContentElement::Image {
                path: "local.png".into(),
                alt_text: String::new()
            }]
        );
    }

    #[test]
    fn test_dropped_image_still_opens_untitled_slide() {
        let (slides, warnings) = assemble(vec![Block::Image {
            alt_text: String::new(),
            path: "https://example.com/x.png".into(),
        }]);

        assert_eq!(slides.len(), 1);
        assert!(slides[0].elements.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_elements_keep_source_order() {
        let (slides, _) = assemble(vec![
            heading(2, "Mixed"),
            Block::Code {
                language: "sh".into(),
                code: "ls".into(),
            },
            Block::Table(TableData::default()),
            Block::NumberedList(vec![ListItem::new("x", 0)]),
        ]);

        let kinds: Vec<_> = slides[0]
            .elements
            .iter()
            .map(ContentElement::content_type)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ContentType::CodeBlock,
                ContentType::Table,
                ContentType::NumberedList
            ]
        );
    }

    #[test]
    fn test_is_local_image() {
        assert!(is_local_image("images/a.png"));
        assert!(is_local_image("/abs/a.png"));
        assert!(!is_local_image("http://x/a.png"));
        assert!(!is_local_image("data:image/png;base64,"));
    }
}
