//! Markdown to slide deck conversion: block parsing, slide assembly, layout
//! selection, element placement and the rendering backend interface.

pub mod assembler;
pub mod blocks;
pub mod canvas;
pub mod chart;
pub mod error;
pub mod layout;
pub mod media;
pub mod normalize;
pub mod placement;
pub mod plan;
pub mod render;
pub mod style;
pub mod types;

pub use assembler::SlideAssembler;
pub use blocks::{Block, Blocks};
pub use canvas::{Canvas, Emu, Rect};
pub use error::{Error, Result};
pub use media::{FixedImageProbe, FsImageProbe, ImageInfo, ImageProbe};
pub use normalize::SourceNormalizer;
pub use placement::PlacementEngine;
pub use plan::{SlidePlan, SlidePlanner};
pub use render::{Conversion, Converter, RenderBackend};
pub use style::Theme;
pub use types::{
    ChartData, ContentElement, ContentType, LayoutHint, ListItem, ParsedDeck, SlideData, TableData,
};

/// Parse a Markdown document into slides with their layout hints set.
///
/// Never fails: malformed constructs degrade to paragraphs. Skipped remote
/// images are reported in [`ParsedDeck::warnings`].
pub fn parse_markdown(text: &str) -> ParsedDeck {
    let source = SourceNormalizer::new().lines(text);
    let lines: Vec<&str> = source.iter().map(String::as_str).collect();

    let mut assembler = SlideAssembler::new();
    for block in Blocks::new(&lines) {
        log::trace!("Parsed {} block", block.kind_name());
        assembler.push(block);
    }

    let (mut slides, warnings) = assembler.finish();
    layout::apply_layouts(&mut slides);
    log::debug!("Parsed {} slides", slides.len());

    ParsedDeck { slides, warnings }
}
