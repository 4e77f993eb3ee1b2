//! Layout decision for finished slides.

use crate::types::{ContentType, LayoutHint, SlideData};

/// Element count above which a plain slide is split into two columns.
const TWO_COLUMN_THRESHOLD: usize = 4;

/// Maximum element count for an image-led slide.
const IMAGE_LAYOUT_MAX_ELEMENTS: usize = 3;

/// Choose the layout for a slide from its complete element list.
///
/// Title slides keep their layout. For everything else the first matching
/// rule wins:
/// 1. any chart data: `Chart`
/// 2. any image and at most three elements: `Image`
/// 3. any table or code block: `Content`
/// 4. more than four elements: `TwoColumn`
/// 5. otherwise `Content`
pub fn decide_layout(slide: &SlideData) -> LayoutHint {
    if slide.layout_hint == LayoutHint::Title {
        return LayoutHint::Title;
    }

    let element_count = slide.elements.len();

    if slide.has(ContentType::ChartData) {
        LayoutHint::Chart
    } else if slide.has(ContentType::Image) && element_count <= IMAGE_LAYOUT_MAX_ELEMENTS {
        LayoutHint::Image
    } else if slide.has(ContentType::Table) || slide.has(ContentType::CodeBlock) {
        LayoutHint::Content
    } else if element_count > TWO_COLUMN_THRESHOLD {
        LayoutHint::TwoColumn
    } else {
        LayoutHint::Content
    }
}

/// Assign layouts to every slide of a finished deck.
pub fn apply_layouts(slides: &mut [SlideData]) {
    for slide in slides.iter_mut() {
        slide.layout_hint = decide_layout(slide);
        log::debug!("Slide '{}' uses {} layout", slide.title, slide.layout_hint);
    }
}
