//! Slide canvas geometry.
//!
//! All lengths are English Metric Units (EMU), the unit presentation
//! formats use natively: 914400 per inch.

use serde::{Deserialize, Serialize};

/// A length in English Metric Units.
pub type Emu = i64;

/// EMU in one inch.
pub const EMU_PER_INCH: Emu = 914_400;

/// Length of `n` hundredths of an inch.
pub const fn hundredths(n: i64) -> Emu {
    n * EMU_PER_INCH / 100
}

/// An axis-aligned box on the slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Rect {
    pub fn new(left: Emu, top: Emu, width: Emu, height: Emu) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> Emu {
        self.top + self.height
    }
}

/// Slide dimensions and content margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: Emu,
    pub height: Emu,
    pub margin_left: Emu,
    pub margin_right: Emu,
    pub margin_top: Emu,
    pub margin_bottom: Emu,
}

impl Default for Canvas {
    /// 16:9 widescreen, 13.333in x 7.5in.
    fn default() -> Self {
        Self {
            width: 12_192_000,
            height: 6_858_000,
            margin_left: hundredths(50),
            margin_right: hundredths(50),
            margin_top: hundredths(120),
            margin_bottom: hundredths(50),
        }
    }
}

impl Canvas {
    /// Width between the left and right margins.
    pub fn content_width(&self) -> Emu {
        self.width - self.margin_left - self.margin_right
    }

    /// The cursor position past which nothing more is placed.
    pub fn content_limit(&self) -> Emu {
        self.height - self.margin_bottom
    }
}
