//! Rendering backend interface and the conversion driver.
//!
//! The core never writes an output format itself. It hands finished slide
//! plans to a [`RenderBackend`] one at a time, in deck order, then asks the
//! backend to finalize its output.

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::media::{FsImageProbe, ImageProbe};
use crate::parse_markdown;
use crate::plan::{SlidePlan, SlidePlanner};
use crate::style::Theme;
use serde::Serialize;
use std::path::Path;

/// Something that turns slide plans into an output artifact.
pub trait RenderBackend {
    /// Called once before the first slide.
    fn begin(&mut self, _canvas: &Canvas, _theme: &Theme) -> Result<()> {
        Ok(())
    }

    /// Render one slide. A failure here is recovered from by rendering a
    /// fallback slide in its place.
    fn render(&mut self, plan: &SlidePlan) -> Result<()>;

    /// Write the finished deck to `output`.
    fn finalize(&mut self, output: &Path) -> Result<()>;
}

/// Progress callback: `(current, total, message)`.
pub type ProgressFn<'a> = Box<dyn FnMut(usize, usize, &str) + 'a>;

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Number of slides handed to the backend.
    pub slide_count: usize,

    /// Parse, placement and render warnings, in that order.
    pub warnings: Vec<String>,
}

/// Converts Markdown into a rendered deck.
pub struct Converter<'a> {
    theme: Theme,
    canvas: Canvas,
    probe: Box<dyn ImageProbe + 'a>,
    progress: Option<ProgressFn<'a>>,
    warnings: Vec<String>,
}

impl Default for Converter<'_> {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            canvas: Canvas::default(),
            probe: Box::new(FsImageProbe::new()),
            progress: None,
            warnings: Vec::new(),
        }
    }
}

impl<'a> Converter<'a> {
    /// Create a converter with the default theme and canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the built-in theme with the given key. Unknown keys fall back
    /// to the default theme and record a warning.
    pub fn with_theme_name(mut self, key: &str) -> Self {
        let (theme, found) = Theme::lookup(key);
        if !found {
            self.warnings
                .push(format!("Unknown theme '{}', using default theme", key));
        }
        self.theme = theme;
        self
    }

    /// Use an explicit theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Use a custom image probe (the default reads local files).
    pub fn with_image_probe(mut self, probe: impl ImageProbe + 'a) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Receive `(current, total, message)` after each slide and once more
    /// after the deck is saved.
    pub fn with_progress(mut self, progress: impl FnMut(usize, usize, &str) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Parse `markdown`, render every slide through `backend` and finalize
    /// the output at `output`.
    ///
    /// Fails if the document yields no slides or the backend cannot
    /// finalize. Per-slide render failures become warnings.
    pub fn convert(
        &mut self,
        markdown: &str,
        backend: &mut dyn RenderBackend,
        output: &Path,
    ) -> Result<Conversion> {
        let parsed = parse_markdown(markdown);
        let mut warnings = self.warnings.clone();
        warnings.extend(parsed.warnings);

        if parsed.slides.is_empty() {
            return Err(Error::NoSlides);
        }

        let planner = SlidePlanner::new(self.canvas, &self.theme, self.probe.as_ref());
        let total = parsed.slides.len();
        log::debug!("Rendering {} slides", total);

        backend.begin(&self.canvas, &self.theme)?;

        for (i, slide) in parsed.slides.iter().enumerate() {
            let number = i + 1;
            let plan = planner.plan(number, slide, &mut warnings);

            if let Err(e) = backend.render(&plan) {
                let warning = format!("Error on slide {}: {}", number, e);
                log::warn!("{}", warning);
                warnings.push(warning);

                let fallback = planner.fallback(number, slide, &e.to_string());
                if let Err(e) = backend.render(&fallback) {
                    let warning = format!("Fallback for slide {} failed: {}", number, e);
                    log::warn!("{}", warning);
                    warnings.push(warning);
                }
            }

            if let Some(progress) = self.progress.as_mut() {
                progress(
                    number,
                    total,
                    &format!("Generating slide {}: {}", number, truncate(&slide.title, 30)),
                );
            }
        }

        backend.finalize(output).map_err(|e| match e {
            Error::FinalizeError(_) => e,
            other => Error::FinalizeError(other.to_string()),
        })?;

        if let Some(progress) = self.progress.as_mut() {
            progress(total, total, &format!("Saved to {}", output.display()));
        }

        Ok(Conversion {
            slide_count: total,
            warnings,
        })
    }
}

/// First `max` characters of `text`, with `...` when shortened.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
