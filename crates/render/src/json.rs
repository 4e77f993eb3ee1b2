//! JSON slide plan output.

use crate::write_file;
use deck_core::{Canvas, RenderBackend, Result, SlidePlan, Theme};
use serde::Serialize;
use std::path::Path;

/// Collects slide plans and writes them as one pretty-printed JSON
/// document: `{ "canvas": ..., "theme": ..., "slides": [...] }`.
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    canvas: Canvas,
    theme: Theme,
    slides: Vec<SlidePlan>,
}

#[derive(Serialize)]
struct Document<'a> {
    canvas: &'a Canvas,
    theme: &'a Theme,
    slides: &'a [SlidePlan],
}

impl JsonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans rendered so far.
    pub fn slides(&self) -> &[SlidePlan] {
        &self.slides
    }

    /// The document as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let document = Document {
            canvas: &self.canvas,
            theme: &self.theme,
            slides: &self.slides,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl RenderBackend for JsonBackend {
    fn begin(&mut self, canvas: &Canvas, theme: &Theme) -> Result<()> {
        self.canvas = *canvas;
        self.theme = theme.clone();
        self.slides.clear();
        Ok(())
    }

    fn render(&mut self, plan: &SlidePlan) -> Result<()> {
        self.slides.push(plan.clone());
        Ok(())
    }

    fn finalize(&mut self, output: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_file(output, &format!("{}\n", json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Converter, FixedImageProbe, ImageInfo};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    const SOURCE: &str = "# Deck\n\nIntro\n\n## Facts\n\n- one\n- two\n";

    #[test]
    fn test_writes_canvas_theme_and_slides() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deck.json");
        let mut backend = JsonBackend::new();

        let result = Converter::new()
            .with_theme_name("tech_dark")
            .with_image_probe(FixedImageProbe(ImageInfo::Unknown))
            .convert(SOURCE, &mut backend, &output)
            .unwrap();
        assert_eq!(result.slide_count, 2);

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

        assert_eq!(written["theme"]["name"], "Tech Dark");
        assert_eq!(written["canvas"]["width"], 12_192_000);
        assert_eq!(written["slides"].as_array().unwrap().len(), 2);
        assert_eq!(written["slides"][0]["layout"], "title");
        assert_eq!(written["slides"][0]["subtitle"]["text"], "Intro");
        assert_eq!(written["slides"][1]["elements"][0]["content"]["type"], "list");
        assert_eq!(
            written["slides"][1]["elements"][0]["content"]["items"][1]["text"],
            "two"
        );
    }

    #[test]
    fn test_written_plans_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deck.json");
        let mut backend = JsonBackend::new();

        Converter::new()
            .with_image_probe(FixedImageProbe(ImageInfo::Unknown))
            .convert(SOURCE, &mut backend, &output)
            .unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let slides: Vec<SlidePlan> = serde_json::from_value(written["slides"].clone()).unwrap();

        assert_eq!(slides, backend.slides());
    }
}
