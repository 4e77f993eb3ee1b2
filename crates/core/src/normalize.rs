//! Source text preparation.
//!
//! Handles byte-order marks, line ending normalization and Unicode
//! composition before the block parser ever sees a line.

use unicode_normalization::UnicodeNormalization;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Prepares raw Markdown for line-oriented parsing.
#[derive(Debug, Clone)]
pub struct SourceNormalizer {
    /// Whether to apply Unicode NFC composition.
    compose_unicode: bool,
}

impl Default for SourceNormalizer {
    fn default() -> Self {
        Self {
            compose_unicode: true,
        }
    }
}

impl SourceNormalizer {
    /// Create a new normalizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to apply Unicode NFC composition.
    pub fn with_compose_unicode(mut self, compose: bool) -> Self {
        self.compose_unicode = compose;
        self
    }

    /// Normalize a whole document.
    ///
    /// - Strips a leading byte-order mark
    /// - Converts `\r\n` and lone `\r` to `\n`
    /// - Composes decomposed characters (NFC) so `é` is one char
    pub fn normalize(&self, text: &str) -> String {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        if self.compose_unicode {
            text.nfc().collect()
        } else {
            text
        }
    }

    /// Normalize a document and split it into lines.
    ///
    /// Splitting is on `\n` only, so a trailing newline yields a final
    /// empty line, which the parser skips as blank.
    pub fn lines(&self, text: &str) -> Vec<String> {
        self.normalize(text).split('\n').map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        let normalizer = SourceNormalizer::new();

        assert_eq!(normalizer.normalize("a\r\nb"), "a\nb");
        assert_eq!(normalizer.normalize("a\rb"), "a\nb");
        assert_eq!(normalizer.normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_strip_bom() {
        let normalizer = SourceNormalizer::new();
        assert_eq!(normalizer.normalize("\u{feff}# Title"), "# Title");
    }

    #[test]
    fn test_unicode_composition() {
        let normalizer = SourceNormalizer::new();
        let decomposed = "Cafe\u{301}";

        assert_eq!(normalizer.normalize(decomposed), "Caf\u{e9}");
        assert_eq!(
            normalizer
                .clone()
                .with_compose_unicode(false)
                .normalize(decomposed),
            decomposed
        );
    }

    #[test]
    fn test_lines_keep_trailing_empty_line() {
        let normalizer = SourceNormalizer::new();
        assert_eq!(normalizer.lines("one\r\ntwo\n"), vec!["one", "two", ""]);
    }
}
