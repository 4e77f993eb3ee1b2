//! Line-oriented Markdown block scanner.
//!
//! Classifies raw lines into typed blocks. Each scan step starts at a line
//! index, tries a fixed, ordered chain of matchers and returns at most one
//! block together with the index to resume at. Blank lines yield no block.

use crate::types::{ListItem, TableData};
use regex::Regex;
use std::sync::LazyLock;

/// A pipe-table separator row: cells made only of dashes and colons.
static TABLE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?\s*[-:]+\s*\|").unwrap());

/// One to six `#` markers, required whitespace, then the heading text.
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").unwrap());

/// `![alt](path)` anchored at the start of the trimmed line.
static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)").unwrap());

static BULLET_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*+]\s+(\S.*)$").unwrap());

static NUMBERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+(\S.*)$").unwrap());

/// Fence markers that open a code block. A block is closed only by the
/// same marker it was opened with.
const FENCE_MARKERS: &[&str] = &["```", "~~~"];

/// A classified unit of Markdown content, before slide grouping.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Image { alt_text: String, path: String },
    Code { language: String, code: String },
    Table(TableData),
    BulletList(Vec<ListItem>),
    NumberedList(Vec<ListItem>),
    Paragraph(String),
}

impl Block {
    /// Short name used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Image { .. } => "image",
            Block::Code { .. } => "code",
            Block::Table(_) => "table",
            Block::BulletList(_) => "bullet list",
            Block::NumberedList(_) => "numbered list",
            Block::Paragraph(_) => "paragraph",
        }
    }
}

/// Outcome of one scan step.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    /// The block found, or `None` for a skipped blank line.
    pub block: Option<Block>,

    /// Index of the first line not consumed by this step.
    pub next: usize,
}

impl Scan {
    fn block(block: Block, next: usize) -> Self {
        Self {
            block: Some(block),
            next,
        }
    }
}

type Matcher = fn(&[&str], usize) -> Option<Scan>;

/// Matchers in priority order. A later matcher only runs when every
/// earlier one declined the line; reordering changes parse results.
const MATCHERS: &[Matcher] = &[
    scan_code_block,
    scan_table,
    scan_heading,
    scan_image,
    scan_bullet_list,
    scan_numbered_list,
];

/// Scan one block starting at `index`.
///
/// Always consumes at least one line when `index` is in range. Past the
/// end of input, returns no block and `next == index`.
pub fn scan(lines: &[&str], index: usize) -> Scan {
    if index >= lines.len() {
        return Scan {
            block: None,
            next: index,
        };
    }

    MATCHERS
        .iter()
        .find_map(|matcher| matcher(lines, index))
        .unwrap_or_else(|| scan_paragraph(lines, index))
}

/// Iterator over the blocks of a document.
#[derive(Debug, Clone)]
pub struct Blocks<'a, 'b> {
    lines: &'b [&'a str],
    index: usize,
}

impl<'a, 'b> Blocks<'a, 'b> {
    pub fn new(lines: &'b [&'a str]) -> Self {
        Self { lines, index: 0 }
    }
}

impl Iterator for Blocks<'_, '_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        while self.index < self.lines.len() {
            let step = scan(self.lines, self.index);
            self.index = step.next;
            if let Some(block) = step.block {
                return Some(block);
            }
        }
        None
    }
}

/// Which fence marker, if any, the trimmed line starts with.
fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    FENCE_MARKERS
        .iter()
        .copied()
        .find(|marker| trimmed.starts_with(marker))
}

/// Fenced code block. Contents are taken verbatim; an unterminated fence
/// runs to end of input.
fn scan_code_block(lines: &[&str], start: usize) -> Option<Scan> {
    let marker = fence_marker(lines[start])?;
    let language = lines[start].trim()[marker.len()..].trim().to_string();

    let mut code_lines = Vec::new();
    let mut i = start + 1;

    while i < lines.len() {
        if fence_marker(lines[i]) == Some(marker) {
            i += 1;
            break;
        }
        code_lines.push(lines[i]);
        i += 1;
    }

    Some(Scan::block(
        Block::Code {
            language,
            code: code_lines.join("\n"),
        },
        i,
    ))
}

/// Split a table row into trimmed cells, ignoring one optional leading
/// and trailing pipe.
fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Pipe table: header row, separator row, then data rows until a blank
/// line or a line without a pipe.
fn scan_table(lines: &[&str], start: usize) -> Option<Scan> {
    let header = lines[start];
    let separator = lines.get(start + 1)?;

    if !header.contains('|') || !TABLE_SEPARATOR_REGEX.is_match(separator) {
        return None;
    }

    let headers = split_row(header);
    let mut rows = Vec::new();
    let mut i = start + 2;

    while let Some(line) = lines.get(i) {
        let line = line.trim();
        if line.is_empty() || !line.contains('|') {
            break;
        }
        rows.push(split_row(line));
        i += 1;
    }

    Some(Scan::block(Block::Table(TableData { headers, rows }), i))
}

fn scan_heading(lines: &[&str], start: usize) -> Option<Scan> {
    let caps = HEADING_REGEX.captures(lines[start])?;
    // The regex admits at most six markers.
    let level = caps[1].len() as u8;
    let text = caps[2].trim().to_string();

    Some(Scan::block(Block::Heading { level, text }, start + 1))
}

fn scan_image(lines: &[&str], start: usize) -> Option<Scan> {
    let caps = IMAGE_REGEX.captures(lines[start].trim())?;

    Some(Scan::block(
        Block::Image {
            alt_text: caps[1].to_string(),
            path: caps[2].to_string(),
        },
        start + 1,
    ))
}

fn scan_bullet_list(lines: &[&str], start: usize) -> Option<Scan> {
    let (items, next) = scan_list(lines, start, &BULLET_ITEM_REGEX)?;
    Some(Scan::block(Block::BulletList(items), next))
}

fn scan_numbered_list(lines: &[&str], start: usize) -> Option<Scan> {
    let (items, next) = scan_list(lines, start, &NUMBERED_ITEM_REGEX)?;
    Some(Scan::block(Block::NumberedList(items), next))
}

/// Consume consecutive list items matching `item_regex`.
///
/// A blank line is tolerated only when the line right after it is another
/// item of the same kind.
fn scan_list(lines: &[&str], start: usize, item_regex: &Regex) -> Option<(Vec<ListItem>, usize)> {
    if !item_regex.is_match(lines[start]) {
        return None;
    }

    let mut items = Vec::new();
    let mut i = start;

    while i < lines.len() {
        if let Some(caps) = item_regex.captures(lines[i]) {
            let indent = caps[1].chars().count() / 2;
            items.push(ListItem::new(caps[2].trim(), indent));
            i += 1;
        } else if lines[i].trim().is_empty() {
            i += 1;
            if lines.get(i).is_some_and(|next| item_regex.is_match(next)) {
                continue;
            }
            break;
        } else {
            break;
        }
    }

    Some((items, i))
}

/// Fallback: a non-blank line is a one-line paragraph; blank lines are
/// skipped.
fn scan_paragraph(lines: &[&str], start: usize) -> Scan {
    let text = lines[start].trim();
    Scan {
        block: (!text.is_empty()).then(|| Block::Paragraph(text.to_string())),
        next: start + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(source: &str) -> Vec<Block> {
        let lines: Vec<&str> = source.split('\n').collect();
        Blocks::new(&lines).collect()
    }

    fn items(pairs: &[(&str, usize)]) -> Vec<ListItem> {
        pairs
            .iter()
            .map(|(text, indent)| ListItem::new(*text, *indent))
            .collect()
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            blocks("# One\n###### Six"),
            vec![
                Block::Heading {
                    level: 1,
                    text: "One".into()
                },
                Block::Heading {
                    level: 6,
                    text: "Six".into()
                },
            ]
        );
    }

    #[test]
    fn test_heading_requires_whitespace_and_at_most_six_markers() {
        assert_eq!(blocks("#Tag"), vec![Block::Paragraph("#Tag".into())]);
        assert_eq!(
            blocks("####### Seven"),
            vec![Block::Paragraph("####### Seven".into())]
        );
    }

    #[test]
    fn test_code_block_with_language() {
        let source = "```rust\nfn main() {\n    # not a heading\n}\n```\nafter";
        assert_eq!(
            blocks(source),
            vec![
                Block::Code {
                    language: "rust".into(),
                    code: "fn main() {\n    # not a heading\n}".into()
                },
                Block::Paragraph("after".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_code_block_runs_to_end() {
        let lines = ["```", "a", "- b"];
        let step = scan(&lines, 0);

        assert_eq!(step.next, 3);
        assert_eq!(
            step.block,
            Some(Block::Code {
                language: String::new(),
                code: "a\n- b".into()
            })
        );
    }

    #[test]
    fn test_tilde_fence_is_not_closed_by_backticks() {
        let source = "~~~\n```\ncode\n~~~";
        assert_eq!(
            blocks(source),
            vec![Block::Code {
                language: String::new(),
                code: "```\ncode".into()
            }]
        );
    }

    #[test]
    fn test_table() {
        let source = "| A | B |\n|---|:-:|\n| 1 | 2 |\n| 3 | 4 |\n\ntext";
        assert_eq!(
            blocks(source),
            vec![
                Block::Table(TableData {
                    headers: vec!["A".into(), "B".into()],
                    rows: vec![
                        vec!["1".into(), "2".into()],
                        vec!["3".into(), "4".into()],
                    ],
                }),
                Block::Paragraph("text".into()),
            ]
        );
    }

    #[test]
    fn test_table_without_outer_pipes() {
        let source = "A | B\n--- | ---\n1 | 2\nnext";
        let parsed = blocks(source);

        assert_eq!(
            parsed[0],
            Block::Table(TableData {
                headers: vec!["A".into(), "B".into()],
                rows: vec![vec!["1".into(), "2".into()]],
            })
        );
        assert_eq!(parsed[1], Block::Paragraph("next".into()));
    }

    #[test]
    fn test_table_without_separator_falls_through_to_paragraph() {
        assert_eq!(
            blocks("| A | B |\n| 1 | 2 |"),
            vec![
                Block::Paragraph("| A | B |".into()),
                Block::Paragraph("| 1 | 2 |".into()),
            ]
        );
    }

    #[test]
    fn test_table_takes_priority_over_heading() {
        // A pipe in a heading line followed by a separator is a table.
        let parsed = blocks("# A | B\n|---|---|");
        assert!(matches!(parsed[0], Block::Table(_)));
    }

    #[test]
    fn test_image() {
        assert_eq!(
            blocks("  ![A diagram](img/arch.png) trailing"),
            vec![Block::Image {
                alt_text: "A diagram".into(),
                path: "img/arch.png".into()
            }]
        );
    }

    #[test]
    fn test_bullet_list_indents() {
        let source = "- zero\n - one space\n  - two\n   - three\n    - four";
        assert_eq!(
            blocks(source),
            vec![Block::BulletList(items(&[
                ("zero", 0),
                ("one space", 0),
                ("two", 1),
                ("three", 1),
                ("four", 2),
            ]))]
        );
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(
            blocks("- a\n* b\n+ c"),
            vec![Block::BulletList(items(&[("a", 0), ("b", 0), ("c", 0)]))]
        );
    }

    #[test]
    fn test_list_continues_across_blank_only_before_item() {
        let source = "- a\n\n- b\n\nparagraph";
        assert_eq!(
            blocks(source),
            vec![
                Block::BulletList(items(&[("a", 0), ("b", 0)])),
                Block::Paragraph("paragraph".into()),
            ]
        );
    }

    #[test]
    fn test_list_stops_at_other_kind() {
        let source = "- a\n1. b";
        assert_eq!(
            blocks(source),
            vec![
                Block::BulletList(items(&[("a", 0)])),
                Block::NumberedList(items(&[("b", 0)])),
            ]
        );
    }

    #[test]
    fn test_numbered_list() {
        let source = "1. first\n2. second\n  10. nested";
        assert_eq!(
            blocks(source),
            vec![Block::NumberedList(items(&[
                ("first", 0),
                ("second", 0),
                ("nested", 1),
            ]))]
        );
    }

    #[test]
    fn test_bare_marker_is_paragraph() {
        assert_eq!(blocks("- "), vec![Block::Paragraph("-".into())]);
        assert_eq!(blocks("-  "), vec![Block::Paragraph("-".into())]);
        assert_eq!(blocks("*\t "), vec![Block::Paragraph("*".into())]);
        assert_eq!(blocks("1.  "), vec![Block::Paragraph("1.".into())]);
    }

    #[test]
    fn test_whitespace_only_item_ends_list() {
        assert_eq!(
            blocks("- a\n-   \n- b"),
            vec![
                Block::BulletList(items(&[("a", 0)])),
                Block::Paragraph("-".into()),
                Block::BulletList(items(&[("b", 0)])),
            ]
        );
    }

    #[test]
    fn test_heading_needs_text() {
        assert_eq!(blocks("#  "), vec![Block::Paragraph("#".into())]);
        assert_eq!(blocks("##   "), vec![Block::Paragraph("##".into())]);
    }

    #[test]
    fn test_blank_lines_yield_nothing() {
        let lines = ["", "   "];
        assert_eq!(
            scan(&lines, 0),
            Scan {
                block: None,
                next: 1
            }
        );
        assert!(blocks("\n  \n").is_empty());
    }

    #[test]
    fn test_scan_past_end() {
        let lines = ["x"];
        assert_eq!(
            scan(&lines, 5),
            Scan {
                block: None,
                next: 5
            }
        );
    }
}
