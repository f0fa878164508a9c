//! Doc comment parser: ordered classification over a forward line cursor.
//!
//! The grammar is small: paragraphs, `#` headings bracketed by
//! blank lines, bulleted or numbered lists, indented code blocks, and `+`
//! directives. Anything unrecognized falls back to a paragraph, so parsing
//! never fails.

use crate::model::{Document, Element};
use regex::Regex;
use std::sync::LazyLock;

// Bullet glyph, or a letter/digit run closed by `.` or `)`, then one blank.
static RE_LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[*+\-•]|[\p{L}\p{Nd}]+[.)])[ \t]").unwrap());

const INDENT: [char; 2] = [' ', '\t'];

// -- Scanner ------------------------------------------------------------------

/// Lines of the input plus a cursor that only moves forward.
struct Scanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            lines: text.split('\n').collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Line before the cursor, without moving.
    fn behind(&self) -> Option<&'a str> {
        self.pos.checked_sub(1).and_then(|i| self.lines.get(i).copied())
    }

    /// Line after the cursor, without moving.
    fn ahead(&self) -> Option<&'a str> {
        self.lines.get(self.pos + 1).copied()
    }
}

// -- Classification -----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Blank,
    List,
    Code,
    Directive,
    Heading,
    Paragraph,
}

/// Decide what starts at `line`. Order matters: list items may be indented,
/// so they are tested before code blocks.
fn classify(line: &str, before: Option<&str>, after: Option<&str>) -> Block {
    if is_blank(line) {
        Block::Blank
    } else if list_marker_end(line).is_some() {
        Block::List
    } else if line.starts_with(INDENT) {
        Block::Code
    } else if line.starts_with('+') {
        Block::Directive
    } else if is_heading(line, before, after) {
        Block::Heading
    } else {
        Block::Paragraph
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of leading spaces and tabs.
fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches(INDENT).len()
}

/// Byte offset just past a list marker and its following blank, if `line`
/// is a list item.
fn list_marker_end(line: &str) -> Option<usize> {
    let trimmed = line.trim_start_matches(INDENT);
    RE_LIST_MARKER
        .find(trimmed)
        .map(|m| line.len() - trimmed.len() + m.end())
}

/// A heading needs a blank line on both sides, so the first and last lines
/// of the input never qualify. `#` alone and `#text` are not headings.
fn is_heading(line: &str, before: Option<&str>, after: Option<&str>) -> bool {
    let (Some(before), Some(after)) = (before, after) else {
        return false;
    };
    if !is_blank(before) || !is_blank(after) {
        return false;
    }
    line.starts_with('#') && line.trim_start_matches('#').starts_with(' ')
}

// -- Public API ---------------------------------------------------------------

/// Parse one raw doc comment into a [`Document`].
pub fn parse(text: &str) -> Document {
    let mut scanner = Scanner::new(text);
    let mut elements = Vec::new();

    while let Some(line) = scanner.peek() {
        match classify(line, scanner.behind(), scanner.ahead()) {
            Block::Blank => scanner.advance(),
            Block::List => elements.push(parse_list(&mut scanner)),
            Block::Code => elements.push(parse_code_block(&mut scanner)),
            Block::Directive => {
                scanner.advance();
                elements.push(Element::Directive(line.to_string()));
            }
            Block::Heading => {
                scanner.advance();
                let text = line.trim_start_matches('#').trim();
                elements.push(Element::Heading(text.to_string()));
            }
            Block::Paragraph => elements.push(parse_paragraph(&mut scanner)),
        }
    }

    Document { elements }
}

// -- Sub-parsers --------------------------------------------------------------

fn parse_list(s: &mut Scanner) -> Element {
    let mut items = Vec::new();

    while let Some(line) = s.peek() {
        let Some(marker_end) = list_marker_end(line) else {
            break;
        };
        let text = line[marker_end..].trim_start_matches(INDENT);
        // Column counted in chars: `•` is one column but three bytes.
        let text_indent = line[..line.len() - text.len()].chars().count();
        let mut item = text.to_string();
        s.advance();

        while let Some(next) = s.peek() {
            if is_blank(next) || list_marker_end(next).is_some() {
                break;
            }
            if indent_width(next) < text_indent {
                break;
            }
            // The stripped prefix is all spaces/tabs, so bytes == chars here.
            item.push('\n');
            item.push_str(&next[text_indent..]);
            s.advance();
        }
        items.push(item);
    }

    Element::List(items)
}

fn parse_code_block(s: &mut Scanner) -> Element {
    let width = s.peek().map(indent_width).unwrap_or(0);
    let mut lines = Vec::new();

    while let Some(line) = s.peek() {
        if !is_blank(line) && !line.starts_with(INDENT) {
            break;
        }
        lines.push(dedent(line, width));
        s.advance();
    }

    Element::CodeBlock(lines.join("\n"))
}

/// Drop the first `width` chars, or keep the line whole if it is shorter.
fn dedent(line: &str, width: usize) -> &str {
    let offset = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(width);
    match offset {
        Some(at) => &line[at..],
        None => line,
    }
}

fn parse_paragraph(s: &mut Scanner) -> Element {
    let mut lines = Vec::new();

    while let Some(line) = s.peek() {
        if is_blank(line) || line.starts_with('+') {
            break;
        }
        lines.push(line);
        s.advance();
    }

    Element::Paragraph(lines.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> Element {
        Element::Paragraph(text.to_string())
    }

    fn h(text: &str) -> Element {
        Element::Heading(text.to_string())
    }

    fn list(items: &[&str]) -> Element {
        Element::List(items.iter().map(|s| s.to_string()).collect())
    }

    fn code(text: &str) -> Element {
        Element::CodeBlock(text.to_string())
    }

    fn d(text: &str) -> Element {
        Element::Directive(text.to_string())
    }

    fn elements(input: &str) -> Vec<Element> {
        parse(input).elements
    }

    // -- paragraphs --

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn blank_only_input() {
        assert!(parse("\n   \n\t\n\n").is_empty());
    }

    #[test]
    fn simple_paragraph() {
        assert_eq!(
            elements("This is a simple paragraph."),
            vec![p("This is a simple paragraph.")]
        );
    }

    #[test]
    fn multiple_paragraphs() {
        assert_eq!(
            elements("Paragraph one.\n\nParagraph two."),
            vec![p("Paragraph one."), p("Paragraph two.")]
        );
    }

    #[test]
    fn paragraph_lines_joined_with_space() {
        assert_eq!(
            elements("This is a line with a colon:\nbut it's part of a paragraph."),
            vec![p("This is a line with a colon: but it's part of a paragraph.")]
        );
    }

    #[test]
    fn paragraph_stops_at_directive() {
        assert_eq!(
            elements("Deprecated field.\n+optional\n+listType=atomic"),
            vec![p("Deprecated field."), d("+optional"), d("+listType=atomic")]
        );
    }

    // -- headings --

    #[test]
    fn heading_bracketed_by_blank_lines() {
        assert_eq!(elements("\n# This is a heading\n"), vec![h("This is a heading")]);
    }

    #[test]
    fn heading_with_several_markers() {
        assert_eq!(elements("\n#### This is a heading\n"), vec![h("This is a heading")]);
    }

    #[test]
    fn heading_without_blank_neighbours_is_paragraph() {
        assert_eq!(elements("# not a heading"), vec![p("# not a heading")]);
    }

    #[test]
    fn bare_hash_is_paragraph() {
        assert_eq!(elements("\n#\n"), vec![p("#")]);
    }

    #[test]
    fn hash_without_space_is_paragraph() {
        assert_eq!(elements("\n#text\n"), vec![p("#text")]);
    }

    #[test]
    fn heading_on_last_line_is_paragraph() {
        assert_eq!(elements("\n# text"), vec![p("# text")]);
    }

    #[test]
    fn heading_on_first_line_is_paragraph() {
        assert_eq!(elements("# text\n\nbody"), vec![p("# text"), p("body")]);
    }

    #[test]
    fn heading_requires_blank_line_after() {
        assert_eq!(
            elements("Intro.\n\n# Title\nbody"),
            vec![p("Intro."), p("# Title body")]
        );
    }

    #[test]
    fn heading_accepts_whitespace_only_neighbours() {
        assert_eq!(elements("  \n## Usage  \n\t"), vec![h("Usage")]);
    }

    // -- lists --

    #[test]
    fn bulleted_list() {
        assert_eq!(elements("* item 1\n* item 2"), vec![list(&["item 1", "item 2"])]);
    }

    #[test]
    fn every_bullet_glyph() {
        assert_eq!(
            elements("* a\n+ b\n- c\n• d"),
            vec![list(&["a", "b", "c", "d"])]
        );
    }

    #[test]
    fn numbered_list() {
        assert_eq!(elements("1. item 1\na) item 2"), vec![list(&["item 1", "item 2"])]);
    }

    #[test]
    fn multi_digit_marker() {
        assert_eq!(elements("9. nine\n10. ten"), vec![list(&["nine", "ten"])]);
    }

    #[test]
    fn abbreviation_is_not_a_marker() {
        assert_eq!(elements("e.g. this one"), vec![p("e.g. this one")]);
    }

    #[test]
    fn marker_without_blank_is_not_a_list() {
        assert_eq!(elements("-flag"), vec![p("-flag")]);
    }

    #[test]
    fn list_with_multi_line_items() {
        assert_eq!(
            elements("* item 1\n  more text for item 1\n* item 2"),
            vec![list(&["item 1\nmore text for item 1", "item 2"])]
        );
    }

    #[test]
    fn continuation_keeps_extra_indent() {
        assert_eq!(
            elements("- item\n    deeper"),
            vec![list(&["item\n  deeper"])]
        );
    }

    #[test]
    fn blank_line_splits_lists() {
        assert_eq!(
            elements("* item 1\n\n* item 2"),
            vec![list(&["item 1"]), list(&["item 2"])]
        );
    }

    #[test]
    fn shallow_line_ends_item_and_list() {
        assert_eq!(
            elements("1. first\n   more\n  less"),
            vec![list(&["first\nmore"]), code("less")]
        );
    }

    #[test]
    fn unindented_line_after_item_ends_list() {
        assert_eq!(
            elements("* item\nafterwards"),
            vec![list(&["item"]), p("afterwards")]
        );
    }

    #[test]
    fn multi_byte_bullet_continuation_uses_columns() {
        assert_eq!(
            elements("• item one\n  continued\n• item two"),
            vec![list(&["item one\ncontinued", "item two"])]
        );
    }

    #[test]
    fn tab_separated_marker() {
        assert_eq!(elements("-\titem\n\t\tcont"), vec![list(&["item\ncont"])]);
    }

    #[test]
    fn indented_list_item_is_list_not_code() {
        assert_eq!(
            elements("  * nested\n    wrapped"),
            vec![list(&["nested\nwrapped"])]
        );
    }

    #[test]
    fn plus_bullet_is_list_not_directive() {
        assert_eq!(elements("+ item"), vec![list(&["item"])]);
    }

    #[test]
    fn empty_item_text() {
        assert_eq!(elements("* \n* b"), vec![list(&["", "b"])]);
    }

    // -- code blocks --

    #[test]
    fn code_block() {
        assert_eq!(
            elements("  code line 1\n  code line 2"),
            vec![code("code line 1\ncode line 2")]
        );
    }

    #[test]
    fn code_block_with_blank_lines() {
        assert_eq!(elements("  line 1\n  \n  line 3"), vec![code("line 1\n\nline 3")]);
    }

    #[test]
    fn code_block_followed_by_paragraph() {
        assert_eq!(elements("  code\n\npara"), vec![code("code\n"), p("para")]);
    }

    #[test]
    fn code_block_keeps_relative_indent() {
        assert_eq!(
            elements("    if x {\n        y()\n    }"),
            vec![code("if x {\n    y()\n}")]
        );
    }

    #[test]
    fn code_block_short_line_kept_as_is() {
        assert_eq!(elements("    a\n  b"), vec![code("a\n  b")]);
    }

    #[test]
    fn code_block_runs_to_end_of_input() {
        assert_eq!(
            elements("text\n\n    a\n      b\n"),
            vec![p("text"), code("a\n  b\n")]
        );
    }

    #[test]
    fn code_block_with_tabs() {
        assert_eq!(elements("\tfoo()\n\t\tbar()"), vec![code("foo()\n\tbar()")]);
    }

    #[test]
    fn dedent_never_splits_a_char() {
        assert_eq!(dedent("  éx", 3), "x");
        assert_eq!(dedent("ab", 2), "");
        assert_eq!(dedent("a", 2), "a");
    }

    // -- directives --

    #[test]
    fn plus_directive() {
        assert_eq!(
            elements("+directive: Do not use."),
            vec![d("+directive: Do not use.")]
        );
    }

    #[test]
    fn directive_is_single_line() {
        assert_eq!(
            elements("+deprecated: use Bar\ninstead of this"),
            vec![d("+deprecated: use Bar"), p("instead of this")]
        );
    }

    // -- whole documents --

    #[test]
    fn mixed_content() {
        let input = "This is a paragraph.\n\n# A Heading\n\n* list item 1\n* list item 2\n\n  code block\n\nAnother paragraph.";
        assert_eq!(
            elements(input),
            vec![
                p("This is a paragraph."),
                h("A Heading"),
                list(&["list item 1", "list item 2"]),
                code("code block\n"),
                p("Another paragraph."),
            ]
        );
    }

    #[test]
    fn paragraph_absorbs_following_list_lines() {
        assert_eq!(
            elements("Values:\n- a\n  b"),
            vec![p("Values: - a   b")]
        );
    }

    #[test]
    fn field_comment_with_markers() {
        let input = "Phase of the pod.\n\nPossible values:\n\n - Pending: not started\n - Running: bound\n\n+optional";
        assert_eq!(
            elements(input),
            vec![
                p("Phase of the pod."),
                p("Possible values:"),
                list(&["Pending: not started", "Running: bound"]),
                d("+optional"),
            ]
        );
    }

    #[test]
    fn paragraph_and_heading_text_reparse_as_paragraph() {
        for input in ["Paragraph one.\nstill one.", "\n# A Heading\n"] {
            for elem in elements(input) {
                let text = match elem {
                    Element::Paragraph(t) | Element::Heading(t) => t,
                    other => panic!("unexpected element {other:?}"),
                };
                assert_eq!(elements(&text), vec![p(&text)]);
            }
        }
    }

    #[test]
    fn odd_inputs_terminate() {
        let inputs = [
            "#", "+", "*", "•", "\t", "1.", "1)\t", "\n\n#\n\n", "  \n\n  x", "+\n+\n+",
            "a) \n  \n\tb", "\u{2028}", "• ", "#\t x",
        ];
        for input in inputs {
            let doc = parse(input);
            assert!(doc.elements.len() <= input.split('\n').count());
        }
    }

    #[test]
    fn classify_precedence() {
        assert_eq!(classify("  - x", None, None), Block::List);
        assert_eq!(classify("  x", None, None), Block::Code);
        assert_eq!(classify("+x", None, None), Block::Directive);
        assert_eq!(classify("# x", Some(""), Some("")), Block::Heading);
        assert_eq!(classify("# x", None, Some("")), Block::Paragraph);
        assert_eq!(classify(" \t", None, None), Block::Blank);
    }
}
