//! Leading-comment recovery.
//!
//! The documentation pipeline treats the comment block immediately preceding
//! a declaration as its documentation text. OXC keeps all comments on the
//! program, ordered by position; recovery is a span scan over that list plus
//! textual delimiter stripping, so it does not depend on the comment-kind
//! representation.

use oxc_ast::Comment;

use crate::parse::span_text;

/// Recover the comment block immediately preceding `node_start`.
///
/// A block is the nearest comment whose gap to the node is pure whitespace,
/// extended backwards over adjacent comment lines (single-newline gaps, so a
/// blank line terminates the block). Delimiters are stripped and the result
/// trimmed; `None` when no comment precedes the node or the block is empty
/// after stripping.
pub fn leading_comment(comments: &[Comment], source: &str, node_start: u32) -> Option<String> {
    let mut last = None;
    for (i, comment) in comments.iter().enumerate() {
        if comment.span.start >= node_start {
            break;
        }
        if comment.span.end <= node_start && is_adjacent(source, comment.span.end, node_start) {
            last = Some(i);
        }
    }
    let last = last?;

    let mut first = last;
    while first > 0 {
        let prev = &comments[first - 1];
        let cur = &comments[first];
        let gap = span_gap(source, prev.span.end, cur.span.start);
        if gap.chars().all(char::is_whitespace) && gap.matches('\n').count() <= 1 {
            first -= 1;
        } else {
            break;
        }
    }

    let mut out = String::new();
    for comment in &comments[first..=last] {
        let text = strip_comment_text(span_text(source, comment.span));
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&text);
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Strip comment delimiters and per-line `*` decoration, trimming the result.
///
/// Accepts either span convention (with or without the `//` / `/* */`
/// delimiters included), so it works across OXC releases.
pub fn strip_comment_text(raw: &str) -> String {
    let body = if let Some(inner) = raw.strip_prefix("/*") {
        inner.strip_suffix("*/").unwrap_or(inner)
    } else if let Some(inner) = raw.strip_prefix("//") {
        inner
    } else {
        raw
    };
    // `/**` leaves a leading `*` after the prefix strip.
    let body = body.strip_prefix('*').unwrap_or(body);

    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim()
        })
        .collect();

    lines.join("\n").trim().to_string()
}

/// Whitespace-only gap with at most one newline: a blank line detaches the
/// comment from the node. A leading `*/` in the gap is tolerated for the
/// span convention that excludes delimiters.
fn is_adjacent(source: &str, from: u32, to: u32) -> bool {
    let gap = span_gap(source, from, to);
    let gap = gap.strip_prefix("*/").unwrap_or(gap);
    gap.chars().all(char::is_whitespace) && gap.matches('\n').count() <= 1
}

fn span_gap(source: &str, from: u32, to: u32) -> &str {
    source.get(from as usize..to as usize).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_tsx;
    use oxc_allocator::Allocator;
    use std::path::Path;

    fn comment_before(source: &str, marker: &str) -> Option<String> {
        let allocator = Allocator::default();
        let parsed = parse_tsx(&allocator, source, Path::new("test.tsx")).unwrap();
        let start = source.find(marker).unwrap() as u32;
        leading_comment(&parsed.program.comments, source, start)
    }

    #[test]
    fn recovers_jsdoc_block() {
        let source = "/** The size of the thing. */\nconst size = 1;";
        assert_eq!(
            comment_before(source, "const").as_deref(),
            Some("The size of the thing.")
        );
    }

    #[test]
    fn recovers_multiline_jsdoc() {
        let source = "/**\n * First line.\n * Second line.\n */\nconst size = 1;";
        assert_eq!(
            comment_before(source, "const").as_deref(),
            Some("First line.\nSecond line.")
        );
    }

    #[test]
    fn merges_adjacent_line_comments() {
        let source = "// one\n// two\nconst size = 1;";
        assert_eq!(comment_before(source, "const").as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn blank_line_detaches_comment() {
        let source = "// far away\n\nconst size = 1;\n// near\nconst other = 2;";
        assert_eq!(comment_before(source, "const size"), None);
        assert_eq!(comment_before(source, "const other").as_deref(), Some("near"));
    }

    #[test]
    fn none_without_comment() {
        let source = "const size = 1;";
        assert_eq!(comment_before(source, "const"), None);
    }

    #[test]
    fn strip_handles_all_delimiters() {
        assert_eq!(strip_comment_text("/** Checked state. */"), "Checked state.");
        assert_eq!(strip_comment_text("// line"), "line");
        assert_eq!(strip_comment_text(" already stripped "), "already stripped");
    }
}
