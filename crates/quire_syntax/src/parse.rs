//! OXC-backed parsing of TypeScript/TSX sources.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use crate::error::SyntaxError;

/// A parsed source file.
///
/// Borrows both the arena and the source text from the caller, so the
/// caller's `Allocator` must outlive it.
pub struct ParsedSource<'a> {
    pub program: Program<'a>,
    pub source: &'a str,
}

/// Parse a TypeScript/TSX source into a syntax tree.
///
/// The source type is derived from the file path (falling back to TSX for
/// unknown extensions). Recoverable parse errors are tolerated: the OXC
/// parser produces a best-effort tree for them, which is what a
/// documentation extractor wants. Only a panicked parse (no usable tree at
/// all) is reported as [`SyntaxError::Parse`].
pub fn parse_tsx<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    path: &Path,
) -> Result<ParsedSource<'a>, SyntaxError> {
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::tsx());

    let ret = Parser::new(allocator, source, source_type).parse();

    if ret.panicked {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SyntaxError::Parse {
            path: path.display().to_string(),
            message,
        });
    }

    Ok(ParsedSource {
        program: ret.program,
        source,
    })
}

/// Slice the original source text for a span.
///
/// Returns an empty string for an out-of-bounds span rather than panicking;
/// spans always come from the same parse as `source`, so this only happens
/// with synthetic spans.
#[inline]
pub fn span_text<'a>(source: &'a str, span: Span) -> &'a str {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tsx_component() {
        let allocator = Allocator::default();
        let source = "export const Root = () => <div data-open>ok</div>;";
        let parsed = parse_tsx(&allocator, source, Path::new("root.tsx")).unwrap();
        assert_eq!(parsed.program.body.len(), 1);
    }

    #[test]
    fn span_text_is_total() {
        let source = "const a = 1;";
        assert_eq!(span_text(source, Span::new(6, 7)), "a");
        assert_eq!(span_text(source, Span::new(100, 200)), "");
    }
}
