//! Script formatting: parse with oxc, print with oxc's code generator.

use std::sync::LazyLock;

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use regex::Regex;

use crate::formatter::{Dialect, FormatError, FormatterConfig};

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\r?\n").expect("Invalid blank line regex"));

/// Parser source type for a script dialect.
///
/// Plain TypeScript is parsed without JSX so angle-bracket casts and generic
/// arrow functions stay valid.
pub fn source_type(dialect: Dialect) -> SourceType {
    match dialect {
        Dialect::TypeScript => SourceType::ts(),
        Dialect::TypeScriptJsx => SourceType::tsx(),
        _ => SourceType::jsx(),
    }
}

/// Re-print JavaScript or TypeScript source in canonical form.
///
/// Blank lines separating top-level statements are kept.
pub fn format_script(
    source: &str,
    dialect: Dialect,
    config: &FormatterConfig,
) -> Result<String, FormatError> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type(dialect)).parse();

    if let Some(error) = parsed.errors.first() {
        return Err(FormatError::Syntax {
            dialect,
            message: error.to_string(),
        });
    }

    if parsed.panicked {
        return Err(FormatError::Syntax {
            dialect,
            message: "parser aborted".to_string(),
        });
    }

    let options = CodegenOptions {
        single_quote: config.single_quote,
        ..CodegenOptions::default()
    };

    let printed = Codegen::new().with_options(options).build(&parsed.program).code;
    let separated: Vec<bool> = statement_gaps(&parsed.program.body)
        .into_iter()
        .map(|gap| BLANK_LINE_RE.is_match(&source[gap.start as usize..gap.end as usize]))
        .collect();

    Ok(restore_blank_lines(printed, &separated, dialect))
}

/// Spans between consecutive top-level statements.
fn statement_gaps(body: &[Statement<'_>]) -> Vec<Span> {
    body.windows(2)
        .map(|pair| Span::new(pair[0].span().end, pair[1].span().start))
        .collect()
}

/// Insert an empty line after every printed statement whose gap to the next
/// statement was blank in the source.
fn restore_blank_lines(printed: String, separated: &[bool], dialect: Dialect) -> String {
    if !separated.contains(&true) {
        return printed;
    }

    let Some(insert_at) = blank_line_offsets(&printed, separated, dialect) else {
        return printed;
    };

    let mut out = String::with_capacity(printed.len() + insert_at.len());
    let mut last = 0;
    for at in insert_at {
        out.push_str(&printed[last..at]);
        out.push('\n');
        last = at;
    }
    out.push_str(&printed[last..]);
    out
}

/// Offsets in `printed` where an empty line belongs. `None` when the printed
/// statements no longer line up with the source ones.
fn blank_line_offsets(printed: &str, separated: &[bool], dialect: Dialect) -> Option<Vec<usize>> {
    let allocator = Allocator::default();
    let reparsed = Parser::new(&allocator, printed, source_type(dialect)).parse();
    if !reparsed.errors.is_empty() || reparsed.program.body.len() != separated.len() + 1 {
        return None;
    }

    let mut insert_at = Vec::new();
    for (gap, &blank) in statement_gaps(&reparsed.program.body).into_iter().zip(separated) {
        let (start, end) = (gap.start as usize, gap.end as usize);
        if !blank || BLANK_LINE_RE.is_match(&printed[start..end]) {
            continue;
        }
        if let Some(newline) = printed[start..end].find('\n') {
            insert_at.push(start + newline + 1);
        }
    }

    Some(insert_at)
}
