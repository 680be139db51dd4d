//! Stylesheet formatting via lightningcss.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use crate::formatter::{Dialect, FormatError};

/// Pretty-print a stylesheet.
pub fn format_css(source: &str) -> Result<String, FormatError> {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|e| FormatError::Syntax {
            dialect: Dialect::Css,
            message: e.to_string(),
        })?;

    let printed = stylesheet
        .to_css(PrinterOptions::default())
        .map_err(|e| FormatError::Print {
            dialect: Dialect::Css,
            message: e.to_string(),
        })?;

    let mut code = printed.code;
    if !code.is_empty() && !code.ends_with('\n') {
        code.push('\n');
    }

    Ok(code)
}
