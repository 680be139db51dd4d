//! Markup formatting.
//!
//! A tag-stream pretty printer: the source is split into tags, text runs and
//! raw `<script>`/`<style>` bodies, then re-emitted one node per line with
//! nesting indentation. Elements holding nothing, or a single text run that
//! fits within the print width, stay on one line. Inline content that touched
//! in the source stays on one line too, so no whitespace is introduced
//! between it.

use std::sync::LazyLock;

use regex::Regex;

use crate::formatter::{Dialect, FormatError, FormatterConfig};

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub",
    "sup", "time", "u", "var", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open { name: String, tag: String },
    Close { name: String, tag: String },
    /// Void and self-closing elements, doctypes, comments
    Standalone(String),
    Text(String),
    /// Unparsed body of a raw text element
    Raw(String),
}

impl Token {
    /// Whether whitespace next to this token is significant when rendered.
    fn is_inline(&self) -> bool {
        match self {
            Token::Open { name, .. } | Token::Close { name, .. } => {
                INLINE_ELEMENTS.contains(&name.as_str())
            }
            Token::Standalone(tag) => {
                !tag.starts_with("<!") && INLINE_ELEMENTS.contains(&tag_name(tag).as_str())
            }
            Token::Text(_) => true,
            Token::Raw(_) => false,
        }
    }
}

/// A token and whether whitespace preceded it in the source.
#[derive(Debug, Clone, PartialEq)]
struct Item {
    token: Token,
    spaced: bool,
}

/// Pretty-print markup.
pub fn format_html(source: &str, config: &FormatterConfig) -> Result<String, FormatError> {
    let items = tokenize(source)?;
    let unit = config.indent_unit();

    let mut out = String::new();
    let mut open: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < items.len() {
        let depth = open.len();
        let glued = i > 0 && is_glued(&items[i - 1], &items[i]);
        let token = |offset: usize| items.get(i + offset).map(|item| &item.token);
        let emit = |out: &mut String, depth: usize, line: &str| {
            if glued {
                out.pop();
                out.push_str(line);
                out.push('\n');
            } else {
                push_line(out, &unit, depth, line);
            }
        };

        match &items[i].token {
            Token::Open { name, tag } => {
                match (token(1), token(2)) {
                    (Some(Token::Close { name: closing, tag: close }), _) if closing == name => {
                        emit(&mut out, depth, &format!("{tag}{close}"));
                        i += 2;
                        continue;
                    }
                    (
                        Some(Token::Text(text)),
                        Some(Token::Close { name: closing, tag: close }),
                    ) if closing == name => {
                        let line = format!("{tag}{text}{close}");
                        if depth * config.tab_width + line.chars().count() <= config.print_width {
                            emit(&mut out, depth, &line);
                            i += 3;
                            continue;
                        }
                    }
                    _ => {}
                }

                emit(&mut out, depth, tag);
                open.push(name.as_str());
            }

            Token::Close { name, tag } => {
                match open.pop() {
                    Some(expected) if expected == name.as_str() => {}
                    Some(expected) => {
                        return Err(syntax(format!(
                            "expected </{expected}> but found {tag}"
                        )))
                    }
                    None => return Err(syntax(format!("unexpected closing tag {tag}"))),
                }
                emit(&mut out, open.len(), tag);
            }

            Token::Standalone(text) | Token::Text(text) => {
                emit(&mut out, depth, text);
            }

            Token::Raw(body) => {
                for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    push_line(&mut out, &unit, depth, line);
                }
            }
        }

        i += 1;
    }

    if let Some(unclosed) = open.last() {
        return Err(syntax(format!("unclosed <{unclosed}>")));
    }

    Ok(out)
}

/// Adjacent inline tokens with no whitespace between them share a line.
fn is_glued(previous: &Item, item: &Item) -> bool {
    !item.spaced && previous.token.is_inline() && item.token.is_inline()
}

fn tokenize(source: &str) -> Result<Vec<Item>, FormatError> {
    let mut tokens = Vec::new();
    let mut spaced = false;
    let mut rest = source;

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let end = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            push_token(&mut tokens, &mut spaced, Token::Standalone(rest[..end].trim().to_string()));
            rest = &rest[end..];
            continue;
        }

        if starts_tag(rest) {
            let len = tag_length(rest).ok_or_else(|| {
                let preview: String = rest.chars().take(24).collect();
                syntax(format!("unterminated tag starting at `{preview}`"))
            })?;

            let tag = normalize_tag(&rest[..len]);
            let name = tag_name(&tag);
            rest = &rest[len..];

            if tag.starts_with("</") {
                push_token(&mut tokens, &mut spaced, Token::Close { name, tag });
            } else if tag.starts_with("<!")
                || tag.ends_with("/>")
                || VOID_ELEMENTS.contains(&name.as_str())
            {
                push_token(&mut tokens, &mut spaced, Token::Standalone(tag));
            } else {
                let raw = RAW_TEXT_ELEMENTS.contains(&name.as_str());
                let closing = format!("</{name}");
                push_token(&mut tokens, &mut spaced, Token::Open { name, tag });

                if raw {
                    let end = rest
                        .to_ascii_lowercase()
                        .find(&closing)
                        .unwrap_or(rest.len());
                    let body = rest[..end].trim();
                    if !body.is_empty() {
                        push_token(&mut tokens, &mut spaced, Token::Raw(body.to_string()));
                    }
                    rest = &rest[end..];
                }
            }
            continue;
        }

        let next = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '<')
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        push_text(&mut tokens, &mut spaced, &rest[..next]);
        rest = &rest[next..];
    }

    Ok(tokens)
}

/// Whether the input starts with `<` followed by something that opens a tag.
fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('<')
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

/// Byte length of the tag at the start of `s`, honouring quoted attributes.
fn tag_length(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;

    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i + 1),
            None => {}
        }
    }

    None
}

fn normalize_tag(raw: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(raw, " ");

    if let Some(body) = collapsed.strip_suffix("/>") {
        format!("{} />", body.trim_end())
    } else if let Some(body) = collapsed.strip_suffix('>') {
        format!("{}>", body.trim_end())
    } else {
        collapsed.to_string()
    }
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn push_token(tokens: &mut Vec<Item>, spaced: &mut bool, token: Token) {
    tokens.push(Item {
        token,
        spaced: std::mem::take(spaced),
    });
}

fn push_text(tokens: &mut Vec<Item>, spaced: &mut bool, text: &str) {
    let leading = text.starts_with(char::is_whitespace);
    let trailing = text.ends_with(char::is_whitespace);
    let normalized = WHITESPACE_RE.replace_all(text, " ");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        *spaced = true;
        return;
    }

    let separated = *spaced || leading;
    if let Some(Item { token: Token::Text(previous), .. }) = tokens.last_mut() {
        if separated {
            previous.push(' ');
        }
        previous.push_str(normalized);
    } else {
        tokens.push(Item {
            token: Token::Text(normalized.to_string()),
            spaced: separated,
        });
    }
    *spaced = trailing;
}

fn push_line(out: &mut String, unit: &str, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(unit);
    }
    out.push_str(line);
    out.push('\n');
}

fn syntax(message: String) -> FormatError {
    FormatError::Syntax {
        dialect: Dialect::Html,
        message,
    }
}
