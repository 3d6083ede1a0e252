//! `:root` custom-property reader
//!
//! Collects the custom properties declared in top-level `:root { ... }`
//! blocks of a stylesheet. Every other rule, at-rule and comment is
//! skipped without being interpreted. When a property is declared more
//! than once the last declaration wins, as in the cascade.
//!
//! # Example
//!
//! ```rust
//! use tinct_theme::{PropertySource, RootStylesheet};
//!
//! let css = r#"
//!     /* brand */
//!     :root { --primary: #1e66f5; --radius: 4px; }
//!     #card { background: var(--primary); }
//! "#;
//! let sheet = RootStylesheet::parse(css).unwrap();
//! assert_eq!(sheet.property("primary").as_deref(), Some("#1e66f5"));
//! assert_eq!(sheet.get_variable("radius"), Some("4px"));
//! ```

use std::path::{Path, PathBuf};

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{anychar, char, multispace1, satisfy},
    combinator::{cut, opt, recognize, value, verify},
    error::{context, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::{delimited, preceded},
    Finish, IResult,
};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::expand::PropertySource;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Error reading or parsing a stylesheet
#[derive(Debug, Error)]
pub enum StylesheetError {
    #[error("failed to read stylesheet '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stylesheet syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

/// Custom properties declared in `:root`
#[derive(Clone, Debug, Default)]
pub struct RootStylesheet {
    variables: FxHashMap<String, String>,
}

impl RootStylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stylesheet text
    pub fn parse(css: &str) -> Result<Self, StylesheetError> {
        let (remaining, items) = match stylesheet(css).finish() {
            Ok(parsed) => parsed,
            Err(err) => return Err(syntax_error(css, err)),
        };

        if !remaining.trim().is_empty() {
            let (line, column, fragment) = calculate_position(css, remaining);
            return Err(StylesheetError::Syntax {
                line,
                column,
                message: format!("unexpected input near \"{fragment}\""),
            });
        }

        let mut sheet = Self::new();
        for item in items {
            if let Item::Root(declarations) = item {
                for (name, value) in declarations {
                    if let Some(name) = name.strip_prefix("--") {
                        sheet.set_variable(name, value);
                    }
                }
            }
        }

        debug!(variables = sheet.variable_count(), "parsed :root custom properties");
        Ok(sheet)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StylesheetError> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path).map_err(|source| StylesheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&css)
    }

    /// Get a custom property value by name (without the `--` prefix)
    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|s| s.as_str())
    }

    /// Set a custom property (useful for runtime overrides)
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(|s| s.as_str())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

impl PropertySource for RootStylesheet {
    fn property(&self, name: &str) -> Option<String> {
        self.get_variable(name).map(str::to_string)
    }
}

// ============================================================================
// Nom parsers
// ============================================================================

enum Item<'a> {
    Root(Vec<(&'a str, &'a str)>),
    Skipped,
}

fn syntax_error(css: &str, err: VerboseError<&str>) -> StylesheetError {
    let fragment = err.errors.first().map(|(input, _)| *input).unwrap_or(css);
    let (line, column, preview) = calculate_position(css, fragment);

    let contexts: Vec<&str> = err
        .errors
        .iter()
        .filter_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(ctx) => Some(*ctx),
            _ => None,
        })
        .collect();

    let message = if contexts.is_empty() {
        format!("unexpected input near \"{preview}\"")
    } else {
        format!("expected {} near \"{preview}\"", contexts.join(" > "))
    };

    StylesheetError::Syntax {
        line,
        column,
        message,
    }
}

/// Line and column (1-indexed) of `fragment` within `original`, plus a preview
fn calculate_position(original: &str, fragment: &str) -> (usize, usize, String) {
    let offset = original.len().saturating_sub(fragment.len());
    let consumed = &original[..offset];

    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rfind('\n')
        .map(|pos| offset - pos)
        .unwrap_or(offset + 1);

    let preview: String = fragment.chars().take(30).collect();
    (line, column, preview)
}

/// Whitespace and comments
fn ws<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value(
        (),
        many0(alt((value((), multispace1), value((), parse_comment)))),
    )(input)
}

/// `/* ... */`
fn parse_comment<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

/// Characters allowed in a property name
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn property_name(input: &str) -> ParseResult<&str> {
    context("property name", take_while1(is_name_char))(input)
}

/// `"..."` or `'...'`, with backslash escapes
fn quoted_string(input: &str) -> ParseResult<&str> {
    recognize(alt((
        delimited(char('"'), string_body('"'), char('"')),
        delimited(char('\''), string_body('\''), char('\'')),
    )))(input)
}

fn string_body<'a>(quote: char) -> impl FnMut(&'a str) -> ParseResult<'a, ()> {
    move |input| {
        value(
            (),
            many0(alt((
                preceded(char('\\'), anychar),
                satisfy(move |c| c != quote && c != '\\'),
            ))),
        )(input)
    }
}

/// `( ... )`, nesting; `;` and braces inside are part of the group
fn parenthesized(input: &str) -> ParseResult<&str> {
    recognize(delimited(
        char('('),
        many0(alt((
            quoted_string,
            parenthesized,
            take_while1(|c: char| !matches!(c, '"' | '\'' | '(' | ')')),
        ))),
        char(')'),
    ))(input)
}

/// Component values up to a top-level `;`, `{` or `}`
fn component_values(input: &str) -> ParseResult<&str> {
    recognize(many0(alt((
        parse_comment::<VerboseError<&str>>,
        quoted_string,
        parenthesized,
        take_while1(|c: char| !matches!(c, ';' | '{' | '}' | '"' | '\'' | '(' | '/')),
        tag("/"),
    ))))(input)
}

/// Declaration value, trimmed; may be empty
fn property_value(input: &str) -> ParseResult<&str> {
    let (input, value) = component_values(input)?;
    Ok((input, value.trim()))
}

/// `name: value;`
fn declaration(input: &str) -> ParseResult<(&str, &str)> {
    let (input, _) = ws(input)?;
    let (input, name) = property_name(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("colon after property name", char(':'))(input)?;
    let (input, value) = property_value(input)?;
    let (input, _) = opt(char(';'))(input)?;
    Ok((input, (name, value)))
}

/// `:root { declarations }`
fn root_block(input: &str) -> ParseResult<Item<'_>> {
    let (input, _) = tag(":root")(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('{')(input)?;
    let (input, declarations) = many0(declaration)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("closing brace of :root", cut(char('}')))(input)?;
    Ok((input, Item::Root(declarations)))
}

/// `@import ...;` and other block-less at-rules
fn at_statement(input: &str) -> ParseResult<Item<'_>> {
    let (input, _) = char('@')(input)?;
    let (input, _) = component_values(input)?;
    let (input, _) = char(';')(input)?;
    Ok((input, Item::Skipped))
}

/// Any other rule: a prelude followed by a balanced `{ ... }` block
fn skipped_rule(input: &str) -> ParseResult<Item<'_>> {
    let (input, _) = verify(component_values, |prelude: &str| !prelude.is_empty())(input)?;
    let (input, _) = context("rule block", cut(balanced_block))(input)?;
    Ok((input, Item::Skipped))
}

/// `{ ... }` with nested blocks, strings and comments
fn balanced_block(input: &str) -> ParseResult<&str> {
    recognize(delimited(
        char('{'),
        many0(alt((
            parse_comment::<VerboseError<&str>>,
            quoted_string,
            balanced_block,
            take_while1(|c: char| !matches!(c, '{' | '}' | '"' | '\'' | '/')),
            tag("/"),
        ))),
        char('}'),
    ))(input)
}

fn stylesheet(input: &str) -> ParseResult<Vec<Item<'_>>> {
    let (input, items) = many0(preceded(ws, alt((root_block, at_statement, skipped_rule))))(input)?;
    let (input, _) = ws(input)?;
    Ok((input, items))
}
