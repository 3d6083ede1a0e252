//! Hex color parsing
//!
//! Accepts the forms found in custom-property values: an optional leading
//! `#`, a body of 3, 4, 6 or 8 hex digits (any case), and an optional
//! trailing `;`. Surrounding whitespace is ignored.

use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{eof, opt},
    IResult,
};
use thiserror::Error;

use crate::color::Rgba;

/// Why a hex color string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color value")]
    Empty,
    #[error("hex color body must have 3, 4, 6 or 8 digits, found {0}")]
    InvalidLength(usize),
    #[error("`{0}` is not a hex color")]
    InvalidDigit(String),
}

/// `#`? hex-digits `;`? end
fn hex_body(input: &str) -> IResult<&str, &str> {
    let (input, _) = opt(char('#'))(input)?;
    let (input, body) = take_while1(|c: char| c.is_ascii_hexdigit())(input)?;
    let (input, _) = opt(char(';'))(input)?;
    let (input, _) = eof(input)?;
    Ok((input, body))
}

fn byte(digits: &str) -> Result<u8, ColorParseError> {
    u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigit(digits.to_string()))
}

/// Parse a hex color specification into an [`Rgba`]
///
/// Shorthand bodies (3 or 4 digits) duplicate each digit. A missing alpha
/// digit or pair means fully opaque.
///
/// ```rust
/// use tinct_core::{parse_hex_color, Rgba};
///
/// assert_eq!(parse_hex_color("#fff"), Ok(Rgba::WHITE));
/// assert_eq!(parse_hex_color("0000"), Ok(Rgba::TRANSPARENT));
/// assert!(parse_hex_color("12").is_err());
/// ```
pub fn parse_hex_color(spec: &str) -> Result<Rgba, ColorParseError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ColorParseError::Empty);
    }

    let (_, body) =
        hex_body(spec).map_err(|_| ColorParseError::InvalidDigit(spec.to_string()))?;

    let (r, g, b, a) = match body.len() {
        3 | 4 => {
            let digit = |i: usize| byte(&body[i..i + 1].repeat(2));
            let a = if body.len() == 4 { digit(3)? } else { 0xff };
            (digit(0)?, digit(1)?, digit(2)?, a)
        }
        6 | 8 => {
            let pair = |i: usize| byte(&body[i..i + 2]);
            let a = if body.len() == 8 { pair(6)? } else { 0xff };
            (pair(0)?, pair(2)?, pair(4)?, a)
        }
        len => return Err(ColorParseError::InvalidLength(len)),
    };

    Ok(Rgba::new(r, g, b, a))
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}
