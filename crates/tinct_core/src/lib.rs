//! Tinct Core
//!
//! Color primitives shared by the Tinct crates:
//!
//! - **Color model**: 8-bit [`Rgba`] and integer-quantized [`Hsla`]
//! - **Hex parsing**: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - **Conversion**: closed-form RGBA ↔ HSLA transforms
//!
//! # Example
//!
//! ```rust
//! use tinct_core::{parse_hex_color, Hsla};
//!
//! let red = parse_hex_color("#ff0000").unwrap();
//! let hsla = red.to_hsla();
//! assert_eq!((hsla.h, hsla.s, hsla.l), (0, 100, 50));
//!
//! // 360 and 0 name the same hue
//! assert_eq!(Hsla::new(360, 100, 50, 1.0).to_rgba(), red);
//! ```

pub mod color;
pub mod hex;

pub use color::{hsla_to_rgba, rgba_to_hsla, Hsla, Rgba};
pub use hex::{parse_hex_color, ColorParseError};
