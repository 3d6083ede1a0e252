//! Tinct Theme Expansion
//!
//! Expands root-level color custom properties into the derived properties
//! components style against.
//!
//! # Overview
//!
//! For every named color (for example `--primary: #1e66f5;`) the expansion
//! produces:
//!
//! - `--primary-rgb`: channel triplet for `rgba(var(--primary-rgb), .5)`
//! - `--primary-contrast` / `--primary-contrast-rgb`: black or white text
//! - `--primary-h`, `--primary-s`, `--primary-l`: HSL components
//!
//! # Quick Start
//!
//! ```rust
//! use tinct_theme::{expand_custom_properties, RootStylesheet};
//!
//! let sheet = RootStylesheet::parse(":root { --primary: #ff0000; }").unwrap();
//! let block = expand_custom_properties(["primary"], &sheet);
//!
//! assert_eq!(
//!     block.to_css(),
//!     ":root {--primary-rgb:255,0,0;--primary-contrast:#000000;\
//!      --primary-contrast-rgb:0,0,0;--primary-h:0;--primary-s:100%;--primary-l:50%;}"
//! );
//! ```
//!
//! # Collaborators
//!
//! Reading and writing styles are kept behind two traits so the
//! computation stays pure:
//!
//! - [`PropertySource`]: looks up a raw custom-property value by name
//! - [`StyleSink`]: receives the finished [`StyleBlock`]

pub mod derive;
pub mod expand;
pub mod stylesheet;

pub use derive::{derive_properties, Contrast, Declaration, DerivedProperties};
pub use expand::{
    apply_custom_properties, expand_custom_properties, is_property_name, ExpandedProperty,
    OutputFormat, PropertySource, StyleBlock, StyleSink, UnknownFormat, DEFAULT_PROPERTY_NAMES,
};
pub use stylesheet::{RootStylesheet, StylesheetError};
