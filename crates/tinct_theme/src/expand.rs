//! Batch expansion of color custom properties
//!
//! [`expand_custom_properties`] reads each named color from a
//! [`PropertySource`], derives its properties, and collects the result in a
//! [`StyleBlock`]. Writing the block into a document is left to a
//! [`StyleSink`], so the same expansion can feed a live page, a generated
//! stylesheet, or a test assertion.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinct_core::{parse_hex_color, Rgba};
use tracing::{debug, warn};

use crate::derive::{Declaration, DerivedProperties};
use crate::stylesheet::is_name_char;

/// Color families expanded when no names are configured
pub const DEFAULT_PROPERTY_NAMES: [&str; 6] = [
    "primary",
    "primary-light",
    "primary-dark",
    "secondary",
    "secondary-light",
    "secondary-dark",
];

/// HTML attribute marking the injected `<style>` element
const STYLE_TAG_ATTRIBUTE: &str = "x-extend-custom-properties";

// ─────────────────────────────────────────────────────────────────────────────
// Collaborators
// ─────────────────────────────────────────────────────────────────────────────

/// Lookup capability for raw custom-property values
///
/// `name` has no leading `--`. Returns `None` when the property is not
/// defined.
pub trait PropertySource {
    fn property(&self, name: &str) -> Option<String>;
}

impl<S: BuildHasher> PropertySource for HashMap<String, String, S> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn property(&self, name: &str) -> Option<String> {
        (**self).property(name)
    }
}

/// Write capability for a finished style block
pub trait StyleSink {
    fn inject(&mut self, block: &StyleBlock);
}

/// Appends the block as `:root { ... }` CSS text
impl StyleSink for String {
    fn inject(&mut self, block: &StyleBlock) {
        self.push_str(&block.to_css());
    }
}

/// Collects blocks for later merging
impl StyleSink for Vec<StyleBlock> {
    fn inject(&mut self, block: &StyleBlock) {
        self.push(block.clone());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style block
// ─────────────────────────────────────────────────────────────────────────────

/// One expanded color family
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedProperty {
    /// Family name without the leading `--`
    pub name: String,
    /// The base color as parsed
    pub color: Rgba,
    pub derived: DerivedProperties,
}

impl ExpandedProperty {
    pub fn declarations(&self) -> Vec<Declaration> {
        self.derived.declarations(&self.name)
    }
}

/// Output rendering for a [`StyleBlock`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `:root {...}` on a single line
    #[default]
    Css,
    /// The CSS wrapped in a marked `<style>` element
    StyleTag,
    /// Indented, one declaration per line, with the base color of each family
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format `{0}` (expected css, style-tag or pretty)")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(OutputFormat::Css),
            "style-tag" | "style" | "html" => Ok(OutputFormat::StyleTag),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Css => write!(f, "css"),
            OutputFormat::StyleTag => write!(f, "style-tag"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Declarations to merge into the root style scope, in expansion order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBlock {
    properties: Vec<ExpandedProperty>,
}

impl StyleBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: ExpandedProperty) {
        self.properties.push(property);
    }

    pub fn properties(&self) -> &[ExpandedProperty] {
        &self.properties
    }

    /// Get an expanded family by name
    pub fn get(&self, name: &str) -> Option<&ExpandedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// All declarations, family by family
    pub fn declarations(&self) -> Vec<Declaration> {
        self.properties
            .iter()
            .flat_map(ExpandedProperty::declarations)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// `:root {--a-rgb:...;--a-contrast:...;...}`
    pub fn to_css(&self) -> String {
        let body: String = self.declarations().iter().map(Declaration::to_css).collect();
        format!(":root {{{body}}}")
    }

    /// `<style x-extend-custom-properties>:root {...}</style>`
    pub fn to_style_tag(&self) -> String {
        format!("<style {STYLE_TAG_ATTRIBUTE}>{}</style>", self.to_css())
    }

    /// Multi-line form for pasting into a `.css` file
    ///
    /// ```text
    /// :root {
    ///   /* primary */
    ///   --primary: #ff0000ff;
    ///   --primary-rgb:255,0,0;
    ///   ...
    /// }
    /// ```
    pub fn to_pretty(&self) -> String {
        let mut out = String::from(":root {\n");
        for property in &self.properties {
            out.push_str(&format!("  /* {} */\n", property.name));
            out.push_str(&format!(
                "  --{}: {};\n",
                property.name,
                property.color.to_hex_string()
            ));
            for declaration in property.declarations() {
                out.push_str("  ");
                out.push_str(&declaration.to_css());
                out.push('\n');
            }
        }
        out.push_str("}\n");
        out
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Css => self.to_css(),
            OutputFormat::StyleTag => self.to_style_tag(),
            OutputFormat::Pretty => self.to_pretty(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Expansion
// ─────────────────────────────────────────────────────────────────────────────

/// Expand each named color found in `source`
///
/// Names that are missing from the source or whose value is not a hex
/// color are skipped; the rest of the batch still expands. Output order
/// follows `names`.
pub fn expand_custom_properties<I, S, P>(names: I, source: &P) -> StyleBlock
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: PropertySource + ?Sized,
{
    let mut block = StyleBlock::new();

    for name in names {
        let name = name.as_ref().trim().trim_start_matches("--");

        if !is_property_name(name) {
            warn!(property = name, "not a valid custom property name; skipping");
            continue;
        }

        let Some(raw) = source.property(name) else {
            warn!(property = name, "color property is not defined; skipping");
            continue;
        };

        let color = match parse_hex_color(&raw) {
            Ok(color) => color,
            Err(err) => {
                warn!(property = name, value = %raw.trim(), %err, "color property is not a hex color; skipping");
                continue;
            }
        };

        let derived = DerivedProperties::from_rgba(color);
        debug!(
            property = name,
            color = %color,
            h = derived.h,
            s = derived.s_percent,
            l = derived.l_percent,
            "expanded color property"
        );

        block.push(ExpandedProperty {
            name: name.to_string(),
            color,
            derived,
        });
    }

    block
}

/// Whether `name` (without `--`) can be emitted as a custom property name
pub fn is_property_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

/// Expand `names` from `source` and hand the block to `sink`
///
/// Returns the number of color families that were expanded. The sink is
/// called once, even when nothing expanded.
pub fn apply_custom_properties<I, S, P, K>(names: I, source: &P, sink: &mut K) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: PropertySource + ?Sized,
    K: StyleSink + ?Sized,
{
    let block = expand_custom_properties(names, source);
    sink.inject(&block);
    block.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_keeps_name_order() {
        let src = source(&[("secondary", "#000"), ("primary", "#fff")]);
        let block = expand_custom_properties(["primary", "secondary"], &src);

        let names: Vec<&str> = block.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["primary", "secondary"]);
    }

    #[test]
    fn test_expand_skips_missing_and_invalid() {
        let src = source(&[("primary", "#ff0000"), ("secondary", "tomato")]);
        let block = expand_custom_properties(["primary", "secondary", "accent"], &src);

        assert_eq!(block.len(), 1);
        assert!(block.get("primary").is_some());
        assert!(block.get("secondary").is_none());
    }

    #[test]
    fn test_expand_accepts_dashed_names() {
        let src = source(&[("primary", "#ff0000")]);
        let block = expand_custom_properties(["--primary"], &src);
        assert_eq!(block.declarations()[0].name, "primary-rgb");
    }

    #[test]
    fn test_expand_skips_names_that_break_out_of_root() {
        let src = source(&[("a;}body{x", "#ff0000"), ("primary", "#ff0000"), ("", "#fff")]);
        let block = expand_custom_properties(["a;}body{x", "", "primary"], &src);

        assert_eq!(block.len(), 1);
        assert!(!block.to_css().contains("body"));
        assert!(is_property_name("primary-light_2"));
        assert!(!is_property_name("a b"));
    }

    #[test]
    fn test_empty_block_renders_empty_root() {
        let block = StyleBlock::new();
        assert_eq!(block.to_css(), ":root {}");
        assert!(block.is_empty());
    }

    #[test]
    fn test_style_tag() {
        let src = source(&[("primary", "#000")]);
        let block = expand_custom_properties(["primary"], &src);
        let tag = block.to_style_tag();
        assert!(tag.starts_with("<style x-extend-custom-properties>:root {--primary-rgb:0,0,0;"));
        assert!(tag.ends_with("--primary-l:0%;}</style>"));
    }

    #[test]
    fn test_pretty_includes_base_color() {
        let src = source(&[("primary", "#ff0000")]);
        let pretty = expand_custom_properties(["primary"], &src).to_pretty();
        assert_eq!(
            pretty,
            ":root {\n  /* primary */\n  --primary: #ff0000ff;\n  --primary-rgb:255,0,0;\n  \
             --primary-contrast:#000000;\n  --primary-contrast-rgb:0,0,0;\n  --primary-h:0;\n  \
             --primary-s:100%;\n  --primary-l:50%;\n}\n"
        );
    }

    #[test]
    fn test_apply_writes_to_sink() {
        let src = source(&[("primary", "#fff"), ("secondary", "nope")]);
        let mut sink = String::new();
        let count = apply_custom_properties(["primary", "secondary"], &src, &mut sink);

        assert_eq!(count, 1);
        assert!(sink.starts_with(":root {--primary-rgb:255,255,255;--primary-contrast:#000000;"));
    }

    #[test]
    fn test_apply_calls_sink_once_when_nothing_expands() {
        let src = source(&[]);
        let mut sink: Vec<StyleBlock> = Vec::new();
        let count = apply_custom_properties(DEFAULT_PROPERTY_NAMES, &src, &mut sink);

        assert_eq!(count, 0);
        assert_eq!(sink.len(), 1);
        assert!(sink[0].is_empty());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("css".parse::<OutputFormat>(), Ok(OutputFormat::Css));
        assert_eq!("Style-Tag".parse::<OutputFormat>(), Ok(OutputFormat::StyleTag));
        assert_eq!("pretty".parse::<OutputFormat>(), Ok(OutputFormat::Pretty));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
