//! Derived custom properties for a single color

use serde::{Deserialize, Serialize};
use tinct_core::{parse_hex_color, Rgba};

/// Lightness percentage at or above which text on the color should be black
pub const CONTRAST_LIGHTNESS_THRESHOLD: u8 = 50;

/// Readable foreground for a background color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contrast {
    Black,
    White,
}

impl Contrast {
    /// Pick black for light backgrounds (`l >= 50`), white otherwise
    pub fn for_lightness(lightness: u8) -> Self {
        if lightness >= CONTRAST_LIGHTNESS_THRESHOLD {
            Contrast::Black
        } else {
            Contrast::White
        }
    }

    pub fn rgba(self) -> Rgba {
        match self {
            Contrast::Black => Rgba::BLACK,
            Contrast::White => Rgba::WHITE,
        }
    }

    /// `#000000` or `#ffffff`
    pub fn hex(self) -> &'static str {
        match self {
            Contrast::Black => "#000000",
            Contrast::White => "#ffffff",
        }
    }

    /// `0,0,0` or `255,255,255`
    pub fn rgb_triplet(self) -> &'static str {
        match self {
            Contrast::Black => "0,0,0",
            Contrast::White => "255,255,255",
        }
    }
}

/// A single `--name: value` declaration, stored without the leading `--`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `--name:value;`
    pub fn to_css(&self) -> String {
        format!("--{}:{};", self.name, self.value)
    }
}

/// Values derived from one base color
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedProperties {
    /// `"r,g,b"`
    pub rgb_triplet: String,
    /// `#000000` or `#ffffff`
    pub contrast_hex: String,
    /// `0,0,0` or `255,255,255`
    pub contrast_rgb_triplet: String,
    pub h: u16,
    pub s_percent: u8,
    pub l_percent: u8,
}

impl DerivedProperties {
    pub fn from_rgba(color: Rgba) -> Self {
        let hsla = color.to_hsla();
        let contrast = Contrast::for_lightness(hsla.l);

        Self {
            rgb_triplet: color.to_rgb_triplet(),
            contrast_hex: contrast.hex().to_string(),
            contrast_rgb_triplet: contrast.rgb_triplet().to_string(),
            h: hsla.h,
            s_percent: hsla.s,
            l_percent: hsla.l,
        }
    }

    pub fn contrast(&self) -> Contrast {
        Contrast::for_lightness(self.l_percent)
    }

    /// The six declarations for the color family `name`, in output order:
    /// `-rgb`, `-contrast`, `-contrast-rgb`, `-h`, `-s`, `-l`.
    pub fn declarations(&self, name: &str) -> Vec<Declaration> {
        vec![
            Declaration::new(format!("{name}-rgb"), self.rgb_triplet.clone()),
            Declaration::new(format!("{name}-contrast"), self.contrast_hex.clone()),
            Declaration::new(
                format!("{name}-contrast-rgb"),
                self.contrast_rgb_triplet.clone(),
            ),
            Declaration::new(format!("{name}-h"), self.h.to_string()),
            Declaration::new(format!("{name}-s"), format!("{}%", self.s_percent)),
            Declaration::new(format!("{name}-l"), format!("{}%", self.l_percent)),
        ]
    }
}

/// Derive the property values for a raw hex color
///
/// Returns `None` when `raw` is not a hex color; callers skip that name.
pub fn derive_properties(raw: &str) -> Option<DerivedProperties> {
    parse_hex_color(raw).ok().map(DerivedProperties::from_rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_gets_white_contrast() {
        let props = derive_properties("#000000").unwrap();
        assert_eq!(props.contrast_hex, "#ffffff");
        assert_eq!(props.contrast_rgb_triplet, "255,255,255");
        assert_eq!(props.l_percent, 0);
    }

    #[test]
    fn test_white_gets_black_contrast() {
        let props = derive_properties("#ffffff").unwrap();
        assert_eq!(props.contrast_hex, "#000000");
        assert_eq!(props.contrast_rgb_triplet, "0,0,0");
        assert_eq!(props.l_percent, 100);
    }

    #[test]
    fn test_contrast_threshold_is_inclusive() {
        // 0x7f: l_raw 127 rounds to 50%
        assert_eq!(derive_properties("#7f7f7f").unwrap().contrast(), Contrast::Black);
        // 0x7e: 49%
        assert_eq!(derive_properties("#7e7e7e").unwrap().contrast(), Contrast::White);
    }

    #[test]
    fn test_full_record() {
        let props = derive_properties("#336699").unwrap();
        assert_eq!(
            props,
            DerivedProperties {
                rgb_triplet: "51,102,153".to_string(),
                contrast_hex: "#ffffff".to_string(),
                contrast_rgb_triplet: "255,255,255".to_string(),
                h: 210,
                s_percent: 50,
                l_percent: 40,
            }
        );
    }

    #[test]
    fn test_alpha_does_not_affect_triplet() {
        let props = derive_properties("#ff000080").unwrap();
        assert_eq!(props.rgb_triplet, "255,0,0");
    }

    #[test]
    fn test_invalid_input_is_none() {
        assert!(derive_properties("12").is_none());
        assert!(derive_properties("").is_none());
        assert!(derive_properties("red").is_none());
    }

    #[test]
    fn test_declaration_order_and_format() {
        let css: String = derive_properties("#ff0000")
            .unwrap()
            .declarations("primary")
            .iter()
            .map(Declaration::to_css)
            .collect();
        assert_eq!(
            css,
            "--primary-rgb:255,0,0;--primary-contrast:#000000;--primary-contrast-rgb:0,0,0;\
             --primary-h:0;--primary-s:100%;--primary-l:50%;"
        );
    }
}
