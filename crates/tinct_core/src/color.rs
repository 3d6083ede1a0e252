//! Color model and color-space conversion
//!
//! Two representations of the same color:
//!
//! - [`Rgba`]: additive red/green/blue channels plus opacity, 8 bits each
//! - [`Hsla`]: integer hue degrees, saturation and lightness percentages,
//!   and a fractional alpha
//!
//! The conversions quantize to integers, so a round trip can move a
//! channel. Grays and fully saturated mid-lightness hues come back within
//! ±1; lighter tints can drift further because the light-half saturation
//! divisor is `510 - diff`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// RGBA
// ─────────────────────────────────────────────────────────────────────────────

/// 8-bit RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_hsla(self) -> Hsla {
        rgba_to_hsla(self)
    }

    /// Lower-case `#rrggbbaa`
    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Decimal channels joined by commas, no spaces: `"r,g,b"`
    pub fn to_rgb_triplet(&self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl From<Hsla> for Rgba {
    fn from(color: Hsla) -> Self {
        hsla_to_rgba(color)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HSLA
// ─────────────────────────────────────────────────────────────────────────────

/// Hue/saturation/lightness color with alpha
///
/// `h` is in whole degrees (0–360, where 360 is the same hue as 0),
/// `s` and `l` are whole percentages, `a` is 0.0–1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub a: f32,
}

impl Hsla {
    pub const fn new(h: u16, s: u8, l: u8, a: f32) -> Self {
        Self { h, s, l, a }
    }

    pub fn to_rgba(self) -> Rgba {
        hsla_to_rgba(self)
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }
}

impl From<Rgba> for Hsla {
    fn from(color: Rgba) -> Self {
        rgba_to_hsla(color)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert an 8-bit RGBA color to HSLA
///
/// Lightness is computed in channel units before quantization, so the
/// saturation branch tests the raw midpoint (`<= 127`) rather than the
/// rounded percentage. A hue that rounds up to 360 is reported as 0.
pub fn rgba_to_hsla(color: Rgba) -> Hsla {
    let r = f64::from(color.r);
    let g = f64::from(color.g);
    let b = f64::from(color.b);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;
    let lightness = (max + min) / 2.0;

    let mut hue = 0.0;
    let mut saturation = 0.0;

    if diff > 0.0 {
        hue = if max == r {
            60.0 * (g - b) / diff
        } else if max == g {
            60.0 * (b - r) / diff + 120.0
        } else {
            60.0 * (r - g) / diff + 240.0
        };

        saturation = if lightness <= 127.0 {
            diff / (max + min)
        } else {
            diff / (510.0 - diff)
        };
    }

    if hue < 0.0 {
        hue += 360.0;
    }

    Hsla {
        h: (hue.round() as u16) % 360,
        s: (saturation * 100.0).round() as u8,
        l: (lightness * 100.0 / 255.0).round() as u8,
        a: f32::from(color.a) / 255.0,
    }
}

/// Convert an HSLA color to 8-bit RGBA
///
/// The dark branch covers `l <= 49`, so `l == 50` already takes the
/// light branch. This differs from the `>= 50` contrast threshold used
/// when deriving properties.
pub fn hsla_to_rgba(color: Hsla) -> Rgba {
    let h = f64::from(color.h % 360);
    let s = f64::from(color.s) / 100.0;
    let l = f64::from(color.l);

    let (max, min) = if color.l <= 49 {
        (2.55 * (l + l * s), 2.55 * (l - l * s))
    } else {
        (2.55 * (l + (100.0 - l) * s), 2.55 * (l - (100.0 - l) * s))
    };
    let span = max - min;

    // One channel pinned at max, one at min, the third interpolated
    // across the 60 degree sector.
    let (r, g, b) = if h < 60.0 {
        (max, min + span * (h / 60.0), min)
    } else if h < 120.0 {
        (min + span * ((120.0 - h) / 60.0), max, min)
    } else if h < 180.0 {
        (min, max, min + span * ((h - 120.0) / 60.0))
    } else if h < 240.0 {
        (min, min + span * ((240.0 - h) / 60.0), max)
    } else if h < 300.0 {
        (min + span * ((h - 240.0) / 60.0), min, max)
    } else {
        (max, min, min + span * ((360.0 - h) / 60.0))
    };

    Rgba {
        r: channel(r),
        g: channel(g),
        b: channel(b),
        a: channel(f64::from(color.a) * 255.0),
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
