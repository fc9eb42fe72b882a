//! RGB colors and the report's named palette.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color. Serializes as a `[r, g, b]` array and renders
/// as a CSS `rgb(r, g, b)` paint value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Light grey, used for ring axes.
    pub const LIGHT_GREY: Self = Self([150, 150, 150]);
    /// Very light grey, used for N/A badges and unselected chains.
    pub const VERY_LIGHT_GREY: Self = Self([200, 200, 200]);
    /// Outlier red.
    pub const RED: Self = Self([200, 80, 80]);
    /// Allowed orange.
    pub const ORANGE: Self = Self([250, 200, 50]);
    /// Favoured green.
    pub const GREEN: Self = Self([50, 200, 50]);
    /// Blue ring color.
    pub const BLUE: Self = Self([50, 50, 200]);
    /// Cyan ring color; also the selected-chain highlight.
    pub const CYAN: Self = Self([50, 200, 200]);
    /// Teal ring color.
    pub const TEAL: Self = Self([0, 120, 120]);
    /// Slate ring color.
    pub const SLATE: Self = Self([120, 160, 200]);
    /// Magenta ring color.
    pub const MAGENTA: Self = Self([200, 50, 200]);
    /// Indigo ring color.
    pub const INDIGO: Self = Self([80, 0, 120]);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "rgb({r}, {g}, {b})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_css_rgb() {
        assert_eq!(Color::CYAN.to_string(), "rgb(50, 200, 200)");
        assert_eq!(Color::TEAL.to_string(), "rgb(0, 120, 120)");
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&Color::ORANGE).unwrap();
        assert_eq!(json, "[250,200,50]");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::ORANGE);
    }
}
