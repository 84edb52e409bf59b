//! Hex color parsing and brightness shifting

use crate::error::{Error, Result};

/// Neutral gray used when no team is selected
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Brightness shift for the fill of completed nodes
pub const COMPLETED_FILL_DELTA: i32 = -30;

/// Brightness shift for the name of a completed task in the details view
pub const COMPLETED_NAME_DELTA: i32 = 20;

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional)
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.trim().trim_start_matches('#');
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(input.to_string()));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|ch| [ch, ch]).collect(),
            6 => digits.to_string(),
            _ => return Err(Error::InvalidColor(input.to_string())),
        };

        let channel = |idx: usize| {
            u8::from_str_radix(&expanded[idx * 2..idx * 2 + 2], 16)
                .map_err(|_| Error::InvalidColor(input.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(1)?,
            b: channel(2)?,
        })
    }

    /// Scale every channel by `1 + delta/100`, flooring and clamping to `0..=255`
    pub fn shift(self, delta: i32) -> Self {
        let factor = 1.0 + f64::from(delta) / 100.0;
        let scale = |value: u8| (f64::from(value) * factor).floor().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lighten (positive delta) or darken (negative delta) a hex color.
///
/// Short-form input is expanded before the channels are scaled; the result is
/// always six lowercase hex digits.
pub fn derive_color(color: &str, delta: i32) -> Result<String> {
    Ok(Rgb::parse(color)?.shift(delta).to_hex())
}
