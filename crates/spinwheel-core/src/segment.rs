//! Segment data and the visual attributes attached to it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the color with its alpha scaled by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let scaled = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: scaled, ..self }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

/// Opaque handle to a host-side image resource (asset name, texture id, ...).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconRef(pub String);

/// Font requested for a segment label. Resolution is up to the host.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

/// One wedge of the wheel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: u32,
    pub text: String,
    /// One color fills the wedge; more than one become a radial gradient.
    pub background_colors: Vec<Color>,
    /// Only the first entry is used for the label.
    pub text_colors: Vec<Color>,
    pub icon: Option<IconRef>,
    pub font: Option<FontSpec>,
}

impl Segment {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            background_colors: vec![Color::BLACK],
            text_colors: vec![Color::WHITE],
            icon: None,
            font: None,
        }
    }

    pub fn with_background(mut self, colors: impl Into<Vec<Color>>) -> Self {
        self.background_colors = colors.into();
        self
    }

    pub fn with_text_colors(mut self, colors: impl Into<Vec<Color>>) -> Self {
        self.text_colors = colors.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(IconRef(icon.into()));
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font = Some(FontSpec {
            family: family.into(),
            size,
        });
        self
    }

    /// Label color, falling back to white when none is set.
    pub fn text_color(&self) -> Color {
        self.text_colors.first().copied().unwrap_or(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(
            Color::from_hex("10203040"),
            Some(Color::rgba(0x10, 0x20, 0x30, 0x40))
        );
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn opacity_scales_alpha_only() {
        let glow = Color::rgb(10, 20, 30).with_opacity(0.4);
        assert_eq!(glow, Color::rgba(10, 20, 30, 102));
        assert_eq!(Color::WHITE.with_opacity(2.0).a, 255);
    }

    #[test]
    fn text_color_falls_back_to_white() {
        let segment = Segment::new(1, "Prize").with_text_colors(Vec::new());
        assert_eq!(segment.text_color(), Color::WHITE);
    }
}
