#![forbid(unsafe_code)]

//! Color types.

/// 24-bit RGB terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Color {
    /// Create a new RGB color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const RED: Color = Color::rgb(204, 54, 54);
    pub const GREEN: Color = Color::rgb(64, 160, 96);
    pub const YELLOW: Color = Color::rgb(214, 170, 60);
    pub const BLUE: Color = Color::rgb(66, 110, 210);
    pub const CYAN: Color = Color::rgb(60, 170, 180);
}
