//! Text element.

use crate::color::Color;

/// A block of text placed on a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Font size in points.
    pub size: f64,
    pub font: String,
    pub color: Color,
}

impl TextElement {
    /// Create a text element at a position with the default font.
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size: 12.0,
            font: "Sans".to_string(),
            color: Color::BLACK,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
