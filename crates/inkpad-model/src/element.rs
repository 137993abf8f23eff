//! Layer elements.

use crate::image::ImageElement;
use crate::stroke::Stroke;
use crate::text::TextElement;

/// A renderable unit inside a layer.
///
/// Closed sum type over the supported element kinds. The loader skips
/// unknown element tags on disk for forward compatibility, so this enum
/// only ever holds kinds the engine fully understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Stroke(Stroke),
    Text(TextElement),
    Image(ImageElement),
}

impl Element {
    #[must_use]
    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Element::Stroke(stroke) => Some(stroke),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(image) => Some(image),
            _ => None,
        }
    }
}
