//! Raster image element.

/// Raster payload of an image element.
///
/// The archive container stores image bytes as named sibling entries and
/// the markup only references them; the flat legacy container inlines
/// the bytes as base64 text. Both resolve to `Inline` once loaded — an
/// `Attachment` value only appears between tree construction and
/// attachment resolution, or when a referenced entry is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// Raw image bytes held in the tree.
    Inline(Vec<u8>),
    /// Name of an archive entry holding the bytes.
    Attachment(String),
}

/// An image placed on a layer, axis-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub data: ImageData,
}

impl ImageElement {
    /// Create an image element from its bounding box and raw bytes.
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64, bytes: Vec<u8>) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            data: ImageData::Inline(bytes),
        }
    }

    /// The inline bytes, if resolved.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.data {
            ImageData::Inline(bytes) => Some(bytes),
            ImageData::Attachment(_) => None,
        }
    }
}
