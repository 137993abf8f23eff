//! Document tree and stroke geometry model.
//!
//! This crate provides the in-memory representation of an annotation
//! document: pages containing layers, layers containing elements
//! (strokes, text, images), plus the geometry primitives the stroke
//! model is built on.
//!
//! Ownership is strictly hierarchical: a [`Document`] owns its
//! [`Page`]s, a page owns its [`Layer`]s, a layer owns its
//! [`Element`]s. The tree is built fresh by the format loader and
//! traversed read-only by the writer; nothing in here holds
//! back-references or shared state.
//!
//! # Example
//!
//! ```
//! use inkpad_model::{Document, Element, Layer, Page, PageType, Point, Stroke};
//!
//! let mut stroke = Stroke::new();
//! stroke.add_point(Point::new(10.0, 20.0));
//! stroke.add_point(Point::new(30.0, 40.0));
//! stroke.set_width(1.41, vec![]);
//!
//! let mut layer = Layer::new();
//! layer.add_element(Element::Stroke(stroke));
//!
//! let mut page = Page::new(595.27, 841.89);
//! page.set_background(PageType::Lined);
//! page.add_layer(layer);
//!
//! let mut document = Document::new();
//! document.add_page(page);
//! assert_eq!(document.page_count(), 1);
//! ```

pub mod color;
pub mod document;
pub mod element;
pub mod image;
pub mod page;
pub mod point;
pub mod stroke;
pub mod text;

pub use color::Color;
pub use document::Document;
pub use element::Element;
pub use image::{ImageData, ImageElement};
pub use page::{Layer, Page, PageType};
pub use point::{DECIMAL_PLACES, Point, set_precision};
pub use stroke::{Stroke, StrokeTool};
pub use text::TextElement;
