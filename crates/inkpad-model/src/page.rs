//! Pages, layers and page backgrounds.

use std::fmt;
use std::str::FromStr;

use crate::element::Element;

/// Background kind of a page.
///
/// Parsed from the serialized `style` token; an unrecognized token is a
/// parse error, never a silent default, because a misread background
/// would survive the next save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum PageType {
    #[default]
    Plain,
    Ruled,
    Lined,
    Staves,
    Graph,
    /// Background rendered from an image.
    Image,
}

impl PageType {
    /// Canonical serialized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Ruled => "ruled",
            Self::Lined => "lined",
            Self::Staves => "staves",
            Self::Graph => "graph",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "ruled" => Ok(Self::Ruled),
            "lined" => Ok(Self::Lined),
            "staves" => Ok(Self::Staves),
            "graph" => Ok(Self::Graph),
            "image" => Ok(Self::Image),
            _ => Err(format!("unknown page background: {s}")),
        }
    }
}

/// An ordered stack slot of elements within a page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    elements: Vec<Element>,
}

impl Layer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, preserving document order.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// One document page: dimensions, background and an ordered layer stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    background: PageType,
    layers: Vec<Layer>,
}

impl Page {
    /// Create an empty page with a plain background.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: PageType::Plain,
            layers: Vec::new(),
        }
    }

    pub fn set_background(&mut self, background: PageType) {
        self.background = background;
    }

    #[must_use]
    pub fn background(&self) -> PageType {
        self.background
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
