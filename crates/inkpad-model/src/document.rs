//! Document root.

use crate::page::Page;

/// A whole annotation document: an ordered sequence of pages.
///
/// Built fresh by the loader or traversed read-only by the writer;
/// this core never mutates a tree in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total element count across all pages and layers.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(Page::layers)
            .map(|layer| layer.element_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::page::Layer;
    use crate::stroke::Stroke;

    #[test]
    fn test_counts() {
        let mut layer = Layer::new();
        layer.add_element(Element::Stroke(Stroke::new()));
        layer.add_element(Element::Stroke(Stroke::new()));

        let mut page = Page::new(100.0, 200.0);
        page.add_layer(layer);
        page.add_layer(Layer::new());

        let mut document = Document::new();
        document.add_page(page);

        assert_eq!(document.page_count(), 1);
        assert_eq!(document.pages()[0].layer_count(), 2);
        assert_eq!(document.element_count(), 2);
    }
}
