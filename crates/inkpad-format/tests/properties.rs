//! Property tests for the numeric round-trip contract.

use proptest::prelude::*;

use inkpad_format::{ContainerKind, format_coord, load_document_from_bytes, save_document_to_bytes};
use inkpad_model::{Document, Element, Layer, Page, Point, Stroke, set_precision};

/// Coordinate range covering realistic page geometry with headroom.
fn coord() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6
}

proptest! {
    #[test]
    fn prop_set_precision_idempotent(value in coord()) {
        let once = set_precision(value);
        prop_assert_eq!(set_precision(once), once);
    }

    #[test]
    fn prop_format_parse_identity(value in coord()) {
        // A normalized coordinate re-parses to exactly itself.
        let normalized = set_precision(value);
        let parsed: f64 = format_coord(normalized).parse().unwrap();
        prop_assert_eq!(parsed, normalized);
    }

    #[test]
    fn prop_stroke_roundtrip(
        raw_points in prop::collection::vec((coord(), coord()), 0..40),
        base_width in 0.01f64..50.0,
        raw_widths in prop::collection::vec(0.01f64..50.0, 0..12),
    ) {
        let mut stroke = Stroke::new();
        stroke.set_width(
            set_precision(base_width),
            raw_widths.iter().copied().map(set_precision).collect(),
        );
        for (x, y) in &raw_points {
            stroke.add_point(Point::new(*x, *y));
        }

        let mut layer = Layer::new();
        layer.add_element(Element::Stroke(stroke));
        let mut page = Page::new(100.0, 100.0);
        page.add_layer(layer);
        let mut document = Document::new();
        document.add_page(page);

        for kind in [ContainerKind::Archive, ContainerKind::Flat] {
            let bytes = save_document_to_bytes(&document, kind).unwrap();
            let loaded = load_document_from_bytes(&bytes).unwrap();
            prop_assert_eq!(&loaded, &document);
        }
    }
}
