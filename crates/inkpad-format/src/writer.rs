//! Markup writer.
//!
//! Renders a document tree into the nested tagged markup form. All
//! floating-point values go through [`format_coord`], which produces a
//! fixed 8-decimal ASCII representation with `.` as the decimal
//! separator regardless of the process locale. Output is deterministic
//! for deterministic input; the writer never emits trailing separators.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use inkpad_model::{Document, Element, ImageData, ImageElement, Layer, Page, Stroke, TextElement};

use crate::error::{FormatError, Result};

/// Document version stamped on current (archive) saves.
pub const FORMAT_VERSION: &str = "2";

/// Document version stamped on flat legacy saves with inline payloads.
pub const LEGACY_VERSION: &str = "1";

const CREATOR: &str = concat!("inkpad ", env!("CARGO_PKG_VERSION"));

/// Format a float with fixed 8-decimal precision, `.` separator, no
/// grouping. The decimal count matches the precision points are
/// normalized to, so a parsed coordinate re-serializes identically.
#[must_use]
pub fn format_coord(value: f64) -> String {
    format!("{value:.8}")
}

/// How image payloads are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Base64 text inside the image element body (flat legacy form).
    Inline,
    /// Named sibling archive entries referenced from the markup.
    Attachments,
}

/// A binary payload to be stored next to the markup in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Entry name as referenced from the markup.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Serializes one document tree into markup, collecting archive
/// attachments along the way when in [`PayloadMode::Attachments`].
pub struct DocumentWriter<W: Write> {
    xml: Writer<W>,
    payloads: PayloadMode,
    attachments: Vec<Attachment>,
    next_image: usize,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(writer: W, payloads: PayloadMode) -> Self {
        Self {
            xml: Writer::new_with_indent(writer, b' ', 2),
            payloads,
            attachments: Vec::new(),
            next_image: 0,
        }
    }

    /// Write the whole tree and return the collected attachments.
    pub fn write_document(mut self, document: &Document) -> Result<Vec<Attachment>> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let version = match self.payloads {
            PayloadMode::Inline => LEGACY_VERSION,
            PayloadMode::Attachments => FORMAT_VERSION,
        };
        let mut root = BytesStart::new("notebook");
        root.push_attribute(("version", version));
        root.push_attribute(("creator", CREATOR));
        self.xml.write_event(Event::Start(root))?;

        for page in document.pages() {
            self.write_page(page)?;
        }

        self.xml.write_event(Event::End(BytesEnd::new("notebook")))?;
        Ok(self.attachments)
    }

    fn write_page(&mut self, page: &Page) -> Result<()> {
        let mut elem = BytesStart::new("page");
        elem.push_attribute(("width", format_coord(page.width).as_str()));
        elem.push_attribute(("height", format_coord(page.height).as_str()));
        self.xml.write_event(Event::Start(elem))?;

        let mut background = BytesStart::new("background");
        background.push_attribute(("style", page.background().as_str()));
        self.xml.write_event(Event::Empty(background))?;

        for layer in page.layers() {
            self.write_layer(layer)?;
        }

        self.xml.write_event(Event::End(BytesEnd::new("page")))?;
        Ok(())
    }

    fn write_layer(&mut self, layer: &Layer) -> Result<()> {
        if layer.elements().is_empty() {
            self.xml.write_event(Event::Empty(BytesStart::new("layer")))?;
            return Ok(());
        }
        self.xml.write_event(Event::Start(BytesStart::new("layer")))?;
        for element in layer.elements() {
            match element {
                Element::Stroke(stroke) => self.write_stroke(stroke)?,
                Element::Text(text) => self.write_text(text)?,
                Element::Image(image) => self.write_image(image)?,
            }
        }
        self.xml.write_event(Event::End(BytesEnd::new("layer")))?;
        Ok(())
    }

    /// Write one stroke element.
    ///
    /// The `width` attribute is the base width followed by each segment
    /// width in order, space-separated. The body is a single run of
    /// `x y` coordinate pairs, pairs separated by single spaces. A
    /// stroke with no points is written self-closing.
    ///
    /// Positions only: a point's pressure reading is not part of the
    /// grammar (the segment widths are the serialized record of a
    /// pressure-sensitive stroke), so every reloaded point reads
    /// [`inkpad_model::Point::NO_PRESSURE`].
    fn write_stroke(&mut self, stroke: &Stroke) -> Result<()> {
        let mut width = format_coord(stroke.width());
        for segment in stroke.segment_widths() {
            width.push(' ');
            width.push_str(&format_coord(*segment));
        }

        let mut elem = BytesStart::new("stroke");
        elem.push_attribute(("tool", stroke.tool.as_str()));
        elem.push_attribute(("color", stroke.color.to_hex().as_str()));
        elem.push_attribute(("width", width.as_str()));

        if stroke.points().is_empty() {
            self.xml.write_event(Event::Empty(elem))?;
            return Ok(());
        }

        let mut body = String::new();
        for (idx, point) in stroke.points().iter().enumerate() {
            if idx > 0 {
                body.push(' ');
            }
            body.push_str(&format_coord(point.x));
            body.push(' ');
            body.push_str(&format_coord(point.y));
        }

        self.xml.write_event(Event::Start(elem))?;
        self.xml.write_event(Event::Text(BytesText::new(&body)))?;
        self.xml.write_event(Event::End(BytesEnd::new("stroke")))?;
        Ok(())
    }

    fn write_text(&mut self, text: &TextElement) -> Result<()> {
        let mut elem = BytesStart::new("text");
        elem.push_attribute(("font", text.font.as_str()));
        elem.push_attribute(("size", format_coord(text.size).as_str()));
        elem.push_attribute(("x", format_coord(text.x).as_str()));
        elem.push_attribute(("y", format_coord(text.y).as_str()));
        elem.push_attribute(("color", text.color.to_hex().as_str()));

        self.xml.write_event(Event::Start(elem))?;
        self.xml
            .write_event(Event::Text(BytesText::new(&text.text)))?;
        self.xml.write_event(Event::End(BytesEnd::new("text")))?;
        Ok(())
    }

    fn write_image(&mut self, image: &ImageElement) -> Result<()> {
        let bytes = match &image.data {
            ImageData::Inline(bytes) => bytes,
            ImageData::Attachment(name) => {
                // Loaded trees always carry resolved payloads; an
                // unresolved reference here cannot be written faithfully.
                return Err(FormatError::malformed(format!(
                    "image references unresolved attachment {name:?}"
                )));
            }
        };

        let mut elem = BytesStart::new("image");
        elem.push_attribute(("left", format_coord(image.left).as_str()));
        elem.push_attribute(("top", format_coord(image.top).as_str()));
        elem.push_attribute(("right", format_coord(image.right).as_str()));
        elem.push_attribute(("bottom", format_coord(image.bottom).as_str()));

        match self.payloads {
            PayloadMode::Inline => {
                let encoded = BASE64.encode(bytes);
                self.xml.write_event(Event::Start(elem))?;
                self.xml.write_event(Event::Text(BytesText::new(&encoded)))?;
                self.xml.write_event(Event::End(BytesEnd::new("image")))?;
            }
            PayloadMode::Attachments => {
                self.next_image += 1;
                let name = format!("image-{}", self.next_image);
                elem.push_attribute(("attachment", name.as_str()));
                self.xml.write_event(Event::Empty(elem))?;
                self.attachments.push(Attachment {
                    name,
                    bytes: bytes.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Render a document to markup bytes, returning the attachments to be
/// stored next to it (empty in [`PayloadMode::Inline`]).
pub fn write_markup(document: &Document, payloads: PayloadMode) -> Result<(Vec<u8>, Vec<Attachment>)> {
    let mut buffer = Vec::new();
    let attachments = DocumentWriter::new(&mut buffer, payloads).write_document(document)?;
    Ok((buffer, attachments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_model::{Color, PageType, Point};

    fn markup(document: &Document, payloads: PayloadMode) -> String {
        let (bytes, _) = write_markup(document, payloads).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_format_coord_fixed_precision() {
        assert_eq!(format_coord(1.0), "1.00000000");
        assert_eq!(format_coord(-0.5), "-0.50000000");
        assert_eq!(format_coord(12.34567891), "12.34567891");
    }

    #[test]
    fn test_stroke_width_attribute() {
        let mut stroke = Stroke::new();
        stroke.set_width(1.5, vec![0.5, 0.75]);
        stroke.add_point(Point::new(1.0, 2.0));
        stroke.add_point(Point::new(3.0, 4.0));
        stroke.color = Color(0xff0000);

        let mut layer = Layer::new();
        layer.add_element(Element::Stroke(stroke));
        let mut page = Page::new(10.0, 10.0);
        page.add_layer(layer);
        let mut document = Document::new();
        document.add_page(page);

        let text = markup(&document, PayloadMode::Inline);
        assert!(text.contains(r#"width="1.50000000 0.50000000 0.75000000""#));
        assert!(text.contains(">1.00000000 2.00000000 3.00000000 4.00000000</stroke>"));
        assert!(text.contains(r##"color="#ff0000""##));
    }

    #[test]
    fn test_zero_point_stroke_self_closes() {
        let mut stroke = Stroke::new();
        stroke.set_width(2.0, vec![1.0]);

        let mut layer = Layer::new();
        layer.add_element(Element::Stroke(stroke));
        let mut page = Page::new(10.0, 10.0);
        page.add_layer(layer);
        let mut document = Document::new();
        document.add_page(page);

        let text = markup(&document, PayloadMode::Inline);
        assert!(text.contains(r#"width="2.00000000 1.00000000"/>"#));
        assert!(!text.contains("</stroke>"));
    }

    #[test]
    fn test_version_attribute_per_mode() {
        let document = Document::new();
        assert!(markup(&document, PayloadMode::Inline).contains(r#"version="1""#));
        assert!(markup(&document, PayloadMode::Attachments).contains(r#"version="2""#));
    }

    #[test]
    fn test_background_style_written() {
        let mut page = Page::new(10.0, 10.0);
        page.set_background(PageType::Graph);
        let mut document = Document::new();
        document.add_page(page);

        let text = markup(&document, PayloadMode::Inline);
        assert!(text.contains(r#"<background style="graph"/>"#));
    }

    #[test]
    fn test_image_modes() {
        let image = ImageElement::new(0.0, 0.0, 5.0, 5.0, vec![1, 2, 3]);
        let mut layer = Layer::new();
        layer.add_element(Element::Image(image));
        let mut page = Page::new(10.0, 10.0);
        page.add_layer(layer);
        let mut document = Document::new();
        document.add_page(page);

        let inline = markup(&document, PayloadMode::Inline);
        assert!(inline.contains(&BASE64.encode([1u8, 2, 3])));

        let (bytes, attachments) = write_markup(&document, PayloadMode::Attachments).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#"attachment="image-1""#));
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_text_content_escaped() {
        let mut layer = Layer::new();
        layer.add_element(Element::Text(TextElement::new("a < b & c", 1.0, 2.0)));
        let mut page = Page::new(10.0, 10.0);
        page.add_layer(layer);
        let mut document = Document::new();
        document.add_page(page);

        let text = markup(&document, PayloadMode::Inline);
        assert!(text.contains("a &lt; b &amp; c"));
    }
}
