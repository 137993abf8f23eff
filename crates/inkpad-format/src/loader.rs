//! Loader: a streaming parser that rebuilds the document tree.
//!
//! A single forward pass over the markup events, tracking the state
//! `Idle → InDocument → InPage → InLayer`; element parsing happens
//! inline at the event where the element starts. Unknown element tags
//! inside a layer are skipped whole for forward compatibility; unknown
//! structure above element level, malformed numeric text, an odd
//! coordinate count or an unbalanced tag sequence abort the load. A
//! failed load returns no document.

use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use inkpad_model::{
    Color, Document, Element, ImageData, ImageElement, Layer, Page, PageType, Point, Stroke,
    StrokeTool, TextElement,
};

use crate::container::AttachmentStore;
use crate::error::{FormatError, Result};
use crate::writer::{FORMAT_VERSION, LEGACY_VERSION};

/// Parse a float token from the markup.
fn parse_coord(token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|_| FormatError::NumericToken {
        token: token.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InDocument,
    InPage,
    InLayer,
}

/// Parse a markup stream into a document tree.
///
/// `attachments` supplies the payload bytes for archive-form image
/// references; pass an empty store for the flat forms.
pub fn parse_markup(markup: &[u8], attachments: &AttachmentStore) -> Result<Document> {
    Loader::new(markup, attachments).run()
}

struct Loader<'a> {
    reader: Reader<&'a [u8]>,
    attachments: &'a AttachmentStore,
    state: State,
    document: Document,
    page: Option<Page>,
    layer: Option<Layer>,
}

impl<'a> Loader<'a> {
    fn new(markup: &'a [u8], attachments: &'a AttachmentStore) -> Self {
        let mut reader = Reader::from_reader(markup);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            attachments,
            state: State::Idle,
            document: Document::new(),
            page: None,
            layer: None,
        }
    }

    fn run(mut self) -> Result<Document> {
        let mut root_closed = false;
        loop {
            match self.reader.read_event()? {
                Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_) => {}
                Event::Text(text) => {
                    // Inter-element whitespace from pretty-printed files.
                    if !text.xml_content()?.trim().is_empty() {
                        return Err(FormatError::malformed(
                            "unexpected text content outside an element",
                        ));
                    }
                }
                Event::Start(start) => {
                    if self.handle_start(&start, false)? {
                        root_closed = true;
                    }
                }
                Event::Empty(start) => {
                    if self.handle_start(&start, true)? {
                        root_closed = true;
                    }
                }
                Event::End(end) => {
                    if self.handle_end(end.name())? {
                        root_closed = true;
                    }
                }
                Event::Eof => {
                    if self.state == State::Idle && root_closed {
                        break;
                    }
                    return Err(FormatError::malformed(
                        "unexpected end of document before the root element closed",
                    ));
                }
                other => {
                    return Err(FormatError::malformed(format!(
                        "unexpected markup event: {other:?}"
                    )));
                }
            }
        }

        tracing::debug!(
            pages = self.document.page_count(),
            elements = self.document.element_count(),
            "document parsed"
        );
        Ok(self.document)
    }

    /// Returns true when a self-closing root closed the document.
    fn handle_start(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<bool> {
        match (self.state, start.name().as_ref()) {
            (State::Idle, b"notebook") => {
                self.check_version(start)?;
                self.state = State::InDocument;
                if empty {
                    // A self-closing root is a valid zero-page document.
                    return self.handle_end(start.name());
                }
            }
            (State::Idle, other) => {
                return Err(FormatError::malformed(format!(
                    "unrecognized root element <{}>",
                    String::from_utf8_lossy(other)
                )));
            }
            (State::InDocument, b"page") => {
                let page = self.parse_page_start(start)?;
                if empty {
                    self.document.add_page(page);
                } else {
                    self.page = Some(page);
                    self.state = State::InPage;
                }
            }
            (State::InPage, b"background") => {
                let style = require_attr(start, "background", "style")?;
                let background = PageType::from_str(&style)
                    .map_err(|_| FormatError::UnknownPageType { value: style })?;
                self.current_page()?.set_background(background);
                if !empty {
                    self.reader.read_to_end(start.name())?;
                }
            }
            (State::InPage, b"layer") => {
                if empty {
                    self.current_page()?.add_layer(Layer::new());
                } else {
                    self.layer = Some(Layer::new());
                    self.state = State::InLayer;
                }
            }
            (State::InLayer, b"stroke") => {
                let stroke = self.parse_stroke(start, empty)?;
                self.current_layer()?.add_element(Element::Stroke(stroke));
            }
            (State::InLayer, b"text") => {
                let text = self.parse_text(start, empty)?;
                self.current_layer()?.add_element(Element::Text(text));
            }
            (State::InLayer, b"image") => {
                let image = self.parse_image(start, empty)?;
                self.current_layer()?.add_element(Element::Image(image));
            }
            (State::InLayer, unknown) => {
                // Unknown element kind inside a recognized container:
                // skip the subtree so future formats stay loadable.
                tracing::debug!(
                    tag = %String::from_utf8_lossy(unknown),
                    "skipping unknown layer element"
                );
                if !empty {
                    self.reader.read_to_end(start.name())?;
                }
            }
            (_, other) => {
                return Err(FormatError::malformed(format!(
                    "unexpected element <{}>",
                    String::from_utf8_lossy(other)
                )));
            }
        }
        Ok(false)
    }

    /// Returns true when the root element was closed.
    fn handle_end(&mut self, name: QName<'_>) -> Result<bool> {
        match (self.state, name.as_ref()) {
            (State::InDocument, b"notebook") => {
                self.state = State::Idle;
                return Ok(true);
            }
            (State::InPage, b"page") => {
                let page = self.page.take().ok_or_else(|| {
                    FormatError::malformed("page close without an open page")
                })?;
                self.document.add_page(page);
                self.state = State::InDocument;
            }
            (State::InLayer, b"layer") => {
                let layer = self.layer.take().ok_or_else(|| {
                    FormatError::malformed("layer close without an open layer")
                })?;
                self.current_page()?.add_layer(layer);
                self.state = State::InPage;
            }
            (_, other) => {
                return Err(FormatError::malformed(format!(
                    "unbalanced closing tag </{}>",
                    String::from_utf8_lossy(other)
                )));
            }
        }
        Ok(false)
    }

    fn check_version(&self, start: &BytesStart<'_>) -> Result<()> {
        let version = require_attr(start, "notebook", "version")?;
        if version != FORMAT_VERSION && version != LEGACY_VERSION {
            return Err(FormatError::UnsupportedVersion { version });
        }
        Ok(())
    }

    fn parse_page_start(&self, start: &BytesStart<'_>) -> Result<Page> {
        let width = parse_coord(&require_attr(start, "page", "width")?)?;
        let height = parse_coord(&require_attr(start, "page", "height")?)?;
        Ok(Page::new(width, height))
    }

    fn parse_stroke(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<Stroke> {
        let mut stroke = Stroke::new();

        let width_attr = require_attr(start, "stroke", "width")?;
        let mut tokens = width_attr.split_whitespace();
        let base = tokens
            .next()
            .ok_or_else(|| FormatError::missing_attribute("stroke", "width"))?;
        let base = parse_coord(base)?;
        let widths = tokens.map(parse_coord).collect::<Result<Vec<f64>>>()?;
        stroke.set_width(base, widths);

        if let Some(tool) = optional_attr(start, "tool")? {
            stroke.tool = StrokeTool::from_str(&tool)
                .map_err(|_| FormatError::malformed(format!("unknown stroke tool {tool:?}")))?;
        }
        if let Some(color) = optional_attr(start, "color")? {
            stroke.color = Color::from_str(&color)
                .map_err(|_| FormatError::malformed(format!("invalid color {color:?}")))?;
        }

        if empty {
            return Ok(stroke);
        }

        let body = self.read_element_text(start.name())?;
        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            return Err(FormatError::OddCoordinateCount {
                count: tokens.len(),
            });
        }
        let mut points = Vec::with_capacity(tokens.len() / 2);
        for pair in tokens.chunks_exact(2) {
            points.push(Point::new(parse_coord(pair[0])?, parse_coord(pair[1])?));
        }
        stroke.set_points(points);
        Ok(stroke)
    }

    fn parse_text(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<TextElement> {
        let x = parse_coord(&require_attr(start, "text", "x")?)?;
        let y = parse_coord(&require_attr(start, "text", "y")?)?;
        let mut text = TextElement::new(String::new(), x, y);

        if let Some(size) = optional_attr(start, "size")? {
            text.size = parse_coord(&size)?;
        }
        if let Some(font) = optional_attr(start, "font")? {
            text.font = font;
        }
        if let Some(color) = optional_attr(start, "color")? {
            text.color = Color::from_str(&color)
                .map_err(|_| FormatError::malformed(format!("invalid color {color:?}")))?;
        }

        if !empty {
            text.text = self.read_element_text(start.name())?;
        }
        Ok(text)
    }

    fn parse_image(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<ImageElement> {
        let left = parse_coord(&require_attr(start, "image", "left")?)?;
        let top = parse_coord(&require_attr(start, "image", "top")?)?;
        let right = parse_coord(&require_attr(start, "image", "right")?)?;
        let bottom = parse_coord(&require_attr(start, "image", "bottom")?)?;

        let data = if let Some(name) = optional_attr(start, "attachment")? {
            let bytes = self.attachments.get(&name).ok_or_else(|| {
                FormatError::malformed(format!("missing attachment entry {name:?}"))
            })?;
            if !empty {
                self.reader.read_to_end(start.name())?;
            }
            ImageData::Inline(bytes.to_vec())
        } else {
            if empty {
                return Err(FormatError::malformed("image element has no payload"));
            }
            let body = self.read_element_text(start.name())?;
            let compact: String = body.split_whitespace().collect();
            let bytes = BASE64.decode(compact.as_bytes()).map_err(|error| {
                FormatError::malformed(format!("invalid inline image payload: {error}"))
            })?;
            ImageData::Inline(bytes)
        };

        Ok(ImageElement {
            left,
            top,
            right,
            bottom,
            data,
        })
    }

    /// Collect the text content of the element opened by `end`'s pair,
    /// up to its closing tag. Character and predefined entity references
    /// are resolved into the content; nested markup is a format error.
    fn read_element_text(&mut self, end: QName<'_>) -> Result<String> {
        let mut content = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(text) => content.push_str(&text.xml_content()?),
                Event::GeneralRef(reference) => {
                    if let Some(ch) = reference.resolve_char_ref()? {
                        content.push(ch);
                    } else {
                        match reference.decode()?.as_ref() {
                            "lt" => content.push('<'),
                            "gt" => content.push('>'),
                            "amp" => content.push('&'),
                            "apos" => content.push('\''),
                            "quot" => content.push('"'),
                            entity => {
                                return Err(FormatError::malformed(format!(
                                    "unresolved entity reference &{entity};"
                                )));
                            }
                        }
                    }
                }
                Event::Comment(_) => {}
                Event::End(e) if e.name() == end => break,
                Event::Eof => {
                    return Err(FormatError::malformed(
                        "unexpected end of document inside an element",
                    ));
                }
                _ => {
                    return Err(FormatError::malformed(format!(
                        "unexpected markup inside <{}>",
                        String::from_utf8_lossy(end.as_ref())
                    )));
                }
            }
        }
        Ok(content)
    }

    fn current_page(&mut self) -> Result<&mut Page> {
        self.page
            .as_mut()
            .ok_or_else(|| FormatError::malformed("element outside a page"))
    }

    fn current_layer(&mut self) -> Result<&mut Layer> {
        self.layer
            .as_mut()
            .ok_or_else(|| FormatError::malformed("element outside a layer"))
    }
}

/// Fetch a required attribute, unescaped.
fn require_attr(start: &BytesStart<'_>, tag: &'static str, name: &'static str) -> Result<String> {
    optional_attr(start, name)?.ok_or_else(|| FormatError::missing_attribute(tag, name))
}

/// Fetch an optional attribute, unescaped. Unknown attributes on any
/// element are ignored by the callers, so lookups are by name.
fn optional_attr(start: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr: Attribute<'_> = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
