//! Notebook document serialization.
//!
//! This crate persists a document tree ([`inkpad_model::Document`]) to
//! and from its on-disk forms and reconstructs the exact tree on load:
//!
//! - a locale-independent markup writer ([`writer`]),
//! - a container layer handling the zip archive form, the gzip flat
//!   legacy form and the plain flat form ([`container`]),
//! - a streaming loader that rebuilds the page → layer → element tree
//!   ([`loader`]).
//!
//! The round-trip contract is `load(save(tree)) == tree`: coordinates
//! and widths survive within the fixed 8-decimal precision, and page,
//! layer and element order survive exactly. Loads and saves are
//! synchronous single passes; a failed load returns no document.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use inkpad_format::{SaveOptions, load_document, save_document};
//!
//! let document = load_document(Path::new("notes.ink")).unwrap();
//! println!("{} page(s)", document.page_count());
//! save_document(Path::new("notes-copy.ink"), &document, &SaveOptions::default()).unwrap();
//! ```

pub mod container;
pub mod error;
pub mod loader;
pub mod writer;

use std::fs;
use std::io::Write;
use std::path::Path;

use inkpad_model::Document;
use tempfile::NamedTempFile;

pub use container::{AttachmentStore, ContainerKind, DOCUMENT_ENTRY};
pub use error::{FormatError, Result};
pub use loader::parse_markup;
pub use writer::{FORMAT_VERSION, LEGACY_VERSION, PayloadMode, format_coord};

/// Options for saving a document.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Container form to write. New saves default to the archive form;
    /// the flat forms stay writable for legacy interoperability.
    pub kind: ContainerKind,
}

impl SaveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ContainerKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Load a document from container bytes, whatever their form.
pub fn load_document_from_bytes(bytes: &[u8]) -> Result<Document> {
    let payload = container::read_container(bytes)?;
    parse_markup(&payload.markup, &payload.attachments)
}

/// Load a document from a file.
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            FormatError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FormatError::Io(error)
        }
    })?;
    let document = load_document_from_bytes(&bytes)?;
    tracing::debug!(path = %path.display(), pages = document.page_count(), "document loaded");
    Ok(document)
}

/// Serialize a document to container bytes of the given form.
pub fn save_document_to_bytes(document: &Document, kind: ContainerKind) -> Result<Vec<u8>> {
    let payloads = match kind {
        ContainerKind::Archive => PayloadMode::Attachments,
        ContainerKind::CompressedFlat | ContainerKind::Flat => PayloadMode::Inline,
    };
    let (markup, attachments) = writer::write_markup(document, payloads)?;
    container::write_container(kind, &markup, &attachments)
}

/// Save a document to a file.
///
/// The bytes are staged in a temporary file next to the target and
/// moved into place afterwards, so a failed save leaves no partial
/// document behind.
pub fn save_document(path: &Path, document: &Document, options: &SaveOptions) -> Result<()> {
    let bytes = save_document_to_bytes(document, options.kind)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    staged
        .persist(path)
        .map_err(|error| FormatError::Io(error.error))?;

    tracing::debug!(
        path = %path.display(),
        kind = options.kind.label(),
        pages = document.page_count(),
        "document saved"
    );
    Ok(())
}
