//! Container abstraction.
//!
//! A document is persisted in one of three on-disk forms:
//!
//! - **Archive**: a zip container with the markup at [`DOCUMENT_ENTRY`]
//!   and binary payloads as sibling entries under `attachments/`.
//! - **CompressedFlat**: the historical default, one gzip-wrapped
//!   markup stream with payloads inlined as base64 text.
//! - **Flat**: the same stream uncompressed.
//!
//! The form is always determined by inspecting the resource signature,
//! never by a caller-supplied flag: a mislabeled file must still open.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{FormatError, Result};
use crate::writer::Attachment;

/// Archive entry holding the document markup.
pub const DOCUMENT_ENTRY: &str = "document.xml";

/// Archive directory holding binary payload entries.
pub const ATTACHMENT_DIR: &str = "attachments";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Persisted container form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerKind {
    /// Zip archive with markup and attachment entries (current form).
    #[default]
    Archive,
    /// Gzip-compressed flat markup (legacy default).
    CompressedFlat,
    /// Plain flat markup.
    Flat,
}

impl ContainerKind {
    /// Detect the container form from the resource's leading bytes.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(ZIP_MAGIC) {
            return Ok(Self::Archive);
        }
        if bytes.starts_with(GZIP_MAGIC) {
            return Ok(Self::CompressedFlat);
        }
        let text = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        if text
            .iter()
            .find(|byte| !byte.is_ascii_whitespace())
            .is_some_and(|byte| *byte == b'<')
        {
            return Ok(Self::Flat);
        }
        Err(FormatError::malformed("unrecognized container signature"))
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::CompressedFlat => "gzip",
            Self::Flat => "flat",
        }
    }
}

/// Named binary payloads read from an archive container.
#[derive(Debug, Clone, Default)]
pub struct AttachmentStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl AttachmentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The markup stream and payloads extracted from one container.
#[derive(Debug)]
pub struct ContainerPayload {
    pub kind: ContainerKind,
    pub markup: Vec<u8>,
    pub attachments: AttachmentStore,
}

/// Open a container from raw resource bytes.
pub fn read_container(bytes: &[u8]) -> Result<ContainerPayload> {
    let kind = ContainerKind::detect(bytes)?;
    tracing::debug!(kind = kind.label(), len = bytes.len(), "reading container");
    match kind {
        ContainerKind::Archive => read_archive(bytes),
        ContainerKind::CompressedFlat => {
            let mut markup = Vec::new();
            GzDecoder::new(bytes).read_to_end(&mut markup)?;
            Ok(ContainerPayload {
                kind,
                markup,
                attachments: AttachmentStore::new(),
            })
        }
        ContainerKind::Flat => Ok(ContainerPayload {
            kind,
            markup: bytes.to_vec(),
            attachments: AttachmentStore::new(),
        }),
    }
}

fn read_archive(bytes: &[u8]) -> Result<ContainerPayload> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut markup = Vec::new();
    archive
        .by_name(DOCUMENT_ENTRY)
        .map_err(|_| {
            FormatError::malformed(format!("archive has no {DOCUMENT_ENTRY} entry"))
        })?
        .read_to_end(&mut markup)?;

    let mut attachments = AttachmentStore::new();
    let prefix = format!("{ATTACHMENT_DIR}/");
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(name) = entry.name().strip_prefix(&prefix).map(str::to_owned) else {
            continue;
        };
        if name.is_empty() {
            // Directory entry for attachments/ itself.
            continue;
        }
        let mut payload = Vec::new();
        entry.read_to_end(&mut payload)?;
        attachments.insert(name, payload);
    }

    Ok(ContainerPayload {
        kind: ContainerKind::Archive,
        markup,
        attachments,
    })
}

/// Wrap a rendered markup stream and its attachments into container
/// bytes of the requested kind.
///
/// Attachments are only representable in the archive form; the flat
/// forms expect them already inlined by the writer.
pub fn write_container(
    kind: ContainerKind,
    markup: &[u8],
    attachments: &[Attachment],
) -> Result<Vec<u8>> {
    match kind {
        ContainerKind::Archive => write_archive(markup, attachments),
        ContainerKind::CompressedFlat => {
            debug_assert!(attachments.is_empty());
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(markup)?;
            Ok(encoder.finish()?)
        }
        ContainerKind::Flat => {
            debug_assert!(attachments.is_empty());
            Ok(markup.to_vec())
        }
    }
}

fn write_archive(markup: &[u8], attachments: &[Attachment]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut archive = ZipWriter::new(Cursor::new(&mut buffer));

        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        archive.start_file(DOCUMENT_ENTRY, deflated)?;
        archive.write_all(markup)?;

        // Image bytes are usually compressed already; store them as-is.
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for attachment in attachments {
            archive.start_file(format!("{ATTACHMENT_DIR}/{}", attachment.name), stored)?;
            archive.write_all(&attachment.bytes)?;
        }

        archive.finish()?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_archive() {
        let bytes = write_archive(b"<notebook/>", &[]).unwrap();
        assert_eq!(ContainerKind::detect(&bytes).unwrap(), ContainerKind::Archive);
    }

    #[test]
    fn test_detect_gzip() {
        let bytes = write_container(ContainerKind::CompressedFlat, b"<notebook/>", &[]).unwrap();
        assert_eq!(
            ContainerKind::detect(&bytes).unwrap(),
            ContainerKind::CompressedFlat
        );
    }

    #[test]
    fn test_detect_flat() {
        assert_eq!(
            ContainerKind::detect(b"  <notebook/>").unwrap(),
            ContainerKind::Flat
        );
        let with_bom = [&[0xef, 0xbb, 0xbf][..], b"<notebook/>"].concat();
        assert_eq!(
            ContainerKind::detect(&with_bom).unwrap(),
            ContainerKind::Flat
        );
    }

    #[test]
    fn test_detect_rejects_garbage() {
        assert!(ContainerKind::detect(b"not a document").is_err());
        assert!(ContainerKind::detect(b"").is_err());
    }

    #[test]
    fn test_archive_roundtrip_with_attachments() {
        let attachments = vec![Attachment {
            name: "image-1".to_string(),
            bytes: vec![9, 8, 7],
        }];
        let bytes = write_archive(b"<notebook/>", &attachments).unwrap();

        let payload = read_container(&bytes).unwrap();
        assert_eq!(payload.kind, ContainerKind::Archive);
        assert_eq!(payload.markup, b"<notebook/>");
        assert_eq!(payload.attachments.len(), 1);
        assert_eq!(payload.attachments.get("image-1"), Some(&[9u8, 8, 7][..]));
    }

    #[test]
    fn test_archive_without_document_entry() {
        let mut buffer = Vec::new();
        {
            let mut archive = ZipWriter::new(Cursor::new(&mut buffer));
            archive
                .start_file("other.txt", SimpleFileOptions::default())
                .unwrap();
            archive.write_all(b"hi").unwrap();
            archive.finish().unwrap();
        }
        assert!(matches!(
            read_container(&buffer),
            Err(FormatError::Malformed { .. })
        ));
    }

    #[test]
    fn test_gzip_roundtrip() {
        let bytes = write_container(ContainerKind::CompressedFlat, b"<notebook/>", &[]).unwrap();
        let payload = read_container(&bytes).unwrap();
        assert_eq!(payload.markup, b"<notebook/>");
        assert!(payload.attachments.is_empty());
    }
}
