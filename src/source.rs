//! The user-selected input file.
//!
//! A [`SourceFile`] carries what a file picker hands over: a name, a declared
//! media type, the byte length, and a way to get at the content. Content on
//! disk is not read until the pipeline asks for it, so a file rejected for
//! its media type is never opened.
//!
//! ## Declared media types
//!
//! The declared type comes from the file extension (see [`media_type_for`]),
//! the same way a browser fills in `File.type`. Unknown extensions get an
//! empty type. Callers can override it when they know better.

use std::io;
use std::path::{Path, PathBuf};

/// Extension → media type. Lowercase extensions only.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("html", "text/html"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
];

/// Guess the declared media type from a file name. Empty when unknown.
pub fn media_type_for(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return "";
    };
    MEDIA_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, media_type)| *media_type)
        .unwrap_or("")
}

/// Whether a declared media type is in the `image/*` category.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .split_once('/')
        .is_some_and(|(top, sub)| top.eq_ignore_ascii_case("image") && !sub.is_empty())
}

/// Where the file's bytes live.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    /// Read lazily from disk.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Vec<u8>),
}

/// A single selected file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    name: String,
    media_type: String,
    byte_len: u64,
    content: SourceContent,
}

impl SourceFile {
    /// Describe a file on disk. Only metadata is touched; the content is
    /// read later by the pipeline.
    ///
    /// `media_type` overrides the extension-based guess.
    pub fn from_path(path: &Path, media_type: Option<&str>) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type
            .map(str::to_string)
            .unwrap_or_else(|| media_type_for(&name).to_string());
        Ok(Self {
            name,
            media_type,
            byte_len: metadata.len(),
            content: SourceContent::Path(path.to_path_buf()),
        })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            byte_len: bytes.len() as u64,
            content: SourceContent::Bytes(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Byte length as reported at selection time.
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }

    /// Read the full content, consuming the handle.
    pub async fn read(self) -> io::Result<Vec<u8>> {
        match self.content {
            SourceContent::Path(path) => tokio::fs::read(&path).await,
            SourceContent::Bytes(bytes) => Ok(bytes),
        }
    }
}
