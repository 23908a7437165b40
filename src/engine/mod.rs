//! The seam between the JSON facade and the PDF library.
//!
//! [`PdfEngine`] opens documents; the returned [`PdfSource`] answers the
//! handful of read-only questions the facade asks. Dropping the source
//! closes the document, so every exit path of an operation releases it.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Serialize;

use crate::error::Result;

pub mod pdfium;


/// Where to find a document and how to unlock it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSource {
    pub path: PathBuf,
    pub password: Option<String>,
}

impl DocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            password: None,
        }
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }
}

/// Native page size in PDF points (after page rotation) and stored rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Degrees clockwise: 0, 90, 180 or 270
    pub rotation: i32,
}

/// Document information dictionary. Absent entries are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub format: String,
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
    pub creator: String,
    pub producer: String,
    #[serde(rename = "creationDate")]
    pub creation_date: String,
    #[serde(rename = "modDate")]
    pub mod_date: String,
    /// PDFium exposes no Trapped entry; always empty
    pub trapped: String,
    /// Security handler, e.g. `Standard R3`; empty when unencrypted
    pub encryption: String,
}

pub trait PdfEngine {
    /// Open a document. The returned handle is closed when dropped.
    fn open<'a>(&'a self, source: &'a DocumentSource) -> Result<Box<dyn PdfSource + 'a>>;
}

pub trait PdfSource {
    fn page_count(&self) -> usize;

    fn metadata(&self) -> DocumentMetadata;

    fn is_encrypted(&self) -> bool;

    /// Geometry of the page at `index`; callers bounds-check first.
    fn page_geometry(&self, index: usize) -> Result<PageGeometry>;

    /// Rasterize the page at `index` to exactly `width` x `height` pixels.
    fn rasterize(&self, index: usize, width: u32, height: u32) -> Result<RgbaImage>;
}

/// `true` when `path` exists; engines report [`crate::ShimError::NotFound`] otherwise.
pub(crate) fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}
