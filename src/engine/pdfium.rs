//! PDFium-backed engine via `pdfium-render`.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, warn};
use pdfium_render::prelude::*;

use super::{DocumentMetadata, DocumentSource, PageGeometry, PdfEngine, PdfSource, exists};
use crate::error::{Result, ShimError};

/// Owns the bound PDFium library for the lifetime of the process.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind PDFium: `library_dir` first if given, then `./`, then the system search path.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(dir) = library_dir {
            candidates.push(dir.to_path_buf());
        }
        candidates.push(PathBuf::from("./"));

        let mut last_error = None;
        for dir in &candidates {
            let library = Pdfium::pdfium_platform_library_name_at_path(&*dir.to_string_lossy());
            match Pdfium::bind_to_library(library) {
                Ok(bindings) => {
                    debug!("bound PDFium from {}", dir.display());
                    return Ok(Self {
                        pdfium: Pdfium::new(bindings),
                    });
                }
                Err(e) => {
                    debug!("no PDFium in {}: {e}", dir.display());
                    last_error = Some(e);
                }
            }
        }

        match Pdfium::bind_to_system_library() {
            Ok(bindings) => {
                debug!("bound PDFium from system library path");
                Ok(Self {
                    pdfium: Pdfium::new(bindings),
                })
            }
            Err(e) => {
                let detail = match last_error {
                    Some(local) if library_dir.is_some() => format!("{local}; system: {e}"),
                    _ => e.to_string(),
                };
                Err(ShimError::PdfiumUnavailable(detail))
            }
        }
    }
}

impl PdfEngine for PdfiumEngine {
    fn open<'a>(&'a self, source: &'a DocumentSource) -> Result<Box<dyn PdfSource + 'a>> {
        if !exists(&source.path) {
            return Err(ShimError::NotFound(source.path.clone()));
        }

        let document = self
            .pdfium
            .load_pdf_from_file(&source.path, source.password.as_deref())
            .map_err(|e| ShimError::Open(e.to_string()))?;
        debug!("opened {}", source.path.display());

        Ok(Box::new(PdfiumDocument {
            document,
            path: &source.path,
        }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    path: &'a Path,
}

impl<'a> PdfiumDocument<'a> {
    fn page(&self, index: usize) -> Result<PdfPage<'a>> {
        let page_index = PdfPageIndex::try_from(index).map_err(|_| ShimError::Page {
            page: index,
            message: "index exceeds PDFium page index range".to_string(),
        })?;
        self.document
            .pages()
            .get(page_index)
            .map_err(|e| ShimError::Page {
                page: index,
                message: e.to_string(),
            })
    }

    fn tag(&self, tag: PdfDocumentMetadataTagType) -> String {
        self.document
            .metadata()
            .get(tag)
            .map(|t| t.value().to_string())
            .unwrap_or_default()
    }

    fn security(&self) -> Security {
        let revision = self.document.permissions().security_handler_revision();
        if let Err(e) = &revision {
            debug!("security handler of {}: {e}", self.path.display());
        }
        Security::from_revision(revision)
    }
}

impl PdfSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        usize::try_from(self.document.pages().len()).unwrap_or(0)
    }

    fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            format: format_version(self.document.version()),
            title: self.tag(PdfDocumentMetadataTagType::Title),
            author: self.tag(PdfDocumentMetadataTagType::Author),
            subject: self.tag(PdfDocumentMetadataTagType::Subject),
            keywords: self.tag(PdfDocumentMetadataTagType::Keywords),
            creator: self.tag(PdfDocumentMetadataTagType::Creator),
            producer: self.tag(PdfDocumentMetadataTagType::Producer),
            creation_date: self.tag(PdfDocumentMetadataTagType::CreationDate),
            mod_date: self.tag(PdfDocumentMetadataTagType::ModificationDate),
            trapped: String::new(),
            encryption: self.security().label(),
        }
    }

    fn is_encrypted(&self) -> bool {
        self.security() != Security::Unprotected
    }

    fn page_geometry(&self, index: usize) -> Result<PageGeometry> {
        let page = self.page(index)?;
        let rotation = page.rotation().map_err(|e| ShimError::Page {
            page: index,
            message: e.to_string(),
        })?;

        Ok(PageGeometry {
            width: page.width().value,
            height: page.height().value,
            rotation: rotation_degrees(rotation),
        })
    }

    fn rasterize(&self, index: usize, width: u32, height: u32) -> Result<RgbaImage> {
        let page = self.page(index)?;
        let render_error = |message: String| ShimError::Render {
            page: index,
            message,
        };

        let target_width = i32::try_from(width).map_err(|e| render_error(e.to_string()))?;
        let target_height = i32::try_from(height).map_err(|e| render_error(e.to_string()))?;
        let render_config = PdfRenderConfig::new()
            .set_target_width(target_width)
            .set_target_height(target_height);

        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| render_error(e.to_string()))?;

        let bitmap_width =
            u32::try_from(bitmap.width()).map_err(|e| render_error(e.to_string()))?;
        let bitmap_height =
            u32::try_from(bitmap.height()).map_err(|e| render_error(e.to_string()))?;
        debug!("rendered page {index} at {bitmap_width}x{bitmap_height}");

        RgbaImage::from_raw(bitmap_width, bitmap_height, bitmap.as_rgba_bytes()).ok_or_else(
            || render_error(format!("bitmap buffer does not match {bitmap_width}x{bitmap_height}")),
        )
    }
}

impl Drop for PdfiumDocument<'_> {
    fn drop(&mut self) {
        // PdfDocument closes itself right after this runs
        debug!("closing {}", self.path.display());
    }
}

fn rotation_degrees(rotation: PdfPageRenderRotation) -> i32 {
    match rotation {
        PdfPageRenderRotation::None => 0,
        PdfPageRenderRotation::Degrees90 => 90,
        PdfPageRenderRotation::Degrees180 => 180,
        PdfPageRenderRotation::Degrees270 => 270,
    }
}

fn format_version(version: PdfDocumentVersion) -> String {
    let label = match version {
        PdfDocumentVersion::Pdf1_0 => "1.0",
        PdfDocumentVersion::Pdf1_1 => "1.1",
        PdfDocumentVersion::Pdf1_2 => "1.2",
        PdfDocumentVersion::Pdf1_3 => "1.3",
        PdfDocumentVersion::Pdf1_4 => "1.4",
        PdfDocumentVersion::Pdf1_5 => "1.5",
        PdfDocumentVersion::Pdf1_6 => "1.6",
        PdfDocumentVersion::Pdf1_7 => "1.7",
        PdfDocumentVersion::Pdf2_0 => "2.0",
        PdfDocumentVersion::Other(raw) => return format!("PDF {}.{}", raw / 10, raw % 10),
        _ => return String::new(),
    };
    format!("PDF {label}")
}

/// Security handler state as PDFium reports it. Only "no handler" counts as unencrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Security {
    Unprotected,
    Standard(u8),
    /// A handler PDFium knows about but `pdfium-render` cannot name (R5/R6 AES-256)
    Unrecognized,
}

impl Security {
    fn from_revision(
        revision: std::result::Result<PdfSecurityHandlerRevision, PdfiumError>,
    ) -> Self {
        match revision {
            Ok(PdfSecurityHandlerRevision::Unprotected) => Security::Unprotected,
            Ok(PdfSecurityHandlerRevision::Revision2) => Security::Standard(2),
            Ok(PdfSecurityHandlerRevision::Revision3) => Security::Standard(3),
            Ok(PdfSecurityHandlerRevision::Revision4) => Security::Standard(4),
            Err(PdfiumError::UnknownPdfSecurityHandlerRevision) => Security::Unrecognized,
            Err(e) => {
                warn!("could not read security handler: {e}");
                Security::Unprotected
            }
        }
    }

    fn label(self) -> String {
        match self {
            Security::Unprotected => String::new(),
            Security::Standard(revision) => format!("Standard R{revision}"),
            Security::Unrecognized => "Standard".to_string(),
        }
    }
}
