//! `info`: page count, metadata, encryption flag and every page's size.

use log::debug;
use serde::Serialize;

use crate::engine::{DocumentMetadata, DocumentSource, PdfEngine};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub metadata: DocumentMetadata,
    pub is_encrypted: bool,
    pub page_sizes: Vec<PageSize>,
}

/// Wire payload: the report nests under an `info` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoReport {
    pub info: DocumentInfo,
}

pub fn document_info(engine: &dyn PdfEngine, source: &DocumentSource) -> Result<DocumentInfo> {
    let document = engine.open(source)?;
    let page_count = document.page_count();

    let page_sizes = (0..page_count)
        .map(|index| {
            document.page_geometry(index).map(|geometry| PageSize {
                width: geometry.width,
                height: geometry.height,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("{}: {page_count} pages", source.path.display());

    Ok(DocumentInfo {
        page_count,
        metadata: document.metadata(),
        is_encrypted: document.is_encrypted(),
        page_sizes,
    })
}
