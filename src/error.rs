//! Error type shared by every operation.
//!
//! Each variant's `Display` text is what ends up in the `error` field of the
//! failure envelope, so messages are written for the caller, not for us.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShimError {
    #[error("Failed to bind PDFium library: {0}")]
    PdfiumUnavailable(String),

    #[error("no such file: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open document: {0}")]
    Open(String),

    #[error("Page number out of range. Total pages: {page_count}")]
    PageOutOfRange { page: i64, page_count: usize },

    #[error("Failed to load page {page}: {message}")]
    Page { page: usize, message: String },

    #[error("Failed to render page {page}: {message}")]
    Render { page: usize, message: String },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Zoom factor must be a positive finite number, got {0}")]
    InvalidZoom(f64),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, ShimError>;
