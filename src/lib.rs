//! PDF page rasterization and document info, reported as one JSON line.
//!
//! The PDF work itself is done by PDFium through `pdfium-render`; this crate
//! parses the command line, drives the engine, and shapes the output into the
//! `{success, ...}` envelope.

pub mod cli;
pub mod dispatch;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod info;
pub mod logging;
pub mod render;

pub use cli::{Cli, Command};
pub use engine::{DocumentSource, PdfEngine, PdfSource, pdfium::PdfiumEngine};
pub use error::{Result, ShimError};
pub use render::{RenderRequest, RenderedPage};
