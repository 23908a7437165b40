//! `render`: rasterize one page and package it as base64 PNG.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, ImageFormat, RgbImage};
use log::debug;
use serde::Serialize;

use crate::engine::{DocumentSource, PdfEngine};
use crate::error::{Result, ShimError};

pub const DEFAULT_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub source: DocumentSource,
    /// Zero-based; negative values are accepted here and rejected by the bounds check
    pub page: i64,
    pub zoom: f64,
}

impl RenderRequest {
    /// Reject zoom factors that cannot produce an image. Runs before any document is opened.
    pub fn validate(&self) -> Result<()> {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            Ok(())
        } else {
            Err(ShimError::InvalidZoom(self.zoom))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageInfo {
    pub width: f32,
    pub height: f32,
    pub rotation: i32,
    pub rendered_width: u32,
    pub rendered_height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub image: String,
    pub page_info: PageInfo,
}

/// Render the requested page and return it as an RGB buffer plus its geometry.
///
/// The document is open only for the duration of this call.
pub fn rasterize_page(
    engine: &dyn PdfEngine,
    request: &RenderRequest,
) -> Result<(RgbImage, PageInfo)> {
    request.validate()?;

    let document = engine.open(&request.source)?;
    let page_count = document.page_count();
    let index = page_index(request.page, page_count)?;

    let geometry = document.page_geometry(index)?;
    let target_width = scaled(geometry.width, request.zoom);
    let target_height = scaled(geometry.height, request.zoom);
    debug!(
        "page {index}: {}x{} pt at zoom {} -> {target_width}x{target_height} px",
        geometry.width, geometry.height, request.zoom
    );

    let pixels = document.rasterize(index, target_width, target_height)?;
    let rgb = DynamicImage::ImageRgba8(pixels).to_rgb8();

    let info = PageInfo {
        width: geometry.width,
        height: geometry.height,
        rotation: geometry.rotation,
        rendered_width: rgb.width(),
        rendered_height: rgb.height(),
    };
    Ok((rgb, info))
}

/// Full render operation: rasterize, encode PNG, base64 for JSON embedding.
pub fn render_page(engine: &dyn PdfEngine, request: &RenderRequest) -> Result<RenderedPage> {
    let (rgb, page_info) = rasterize_page(engine, request)?;
    let png = encode_png(&rgb)?;

    Ok(RenderedPage {
        image: general_purpose::STANDARD.encode(&png),
        page_info,
    })
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;
    Ok(png_bytes)
}

fn page_index(page: i64, page_count: usize) -> Result<usize> {
    usize::try_from(page)
        .ok()
        .filter(|&index| index < page_count)
        .ok_or(ShimError::PageOutOfRange { page, page_count })
}

// Rounded, never below one pixel
fn scaled(points: f32, zoom: f64) -> u32 {
    (f64::from(points) * zoom).round().max(1.0) as u32
}
