use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pdf_renderer::render::{DEFAULT_ZOOM, encode_png, rasterize_page};
use pdf_renderer::{DocumentSource, PdfiumEngine, RenderRequest, logging};

/// Render one PDF page to a PNG file
#[derive(Parser, Debug)]
#[command(name = "pdf2img", version, about)]
struct Args {
    pdf_file: PathBuf,

    /// Zero-based page index
    page_num: i64,

    output_image: PathBuf,

    /// Scale factor applied to both axes
    #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
    zoom: f64,

    /// Directory containing the PDFium shared library
    #[arg(long, env = "PDFIUM_LIB_PATH", value_name = "DIR")]
    pdfium_lib: Option<PathBuf>,

    #[arg(long, env = "PDF_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let engine = PdfiumEngine::bind(args.pdfium_lib.as_deref())?;
    let request = RenderRequest {
        source: DocumentSource::new(&args.pdf_file).with_password(args.password),
        page: args.page_num,
        zoom: args.zoom,
    };

    let (image, page_info) = rasterize_page(&engine, &request)
        .with_context(|| format!("rendering {}", args.pdf_file.display()))?;

    let png = encode_png(&image)?;
    std::fs::write(&args.output_image, png)
        .with_context(|| format!("writing {}", args.output_image.display()))?;

    println!(
        "Converted page {} to {} ({}x{} px)",
        args.page_num,
        args.output_image.display(),
        page_info.rendered_width,
        page_info.rendered_height
    );
    Ok(())
}
