use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::engine::DocumentSource;
use crate::render::{DEFAULT_ZOOM, RenderRequest};

/// Rasterize a PDF page or describe a PDF document, printing one JSON line
#[derive(Parser, Debug)]
#[command(name = "pdf_renderer", version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Directory containing the PDFium shared library
    #[arg(long, global = true, env = "PDFIUM_LIB_PATH", value_name = "DIR")]
    pub pdfium_lib: Option<PathBuf>,

    /// Password for encrypted documents
    #[arg(long, global = true, env = "PDF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one page to a base64 PNG
    Render {
        pdf_path: PathBuf,

        /// Zero-based page index
        #[arg(allow_negative_numbers = true)]
        page_num: i64,

        /// Scale factor applied to both axes [default: 1.0]
        #[arg(allow_negative_numbers = true)]
        zoom: Option<f64>,
    },

    /// Report page count, metadata, encryption and page sizes
    Info { pdf_path: PathBuf },

    #[command(external_subcommand)]
    Other(Vec<OsString>),
}

/// What the dispatcher should do, with all defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Render(RenderRequest),
    Info(DocumentSource),
    Unknown(String),
}

impl Cli {
    pub fn into_command(self) -> Command {
        let password = self.password;
        match self.command {
            Commands::Render {
                pdf_path,
                page_num,
                zoom,
            } => Command::Render(RenderRequest {
                source: DocumentSource::new(pdf_path).with_password(password),
                page: page_num,
                zoom: zoom.unwrap_or(DEFAULT_ZOOM),
            }),
            Commands::Info { pdf_path } => {
                Command::Info(DocumentSource::new(pdf_path).with_password(password))
            }
            Commands::Other(args) => Command::Unknown(
                args.first()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ),
        }
    }
}
