use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use pdf_renderer::{Cli, PdfiumEngine, dispatch, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let library_dir = cli.pdfium_lib.clone();
    let command = cli.into_command();

    let line = dispatch::run(&command, || PdfiumEngine::bind(library_dir.as_deref()));

    // Exactly one line; failures are already inside the JSON
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}
