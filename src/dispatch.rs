//! Route a parsed [`Command`] to its operation and produce the JSON line.

use crate::cli::Command;
use crate::engine::PdfEngine;
use crate::envelope;
use crate::error::{Result, ShimError};
use crate::info::{InfoReport, document_info};
use crate::render::render_page;

/// Run `command` and return the line to print.
///
/// `connect` binds the PDF engine; it is only called for commands that open a
/// document, and not before the render request has been validated.
pub fn run<E, F>(command: &Command, connect: F) -> String
where
    E: PdfEngine,
    F: FnOnce() -> Result<E>,
{
    match command {
        Command::Render(request) => {
            let outcome = request
                .validate()
                .and_then(|()| connect())
                .and_then(|engine| render_page(&engine, request));
            envelope::to_line(&outcome)
        }
        Command::Info(source) => {
            let outcome = connect()
                .and_then(|engine| document_info(&engine, source))
                .map(|info| InfoReport { info });
            envelope::to_line(&outcome)
        }
        Command::Unknown(name) => {
            envelope::to_line::<()>(&Err(ShimError::UnknownCommand(name.clone())))
        }
    }
}
