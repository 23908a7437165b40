//! stderr logging. Silent unless `-v` or `PDF_RENDERER_LOG` asks for output,
//! since callers may merge stderr into the JSON they parse.

use env_logger::{Builder, Env, Target};

pub const LOG_ENV: &str = "PDF_RENDERER_LOG";

pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "off" };
    // A second init in the same process is harmless; ignore it
    let _ = Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter))
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
