use color_eyre::eyre::{Result, eyre};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Sends tracing output to `path`, truncating it. The terminal belongs to the
/// game while it runs, so nothing is written to stdout or stderr.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
