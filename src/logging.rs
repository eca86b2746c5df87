use std::fs::OpenOptions;

use anyhow::{Context, Result};

use crate::paths;

/// Send `log` output to the log file.
///
/// The TUI owns the terminal, so nothing may be written to stdout/stderr
/// while it runs. `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) -> Result<()> {
    let path = paths::log_file();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();

    Ok(())
}
