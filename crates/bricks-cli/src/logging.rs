use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Installs the global logger.
///
/// The terminal belongs to the game screen, so records go to `log_file` when
/// one is given and are discarded otherwise. The filter is read from
/// `RUST_LOG` and defaults to `info`.
pub(crate) fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        log::set_max_level(log::LevelFilter::Off);
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
