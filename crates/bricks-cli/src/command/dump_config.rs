use std::path::PathBuf;

use crate::{config::CliConfig, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DumpConfigArg {
    /// Configuration file to read instead of the built-in defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DumpConfigArg) -> anyhow::Result<()> {
    let DumpConfigArg { config, output } = arg;
    let config = CliConfig::load(config.as_deref())?;
    Output::save_json(&config, output.clone())
}
