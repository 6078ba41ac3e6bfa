use clap::{Parser, Subcommand};

use self::{dump_config::DumpConfigArg, play::PlayArg};

mod dump_config;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective configuration as JSON
    DumpConfig(#[clap(flatten)] DumpConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::DumpConfig(arg) => dump_config::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode() {
        let args = CommandArgs::try_parse_from(["bricks"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_args() {
        let args = CommandArgs::try_parse_from([
            "bricks",
            "play",
            "--config",
            "bricks.json",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--frame-rate",
            "30",
            "--no-auto-restart",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(arg.config, Some(PathBuf::from("bricks.json")));
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert!((arg.frame_rate - 30.0).abs() < f64::EPSILON);
        assert!(arg.no_auto_restart);
        assert_eq!(arg.log_file, None);
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let result = CommandArgs::try_parse_from(["bricks", "play", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
