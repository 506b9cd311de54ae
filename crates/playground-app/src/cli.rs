//! Command-line argument parsing for the playground driver.

use clap::Parser;
use std::path::PathBuf;

/// Replays scripted gestures against the widget playground
#[derive(Parser, Debug)]
#[command(name = "playground", version, about = "Headless widget playground driver")]
pub struct CliArgs {
    /// Gesture script to replay (JSON). Without one a short demo runs.
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Playground configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print frames as JSON view snapshots instead of text
    #[arg(long)]
    pub json: bool,

    /// Seed for the widget suggestions, for reproducible runs
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Print the keyboard bindings and exit
    #[arg(long)]
    pub shortcuts: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["playground", "--script", "demo.json", "-c", "cfg.json", "--json"]);
        assert_eq!(args.script, Some(PathBuf::from("demo.json")));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(args.json);
        assert!(!args.shortcuts);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_parse_seed() {
        let args = CliArgs::parse_from(["playground", "--seed", "42"]);
        assert_eq!(args.seed, Some(42));
        assert!(CliArgs::try_parse_from(["playground", "--seed", "many"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["playground"]);
        assert!(args.script.is_none());
        assert!(args.config.is_none());
        assert!(!args.json);
    }
}
