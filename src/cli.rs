use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, GameConfig};
use crate::difficulty::Difficulty;

/// Terminal Space Invaders
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Starting difficulty: easy, normal or hard
    #[arg(short, long, default_value_t = Difficulty::Normal)]
    pub difficulty: Difficulty,

    /// Seed for enemy fire; the same seed and inputs replay the same round
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// File that receives the log output
    #[arg(long, default_value = "invaders.log")]
    pub log_file: PathBuf,

    /// Player projectiles allowed in flight at once
    #[arg(long)]
    pub max_shots: Option<usize>,

    /// Skip the title menu and start a round immediately
    #[arg(long)]
    pub play: bool,
}

impl Cli {
    /// Default configuration with command line overrides applied, validated.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = GameConfig::default();
        if let Some(max_shots) = self.max_shots {
            config.max_player_projectiles = max_shots;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["invaders"]).expect("parse");
        assert_eq!(cli.difficulty, Difficulty::Normal);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log_file, PathBuf::from("invaders.log"));
        assert!(!cli.play);
        assert_eq!(cli.game_config(), Ok(GameConfig::default()));
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "invaders",
            "--difficulty",
            "HARD",
            "--seed",
            "42",
            "--log-file",
            "/tmp/run.log",
            "--max-shots",
            "3",
            "--play",
        ])
        .expect("parse");
        assert_eq!(cli.difficulty, Difficulty::Hard);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.log_file, PathBuf::from("/tmp/run.log"));
        assert!(cli.play);
        let config = cli.game_config().expect("valid config");
        assert_eq!(config.max_player_projectiles, 3);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        assert!(Cli::try_parse_from(["invaders", "-d", "nightmare"]).is_err());
    }

    #[test]
    fn test_zero_shots_fails_validation() {
        let cli = Cli::try_parse_from(["invaders", "--max-shots", "0"]).expect("parse");
        assert_eq!(cli.game_config(), Err(ConfigError::ZeroProjectileCap));
    }
}
