//! Command-line interface for tildelog.
//!
//! Prints log lines from arguments or stdin, and previews the palette and
//! level colors.

use crate::level::Level;
use crate::logger::Logger;
use crate::markup;
use crate::palette::Color;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tildelog_config::{ColorMode, Config, LogLevel, OutputStream};

/// tildelog - colorized console log lines with inline ~markup
#[derive(Parser, Debug)]
#[command(name = "tildelog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/tildelog/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Level threshold (off, error, warn, info, debug); overrides config and TILDELOG_LEVEL
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// When to emit colors (auto, always, never); overrides config and TILDELOG_COLOR
    #[arg(long, value_name = "MODE", global = true)]
    pub color: Option<ColorMode>,

    /// Write to stderr instead of stdout
    #[arg(long, global = true)]
    pub stderr: bool,

    /// Severity of the printed message
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub level: Level,

    /// Source tag printed in the second column
    #[arg(short, long, value_name = "NAME", default_value = "tildelog")]
    pub source: String,

    /// Message text with optional ~<code> markup; stdin lines are logged when omitted.
    /// Put `--` before a message that starts with a subcommand name
    /// (`tildelog -- levels are high`).
    pub message: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every markup code in its color
    Palette,
    /// Print a sample line for each level
    Levels,
    /// Print a message with its markup removed
    Strip {
        /// Message text with ~<code> markup
        message: Vec<String>,
    },
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let logger = crate::init(&config)?;
    crate::init_log_bridge(None)?;

    match cli.command {
        Some(Commands::Palette) => {
            logger.set_level_filter(log::LevelFilter::Debug);
            print_palette(logger);
        }
        Some(Commands::Levels) => {
            logger.set_level_filter(log::LevelFilter::Debug);
            print_levels(logger);
        }
        Some(Commands::Strip { message }) => {
            println!("{}", markup::strip(&message.join(" ")));
        }
        None if cli.message.is_empty() => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read stdin")?;
                logger.log(cli.level, &cli.source, &line);
            }
        }
        None => logger.log(cli.level, &cli.source, &cli.message.join(" ")),
    }

    logger.flush();
    Ok(())
}

/// Build the effective configuration.
///
/// Precedence, lowest first: config file (or the CLI default of printing
/// every level when no file exists), environment variables, flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let default_path = Config::config_path();
            if default_path.exists() {
                Config::load_from(&default_path)
                    .with_context(|| format!("failed to load config {}", default_path.display()))?
            } else {
                Config::default().with_level(LogLevel::Debug)
            }
        }
    };
    config.apply_env_overrides();

    if let Some(level) = cli.log_level {
        config.level = level;
    }
    if let Some(color) = cli.color {
        config.color = color;
    }
    if cli.stderr {
        config.stream = OutputStream::Stderr;
    }
    Ok(config)
}

fn print_palette(logger: &Logger) {
    for color in Color::ALL {
        let code = color.code();
        // The closing tilde of each run doubles as the next escape.
        logger.log(
            Level::Info,
            "palette",
            &format!("~hcode ~{code}{code}~h  ~{code}{}", color.name()),
        );
    }
}

fn print_levels(logger: &Logger) {
    for level in Level::ALL {
        logger.log(
            level,
            "levels",
            &format!("sample ~{}{}~g line", level.color().code(), level.name()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_words() {
        let cli = Cli::parse_from(["tildelog", "-l", "warn", "-s", "Net", "~aHello", "world"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.level, Level::Warn);
        assert_eq!(cli.source, "Net");
        assert_eq!(cli.message.join(" "), "~aHello world");
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["tildelog"]);
        assert_eq!(cli.level, Level::Info);
        assert_eq!(cli.source, "tildelog");
        assert!(cli.message.is_empty());
        assert!(!cli.stderr);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "tildelog",
            "--log-level",
            "off",
            "--color",
            "never",
            "--stderr",
            "msg",
        ]);
        let config = resolve_config(&cli).expect("config resolves");
        assert_eq!(config.level, LogLevel::Off);
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.stream, OutputStream::Stderr);
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::parse_from(["tildelog", "palette"]);
        assert!(matches!(cli.command, Some(Commands::Palette)));

        let cli = Cli::parse_from(["tildelog", "strip", "~aa", "b"]);
        match cli.command {
            Some(Commands::Strip { message }) => assert_eq!(message, vec!["~aa", "b"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_double_dash_logs_subcommand_words() {
        let cli = Cli::parse_from(["tildelog", "-l", "warn", "--", "levels", "are", "high"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.level, Level::Warn);
        assert_eq!(cli.message.join(" "), "levels are high");
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(Cli::try_parse_from(["tildelog", "--level", "loud"]).is_err());
    }
}
