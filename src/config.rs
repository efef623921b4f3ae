use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::term::TermInt;

pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 40;
pub const DEFAULT_TICK_MS: u64 = 80;

/// Command-line flags. `-h` is the board height, so help is `--help` only.
#[derive(Debug, Parser)]
#[command(name = "ular", about = "Snake in the terminal", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Width of the game board (0 fits the terminal)
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_WIDTH)]
    pub width: u16,

    /// Height of the game board (0 fits the terminal)
    #[arg(short = 'h', long = "height", default_value_t = DEFAULT_HEIGHT)]
    pub height: u16,

    /// Follow the terminal size when it changes
    #[arg(short = 'r', long = "resizable", default_value_t = true, action = ArgAction::Set)]
    pub resizable: bool,

    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Milliseconds between two moves of the snake
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Seed for food placement, for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: u16,
    pub height: u16,
    pub resizable: bool,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            width: args.width,
            height: args.height,
            resizable: args.resizable,
            tick: Duration::from_millis(args.tick_ms),
            seed: args.seed,
        }
    }
}

impl Config {
    // 0 means the whole terminal
    pub fn board_size(&self, term_width: TermInt, term_height: TermInt) -> (u16, u16) {
        let w = if self.width == 0 { term_width } else { self.width.min(term_width) };
        let h = if self.height == 0 { term_height } else { self.height.min(term_height) };
        (w, h)
    }
}

pub fn version_line() -> String {
    format!(
        "Version: {}, Revision: {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("ULAR_REVISION").unwrap_or("unknown")
    )
}
