use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

/// Convert Mega SD Genesis saves to and from raw saves
#[derive(Parser, Debug)]
#[command(name = "megasd-save")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: Level,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the detected layout and save kind of a file
    Detect {
        input: PathBuf,

        /// Treat the input as a raw save instead of a Mega SD file
        #[arg(long)]
        raw: bool,
    },

    /// Convert a Mega SD file (old or new style) to a raw save
    ToRaw {
        input: PathBuf,

        /// Output path (defaults to the input with a `.raw` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a raw save to a new-style Mega SD file
    ToFlashCart {
        input: PathBuf,

        /// Output path (defaults to the input with a `.srm` extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Resize the raw save to this many bytes first (decimal or 0x hex)
        #[arg(long, value_parser = parse_size)]
        size: Option<usize>,
    },

    /// Resize a Mega SD file, writing a new-style file
    Resize {
        input: PathBuf,

        /// New raw save size in bytes (decimal or 0x hex)
        #[arg(long, value_parser = parse_size)]
        size: usize,

        /// Output path (defaults to `<stem>-resized.srm` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn parse_size(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid size `{s}`: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_hex_sizes() {
        assert_eq!(parse_size("16384"), Ok(16384));
        assert_eq!(parse_size("0x8000"), Ok(32768));
        assert!(parse_size("lots").is_err());
    }

    #[test]
    fn parses_resize_command() {
        let args =
            Args::try_parse_from(["megasd-save", "resize", "game.srm", "--size", "0x10000"])
                .expect("args parse");

        assert_eq!(
            args.command,
            Command::Resize {
                input: PathBuf::from("game.srm"),
                size: 0x10000,
                output: None,
            }
        );
        assert_eq!(args.log_level, Level::INFO);
    }

    #[test]
    fn log_level_is_global() {
        let args = Args::try_parse_from(["megasd-save", "detect", "--raw", "game.srm", "-l", "debug"])
            .expect("args parse");

        assert_eq!(args.log_level, Level::DEBUG);
        assert!(matches!(args.command, Command::Detect { raw: true, .. }));
    }

    #[test]
    fn resize_requires_size() {
        assert!(Args::try_parse_from(["megasd-save", "resize", "game.srm"]).is_err());
    }
}
