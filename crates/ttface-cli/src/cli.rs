//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ttface - Look inside font files from the command line
#[derive(Parser, Debug)]
#[command(name = "ttface")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every property of one face
    #[command(alias = "d")]
    Dump(DumpArgs),

    /// Print how many faces a font collection holds
    #[command(alias = "c")]
    Count(CountArgs),
}

/// Arguments for the dump command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    pub font: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Characters to report glyph data for
    #[arg(short = 'c', long = "chars")]
    pub chars: Option<String>,

    /// Print pretty JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the count command
#[derive(Parser, Debug)]
pub struct CountArgs {
    /// Font file path
    pub font: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dump_flags() {
        let cli =
            Cli::try_parse_from(["ttface", "dump", "font.ttc", "-y", "2", "--chars", "Ab", "--json"])
                .unwrap();
        let Commands::Dump(args) = cli.command else {
            panic!("expected dump");
        };
        assert_eq!(args.font, PathBuf::from("font.ttc"));
        assert_eq!(args.face_index, 2);
        assert_eq!(args.chars.as_deref(), Some("Ab"));
        assert!(args.json);
    }

    #[test]
    fn test_count_alias() {
        let cli = Cli::try_parse_from(["ttface", "c", "font.ttc"]).unwrap();
        assert!(matches!(cli.command, Commands::Count(_)));
    }
}
