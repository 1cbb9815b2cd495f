//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use life_expectancy::{Format, Region};

/// Life expectancy: reshape the Eurostat extract into tidy CSV
#[derive(Parser)]
#[command(name = "life-expectancy")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the raw table and write the tidy CSV
    Clean(CleanArgs),

    /// List known region codes
    Regions {
        /// Only list actual countries (no aggregates such as EU27_2020)
        #[arg(long)]
        countries_only: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct CleanArgs {
    /// Keep only this region code (e.g. PT); all regions when omitted
    #[arg(short, long, value_name = "CODE")]
    pub region: Option<Region>,

    /// Directory holding the raw file (default: data)
    #[arg(long, value_name = "DIR", env = "LIFE_EXPECTANCY_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the tidy file (default: data)
    #[arg(long, value_name = "DIR", env = "LIFE_EXPECTANCY_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Raw file name inside the input directory (default: eu_life_expectancy_raw.tsv)
    #[arg(short, long, value_name = "NAME", env = "LIFE_EXPECTANCY_FILE")]
    pub file: Option<String>,

    /// Input format (tsv, csv, json); inferred from the extension when omitted
    #[arg(long, conflicts_with = "separator")]
    pub format: Option<Format>,

    /// Field separator for delimited input (single ASCII character, `\t` for tab)
    #[arg(long, value_name = "CHAR", value_parser = parse_separator)]
    pub separator: Option<u8>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CleanArgs {
    /// Input format from `--format` or `--separator`, if either was given.
    pub fn format_hint(&self) -> Option<Format> {
        self.format
            .or_else(|| self.separator.map(Format::Delimited))
    }
}

fn parse_separator(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "Invalid separator: '{}'. Use a single ASCII character.",
                    s
                )),
            }
        }
    }
}
