//! CLI definition.

use anyhow::Result;
use clap::Parser;

use crate::demos::{self, OutputFormat};

/// Decode delimited configuration strings into typed lists.
///
/// Runs each decoding scenario and prints the decoded value.
#[derive(Debug, Parser)]
#[command(name = "splitconf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print decoded values as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Runs every scenario and prints one line per scenario.
    pub fn run(self) -> Result<()> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Debug
        };

        for line in demos::run_all(format)? {
            println!("{line}");
        }

        Ok(())
    }
}
