//! CLI interface for seedpeg

use clap::{Parser, Subcommand};
use seedpeg::testing::ReferenceGrammarKind;

#[derive(Parser)]
#[command(name = "seedpeg")]
#[command(about = "Match input against reference grammars with the seedpeg engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match an input string and print the result tree
    Match {
        /// Input to match
        input: String,

        /// Reference grammar: number, expression or right-expression
        #[arg(short, long, default_value = "expression")]
        grammar: ReferenceGrammarKind,

        /// Include anonymous combinator results in the tree
        #[arg(long)]
        full: bool,

        /// Print the recorded match events
        #[arg(long)]
        history: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Characters shown on each side of the cursor in diagnostics
        #[arg(long, default_value_t = 10)]
        print_range: usize,
    },

    /// Print a reference grammar's rules and analysis
    Show {
        /// Reference grammar: number, expression or right-expression
        #[arg(short, long, default_value = "expression")]
        grammar: ReferenceGrammarKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "tree" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Supported: text, json")),
        }
    }
}
