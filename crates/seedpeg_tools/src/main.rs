//! Seedpeg CLI
//!
//! Command-line driver for matching input against the reference grammars.

use clap::Parser as _;
use seedpeg::result::RenderMode;
use seedpeg::{MatchConfig, Parser};
use seedpeg_tools::cli::{Cli, Commands};
use seedpeg_tools::{grammar_report, match_report};

/// Install a log subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=seedpeg=debug` or `RUST_LOG=seedpeg::event=trace`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            input,
            grammar,
            full,
            history,
            format,
            print_range,
        } => {
            let fixture = grammar.build()?;
            let config = MatchConfig::default()
                .with_record_history(history)
                .with_print_range(print_range);
            let mode = if full {
                RenderMode::Full
            } else {
                RenderMode::Visible
            };

            let outcome =
                Parser::with_config(&fixture.grammar, config).parse(&input, fixture.start)?;
            tracing::info!(grammar = %grammar, complete = outcome.is_complete(), "matched input");

            print!("{}", match_report(&input, &outcome, &config, mode, format));
            if let Some(events) = &outcome.history {
                println!("\n{} events:", events.len());
                print!("{}", events.render());
            }
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Show { grammar } => {
            let fixture = grammar.build()?;
            print!("{}", grammar_report(&fixture));
        }
    }

    Ok(())
}
