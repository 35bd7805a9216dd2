//! qu - a single-user idea store
//!
//! Every captured note, image or audio clip is one file whose name encodes
//! its id, lifecycle state, dates, lineage and tags.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use qu_core::error::{ExitCode as QuExitCode, QuError};
use qu_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit_with(QuExitCode::Success),
        Err(e) => {
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {e}");
            }
            exit_with(e.exit_code())
        }
    }
}

fn exit_with(code: QuExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// clap rejected the arguments. Scripts asking for JSON still get a JSON
/// error on stderr; help and version go through clap unchanged.
fn parse_failure(err: clap::Error) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
        || !json_requested(std::env::args().skip(1))
    {
        err.exit();
    }
    let error = QuError::UsageError(err.to_string().trim().to_string());
    eprintln!("{}", error.to_json());
    exit_with(error.exit_code())
}

fn json_requested(args: impl Iterator<Item = String>) -> bool {
    let args: Vec<String> = args.collect();
    args.iter().any(|a| a == "--format=json")
        || args.windows(2).any(|w| w[0] == "--format" && w[1] == "json")
}

#[cfg(test)]
mod tests {
    use super::json_requested;

    fn argv(args: &[&str]) -> impl Iterator<Item = String> {
        args.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_json_requested() {
        assert!(json_requested(argv(&["--format", "json", "bogus"])));
        assert!(json_requested(argv(&["ls", "--format=json"])));
        assert!(!json_requested(argv(&["--format", "human", "json"])));
        assert!(!json_requested(argv(&["ls"])));
    }
}
