//! `qu open` and `qu save-working` - editing through the working set

use tracing::debug;

use crate::cli::Cli;
use qu_core::error::Result;
use qu_core::store::Store;
use qu_core::working::{self, Opened, ProcessEditor, ReconcileReport, WorkingSet};

use super::format::{output_by_format_result, print_json};

fn print_report(cli: &Cli, report: &ReconcileReport) -> Result<()> {
    output_by_format_result!(cli.format,
        json => print_json(report),
        human => {
            if report.is_empty() {
                if !cli.quiet {
                    println!("No changes");
                }
            } else {
                for id in &report.rewritten {
                    println!("saved {id}");
                }
                for id in &report.split {
                    println!("split {id}");
                }
                for id in &report.removed {
                    println!("removed {id}");
                }
            }
        }
    )
}

pub fn open(cli: &Cli, store: &Store, selector: &str, force_split: bool) -> Result<()> {
    let ideas = store.select_str(selector)?;
    debug!(count = ideas.len(), force_split, "open");
    let editor = ProcessEditor::from_config(store.config())?;

    match working::open(store, &editor, &ideas, force_split)? {
        Opened::Nothing => {
            if !cli.quiet {
                eprintln!("No ideas match {selector}");
            }
            Ok(())
        }
        Opened::Single { path, edited } => output_by_format_result!(cli.format,
            json => print_json(&serde_json::json!({
                "path": path.display().to_string(),
                "edited": edited,
            })),
            human => {
                if edited && !cli.quiet {
                    println!("saved {}", path.display());
                }
            }
        ),
        Opened::Batch(report) => print_report(cli, &report),
    }
}

/// Reconcile the scratch files left by an interrupted session
pub fn save(cli: &Cli, store: &Store) -> Result<()> {
    let report = WorkingSet::new(store).reconcile_forced()?;
    print_report(cli, &report)
}
