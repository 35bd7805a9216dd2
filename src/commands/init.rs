//! `qu init` command - create the store layout

use tracing::debug;

use crate::cli::Cli;
use qu_core::config::resolve_store_root;
use qu_core::error::Result;
use qu_core::store::Store;

use super::format::{output_by_format_result, print_json};

/// Execute the init command. Repeating it on an existing store only fills
/// in missing pieces.
pub fn execute(cli: &Cli) -> Result<()> {
    let root = resolve_store_root(cli.store.as_deref())?;
    debug!(root = %root.display(), "init");
    let store = Store::init(&root)?;

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "status": "ok",
            "root": store.root().display().to_string(),
            "next_id": store.allocator().next_id()?,
        })),
        human => {
            if !cli.quiet {
                println!("Initialized store at {}", store.root().display());
            }
        }
    )
}
