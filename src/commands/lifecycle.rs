//! Lifecycle commands: consume, consumes, zombie, unconsume, lineage

use tracing::debug;

use crate::cli::Cli;
use qu_core::error::Result;
use qu_core::store::Store;
use qu_core::working::{edit_single, ProcessEditor};

use super::format::print_idea;

/// Derive a new idea from an alive one. Without content the new idea is
/// opened in the editor.
pub fn consume(cli: &Cli, store: &Store, token: &str, content: Option<&str>) -> Result<()> {
    let id = store.parse_id(token, false)?;
    let child = store.consume(id, content.unwrap_or(""))?;
    debug!(parent = %id, child = %child.id, "consume");
    store.recency().record(child.id)?;

    let child = match content {
        Some(_) => child,
        None => {
            let editor = ProcessEditor::from_config(store.config())?;
            edit_single(store, &editor, child.clone())?;
            store.resolve(child.id)?
        }
    };
    print_idea(cli, store, &child)
}

pub fn consumes(cli: &Cli, store: &Store, consumed: &str, consumer: &str) -> Result<()> {
    let consumed = store.parse_id(consumed, false)?;
    let consumer = store.parse_id(consumer, true)?;
    let idea = store.consumes(consumed, consumer)?;
    print_idea(cli, store, &idea)
}

pub fn zombie(cli: &Cli, store: &Store, token: &str) -> Result<()> {
    let id = store.parse_id(token, false)?;
    let idea = store.zombie(id)?;
    print_idea(cli, store, &idea)
}

pub fn unconsume(cli: &Cli, store: &Store, token: &str) -> Result<()> {
    let id = store.parse_id(token, true)?;
    let idea = store.unconsume(id)?;
    print_idea(cli, store, &idea)
}

/// Print the content of the idea's direct parents
pub fn lineage(store: &Store, token: &str) -> Result<()> {
    let id = store.parse_id(token, true)?;
    print!("{}", store.lineage(id)?);
    Ok(())
}
