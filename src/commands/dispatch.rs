//! Command dispatch logic for qu

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use qu_core::config::resolve_store_root;
use qu_core::error::Result;
use qu_core::store::Store;

use super::{ideas, init, lifecycle, tags, working};

/// Trace command phases when --verbose is set
macro_rules! trace_command {
    ($cli:expr, $start:expr, $label:expr) => {
        if $cli.verbose {
            ::tracing::debug!(elapsed = ?$start.elapsed(), $label);
        }
    };
}

/// Open the store named by --store, QU_DIR or the home default
pub fn open_store(cli: &Cli) -> Result<Store> {
    let root = resolve_store_root(cli.store.as_deref())?;
    debug!(root = %root.display(), "resolve_store");
    Store::open(&root)
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let Some(command) = &cli.command else {
        println!("qu {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Run `qu --help` for usage information.");
        return Ok(());
    };

    if let Commands::Init = command {
        return init::execute(cli);
    }

    let store = open_store(cli)?;
    trace_command!(cli, start, "open_store");

    execute(cli, &store, command)?;

    trace_command!(cli, start, "execute_command");
    Ok(())
}

fn execute(cli: &Cli, store: &Store, command: &Commands) -> Result<()> {
    match command {
        Commands::Init => init::execute(cli),
        Commands::New { tags, content } => ideas::new(cli, store, tags, content.as_deref()),
        Commands::Add { tags, file } => ideas::add(cli, store, tags, file),
        Commands::Open {
            selector,
            force_split,
        } => working::open(cli, store, selector, *force_split),
        Commands::Cat { selector } => ideas::cat(store, selector),
        Commands::Ls { selector } => ideas::ls(cli, store, selector.as_deref()),
        Commands::Tags => tags::list(cli, store),
        Commands::Lst { query } => tags::sharing(cli, store, query),
        Commands::Consume { id, content } => {
            lifecycle::consume(cli, store, id, content.as_deref())
        }
        Commands::Consumes { consumed, consumer } => {
            lifecycle::consumes(cli, store, consumed, consumer)
        }
        Commands::Zombie { id } => lifecycle::zombie(cli, store, id),
        Commands::Unconsume { id } => lifecycle::unconsume(cli, store, id),
        Commands::Lineage { id } => lifecycle::lineage(store, id),
        Commands::Rm { selector } => ideas::rm(cli, store, selector),
        Commands::Cp { id } => ideas::cp(cli, store, id),
        Commands::AddTag { selector, tag } => tags::add(cli, store, selector, tag),
        Commands::KillTag { id, tag } => tags::kill(cli, store, id, tag),
        Commands::RenameTag { from, to } => tags::rename(cli, store, from, to),
        Commands::DestroyTag { tag } => tags::destroy(cli, store, tag),
        Commands::Encrypt { id } => ideas::encrypt(cli, store, id),
        Commands::App { name, append } => ideas::app(cli, store, name, append.as_deref()),
        Commands::Stats => ideas::stats(cli, store),
        Commands::SaveWorking => working::save(cli, store),
    }
}
