//! Commands that create, read and remove ideas

use std::path::Path;

use tracing::{debug, info};

use crate::cli::Cli;
use qu_core::bail_usage;
use qu_core::error::{QuError, Result};
use qu_core::idea::{parse_tag_list, Idea};
use qu_core::selector::Selector;
use qu_core::store::Store;
use qu_core::working::{edit_single, ProcessEditor};

use super::format::{output_by_format_result, print_idea, print_ideas, print_json, print_status};

/// Open a freshly minted idea in the editor and reload it afterwards
fn edit_new(store: &Store, idea: Idea) -> Result<Idea> {
    let editor = ProcessEditor::from_config(store.config())?;
    edit_single(store, &editor, idea.clone())?;
    store.resolve(idea.id)
}

pub fn new(cli: &Cli, store: &Store, tags: &str, content: Option<&str>) -> Result<()> {
    let tags = parse_tag_list(tags)?;
    let idea = store.create(tags, content.unwrap_or(""))?;
    store.recency().record(idea.id)?;
    let idea = match content {
        Some(_) => idea,
        None => edit_new(store, idea)?,
    };
    print_idea(cli, store, &idea)
}

pub fn add(cli: &Cli, store: &Store, tags: &str, file: &Path) -> Result<()> {
    let idea = store.import_file(tags, file)?;
    info!(source = %file.display(), filename = %idea.filename(), "imported");
    store.recency().record(idea.id)?;
    print_idea(cli, store, &idea)
}

/// Print content. Binary ideas print their path instead.
pub fn cat(store: &Store, arg: &str) -> Result<()> {
    let selector = Selector::parse(arg, store.registry())?;
    if let Selector::Query(query) = &selector {
        print!("{}", store.concat_content(query)?);
        return Ok(());
    }

    let ideas = store.select(&selector)?;
    if ideas.is_empty() {
        return Err(QuError::not_found("ideas in", arg));
    }
    for idea in &ideas {
        if idea.is_text() {
            print!("{}", store.read_text(idea)?);
        } else {
            println!("{}", store.path_of(idea).display());
        }
    }
    Ok(())
}

pub fn ls(cli: &Cli, store: &Store, arg: Option<&str>) -> Result<()> {
    let ideas = match arg {
        Some(arg) => store.select_str(arg)?,
        None => store.list_alive()?,
    };
    debug!(count = ideas.len(), "ls");
    print_ideas(cli, store, &ideas)
}

pub fn cp(cli: &Cli, store: &Store, token: &str) -> Result<()> {
    let id = store.parse_id(token, false)?;
    let copy = store.copy(id)?;
    store.recency().record(copy.id)?;
    print_idea(cli, store, &copy)
}

/// Remove by id or id range. Tag queries are refused.
pub fn rm(cli: &Cli, store: &Store, arg: &str) -> Result<()> {
    match Selector::parse(arg, store.registry())? {
        Selector::Query(_) => {
            bail_usage!(format!("rm takes an id or id range, not a tag query: {arg}"))
        }
        Selector::Range(start, end) => {
            let removed = store.remove_range(start, end)?;
            print_status(
                cli,
                &format!("Removed {removed} ideas"),
                serde_json::json!({ "removed": removed }),
            )
        }
        single => {
            let ideas = store.select(&single)?;
            let Some(idea) = ideas.iter().next() else {
                return Err(QuError::not_found("idea", arg));
            };
            let removed = store.remove(idea.id)?;
            print_status(
                cli,
                &format!("Removed {}", removed.filename()),
                serde_json::json!({ "removed": removed.filename() }),
            )
        }
    }
}

pub fn encrypt(cli: &Cli, store: &Store, token: &str) -> Result<()> {
    let id = store.parse_id(token, true)?;
    let idea = store.mark_encrypted(id)?;
    print_idea(cli, store, &idea)
}

/// Print content published to an application, or append a line to it
pub fn app(cli: &Cli, store: &Store, name: &str, append: Option<&str>) -> Result<()> {
    match append {
        Some(line) => {
            store.append_line_for_app(name, line)?;
            print_status(
                cli,
                &format!("Appended to {name}"),
                serde_json::json!({ "app": name, "line": line }),
            )
        }
        None => {
            let content = store.app_content(name)?;
            output_by_format_result!(cli.format,
                json => print_json(&serde_json::json!({ "app": name, "content": content })),
                human => {
                    print!("{content}");
                }
            )
        }
    }
}

pub fn stats(cli: &Cli, store: &Store) -> Result<()> {
    let stats = store.stats()?;
    output_by_format_result!(cli.format,
        json => print_json(&stats),
        human => {
            println!("ideas:         {}", stats.ideas);
            println!("consumed:      {}", stats.consumed);
            println!("unique tags:   {}", stats.unique_tags);
            println!("images:        {}", stats.images);
            println!("untranscribed: {}", stats.untranscribed);
        }
    )
}
