//! Tag listing and editing commands

use std::collections::BTreeSet;

use tracing::info;

use crate::cli::Cli;
use qu_core::error::{QuError, Result};
use qu_core::idea::Tag;
use qu_core::query::Query;
use qu_core::selector::Selector;
use qu_core::store::Store;

use super::format::{output_by_format_result, print_idea, print_json, print_status};

fn print_tags(cli: &Cli, tags: &BTreeSet<Tag>) -> Result<()> {
    output_by_format_result!(cli.format,
        json => {
            let names: Vec<String> = tags.iter().map(ToString::to_string).collect();
            print_json(&names)
        },
        human => {
            for tag in tags {
                println!("{tag}");
            }
        }
    )
}

pub fn list(cli: &Cli, store: &Store) -> Result<()> {
    print_tags(cli, &store.unique_tags()?)
}

/// Tags found on ideas matching `query`, other than the query's own
pub fn sharing(cli: &Cli, store: &Store, query: &str) -> Result<()> {
    let query = Query::parse(store.registry(), query)?;
    print_tags(cli, &store.tags_sharing(&query)?)
}

/// Add a tag to one idea, an id range, or every idea matching any term of
/// a query
pub fn add(cli: &Cli, store: &Store, selector: &str, tag: &str) -> Result<()> {
    let tag = Tag::parse(tag)?;
    let touched = match Selector::parse(selector, store.registry())? {
        Selector::Query(query) => store.add_tag_to_matching(&tag, &query)?,
        Selector::Range(start, end) => {
            let ideas = store.list_all()?.in_range(start, end);
            for idea in &ideas {
                store.add_tag(idea.id, tag.clone())?;
            }
            ideas.len()
        }
        single => {
            let ideas = store.select(&single)?;
            let Some(idea) = ideas.iter().next() else {
                return Err(QuError::not_found("idea", selector));
            };
            let updated = store.add_tag(idea.id, tag)?;
            return print_idea(cli, store, &updated);
        }
    };
    info!(tag = %tag, touched, "add_tag");
    print_status(
        cli,
        &format!("Tagged {touched} ideas with {tag}"),
        serde_json::json!({ "tag": tag.to_string(), "tagged": touched }),
    )
}

pub fn kill(cli: &Cli, store: &Store, token: &str, tag: &str) -> Result<()> {
    let id = store.parse_id(token, true)?;
    let idea = store.remove_tag(id, &Tag::parse(tag)?)?;
    print_idea(cli, store, &idea)
}

pub fn rename(cli: &Cli, store: &Store, from: &str, to: &str) -> Result<()> {
    let (from, to) = (Tag::parse(from)?, Tag::parse(to)?);
    let renamed = store.rename_tag(&from, &to)?;
    print_status(
        cli,
        &format!("Renamed {from} to {to} on {renamed} ideas"),
        serde_json::json!({ "from": from.to_string(), "to": to.to_string(), "renamed": renamed }),
    )
}

pub fn destroy(cli: &Cli, store: &Store, tag: &str) -> Result<()> {
    let tag = Tag::parse(tag)?;
    let removed = store.destroy_tag(&tag)?;
    print_status(
        cli,
        &format!("Removed {tag} from {removed} ideas"),
        serde_json::json!({ "tag": tag.to_string(), "removed": removed }),
    )
}
