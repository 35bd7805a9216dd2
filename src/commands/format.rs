//! Shared output helpers for commands

use serde::Serialize;

use crate::cli::{Cli, OutputFormat};
use qu_core::error::Result;
use qu_core::idea::Idea;
use qu_core::store::{Ideas, Store};

/// Dispatch output by format. The json arm returns a Result; the human
/// arm is a block.
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            $crate::cli::OutputFormat::Json => $json,
            $crate::cli::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}

pub(crate) use output_by_format_result;

/// Pretty-print any serializable value
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON shape of one idea
pub fn idea_json(store: &Store, idea: &Idea) -> serde_json::Value {
    serde_json::json!({
        "id": idea.id,
        "filename": idea.filename(),
        "path": store.path_of(idea).display().to_string(),
        "cycle": idea.cycle,
        "kind": idea.kind,
        "created": idea.created,
        "edited": idea.edited,
        "consumed": idea.consumed,
        "consumes": idea.consumes,
        "tags": idea.tags.iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

/// One idea: its filename, or its JSON record
pub fn print_idea(cli: &Cli, store: &Store, idea: &Idea) -> Result<()> {
    output_by_format_result!(cli.format,
        json => print_json(&idea_json(store, idea)),
        human => {
            println!("{}", idea.filename());
        }
    )
}

/// Many ideas: one filename per line, or a JSON array
pub fn print_ideas(cli: &Cli, store: &Store, ideas: &Ideas) -> Result<()> {
    output_by_format_result!(cli.format,
        json => {
            let records: Vec<_> = ideas.iter().map(|idea| idea_json(store, idea)).collect();
            print_json(&records)
        },
        human => {
            for filename in ideas.filenames() {
                println!("{filename}");
            }
        }
    )
}

/// A status line for commands whose result is a count or a message
pub fn print_status(cli: &Cli, message: &str, detail: serde_json::Value) -> Result<()> {
    if cli.format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "status": "ok", "message": message, "detail": detail }));
    }
    if !cli.quiet {
        println!("{message}");
    }
    Ok(())
}
