//! Read-side aggregates: concatenated content, tag listings and counts

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{QuError, Result};
use crate::idea::Tag;
use crate::query::Query;

use super::{Ideas, Store};

/// Tag marking an idea as feeding an external application
pub const EXTERNAL_USE_TAG: &str = "external-use";

/// Tag name carrying the application name
pub const APP_TAG: &str = "app";

/// Images carrying this tag are not expected to be transcribed
pub const DO_NOT_TRANSCRIBE_TAG: &str = "DNT";

/// Store-wide counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub ideas: usize,
    pub consumed: usize,
    pub unique_tags: usize,
    pub images: usize,
    pub untranscribed: usize,
}

fn app_query(app: &str) -> Result<Query> {
    Ok(Query::from_tags([
        Tag::new(EXTERNAL_USE_TAG)?,
        Tag::with_value(APP_TAG, app)?,
    ]))
}

impl Store {
    /// Content of every alive text idea matching `query`, in id order
    pub fn concat_content(&self, query: &Query) -> Result<String> {
        let subset = self.find(query)?.with_text();
        if subset.is_empty() {
            return Err(QuError::not_found("ideas matching", query));
        }
        let mut content = String::new();
        for idea in &subset {
            content.push_str(&self.read_text(idea)?);
        }
        Ok(content)
    }

    /// Content published to an external application
    pub fn app_content(&self, app: &str) -> Result<String> {
        self.concat_content(&app_query(app)?)
    }

    /// Append a line to the single text idea published to `app`
    pub fn append_line_for_app(&self, app: &str, line: &str) -> Result<()> {
        let query = app_query(app)?;
        let subset = self.find(&query)?.with_text();
        let [idea] = subset.as_slice() else {
            return Err(QuError::not_found("single idea for app", app));
        };
        let mut idea = idea.clone();

        let mut content = self.read_text(&idea)?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(line);
        content.push('\n');
        self.write_content(&idea, content.as_bytes())?;
        self.touch_edited(&mut idea)
    }

    /// Every distinct tag on any idea
    pub fn unique_tags(&self) -> Result<BTreeSet<Tag>> {
        Ok(self.list_all()?.unique_tags())
    }

    /// Tags that co-occur with a query: the unique tags of matching ideas,
    /// minus the query's own plain tags
    pub fn tags_sharing(&self, query: &Query) -> Result<BTreeSet<Tag>> {
        let mut tags = self.list_all()?.with_tags(query, self)?.unique_tags();
        for tag in query.plain_tags() {
            tags.remove(tag);
        }
        Ok(tags)
    }

    pub fn stats(&self) -> Result<Stats> {
        let all = self.list_all()?;
        let total = all.len();
        let alive = Ideas::new(
            all.into_iter()
                .filter(|idea| idea.cycle.is_alive())
                .collect(),
        );
        let images = alive.clone().with_image();
        let untranscribed = images
            .iter()
            .filter(|idea| !idea.has_tag_named(DO_NOT_TRANSCRIBE_TAG))
            .count();

        Ok(Stats {
            ideas: alive.len(),
            consumed: total - alive.len(),
            unique_tags: alive.unique_tags().len(),
            images: images.len(),
            untranscribed,
        })
    }
}
