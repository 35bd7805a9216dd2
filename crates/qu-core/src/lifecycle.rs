//! Consumption state machine and lineage
//!
//! Ideas move Alive → Consumed → Zombie and never back, except through
//! [`Store::unconsume`]. Consuming records a provenance edge: the consumer
//! lists the consumed idea's id among its parents.

use crate::error::{QuError, Result};
use crate::idea::{today, Cycle, Idea, IdeaId};
use crate::store::Store;

fn advance(idea: &mut Idea, next: Cycle) -> Result<()> {
    if !idea.cycle.can_advance_to(next) {
        return Err(QuError::InvalidTransition {
            id: idea.id.to_string(),
            from: idea.cycle.to_string(),
            to: next.to_string(),
        });
    }
    idea.cycle = next;
    Ok(())
}

impl Store {
    /// Alive → Consumed, stamping today's consumed date
    pub fn set_consumed(&self, idea: &mut Idea) -> Result<()> {
        self.update_idea(idea, |idea| {
            advance(idea, Cycle::Consumed)?;
            idea.consumed = Some(today());
            Ok(())
        })
    }

    /// Move an idea to Zombie. An idea that skipped Consumed is stamped
    /// with today's consumed date.
    pub fn set_zombie(&self, idea: &mut Idea) -> Result<()> {
        self.update_idea(idea, |idea| {
            advance(idea, Cycle::Zombie)?;
            idea.consumed.get_or_insert_with(today);
            Ok(())
        })
    }

    /// Zombify the idea with this id
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn zombie(&self, id: IdeaId) -> Result<Idea> {
        let mut idea = self.resolve(id)?;
        self.set_zombie(&mut idea)?;
        Ok(idea)
    }

    /// Return a consumed idea to Alive so it can be edited again
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn unconsume(&self, id: IdeaId) -> Result<Idea> {
        self.update(id, |idea| {
            if idea.cycle != Cycle::Consumed {
                return Err(QuError::InvalidTransition {
                    id: idea.id.to_string(),
                    from: idea.cycle.to_string(),
                    to: Cycle::Alive.to_string(),
                });
            }
            idea.cycle = Cycle::Alive;
            idea.consumed = None;
            Ok(())
        })
    }

    /// Write `content` as a new idea derived from the alive idea `id`,
    /// then mark `id` consumed. Returns the new idea.
    #[tracing::instrument(skip(self, content), fields(id = %id))]
    pub fn consume(&self, id: IdeaId, content: &str) -> Result<Idea> {
        let mut parent = self.resolve(id)?;
        if !parent.cycle.is_alive() {
            return Err(QuError::InvalidTransition {
                id: parent.id.to_string(),
                from: parent.cycle.to_string(),
                to: Cycle::Consumed.to_string(),
            });
        }
        let consumer = self.mint(
            |new_id| Ok(Idea::consuming(&parent, new_id, today())),
            content.as_bytes(),
        )?;
        self.set_consumed(&mut parent)?;
        Ok(consumer)
    }

    /// Record that `consumer_id` was derived from `consumed_id` without
    /// creating a new idea. The consumed idea is marked consumed if it is
    /// still alive.
    #[tracing::instrument(skip(self), fields(consumed = %consumed_id, consumer = %consumer_id))]
    pub fn consumes(&self, consumed_id: IdeaId, consumer_id: IdeaId) -> Result<Idea> {
        let mut consumed = self.resolve(consumed_id)?;
        let consumer = self.update(consumer_id, |idea| {
            idea.consumes.push(consumed_id);
            Ok(())
        })?;
        if consumed.cycle.is_alive() {
            self.set_consumed(&mut consumed)?;
        }
        Ok(consumer)
    }

    /// Filename-labelled content of every direct parent of `id`
    pub fn lineage(&self, id: IdeaId) -> Result<String> {
        let idea = self.resolve(id)?;
        let mut compiled = String::new();
        for parent in &idea.consumes {
            let filename = self.resolve_filename(*parent).map_err(|_| {
                QuError::not_found(
                    "parent",
                    format!("{parent} (listed by {})", idea.id),
                )
            })?;
            let content = self.content_of(*parent)?;
            compiled.push('\n');
            compiled.push_str(&filename);
            compiled.push('\n');
            compiled.push_str(&content);
        }
        Ok(compiled)
    }
}
