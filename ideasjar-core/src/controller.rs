//! View-model for the idea list.
//!
//! Holds a local copy of the collection plus the editor state, and keeps the
//! copy in step with the server one request at a time. The local list is a
//! cache: it only changes after the server confirms a change, and on a full
//! reload it is replaced outright.
//!
//! Every operation logs its own failure and hands the error back, leaving the
//! list exactly as it was.

use tracing::{error, info, warn};

use crate::api::IdeaApi;
use crate::error::Result;
use crate::filter::filter_ideas;
use crate::model::{Idea, IdeaDraft, IdeaId, Priority};

pub struct IdeaList<A> {
    api: A,
    ideas: Vec<Idea>,
    query: String,
    /// Server-side filter applied on `load`
    priority: Option<Priority>,
    draft: IdeaDraft,
    /// Identity of the idea being edited; `None` means the editor composes a new one.
    editing: Option<IdeaId>,
    editor_open: bool,
}

impl<A: IdeaApi> IdeaList<A> {
    pub fn new(api: A) -> Self {
        Self::with_ideas(api, Vec::new())
    }

    /// Start from an already-known list (e.g. rendered from a previous session).
    pub fn with_ideas(api: A, ideas: Vec<Idea>) -> Self {
        Self {
            api,
            ideas,
            query: String::new(),
            priority: None,
            draft: IdeaDraft::default(),
            editing: None,
            editor_open: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn find(&self, id: &IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|idea| &idea.id == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Restrict the next `load` to one priority; `None` loads everything.
    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
    }

    pub fn draft(&self) -> &IdeaDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut IdeaDraft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<&IdeaId> {
        self.editing.as_ref()
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    /// Replace the local list with the server's, in server order.
    /// On failure the previous (possibly stale) list is kept.
    pub async fn load(&mut self) -> Result<()> {
        match self.api.list_by_priority(self.priority).await {
            Ok(ideas) => {
                info!(count = ideas.len(), priority = ?self.priority, "loaded ideas");
                self.ideas = ideas;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to fetch ideas");
                Err(e)
            }
        }
    }

    /// Ideas whose content contains `query`, case-insensitively. Recomputed on every call.
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Idea> + 'a {
        filter_ideas(&self.ideas, query)
    }

    /// [`filter`](Self::filter) with the stored search query.
    pub fn filtered(&self) -> impl Iterator<Item = &Idea> + '_ {
        filter_ideas(&self.ideas, &self.query)
    }

    /// Open the editor on a blank draft for a new idea.
    pub fn begin_create(&mut self) {
        self.editing = None;
        self.draft = IdeaDraft::default();
        self.editor_open = true;
    }

    /// Open the editor on `idea`. The target is remembered by id, so later
    /// changes to the list cannot redirect the update to another idea.
    pub fn begin_edit(&mut self, idea: &Idea) {
        if self.find(&idea.id).is_none() {
            warn!(id = %idea.id, "editing an idea that is not in the local list");
        }
        self.editing = Some(idea.id.clone());
        self.draft = idea.to_draft();
        self.editor_open = true;
    }

    pub fn close_editor(&mut self) {
        self.editor_open = false;
    }

    /// Send the draft: update when editing, create otherwise.
    /// The editor is closed whatever the outcome.
    pub async fn submit(&mut self) -> Result<()> {
        let result = match self.editing.clone() {
            Some(id) => self.submit_update(id).await,
            None => self.submit_create().await,
        };
        self.close_editor();
        result
    }

    async fn submit_create(&mut self) -> Result<()> {
        match self.api.create(&self.draft).await {
            Ok(idea) => {
                info!(id = %idea.id, "created idea");
                self.ideas.insert(0, idea);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to create idea");
                Err(e)
            }
        }
    }

    async fn submit_update(&mut self, id: IdeaId) -> Result<()> {
        match self.api.update(&id, &self.draft).await {
            Ok(idea) => {
                info!(%id, "updated idea");
                self.replace(&id, idea);
                Ok(())
            }
            Err(e) => {
                error!(%id, error = %e, "failed to update idea");
                Err(e)
            }
        }
    }

    /// Delete on the server, then drop every local entry with that id.
    pub async fn remove(&mut self, id: &IdeaId) -> Result<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                let before = self.ideas.len();
                self.ideas.retain(|idea| &idea.id != id);
                info!(%id, removed = before - self.ideas.len(), "deleted idea");
                Ok(())
            }
            Err(e) => {
                error!(%id, error = %e, "failed to delete idea");
                Err(e)
            }
        }
    }

    /// Ask the server for an improved rewrite and take its echo.
    pub async fn improve(&mut self, id: &IdeaId) -> Result<()> {
        match self.api.improve(id).await {
            Ok(idea) => {
                info!(%id, "improved idea");
                self.replace(id, idea);
                Ok(())
            }
            Err(e) => {
                error!(%id, error = %e, "failed to improve idea");
                Err(e)
            }
        }
    }

    /// Swap in the server representation at the position currently holding `id`.
    fn replace(&mut self, id: &IdeaId, idea: Idea) {
        match self.ideas.iter().position(|existing| &existing.id == id) {
            Some(index) => self.ideas[index] = idea,
            None => warn!(%id, "idea left the local list before the server answered"),
        }
    }
}
