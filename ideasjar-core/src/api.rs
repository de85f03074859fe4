//! Seam between the idea list and whatever serves the collection.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Health, Idea, IdeaDraft, IdeaId, Priority, Stats};

/// One method per request/response exchange with the collection resource.
///
/// Implementations decide success by status class only and never retry.
#[async_trait]
pub trait IdeaApi: Send + Sync {
    /// `GET /ideas`, in server order
    async fn list(&self) -> Result<Vec<Idea>> {
        self.list_by_priority(None).await
    }

    /// `GET /ideas?priority=...`; `None` sends no filter
    async fn list_by_priority(&self, priority: Option<Priority>) -> Result<Vec<Idea>>;

    /// `GET /ideas/{id}`
    async fn get(&self, id: &IdeaId) -> Result<Idea>;

    /// `POST /ideas`
    async fn create(&self, draft: &IdeaDraft) -> Result<Idea>;

    /// `PUT /ideas/{id}`
    async fn update(&self, id: &IdeaId, draft: &IdeaDraft) -> Result<Idea>;

    /// `DELETE /ideas/{id}`; the response body is ignored
    async fn delete(&self, id: &IdeaId) -> Result<()>;

    /// `GET /ideas/search/{query}`
    async fn search(&self, query: &str) -> Result<Vec<Idea>>;

    /// `POST /ideas/{id}/improve`
    async fn improve(&self, id: &IdeaId) -> Result<Idea>;

    /// `GET /stats`
    async fn stats(&self) -> Result<Stats>;

    /// `GET /health`
    async fn health(&self) -> Result<Health>;
}
