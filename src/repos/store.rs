//! Record Store interface used by the request handlers.
use async_trait::async_trait;

use crate::repos::{
    actor_repo::{ActorChanges, ActorRow, NewActor},
    error::RepoResult,
    movie_repo::{MovieChanges, MovieRow, NewMovie},
};

/// CRUD over the two record kinds.
///
/// - Identities are assigned by the store on create and never reused.
/// - `update_*` / `delete_*` return `Ok(None)` when the id does not exist.
/// - `delete_*` returns the record as it was immediately before removal.
///
/// Implementations must be shareable across requests (held as `Arc<dyn RecordStore>`).
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn list_actors(&self) -> RepoResult<Vec<ActorRow>>;
    async fn get_actor(&self, id: i64) -> RepoResult<Option<ActorRow>>;
    async fn create_actor(&self, new: NewActor) -> RepoResult<ActorRow>;
    async fn update_actor(&self, id: i64, changes: ActorChanges) -> RepoResult<Option<ActorRow>>;
    async fn delete_actor(&self, id: i64) -> RepoResult<Option<ActorRow>>;

    async fn list_movies(&self) -> RepoResult<Vec<MovieRow>>;
    async fn get_movie(&self, id: i64) -> RepoResult<Option<MovieRow>>;
    async fn create_movie(&self, new: NewMovie) -> RepoResult<MovieRow>;
    async fn update_movie(&self, id: i64, changes: MovieChanges) -> RepoResult<Option<MovieRow>>;
    async fn delete_movie(&self, id: i64) -> RepoResult<Option<MovieRow>>;
}
