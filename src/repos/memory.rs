use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::{
    actor_repo::{ActorChanges, ActorRow, NewActor},
    error::RepoResult,
    movie_repo::{MovieChanges, MovieRow, NewMovie},
    store::RecordStore,
};

/// In-process Record Store.
///
/// Used when no `DATABASE_URL` is configured in development, and by tests.
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    last_actor_id: i64,
    actors: BTreeMap<i64, ActorRow>,
    last_movie_id: i64,
    movies: BTreeMap<i64, MovieRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_actors(&self) -> RepoResult<Vec<ActorRow>> {
        Ok(self.inner.read().await.actors.values().cloned().collect())
    }

    async fn get_actor(&self, id: i64) -> RepoResult<Option<ActorRow>> {
        Ok(self.inner.read().await.actors.get(&id).cloned())
    }

    async fn create_actor(&self, new: NewActor) -> RepoResult<ActorRow> {
        let mut tables = self.inner.write().await;
        tables.last_actor_id += 1;

        let row = ActorRow {
            id: tables.last_actor_id,
            name: new.name,
            age: new.age,
            gender: new.gender,
        };
        tables.actors.insert(row.id, row.clone());

        Ok(row)
    }

    async fn update_actor(&self, id: i64, changes: ActorChanges) -> RepoResult<Option<ActorRow>> {
        let mut tables = self.inner.write().await;
        let Some(row) = tables.actors.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(row);

        Ok(Some(row.clone()))
    }

    async fn delete_actor(&self, id: i64) -> RepoResult<Option<ActorRow>> {
        Ok(self.inner.write().await.actors.remove(&id))
    }

    async fn list_movies(&self) -> RepoResult<Vec<MovieRow>> {
        Ok(self.inner.read().await.movies.values().cloned().collect())
    }

    async fn get_movie(&self, id: i64) -> RepoResult<Option<MovieRow>> {
        Ok(self.inner.read().await.movies.get(&id).cloned())
    }

    async fn create_movie(&self, new: NewMovie) -> RepoResult<MovieRow> {
        let mut tables = self.inner.write().await;
        tables.last_movie_id += 1;

        let row = MovieRow {
            id: tables.last_movie_id,
            title: new.title,
            release_date: new.release_date,
        };
        tables.movies.insert(row.id, row.clone());

        Ok(row)
    }

    async fn update_movie(&self, id: i64, changes: MovieChanges) -> RepoResult<Option<MovieRow>> {
        let mut tables = self.inner.write().await;
        let Some(row) = tables.movies.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(row);

        Ok(Some(row.clone()))
    }

    async fn delete_movie(&self, id: i64) -> RepoResult<Option<MovieRow>> {
        Ok(self.inner.write().await.movies.remove(&id))
    }
}
