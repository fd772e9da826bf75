//! PostgreSQL-backed Record Store.
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::repos::{
    actor_repo::{self, ActorChanges, ActorRow, NewActor},
    error::RepoResult,
    movie_repo::{self, MovieChanges, MovieRow, NewMovie},
    store::RecordStore,
};

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Create the tables if they are missing. Not a migration system: existing
    /// tables are left as they are.
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS actors (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                release_date TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_actors(&self) -> RepoResult<Vec<ActorRow>> {
        actor_repo::list(&self.pool).await
    }

    async fn get_actor(&self, id: i64) -> RepoResult<Option<ActorRow>> {
        actor_repo::get(&self.pool, id).await
    }

    async fn create_actor(&self, new: NewActor) -> RepoResult<ActorRow> {
        actor_repo::create(&self.pool, &new).await
    }

    async fn update_actor(&self, id: i64, changes: ActorChanges) -> RepoResult<Option<ActorRow>> {
        actor_repo::update(&self.pool, id, &changes).await
    }

    async fn delete_actor(&self, id: i64) -> RepoResult<Option<ActorRow>> {
        actor_repo::delete(&self.pool, id).await
    }

    async fn list_movies(&self) -> RepoResult<Vec<MovieRow>> {
        movie_repo::list(&self.pool).await
    }

    async fn get_movie(&self, id: i64) -> RepoResult<Option<MovieRow>> {
        movie_repo::get(&self.pool, id).await
    }

    async fn create_movie(&self, new: NewMovie) -> RepoResult<MovieRow> {
        movie_repo::create(&self.pool, &new).await
    }

    async fn update_movie(&self, id: i64, changes: MovieChanges) -> RepoResult<Option<MovieRow>> {
        movie_repo::update(&self.pool, id, &changes).await
    }

    async fn delete_movie(&self, id: i64) -> RepoResult<Option<MovieRow>> {
        movie_repo::delete(&self.pool, id).await
    }
}
