/*
 * Responsibility
 * - movies CRUD (SQLx)
 * - release_date は TEXT で保存する (検証ルールは services::release_date 側)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub release_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub release_date: Option<String>,
}

impl MovieChanges {
    pub fn apply(self, row: &mut MovieRow) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(release_date) = self.release_date {
            row.release_date = release_date;
        }
    }
}

pub async fn list(pool: &PgPool) -> RepoResult<Vec<MovieRow>> {
    let rows = sqlx::query_as::<_, MovieRow>(
        r#"
        SELECT id, title, release_date
        FROM movies
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get(pool: &PgPool, id: i64) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        SELECT id, title, release_date
        FROM movies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create(pool: &PgPool, new: &NewMovie) -> RepoResult<MovieRow> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        INSERT INTO movies (title, release_date)
        VALUES ($1, $2)
        RETURNING id, title, release_date
        "#,
    )
    .bind(&new.title)
    .bind(&new.release_date)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    changes: &MovieChanges,
) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        UPDATE movies
        SET
            title = COALESCE($2, title),
            release_date = COALESCE($3, release_date)
        WHERE id = $1
        RETURNING id, title, release_date
        "#,
    )
    .bind(id)
    .bind(changes.title.as_deref())
    .bind(changes.release_date.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i64) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        DELETE FROM movies
        WHERE id = $1
        RETURNING id, title, release_date
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
