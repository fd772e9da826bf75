/*
 * Responsibility
 * - actors テーブル向け SQLx 操作 (PgPool を受け取る free functions)
 * - row / insert / merge-update 型の定義 (MemoryStore と共有)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ActorRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// Merge update: `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ActorChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl ActorChanges {
    pub fn apply(self, row: &mut ActorRow) {
        if let Some(name) = self.name {
            row.name = name;
        }
        if let Some(age) = self.age {
            row.age = age;
        }
        if let Some(gender) = self.gender {
            row.gender = gender;
        }
    }
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<ActorRow>> {
    let rows = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, age, gender
        FROM actors
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, id: i64) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, age, gender
        FROM actors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, new: &NewActor) -> RepoResult<ActorRow> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        INSERT INTO actors (name, age, gender)
        VALUES ($1, $2, $3)
        RETURNING id, name, age, gender
        "#,
    )
    .bind(&new.name)
    .bind(new.age)
    .bind(&new.gender)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(db: &PgPool, id: i64, changes: &ActorChanges) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        UPDATE actors
        SET
            name = COALESCE($2, name),
            age = COALESCE($3, age),
            gender = COALESCE($4, gender)
        WHERE id = $1
        RETURNING id, name, age, gender
        "#,
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.age)
    .bind(changes.gender.as_deref())
    .fetch_optional(db)
    .await?;

    Ok(row)
}

// Returns the row as it was just before removal.
pub async fn delete(db: &PgPool, id: i64) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        DELETE FROM actors
        WHERE id = $1
        RETURNING id, name, age, gender
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
