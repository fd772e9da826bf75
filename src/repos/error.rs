/**
 * Responsibility
 * - Failure meaning a store reports upward (handlers pick the HTTP status per operation)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
