/*
 * Responsibility
 * - Record Store: actors / movies persistence behind the RecordStore trait
 * - PgStore (sqlx, PostgreSQL) for real deployments, MemoryStore for development and tests
 */
pub mod actor_repo;
pub mod error;
pub mod memory;
pub mod movie_repo;
pub mod pg;
pub mod store;

pub use actor_repo::{ActorChanges, ActorRow, NewActor};
pub use error::{RepoError, RepoResult};
pub use memory::MemoryStore;
pub use movie_repo::{MovieChanges, MovieRow, NewMovie};
pub use pg::PgStore;
pub use store::RecordStore;
