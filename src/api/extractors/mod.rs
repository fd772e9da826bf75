pub mod auth_ctx;
pub mod record_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use record_id::{ActorId, MovieId};
