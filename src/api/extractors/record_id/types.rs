/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - リソースが増えたらここに Tag + alias を足す
 */
use super::core::{RecordId, Resource};

// actors
pub enum ActorTag {}
impl Resource for ActorTag {
    const NAME: &'static str = "actor";
}
pub type ActorId = RecordId<ActorTag>;

// movies
pub enum MovieTag {}
impl Resource for MovieTag {
    const NAME: &'static str = "movie";
}
pub type MovieId = RecordId<MovieTag>;
