/*
 * Responsibility
 * - Path の `{id}` を、リソースごとの意味付き ID 型 (RecordId<T>) として受け取る
 * - 整数でない / 範囲外の id は「そのリソースは存在しない」= 404 として扱う
 * 置くもの
 *  - RecordId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts<AppState> for RecordId<T>
 * 置かないもの
 *  - Actor / Movie といった具体リソース名 (types 側)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

/// リソース名 (404 メッセージに使う)
pub trait Resource {
    const NAME: &'static str;
}

pub struct RecordId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> RecordId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

impl<T> FromRequestParts<AppState> for RecordId<T>
where
    T: Resource + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NAME))?;
        let id = parse_id(&raw).ok_or_else(|| AppError::not_found(T::NAME))?;
        Ok(Self::new(id))
    }
}

// derive だと T: Clone/Copy が要求される (Tag は値を持たない enum)
impl<T> Clone for RecordId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordId<T> {}

impl<T> std::fmt::Debug for RecordId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordId").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordId, parse_id};
    use crate::api::extractors::ActorId;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse_id("3"), Some(3));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("99999999999999999999"), None);
    }

    #[test]
    fn ids_copy_without_tag_bounds() {
        let id: ActorId = RecordId::new(7);
        let copied = id;
        assert_eq!(id.id, copied.id);
        assert_eq!(format!("{:?}", id.clone()), "RecordId { id: 7 }");
    }
}
