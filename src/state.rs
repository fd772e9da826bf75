/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: Record Store (明示的に生成して注入する)
 *   - auth: TokenVerifier
 *   - release_dates: Movie.release_date の検証ルール
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::RecordStore;
use crate::services::{auth::TokenVerifier, release_date::ReleaseDatePolicy};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub auth: Arc<TokenVerifier>,
    pub release_dates: ReleaseDatePolicy,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("auth", &self.auth)
            .field("release_dates", &self.release_dates)
            .finish()
    }
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        auth: Arc<TokenVerifier>,
        release_dates: ReleaseDatePolicy,
    ) -> Self {
        Self {
            store,
            auth,
            release_dates,
        }
    }
}
