/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - 認可ゲート (middleware) が検証後に request extensions に格納し、handler はこの型だけを受け取る
 */

use crate::services::auth::VerifiedAccessToken;

/// 認証・認可済みのリクエストに付与されるコンテキスト
///
/// - `subject` は IdP 側の `sub` (ログ相関用)
/// - 権限チェックはゲートで完了済みなので、permission 一覧は持たない
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: Option<String>,
}

impl AuthCtx {
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("anonymous")
    }
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self {
            subject: token.subject,
        }
    }
}
