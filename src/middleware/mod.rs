/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth (認可ゲート), bearer_auth (ヘッダ抽出), cors, http (横断的関心事)
 */
pub mod auth;
pub mod bearer_auth;
pub mod cors;
pub mod http;
