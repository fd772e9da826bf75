/*
 * Responsibility
 * - (resource, operation) ごとの handler
 * - JSON body の parse は handler 側で行い、失敗時の status は operation ごとに決める
 */
use axum::body::Bytes;
use serde::de::DeserializeOwned;

pub mod actors;
pub mod health;
pub mod movies;

/// Parse a JSON body. An empty body reads as `{}` when `empty_is_object` is set (PATCH).
fn parse_json<T: DeserializeOwned>(body: &Bytes, empty_is_object: bool) -> Result<T, String> {
    if empty_is_object && body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"{}").map_err(|e| e.to_string());
    }
    serde_json::from_slice(body).map_err(|e| e.to_string())
}
