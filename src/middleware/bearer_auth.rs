/*
 * Responsibility
 * - Authorization ヘッダから Bearer トークンを取り出す (検証はしない)
 * - 形式は厳密に `Bearer <token>` (スキーム名は大文字小文字を区別しない)
 */
use axum::http::{HeaderMap, header};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("authorization header is expected")]
    Missing,
    #[error("authorization header must start with \"Bearer\"")]
    NotBearer,
    #[error("token not found")]
    EmptyToken,
    #[error("authorization header must be a bearer token")]
    Malformed,
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    if value.trim().is_empty() {
        return Err(BearerError::Missing);
    }

    let mut parts = value.split(' ');
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::NotBearer);
    }

    let token = parts.next().ok_or(BearerError::EmptyToken)?;
    if parts.next().is_some() {
        return Err(BearerError::Malformed);
    }
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        h
    }

    #[test]
    fn extracts_token() {
        let h = headers("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&h), Ok("abc.def.ghi"));

        let h = headers("bearer abc.def.ghi");
        assert_eq!(bearer_token(&h), Ok("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(BearerError::Missing));
        assert_eq!(bearer_token(&headers("")), Err(BearerError::Missing));
    }

    #[test]
    fn rejects_other_schemes_and_shapes() {
        assert_eq!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(BearerError::NotBearer)
        );
        assert_eq!(bearer_token(&headers("Bearer")), Err(BearerError::EmptyToken));
        assert_eq!(bearer_token(&headers("Bearer ")), Err(BearerError::EmptyToken));
        assert_eq!(
            bearer_token(&headers("Bearer a b")),
            Err(BearerError::Malformed)
        );
    }
}
