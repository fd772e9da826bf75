/// Factory: build `TokenVerifier` from application `Config`.
use std::{sync::Arc, time::Duration};

use crate::config::Config;
use crate::services::auth::{
    TokenVerifier,
    jwks::{JwksClient, KeySetError},
};

pub fn build_token_verifier(config: &Config) -> Result<Arc<TokenVerifier>, KeySetError> {
    let keys = JwksClient::new(
        config.auth_jwks_url.clone(),
        Duration::from_secs(config.jwks_cache_ttl_seconds),
        Duration::from_secs(config.jwks_min_refresh_seconds),
    )?;

    tracing::info!(
        jwks_url = %keys.url(),
        issuer = %config.auth_issuer,
        audience = %config.auth_audience,
        "token verifier configured"
    );

    let verifier = TokenVerifier::new(
        Arc::new(keys),
        &config.auth_issuer,
        &config.auth_audience,
        config.auth_algorithms.clone(),
        config.access_token_leeway_seconds,
    );

    Ok(Arc::new(verifier))
}
