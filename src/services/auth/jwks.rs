//! Signing-key sources for access-token verification.
//!
//! - `JwksClient`: fetches the identity provider's JWK set over HTTP and caches it
//!   for a bounded time. An unknown `kid` forces a refetch (key rotation), at most
//!   once per `min_refresh_interval`; concurrent refetches are collapsed into one.
//! - `StaticKeySet`: a fixed JWK set (local setups, tests).
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("key set request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("key set is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Looks up a verification key by its key id (`kid` in the token header).
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySetError>;
}

#[derive(Debug)]
struct CachedKeys {
    keys: Arc<JwkSet>,
    fetched_at: Instant,
}

enum Lookup {
    Hit(Jwk),
    // fresh set, kid not in it, too early to ask the IdP again
    Miss,
    Refetch,
}

#[derive(Debug)]
pub struct JwksClient {
    http: reqwest::Client,
    url: Url,
    ttl: Duration,
    min_refresh_interval: Duration,
    cached: RwLock<Option<CachedKeys>>,
    refreshing: Mutex<()>,
}

impl JwksClient {
    pub fn new(
        url: Url,
        ttl: Duration,
        min_refresh_interval: Duration,
    ) -> Result<Self, KeySetError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self::with_client(http, url, ttl, min_refresh_interval))
    }

    pub fn with_client(
        http: reqwest::Client,
        url: Url,
        ttl: Duration,
        min_refresh_interval: Duration,
    ) -> Self {
        Self {
            http,
            url,
            ttl,
            min_refresh_interval,
            cached: RwLock::new(None),
            refreshing: Mutex::new(()),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn lookup(&self, kid: &str) -> Lookup {
        let guard = self.cached.read().await;
        let Some(cached) = guard.as_ref() else {
            return Lookup::Refetch;
        };

        let age = cached.fetched_at.elapsed();
        if age >= self.ttl {
            return Lookup::Refetch;
        }
        match cached.keys.find(kid) {
            Some(jwk) => Lookup::Hit(jwk.clone()),
            None if age < self.min_refresh_interval => Lookup::Miss,
            None => Lookup::Refetch,
        }
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>, KeySetError> {
        let keys: JwkSet = self
            .http
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(url = %self.url, keys = keys.keys.len(), "fetched signing key set");

        let keys = Arc::new(keys);
        *self.cached.write().await = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });

        Ok(keys)
    }
}

#[async_trait]
impl KeySource for JwksClient {
    async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        match self.lookup(kid).await {
            Lookup::Hit(jwk) => return Ok(Some(jwk)),
            Lookup::Miss => return Ok(None),
            Lookup::Refetch => {}
        }

        let _refreshing = self.refreshing.lock().await;

        // Another request may have refetched while this one waited.
        match self.lookup(kid).await {
            Lookup::Hit(jwk) => Ok(Some(jwk)),
            Lookup::Miss => Ok(None),
            Lookup::Refetch => {
                let keys = self.refresh().await?;
                Ok(keys.find(kid).cloned())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticKeySet {
    keys: JwkSet,
}

impl StaticKeySet {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }

    pub fn from_json(raw: &str) -> Result<Self, KeySetError> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }
}

#[async_trait]
impl KeySource for StaticKeySet {
    async fn find(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        Ok(self.keys.find(kid).cloned())
    }
}
