use jsonwebtoken::{
    Algorithm, DecodingKey, Validation,
    errors::{Error as JwtError, ErrorKind},
};
use serde::Deserialize;
use std::{error::Error as StdError, fmt, sync::Arc};

use crate::services::auth::jwks::{KeySetError, KeySource};

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    /// Blank token handed to `verify`. The gate's bearer parsing rejects these
    /// first; other callers of `verify` rely on this check.
    MissingToken,
    Malformed(&'static str),
    MalformedJwt(JwtError),
    UnsupportedAlgorithm(Algorithm),
    UnknownKey(String),
    KeySet(KeySetError),
    InvalidSignature(JwtError),
    Expired,
    InvalidClaims(JwtError),
    MissingOrInvalidAud,
}

impl AccessJwtError {
    /// Short sub-reason shown to the caller. Details stay in the logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing token",
            Self::Malformed(_) | Self::MalformedJwt(_) => "malformed token",
            Self::UnsupportedAlgorithm(_) | Self::UnknownKey(_) | Self::InvalidSignature(_) => {
                "invalid signature"
            }
            Self::Expired => "expired token",
            Self::InvalidClaims(_) | Self::MissingOrInvalidAud => "invalid claims",
            Self::KeySet(_) => "signing keys unavailable",
        }
    }
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "missing token"),
            Self::Malformed(why) => write!(f, "malformed token: {}", why),
            Self::MalformedJwt(e) => write!(f, "malformed token: {}", e),
            Self::UnsupportedAlgorithm(alg) => write!(f, "algorithm {:?} is not accepted", alg),
            Self::UnknownKey(kid) => write!(f, "no signing key for kid '{}'", kid),
            Self::KeySet(e) => write!(f, "signing keys unavailable: {}", e),
            Self::InvalidSignature(e) => write!(f, "invalid signature: {}", e),
            Self::Expired => write!(f, "token expired"),
            Self::InvalidClaims(e) => write!(f, "invalid claims: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::MalformedJwt(e) | Self::InvalidSignature(e) | Self::InvalidClaims(e) => Some(e),
            Self::KeySet(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KeySetError> for AccessJwtError {
    fn from(e: KeySetError) -> Self {
        Self::KeySet(e)
    }
}

// Signature / issuer mismatch is "invalid signature"; audience and time-window
// problems are "invalid claims".
fn classify(e: JwtError) -> AccessJwtError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AccessJwtError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidIssuer | ErrorKind::InvalidAlgorithm => {
            AccessJwtError::InvalidSignature(e)
        }
        ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Json(_) => AccessJwtError::InvalidClaims(e),
        _ => AccessJwtError::MalformedJwt(e),
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        // Typical: aud is a string
        serde_json::Value::String(s) => !s.trim().is_empty(),
        // Also valid: aud is an array of strings
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `aud` can be either string or array; jsonwebtoken validates it via `Validation::set_audience`.
/// - `permissions` absent and `permissions: []` are different answers for the gate.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    pub exp: u64,

    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<u64>,

    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// The verified claim set handed to the authorization gate.
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub subject: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// Access-token verifier backed by a signing-key source (JWKS).
///
/// Every call verifies from scratch; only the key set may be cached (by the key source).
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
    leeway_seconds: u64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithms", &self.algorithms)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        algorithms: Vec<Algorithm>,
        leeway_seconds: u64,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms,
            leeway_seconds,
        }
    }

    /// Verify signature, issuer, audience and expiry together, then return the claims.
    pub async fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AccessJwtError::MissingToken);
        }

        let header = jsonwebtoken::decode_header(token).map_err(AccessJwtError::MalformedJwt)?;

        if !self.algorithms.contains(&header.alg) {
            return Err(AccessJwtError::UnsupportedAlgorithm(header.alg));
        }

        let kid = header
            .kid
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AccessJwtError::Malformed("header has no 'kid'"))?;

        let jwk = self
            .keys
            .find(kid)
            .await?
            .ok_or_else(|| AccessJwtError::UnknownKey(kid.to_string()))?;

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(AccessJwtError::InvalidSignature)?;

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = self.leeway_seconds;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, &decoding_key, &validation)
            .map_err(classify)?;

        Ok(data.claims)
    }

    /// Verify, then keep only what the application uses.
    ///
    /// This is the entry-point for the authorization gate.
    pub async fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token).await?;

        if !aud_is_present_and_valid(&claims.aud) {
            return Err(AccessJwtError::MissingOrInvalidAud);
        }

        Ok(VerifiedAccessToken {
            subject: claims.sub.filter(|s| !s.trim().is_empty()),
            permissions: claims.permissions,
        })
    }
}
