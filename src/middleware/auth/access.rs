//! Authorization gate: bearer token → TokenVerifier → required permission → AuthCtx in extensions
//!
//! - One gate per protected handler, parameterized by the permission it requires.
//! - Runs on every request (no session, nothing cached between requests).
//! - Any failure returns before the wrapped handler is called.
//!
//! Usage:
//! ```ignore
//! let gate = |permission| {
//!     middleware::from_fn_with_state(AuthGate::new(state.auth.clone(), permission), authorize)
//! };
//! Router::new().route("/actors", get(list_actors.layer(gate("get:actors"))))
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::bearer_auth::bearer_token;
use crate::services::auth::TokenVerifier;

/// Middleware state: the verifier plus the permission this route requires.
#[derive(Clone, Debug)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self {
            verifier,
            permission,
        }
    }
}

pub async fn authorize(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).map_err(|err| {
        tracing::warn!(error = %err, permission = gate.permission, "bearer token rejected");
        AppError::unauthorized(err.to_string())
    })?;

    // 署名 + iss/aud/exp の検証は TokenVerifier 側で実施
    let verified = match gate.verifier.verify_verified(token).await {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                error = %err,
                permission = gate.permission,
                "access token verification failed"
            );
            return Err(AppError::unauthorized(err.reason()));
        }
    };

    check_permission(verified.permissions.as_deref(), gate.permission).inspect_err(|_| {
        tracing::warn!(
            sub = ?verified.subject,
            permission = gate.permission,
            "permission check failed"
        );
    })?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(verified));

    Ok(next.run(req).await)
}

fn check_permission(granted: Option<&[String]>, required: &'static str) -> Result<(), AppError> {
    let granted = granted.ok_or(AppError::PermissionsMissing)?;

    if granted.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            permission: required,
        })
    }
}
