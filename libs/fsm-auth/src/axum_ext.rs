//! Axum extractor and middleware for bearer-token authentication

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use fsm_security::SecurityContext;
use uuid::Uuid;

use crate::{errors::AuthError, token::TokenService};

/// Loads the identity behind a validated token subject.
///
/// Implemented by the accounts module so the middleware can learn the caller's
/// organization and role without depending on storage.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, user_id: Uuid) -> anyhow::Result<Option<SecurityContext>>;
}

/// Extractor for `SecurityContext` - requires [`require_auth`] on the route
#[derive(Debug, Clone)]
pub struct Authz(pub SecurityContext);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .map(Authz)
            .ok_or(AuthError::Unauthenticated)
    }
}

#[derive(Clone)]
pub struct AuthState {
    tokens: Arc<TokenService>,
    resolver: Arc<dyn IdentityResolver>,
}

impl AuthState {
    #[must_use]
    pub fn new(tokens: Arc<TokenService>, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { tokens, resolver }
    }
}

/// Auth middleware for protected routers.
///
/// 1. Skips CORS preflight requests
/// 2. Extracts the bearer token and validates it
/// 3. Resolves the subject to a `SecurityContext` and stores it in request extensions
pub async fn require_auth(
    State(AuthState { tokens, resolver }): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.method() == axum::http::Method::OPTIONS {
        return next.run(request).await;
    }

    let ctx = match authenticate(&tokens, resolver.as_ref(), request.headers()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::debug!(error = %e, path = %request.uri().path(), "request rejected");
            return e.into_response();
        }
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}

async fn authenticate(
    tokens: &TokenService,
    resolver: &dyn IdentityResolver,
    headers: &HeaderMap,
) -> Result<SecurityContext, AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::Unauthenticated)?;
    let user_id = tokens.validate(token)?;
    resolver
        .resolve(user_id)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::UnknownSubject)
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| {
            s.strip_prefix("Bearer ")
                .or_else(|| s.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
