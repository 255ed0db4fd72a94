//! Bearer access-token gate: verify → put `AuthCtx` into request extensions.
//!
//! - no `Authorization` header            → 401, handler not run
//! - header present but token fails check → 403, handler not run
//! - success                              → `AuthCtx` available to the handler
//!
//! Nothing here touches the document store.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{TokenService, token::bearer_token};
use crate::state::AppState;

/// Gate every route of `router` behind the bearer-token check.
///
/// Uses `route_layer`, so unmatched paths still fall through to 404 instead of 401.
///
/// ```ignore
/// let gated = middleware::auth::access::apply(gated_routes, state.clone());
/// let app = public_routes.merge(gated);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_ctx = authenticate(&state.auth, req.headers())?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

/// Verify the `Authorization` header of `headers` against the process secret.
pub fn authenticate(auth: &TokenService, headers: &HeaderMap) -> Result<AuthCtx, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        tracing::debug!("missing authorization header");
        return Err(AppError::Unauthorized);
    };

    // A non-UTF-8 header is a present-but-unusable credential.
    let token = value.to_str().map(bearer_token).unwrap_or("");

    match auth.verify(token) {
        Ok(claims) => Ok(AuthCtx::new(claims.email, claims.iat, claims.exp)),
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            Err(AppError::invalid_credential())
        }
    }
}
