/*
 * Responsibility
 * - /user and /admin handlers
 * - PUT /user/{email}: profile upsert + access-token issuance (login)
 * - PUT /user/admin/{email}: admin elevation through RoleAuthorizer
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::{
        dto::users::{AdminStatusResponse, UpsertUserResponse, profile_fields},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::{Document, store::UpdateResult, user_repo},
    services::auth::Elevation,
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let users = user_repo::list(state.store.as_ref()).await?;
    Ok(Json(users))
}

pub async fn admin_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, AppError> {
    let admin = user_repo::find_by_email(state.store.as_ref(), &email)
        .await?
        .is_some_and(|u| u.is_admin());
    Ok(Json(AdminStatusResponse { admin }))
}

pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<Document>,
) -> Result<Json<UpsertUserResponse>, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::bad_request("INVALID_EMAIL", "email is required"));
    }

    let result =
        user_repo::upsert_profile(state.store.as_ref(), &email, profile_fields(body, &email))
            .await?;

    let token = state.auth.issue(&email).map_err(|e| {
        tracing::error!(error = %e, "failed to sign access token");
        AppError::Internal
    })?;

    Ok(Json(UpsertUserResponse { result, token }))
}

pub async fn make_admin(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Path(target_email): Path<String>,
) -> Result<Json<UpdateResult>, AppError> {
    match state
        .role_authorizer()
        .elevate_to_admin(&auth, &target_email)
        .await?
    {
        Elevation::Applied(result) => Ok(Json(result)),
        Elevation::Denied(_) => Err(AppError::denied()),
    }
}
