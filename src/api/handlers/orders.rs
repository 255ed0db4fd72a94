/*
 * Responsibility
 * - /order handlers
 * - reading orders needs a verified identity; a caller only sees their own orders
 */
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::{
        dto::orders::OrderQuery,
        extractors::{AuthCtxExtractor, OrderId},
    },
    error::AppError,
    repos::{Collection, Document, Filter, store::InsertOneResult},
    state::AppState,
};

pub async fn list_orders(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let email = query.email.unwrap_or_else(|| auth.email.clone());
    if email != auth.email {
        tracing::warn!(requester = %auth.email, requested = %email, "order listing for another user");
        return Err(AppError::denied());
    }

    let orders = state
        .store
        .find(Collection::Order, &Filter::by_email(&email))
        .await?;
    Ok(Json(orders))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(order): Json<Document>,
) -> Result<Json<InsertOneResult>, AppError> {
    let result = state.store.insert_one(Collection::Order, order).await?;
    Ok(Json(result))
}

pub async fn get_order(
    State(state): State<AppState>,
    id: OrderId,
) -> Result<Json<Option<Document>>, AppError> {
    let order = state
        .store
        .find_one(Collection::Order, &Filter::by_id(id.as_str()))
        .await?;
    Ok(Json(order))
}
