/*
 * Responsibility
 * - /item CRUD; documents are passed through to the store unchanged
 */
use axum::{Json, extract::State};

use crate::{
    api::extractors::ItemId,
    error::AppError,
    repos::{
        Collection, Document, Filter,
        store::{DeleteResult, InsertOneResult},
    },
    state::AppState,
};

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let items = state.store.find(Collection::Item, &Filter::all()).await?;
    Ok(Json(items))
}

/// Responds with `null` when no item has this id.
pub async fn get_item(
    State(state): State<AppState>,
    id: ItemId,
) -> Result<Json<Option<Document>>, AppError> {
    let item = state
        .store
        .find_one(Collection::Item, &Filter::by_id(id.as_str()))
        .await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<Document>,
) -> Result<Json<InsertOneResult>, AppError> {
    let result = state.store.insert_one(Collection::Item, item).await?;
    Ok(Json(result))
}

pub async fn delete_item(
    State(state): State<AppState>,
    id: ItemId,
) -> Result<Json<DeleteResult>, AppError> {
    let result = state
        .store
        .delete_one(Collection::Item, &Filter::by_id(id.as_str()))
        .await?;
    Ok(Json(result))
}
