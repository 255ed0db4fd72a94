use axum::{Json, extract::State};

use crate::{
    error::AppError,
    repos::{Collection, Document, Filter, store::InsertOneResult},
    state::AppState,
};

pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let reviews = state.store.find(Collection::Review, &Filter::all()).await?;
    Ok(Json(reviews))
}

pub async fn create_review(
    State(state): State<AppState>,
    Json(review): Json<Document>,
) -> Result<Json<InsertOneResult>, AppError> {
    let result = state.store.insert_one(Collection::Review, review).await?;
    Ok(Json(result))
}
