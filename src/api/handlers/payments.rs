use axum::{Json, extract::State};

use crate::{
    api::dto::payments::{CreatePaymentIntentRequest, CreatePaymentIntentResponse},
    error::AppError,
    services::payment::amount_in_minor_units,
    state::AppState,
};

const CURRENCY: &str = "usd";
const METHOD_TYPES: [&str; 1] = ["card"];

pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, AppError> {
    let amount = amount_in_minor_units(req.price)
        .ok_or_else(|| AppError::bad_request("INVALID_PRICE", "price must be a positive amount"))?;

    let provider = state.payments.as_ref().ok_or(AppError::Unavailable {
        service: "payment provider",
    })?;

    let intent = provider
        .create_intent(amount, CURRENCY, &METHOD_TYPES)
        .await?;

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
