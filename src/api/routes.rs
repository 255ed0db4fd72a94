/*
 * Responsibility
 * - URL layout of the service
 * - which routes sit behind the bearer gate (route_layer on the gated group)
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::handlers::{
    health::{health, root},
    items::{create_item, delete_item, get_item, list_items},
    orders::{create_order, get_order, list_orders},
    payments::create_payment_intent,
    reviews::{create_review, list_reviews},
    users::{admin_status, list_users, make_admin, upsert_user},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/item", get(list_items).post(create_item))
        .route("/item/{id}", get(get_item).delete(delete_item))
        .route("/user/{email}", put(upsert_user))
        .route("/admin/{email}", get(admin_status))
        .route("/order", post(create_order))
        .route("/review", get(list_reviews).post(create_review));

    let gated = Router::new()
        .route("/user", get(list_users))
        .route("/user/admin/{email}", put(make_admin))
        .route("/order", get(list_orders))
        .route("/order/{id}", get(get_order))
        .route("/create-payment-intent", post(create_payment_intent));

    public.merge(access::apply(gated, state))
}
