use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, bookings, catalog, contact, donations, payments, profiles};

/// All API routes. Transport layers (CORS, tracing) are added by the server.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/contact", post(contact::submit_message))
        .route("/donations", post(donations::create_donation))
        .route("/donations/{id}", get(donations::get_donation))
        .route("/payments/upi-intent", post(payments::create_upi_intent))
        .route("/payments/intents/{id}", get(payments::intent_status))
        .route("/payments/process", post(payments::process_payment))
        .route("/catalog/poojas", get(catalog::poojas))
        .route("/catalog/donation-amounts", get(catalog::donation_amounts))
        .route("/announcements", get(catalog::announcements))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/bookings", post(bookings::create_booking).get(bookings::list_bookings))
        .route("/bookings/{id}", get(bookings::get_booking))
        .route("/profile", get(profiles::get_profile).put(profiles::update_profile))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
