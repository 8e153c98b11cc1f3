use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use mandir_db::models::NewDonation;
use mandir_payments::create_intent;
use mandir_types::api::{DonationCreated, DonationRequest};

use crate::error::ApiError;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::bearer_claims;
use crate::notify::Notification;
use crate::payments::open_intent;
use crate::state::{AppState, with_db};
use crate::validate;

/// POST /donations — store a pending donation and hand back its UPI intent.
/// Signing in is optional; a valid token links the donation to the account.
pub async fn create_donation(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<DonationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = bearer_claims(&headers, &state.jwt_secret)?;

    let donor_name = validate::required("your name", &req.donor_name)?;
    let email = validate::email(&req.email)?;
    let phone = validate::required("your phone number", &req.phone)?;
    let donation_type = validate::required("the donation type", &req.donation_type)?;

    // Build the intent first so an invalid amount never leaves a pending row
    let intent = create_intent(&state.merchant, req.amount, &format!("{} donation", donation_type))?;

    let new = NewDonation {
        donor_name,
        email,
        phone,
        amount: intent.amount,
        donation_type,
        message: validate::optional(req.message),
        user_id: claims.map(|c| c.sub),
    };
    let row = with_db(&state, move |db| db.create_donation(&new)).await?;
    let donation = row.into_model()?;

    info!("Donation {} of ₹{} created (pending)", donation.id, donation.amount);

    let payment = open_intent(&state, intent).await;
    state.notifier.notify(Notification::DonationCreated {
        donation: donation.clone(),
    });

    Ok((StatusCode::CREATED, Json(DonationCreated { donation, payment })))
}

/// GET /donations/{id} — payment status for the success page. Donations made
/// while signed in are only visible to that account.
pub async fn get_donation(
    State(state): State<AppState>,
    ValidatedPath(donation_id): ValidatedPath<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let claims = bearer_claims(&headers, &state.jwt_secret)?;

    let id = donation_id.to_string();
    let donation = with_db(&state, move |db| db.get_donation(&id))
        .await?
        .map(|row| row.into_model())
        .transpose()?
        .ok_or_else(|| ApiError::NotFound("Donation not found.".into()))?;

    if let Some(owner) = donation.user_id {
        if claims.map(|c| c.sub) != Some(owner) {
            return Err(ApiError::NotFound("Donation not found.".into()));
        }
    }

    Ok(Json(donation))
}
