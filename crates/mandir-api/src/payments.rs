use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use tracing::{debug, info};
use uuid::Uuid;

use mandir_payments::{PaymentIntent, WindowState, create_intent, fabricate_payment_id};
use mandir_types::api::{
    IntentStatusResponse, PaymentIntentRequest, PaymentIntentResponse, ProcessPaymentRequest,
    ProcessPaymentResponse, QrCode,
};
use mandir_types::models::RecordKind;

use crate::error::ApiError;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::notify::Notification;
use crate::state::{AppState, with_db};

/// Start the payment window for `intent` and shape it for the modal.
pub async fn open_intent(state: &AppState, intent: PaymentIntent) -> PaymentIntentResponse {
    let intent_id = intent.id.clone();
    state
        .windows
        .open(&intent.id, move || {
            info!("Payment window for intent {} expired without acknowledgement", intent_id);
        })
        .await;

    PaymentIntentResponse {
        success: true,
        payment_method: "upi".to_string(),
        qr_code: QrCode {
            id: intent.id,
            upi_url: intent.upi_url,
            upi_id: intent.upi_id,
            amount: intent.amount,
            purpose: intent.purpose,
            merchant_name: intent.merchant_name,
        },
        expires_in_secs: state.windows.duration_secs(),
    }
}

/// POST /payments/upi-intent — build a UPI deep link for an arbitrary amount.
pub async fn create_upi_intent(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PaymentIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = create_intent(&state.merchant, req.amount, &req.purpose)?;

    if let Some(details) = &req.user_details {
        debug!(
            "Intent {} requested by {}",
            intent.id,
            details.email.as_deref().or(details.name.as_deref()).unwrap_or("anonymous")
        );
    }
    info!("Created UPI intent {} for ₹{} ({})", intent.id, intent.amount, intent.purpose);

    Ok(Json(open_intent(&state, intent).await))
}

/// GET /payments/intents/{id} — what the modal countdown shows.
pub async fn intent_status(
    State(state): State<AppState>,
    ValidatedPath(intent_id): ValidatedPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let window = state
        .windows
        .state(&intent_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Unknown or closed payment intent.".into()))?;

    let (label, remaining_secs) = match window {
        WindowState::Active { remaining } => ("active", remaining),
        WindowState::Expired => ("expired", 0),
    };

    Ok(Json(IntentStatusResponse {
        id: intent_id,
        state: label.to_string(),
        remaining_secs,
    }))
}

/// POST /payments/process — the settlement stub.
///
/// Marks the record `completed` with a fabricated payment id without checking
/// that any money moved. Repeating the call overwrites the payment id.
pub async fn process_payment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ProcessPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(currency) = &req.currency {
        if !currency.eq_ignore_ascii_case(mandir_payments::upi::CURRENCY) {
            return Err(ApiError::BadRequest(format!("Unsupported currency '{}'.", currency)));
        }
    }

    let kind = req.kind;
    let record_id = resolve_record_id(&req)?;
    let payment_id = fabricate_payment_id();

    info!(
        "Processing payment for order {} ({:?}, amount {:?})",
        req.order_id, kind, req.amount
    );

    let (rid, pid) = (record_id.to_string(), payment_id.clone());
    let updated = with_db(&state, move |db| db.mark_payment_completed(kind, &rid, &pid)).await?;
    if !updated {
        return Err(ApiError::NotFound(match kind {
            RecordKind::Pooja => "Booking not found.".into(),
            RecordKind::Donation => "Donation not found.".into(),
        }));
    }

    if let Some(intent_id) = &req.intent_id {
        state.windows.close(intent_id).await;
    }

    state.notifier.notify(Notification::PaymentCompleted {
        kind,
        record_id,
        payment_id: payment_id.clone(),
    });

    Ok(Json(ProcessPaymentResponse {
        success: true,
        payment_id,
        message: "Payment processed successfully".to_string(),
    }))
}

/// The record id comes from `bookingData`/`donationData` when sent, otherwise
/// from the order id (`booking_<id>` / `donation_<id>`).
fn resolve_record_id(req: &ProcessPaymentRequest) -> Result<Uuid, ApiError> {
    let embedded = match req.kind {
        RecordKind::Pooja => req.booking_data.as_ref(),
        RecordKind::Donation => req.donation_data.as_ref(),
    };
    if let Some(record) = embedded {
        return Ok(record.id);
    }

    req.order_id
        .strip_prefix(req.kind.order_prefix())
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("Order id '{}' does not match payment type.", req.order_id)))
}
