use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Donation, PoojaBooking, RecordKind};

// -- JWT Claims --

/// JWT claims issued by `/auth/*` and checked by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

// -- Auth --

// Form bodies default missing fields to empty so the handlers report them
// with the same "Please fill in ..." message as blank ones.

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

// -- Profiles --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

// -- Contact --


#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

// -- Donations --

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DonationRequest {
    pub donor_name: String,
    pub email: String,
    pub phone: String,
    pub amount: f64,
    pub donation_type: String,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DonationCreated {
    pub donation: Donation,
    pub payment: PaymentIntentResponse,
}

// -- Bookings --

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingRequest {
    /// Catalog id of the pooja, e.g. `rudrabhishek`.
    pub pooja_service: String,
    /// `YYYY-MM-DD`
    pub booking_date: String,
    pub booking_time: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub occasion: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingCreated {
    pub booking: PoojaBooking,
    pub payment: PaymentIntentResponse,
}

// -- Payments --

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub amount: f64,
    pub purpose: String,
    pub user_details: Option<UserDetails>,
}

/// What the payment modal renders: the deep link plus display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,
    pub upi_url: String,
    pub upi_id: String,
    pub amount: f64,
    pub purpose: String,
    pub merchant_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub success: bool,
    pub payment_method: String,
    pub qr_code: QrCode,
    pub expires_in_secs: u64,
}

/// Reference to a stored record inside `bookingData` / `donationData`.
/// Only the id is read; the rest of the row the client echoes back is ignored.
#[derive(Debug, Deserialize)]
pub struct RecordRef {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub order_id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub booking_data: Option<RecordRef>,
    pub donation_data: Option<RecordRef>,
    pub intent_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentResponse {
    pub success: bool,
    pub payment_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentStatusResponse {
    pub id: String,
    pub state: String,
    pub remaining_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
