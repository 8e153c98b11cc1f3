use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use mandir_db::models::NewBooking;
use mandir_payments::create_intent;
use mandir_types::api::{BookingCreated, BookingRequest, Claims};
use mandir_types::catalog;
use mandir_types::models::PoojaBooking;

use crate::error::ApiError;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::notify::Notification;
use crate::payments::open_intent;
use crate::state::{AppState, with_db};
use crate::validate;

/// The temple keeps Indian Standard Time (UTC+05:30, no DST).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// POST /bookings — book a pooja. Price and service name come from the
/// catalog; the client only names the service id.
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(req): ValidatedJson<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = catalog::find_pooja(req.pooja_service.trim())
        .ok_or_else(|| ApiError::BadRequest("Please select a pooja service.".into()))?;

    let booking_date = NaiveDate::parse_from_str(req.booking_date.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Please select a valid date.".into()))?;
    if booking_date < temple_today(Utc::now())? {
        return Err(ApiError::BadRequest("Booking date cannot be in the past.".into()));
    }

    let booking_time = req.booking_time.trim().to_string();
    if !catalog::is_time_slot(&booking_time) {
        return Err(ApiError::BadRequest("Please select a time slot.".into()));
    }

    let full_name = validate::required("your name", &req.full_name)?;
    let email = validate::email(&req.email)?;
    let phone = validate::required("your phone number", &req.phone)?;

    let intent = create_intent(
        &state.merchant,
        f64::from(service.price),
        &format!("{} booking", service.name),
    )?;

    let new = NewBooking {
        full_name,
        email,
        phone,
        pooja_service: service.name.to_string(),
        booking_date,
        booking_time,
        occasion: validate::optional(req.occasion),
        special_requests: validate::optional(req.special_requests),
        amount: intent.amount,
        user_id: claims.sub,
    };
    let row = with_db(&state, move |db| db.create_booking(&new)).await?;
    let booking = row.into_model()?;

    info!(
        "Booking {} for {} on {} {} created (pending)",
        booking.id, booking.pooja_service, booking.booking_date, booking.booking_time
    );

    let payment = open_intent(&state, intent).await;
    state.notifier.notify(Notification::BookingCreated {
        booking: booking.clone(),
    });

    Ok((StatusCode::CREATED, Json(BookingCreated { booking, payment })))
}

/// Today's date at the temple. Dates before it cannot be booked.
fn temple_today(now: DateTime<Utc>) -> Result<NaiveDate, ApiError> {
    let ist = FixedOffset::east_opt(IST_OFFSET_SECS)
        .ok_or_else(|| anyhow::anyhow!("Invalid IST offset {}", IST_OFFSET_SECS))?;
    Ok(now.with_timezone(&ist).date_naive())
}

/// GET /bookings — the caller's bookings, newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let uid = claims.sub.to_string();
    let rows = with_db(&state, move |db| db.list_bookings_for_user(&uid)).await?;

    let bookings = rows
        .into_iter()
        .map(|row| row.into_model())
        .collect::<anyhow::Result<Vec<PoojaBooking>>>()?;

    Ok(Json(bookings))
}

/// GET /bookings/{id} — only the owner sees a booking.
pub async fn get_booking(
    State(state): State<AppState>,
    ValidatedPath(booking_id): ValidatedPath<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let id = booking_id.to_string();
    let booking = with_db(&state, move |db| db.get_booking(&id))
        .await?
        .map(|row| row.into_model())
        .transpose()?
        .filter(|b| b.user_id == Some(claims.sub))
        .ok_or_else(|| ApiError::NotFound("Booking not found.".into()))?;

    Ok(Json(booking))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn ist_date_runs_ahead_of_utc_late_evening() {
        // 01:30 IST on 9 March is still 8 March in UTC
        let now = utc("2030-03-08T20:00:00Z");
        let today = temple_today(now).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2030, 3, 9).unwrap());
        assert!(NaiveDate::from_ymd_opt(2030, 3, 8).unwrap() < today);
    }

    #[test]
    fn today_matches_utc_date_during_the_day() {
        let now = utc("2030-03-08T12:00:00Z");
        assert_eq!(temple_today(now).unwrap(), NaiveDate::from_ymd_opt(2030, 3, 8).unwrap());
    }

    #[test]
    fn ist_day_starts_at_1830_utc() {
        assert_eq!(
            temple_today(utc("2030-03-08T18:29:59Z")).unwrap(),
            NaiveDate::from_ymd_opt(2030, 3, 8).unwrap()
        );
        assert_eq!(
            temple_today(utc("2030-03-08T18:30:00Z")).unwrap(),
            NaiveDate::from_ymd_opt(2030, 3, 9).unwrap()
        );
    }
}
