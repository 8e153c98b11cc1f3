//! Database row types. These map directly to SQLite rows; `into_model`
//! converts them into the API models in mandir-types.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use mandir_types::models::{ContactMessage, Donation, PaymentStatus, PoojaBooking, Profile};

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

pub struct ProfileRow {
    pub id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

pub struct ContactMessageRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: String,
}

pub struct DonationRow {
    pub id: String,
    pub donor_name: String,
    pub email: String,
    pub phone: String,
    pub amount: f64,
    pub donation_type: String,
    pub message: Option<String>,
    pub payment_status: String,
    pub payment_id: Option<String>,
    pub user_id: Option<String>,
    pub created_at: String,
}

pub struct BookingRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pooja_service: String,
    pub booking_date: String,
    pub booking_time: String,
    pub occasion: Option<String>,
    pub special_requests: Option<String>,
    pub amount: f64,
    pub payment_status: String,
    pub payment_id: Option<String>,
    pub user_id: Option<String>,
    pub created_at: String,
}

// -- Inserts --

pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

pub struct NewDonation {
    pub donor_name: String,
    pub email: String,
    pub phone: String,
    pub amount: f64,
    pub donation_type: String,
    pub message: Option<String>,
    pub user_id: Option<Uuid>,
}

pub struct NewBooking {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pooja_service: String,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub occasion: Option<String>,
    pub special_requests: Option<String>,
    pub amount: f64,
    pub user_id: Uuid,
}

// -- Conversions --

/// SQLite stores `datetime('now')` as "YYYY-MM-DD HH:MM:SS" without a zone;
/// those are UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    value
        .parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .with_context(|| format!("Corrupt timestamp '{}'", value))
}

fn parse_id(value: &str) -> Result<Uuid> {
    value.parse().with_context(|| format!("Corrupt id '{}'", value))
}

fn parse_status(value: &str) -> Result<PaymentStatus> {
    value.parse().map_err(anyhow::Error::msg)
}

impl ProfileRow {
    pub fn into_model(self) -> Result<Profile> {
        Ok(Profile {
            id: parse_id(&self.id)?,
            full_name: self.full_name,
            phone: self.phone,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl ContactMessageRow {
    pub fn into_model(self) -> Result<ContactMessage> {
        Ok(ContactMessage {
            id: parse_id(&self.id)?,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl DonationRow {
    pub fn into_model(self) -> Result<Donation> {
        Ok(Donation {
            id: parse_id(&self.id)?,
            donor_name: self.donor_name,
            email: self.email,
            phone: self.phone,
            amount: self.amount,
            donation_type: self.donation_type,
            message: self.message,
            payment_status: parse_status(&self.payment_status)?,
            payment_id: self.payment_id,
            user_id: self.user_id.as_deref().map(parse_id).transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl BookingRow {
    pub fn into_model(self) -> Result<PoojaBooking> {
        Ok(PoojaBooking {
            id: parse_id(&self.id)?,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            pooja_service: self.pooja_service,
            booking_date: NaiveDate::parse_from_str(&self.booking_date, "%Y-%m-%d")
                .with_context(|| format!("Corrupt booking_date '{}'", self.booking_date))?,
            booking_time: self.booking_time,
            occasion: self.occasion,
            special_requests: self.special_requests,
            amount: self.amount,
            payment_status: parse_status(&self.payment_status)?,
            payment_id: self.payment_id,
            user_id: self.user_id.as_deref().map(parse_id).transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}
