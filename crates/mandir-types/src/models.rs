use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of a donation or booking.
///
/// Records are inserted as `Pending` and only ever move to `Completed`.
/// There is no failed or refunded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// Which table a payment refers to. Serialized the way the payment
/// function's `type` field spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Pooja,
    Donation,
}

impl RecordKind {
    /// Prefix used when building an order id (`booking_<id>`, `donation_<id>`).
    pub fn order_prefix(&self) -> &'static str {
        match self {
            Self::Pooja => "booking_",
            Self::Donation => "donation_",
        }
    }

    pub fn order_id(&self, record_id: Uuid) -> String {
        format!("{}{}", self.order_prefix(), record_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub donor_name: String,
    pub email: String,
    pub phone: String,
    pub amount: f64,
    pub donation_type: String,
    pub message: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoojaBooking {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pooja_service: String,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub occasion: Option<String>,
    pub special_requests: Option<String>,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
