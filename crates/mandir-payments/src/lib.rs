//! UPI payment intents and the advisory payment window.
//!
//! Nothing here talks to a payment processor. An intent is a `upi://` deep
//! link the payer's wallet app opens; whether money moved is never checked.

pub mod countdown;
pub mod ids;
pub mod upi;

pub use countdown::{Countdown, PAYMENT_WINDOW_SECS, PaymentWindow, PaymentWindows, Tick, WindowState};
pub use ids::fabricate_payment_id;
pub use upi::{Merchant, PaymentIntent, create_intent};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PaymentError {
    #[error("amount must be a positive number of whole paise, got {0}")]
    InvalidAmount(f64),
    #[error("payment purpose must not be empty")]
    EmptyPurpose,
    #[error("invalid merchant UPI id '{0}'")]
    InvalidMerchant(String),
}
