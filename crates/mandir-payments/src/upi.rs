use uuid::Uuid;

use crate::PaymentError;

/// Currency code written into every deep link. UPI only settles in rupees.
pub const CURRENCY: &str = "INR";

/// The payee the deep link points at.
#[derive(Debug, Clone)]
pub struct Merchant {
    upi_id: String,
    name: String,
}

impl Merchant {
    /// `upi_id` must look like a VPA (`handle@bank`). It is written into the
    /// link verbatim, so characters that would break the query string are refused.
    pub fn new(upi_id: impl Into<String>, name: impl Into<String>) -> Result<Self, PaymentError> {
        let upi_id = upi_id.into();
        let name = name.into();

        let valid = match upi_id.split_once('@') {
            Some((handle, psp)) => {
                !handle.is_empty()
                    && !psp.is_empty()
                    && !psp.contains('@')
                    && upi_id
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '@'))
            }
            None => false,
        };
        if !valid || name.trim().is_empty() {
            return Err(PaymentError::InvalidMerchant(upi_id));
        }

        Ok(Self { upi_id, name })
    }

    pub fn upi_id(&self) -> &str {
        &self.upi_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A generated deep link plus the fields the payment modal displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub upi_url: String,
    pub upi_id: String,
    pub amount: f64,
    pub purpose: String,
    pub merchant_name: String,
}

/// Build a payment intent for `amount` rupees.
///
/// The amount must be a whole number of paise. The link carries no signature, so
/// anyone holding it can edit `am` before opening it.
pub fn create_intent(merchant: &Merchant, amount: f64, purpose: &str) -> Result<PaymentIntent, PaymentError> {
    let paise = to_paise(amount)?;
    let purpose = purpose.trim();
    if purpose.is_empty() {
        return Err(PaymentError::EmptyPurpose);
    }

    let upi_url = build_upi_url(merchant, paise, purpose);

    Ok(PaymentIntent {
        id: format!("upi_{}", Uuid::new_v4().simple()),
        upi_url,
        upi_id: merchant.upi_id.clone(),
        amount: paise as f64 / 100.0,
        purpose: purpose.to_string(),
        merchant_name: merchant.name.clone(),
    })
}

fn build_upi_url(merchant: &Merchant, paise: u64, note: &str) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={}&cu={}&tn={}",
        merchant.upi_id,
        urlencoding::encode(&merchant.name),
        format_amount(paise),
        CURRENCY,
        urlencoding::encode(note),
    )
}

const PAISE_EPSILON: f64 = 1e-6;

fn to_paise(amount: f64) -> Result<u64, PaymentError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidAmount(amount));
    }
    let scaled = amount * 100.0;
    let paise = scaled.round();
    // Float noise (0.1 + 0.2) is tolerated; anything finer than a paisa is not
    if (scaled - paise).abs() > PAISE_EPSILON || paise < 1.0 || paise > u64::MAX as f64 {
        return Err(PaymentError::InvalidAmount(amount));
    }
    Ok(paise as u64)
}

/// Whole rupees print without decimals (`501`), anything else with two (`501.50`).
fn format_amount(paise: u64) -> String {
    let (rupees, rest) = (paise / 100, paise % 100);
    if rest == 0 {
        rupees.to_string()
    } else {
        format!("{}.{:02}", rupees, rest)
    }
}
