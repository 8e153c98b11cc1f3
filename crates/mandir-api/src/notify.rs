use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use mandir_types::models::{ContactMessage, Donation, PoojaBooking, RecordKind};

/// Events posted to the temple office webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    ContactReceived { message: ContactMessage },
    DonationCreated { donation: Donation },
    BookingCreated { booking: PoojaBooking },
    PaymentCompleted {
        kind: RecordKind,
        record_id: Uuid,
        payment_id: String,
    },
}

/// Fire-and-forget webhook sender. The record is already stored when a
/// notification goes out, so delivery failures are logged and dropped.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook: Option<String>,
}

impl Notifier {
    pub fn new(webhook: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn notify(&self, notification: Notification) {
        let Some(url) = self.webhook.clone() else {
            debug!("No notification webhook configured, skipping {}", event_name(&notification));
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&notification)
                .send()
                .await
                .and_then(|resp| resp.error_for_status());

            if let Err(e) = result {
                warn!("Notification {} failed: {}", event_name(&notification), e);
            }
        });
    }
}

fn event_name(notification: &Notification) -> &'static str {
    match notification {
        Notification::ContactReceived { .. } => "contact_received",
        Notification::DonationCreated { .. } => "donation_created",
        Notification::BookingCreated { .. } => "booking_created",
        Notification::PaymentCompleted { .. } => "payment_completed",
    }
}
