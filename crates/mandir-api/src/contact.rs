use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use mandir_db::models::NewContactMessage;
use mandir_types::api::ContactRequest;

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::notify::Notification;
use crate::state::{AppState, with_db};
use crate::validate;

/// POST /contact
pub async fn submit_message(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = NewContactMessage {
        name: validate::required("your name", &req.name)?,
        email: validate::email(&req.email)?,
        phone: validate::required("your phone number", &req.phone)?,
        message: validate::required("a message", &req.message)?,
    };

    let row = with_db(&state, move |db| db.insert_contact_message(&new)).await?;
    let message = row.into_model()?;

    info!("Contact message {} received", message.id);
    state.notifier.notify(Notification::ContactReceived {
        message: message.clone(),
    });

    Ok((StatusCode::CREATED, Json(message)))
}
