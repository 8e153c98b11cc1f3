use axum::{Extension, Json, extract::State, response::IntoResponse};

use mandir_types::api::{Claims, UpdateProfileRequest};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::{AppState, with_db};
use crate::validate;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let uid = claims.sub.to_string();
    let profile = with_db(&state, move |db| db.get_profile(&uid))
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found.".into()))?
        .into_model()?;

    Ok(Json(profile))
}

/// PUT /profile — omitted or blank fields keep their current value.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let uid = claims.sub.to_string();
    let full_name = validate::optional(req.full_name);
    let phone = validate::optional(req.phone);

    let profile = with_db(&state, move |db| {
        db.update_profile(&uid, full_name.as_deref(), phone.as_deref())
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("Profile not found.".into()))?
    .into_model()?;

    Ok(Json(profile))
}
