use axum::{Json, response::IntoResponse};
use serde::Serialize;

use mandir_types::catalog::{
    ANNOUNCEMENTS, Announcement, POOJA_SERVICES, PoojaService, SUGGESTED_DONATIONS, TIME_SLOTS,
};

#[derive(Serialize)]
struct PoojaCatalog {
    services: &'static [PoojaService],
    time_slots: &'static [&'static str],
}

pub async fn poojas() -> impl IntoResponse {
    Json(PoojaCatalog {
        services: POOJA_SERVICES,
        time_slots: TIME_SLOTS,
    })
}

pub async fn donation_amounts() -> impl IntoResponse {
    Json(SUGGESTED_DONATIONS)
}

pub async fn announcements() -> Json<&'static [Announcement]> {
    Json(ANNOUNCEMENTS)
}
