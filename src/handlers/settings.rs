use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{models::AlertSettings, store::Store};

pub async fn get_settings(State(store): State<Store>) -> Result<Json<AlertSettings>, StatusCode> {
    let data = store.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(data.settings))
}

// Writing settings retriggers alert generation, since the stock alerts
// depend on the global threshold.
pub async fn update_settings(
    State(store): State<Store>,
    Json(settings): Json<AlertSettings>,
) -> Result<Json<AlertSettings>, StatusCode> {
    if !settings.threshold_in_range() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut data = store.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    data.settings = settings;
    data.refresh_alerts(Utc::now().date_naive());

    Ok(Json(settings))
}
