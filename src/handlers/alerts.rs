use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    models::{Alert, AlertKind},
    store::Store,
};

#[derive(Deserialize)]
pub struct AlertParams {
    kind: Option<String>,
    search: Option<String>,
}

// Alerts list with the kind tabs and search box of the alerts view
pub async fn alerts_list(
    State(store): State<Store>,
    Query(params): Query<AlertParams>,
) -> Result<Json<Vec<Alert>>, StatusCode> {
    let kind = match params.kind.as_deref() {
        None | Some("all") => None,
        Some(s) => Some(AlertKind::parse(s).ok_or(StatusCode::BAD_REQUEST)?),
    };
    let needle = params.search.unwrap_or_default().to_lowercase();

    let data = store.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let alerts = data
        .alerts
        .iter()
        .filter(|alert| {
            kind.map_or(true, |k| alert.kind == k)
                && (alert.title.to_lowercase().contains(&needle)
                    || alert.message.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    Ok(Json(alerts))
}

// Dismiss removes the alert until the next regeneration
pub async fn dismiss_alert(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut data = store.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let before = data.alerts.len();
    data.alerts.retain(|alert| alert.id != id);
    if data.alerts.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
