pub mod alerts;
pub mod inventory;
pub mod search;
pub mod settings;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::{
    models::{InventoryItem, StockStatus},
    store::Store,
};

#[derive(Serialize)]
pub struct DepartmentSummary {
    pub total_items: usize,
    pub low_stock: usize,
    pub expiring_soon: usize,
}

#[derive(Serialize)]
pub struct DashboardSummary {
    pub pharmacy: DepartmentSummary,
    pub lab: DepartmentSummary,
    pub inventory_value: String,
    pub active_alerts: usize,
}

pub(crate) fn summarize(items: &[InventoryItem], today: NaiveDate) -> DepartmentSummary {
    DepartmentSummary {
        total_items: items.len(),
        // The stat card counts by the raw comparison, so an expiring item
        // that is also under its minimum still shows up here.
        low_stock: items.iter().filter(|i| i.stock <= i.min_level).count(),
        expiring_soon: items
            .iter()
            .filter(|i| i.status(today) == StockStatus::Expiring)
            .count(),
    }
}

pub async fn dashboard(State(store): State<Store>) -> Result<Json<DashboardSummary>, StatusCode> {
    let today = Utc::now().date_naive();
    let data = store.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(DashboardSummary {
        pharmacy: summarize(&data.pharmacy, today),
        lab: summarize(&data.lab, today),
        inventory_value: format!("{:.2}", data.total_inventory_value()),
        active_alerts: data.alerts.len(),
    }))
}
