use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    export::{export_filename, to_csv},
    filters::{filter_items, StatusFilter},
    models::{Department, Expiry, InventoryItem, ItemDetail, StockStatus},
    store::Store,
};

// List/detail view of an item: the stored fields plus the derived status.
#[derive(serde::Serialize)]
pub struct ItemDisplay {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub min_level: u32,
    pub expiry: Expiry,
    #[serde(flatten)]
    pub detail: ItemDetail,
    pub status: StockStatus,
}

impl ItemDisplay {
    pub fn from_item(item: &InventoryItem, today: NaiveDate) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            stock: item.stock,
            min_level: item.min_level,
            expiry: item.expiry,
            detail: item.detail.clone(),
            status: item.status(today),
        }
    }
}

// Payload for both create and update; the flattened detail field means a
// pharmacy body carries `price` and a lab body `unit`, never both.
#[derive(Deserialize)]
pub struct ItemForm {
    name: String,
    category: String,
    stock: u32,
    min_level: u32,
    expiry: Expiry,
    #[serde(flatten)]
    detail: ItemDetail,
}

impl ItemForm {
    fn into_item(self, id: i64) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            category: self.category,
            stock: self.stock,
            min_level: self.min_level,
            expiry: self.expiry,
            detail: self.detail,
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    search: Option<String>,
    filter: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    confirm: Option<bool>,
}

fn parse_department(s: &str) -> Result<Department, StatusCode> {
    Department::parse(s).ok_or(StatusCode::NOT_FOUND)
}

fn parse_filter(s: Option<&str>) -> Result<StatusFilter, StatusCode> {
    match s {
        None => Ok(StatusFilter::All),
        Some(s) => StatusFilter::parse(s).ok_or(StatusCode::BAD_REQUEST),
    }
}

fn validate_form(
    form: &ItemForm,
    department: Department,
    today: NaiveDate,
) -> Result<(), StatusCode> {
    if form.name.trim().is_empty() || form.category.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if !form.detail.matches(department) {
        return Err(StatusCode::BAD_REQUEST);
    }
    // Expiry dates in the past are rejected on write; "N/A" passes.
    if form.expiry.is_past(today) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(())
}

// List one department, narrowed by search text and status filter. A
// request without an explicit search falls back to the shared global
// search, the way the pages seed their local box from the navbar.
pub async fn list_items(
    State(store): State<Store>,
    Path(department): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ItemDisplay>>, StatusCode> {
    let department = parse_department(&department)?;
    let filter = parse_filter(params.filter.as_deref())?;
    let today = Utc::now().date_naive();

    let data = store.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let query = params
        .search
        .unwrap_or_else(|| data.global_search.clone());
    let items = filter_items(data.department(department), &query, filter, today);

    Ok(Json(
        items
            .into_iter()
            .map(|item| ItemDisplay::from_item(item, today))
            .collect(),
    ))
}

// Create a new item in the department's list
pub async fn create_item(
    State(store): State<Store>,
    Path(department): Path<String>,
    Json(form): Json<ItemForm>,
) -> Result<(StatusCode, Json<ItemDisplay>), StatusCode> {
    let department = parse_department(&department)?;
    let today = Utc::now().date_naive();
    validate_form(&form, department, today)?;

    let mut data = store.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let item = form.into_item(data.next_item_id());
    data.department_mut(department).push(item.clone());
    data.refresh_alerts(today);

    Ok((StatusCode::CREATED, Json(ItemDisplay::from_item(&item, today))))
}

// In-place replace by id; the id and the owning department never change
pub async fn update_item(
    State(store): State<Store>,
    Path((department, id)): Path<(String, i64)>,
    Json(form): Json<ItemForm>,
) -> Result<Json<ItemDisplay>, StatusCode> {
    let department = parse_department(&department)?;
    let today = Utc::now().date_naive();
    validate_form(&form, department, today)?;

    let mut data = store.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let list = data.department_mut(department);
    let slot = list
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = form.into_item(id);
    let updated = slot.clone();
    data.refresh_alerts(today);

    Ok(Json(ItemDisplay::from_item(&updated, today)))
}

// Delete by id, only with explicit confirmation
pub async fn delete_item(
    State(store): State<Store>,
    Path((department, id)): Path<(String, i64)>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, StatusCode> {
    let department = parse_department(&department)?;
    if params.confirm != Some(true) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut data = store.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let list = data.department_mut(department);
    let before = list.len();
    list.retain(|item| item.id != id);
    if list.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    data.refresh_alerts(Utc::now().date_naive());

    Ok(StatusCode::NO_CONTENT)
}

// CSV download of the currently filtered rows
pub async fn export_items(
    State(store): State<Store>,
    Path(department): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<([(HeaderName, String); 2], String), (StatusCode, String)> {
    let department =
        parse_department(&department).map_err(|code| (code, "unknown department".to_string()))?;
    let filter = parse_filter(params.filter.as_deref())
        .map_err(|code| (code, "unknown status filter".to_string()))?;
    let today = Utc::now().date_naive();

    let data = store
        .read()
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "store unavailable".to_string()))?;
    let query = params
        .search
        .unwrap_or_else(|| data.global_search.clone());
    let rows = filter_items(data.department(department), &query, filter, today);

    let csv = to_csv(&rows, department, today)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                export_filename(department, today)
            ),
        ),
    ];
    Ok((headers, csv))
}

// Stat cards above the department table
pub async fn department_stats(
    State(store): State<Store>,
    Path(department): Path<String>,
) -> Result<Json<super::DepartmentSummary>, StatusCode> {
    let department = parse_department(&department)?;
    let today = Utc::now().date_naive();
    let data = store.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(super::summarize(data.department(department), today)))
}
