use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::store::Store;

// The navbar search box shared by every inventory page. List and export
// requests without an explicit `search` parameter fall back to this.
#[derive(Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

pub async fn get_search(State(store): State<Store>) -> Result<Json<SearchQuery>, StatusCode> {
    let data = store.read().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(SearchQuery {
        query: data.global_search.clone(),
    }))
}

pub async fn set_search(
    State(store): State<Store>,
    Json(body): Json<SearchQuery>,
) -> Result<Json<SearchQuery>, StatusCode> {
    let mut data = store.write().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    data.global_search = body.query.clone();
    Ok(Json(body))
}
