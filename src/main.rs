mod export;
mod filters;
mod handlers;
mod models;
mod store;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use store::{create_store, Store};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    // Seed the in-memory store with both department lists
    let store = create_store();
    println!("Seeded pharmacy and lab inventory!");

    // Build the application router
    let app = create_router(store);

    // Get port from environment or use default
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    println!("🚀 MedStock server starting on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(store: Store) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/dashboard") }))
        .route("/dashboard", get(handlers::dashboard))

        // Inventory routes, one list per department
        .route("/inventory/:department", get(handlers::inventory::list_items))
        .route("/inventory/:department", post(handlers::inventory::create_item))
        .route("/inventory/:department/stats", get(handlers::inventory::department_stats))
        .route("/inventory/:department/export", get(handlers::inventory::export_items))
        .route("/inventory/:department/:id", post(handlers::inventory::update_item))
        .route("/inventory/:department/:id/delete", get(handlers::inventory::delete_item))

        // Alerts routes
        .route("/alerts", get(handlers::alerts::alerts_list))
        .route("/alerts/:id/dismiss", get(handlers::alerts::dismiss_alert))

        // Settings routes
        .route("/settings", get(handlers::settings::get_settings))
        .route("/settings", post(handlers::settings::update_settings))

        // Shared navbar search
        .route("/search", get(handlers::search::get_search))
        .route("/search", post(handlers::search::set_search))

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(create_store())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn lists_the_seeded_pharmacy_items() {
        let (status, body) = send(app(), get_req("/inventory/pharmacy")).await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["name"], "Paracetamol 500mg");
        assert!(items[0].get("price").is_some());
        assert!(items[0].get("unit").is_none());
        assert!(items[0].get("status").is_some());
    }

    #[tokio::test]
    async fn search_narrows_by_name_case_insensitively() {
        let (status, body) = send(app(), get_req("/inventory/pharmacy?search=AMOX")).await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Amoxicillin 500mg");
    }

    #[tokio::test]
    async fn unknown_department_is_not_found() {
        let (status, _) = send(app(), get_req("/inventory/radiology")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn created_item_shows_up_under_the_low_filter() {
        let app = app();
        let form = json!({
            "name": "Glucose Strips",
            "category": "Reagents",
            "stock": 1,
            "min_level": 10,
            "expiry": "2099-01-01",
            "unit": "Packs"
        });
        let (status, created) = send(app.clone(), post_json("/inventory/lab", form)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "Low Stock");

        let (status, body) = send(
            app,
            get_req("/inventory/lab?search=glucose&filter=Low"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["unit"], "Packs");
    }

    #[tokio::test]
    async fn create_rejects_detail_from_the_other_department() {
        let form = json!({
            "name": "Glucose Strips",
            "category": "Reagents",
            "stock": 10,
            "min_level": 2,
            "expiry": "N/A",
            "unit": "Packs"
        });
        let (status, _) = send(app(), post_json("/inventory/pharmacy", form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_an_expiry_in_the_past() {
        let form = json!({
            "name": "Old Stock",
            "category": "Antibiotic",
            "stock": 10,
            "min_level": 2,
            "expiry": "2000-01-01",
            "price": 4.5
        });
        let (status, _) = send(app(), post_json("/inventory/pharmacy", form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_keeps_the_id() {
        let app = app();
        let form = json!({
            "name": "Paracetamol 1000mg",
            "category": "Analgesic",
            "stock": 300,
            "min_level": 100,
            "expiry": "2099-05-20",
            "price": 2.0
        });
        let (status, updated) = send(app.clone(), post_json("/inventory/pharmacy/1", form)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["name"], "Paracetamol 1000mg");

        let (_, body) = send(app, get_req("/inventory/pharmacy")).await;
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn update_of_a_missing_id_is_not_found() {
        let form = json!({
            "name": "Ghost",
            "category": "Antibiotic",
            "stock": 1,
            "min_level": 1,
            "expiry": "N/A",
            "price": 1.0
        });
        let (status, _) = send(app(), post_json("/inventory/pharmacy/999", form)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_requires_explicit_confirmation() {
        let app = app();
        let (status, _) = send(app.clone(), get_req("/inventory/pharmacy/1/delete")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(app.clone(), get_req("/inventory/pharmacy/1/delete?confirm=true")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(app, get_req("/inventory/pharmacy")).await;
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn export_streams_csv_with_a_dated_filename() {
        let response = app()
            .oneshot(get_req("/inventory/lab/export"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/csv"));
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap();
        assert!(disposition.contains("lab_inventory_"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.starts_with("Name,Category,Stock,Min Level,Unit Type,Expiry,Status\n"));
        assert_eq!(csv.lines().count(), 6);
    }

    #[tokio::test]
    async fn export_with_no_matching_rows_is_rejected() {
        let (status, _) = send(app(), get_req("/inventory/pharmacy/export?search=zzz")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn settings_update_is_bounded_and_persists() {
        let app = app();
        let (status, body) = send(app.clone(), get_req("/settings")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["low_stock_threshold"], 20);

        let out_of_range = json!({
            "low_stock_threshold": 200,
            "expiry_warning": true,
            "email_report": false
        });
        let (status, _) = send(app.clone(), post_json("/settings", out_of_range)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let valid = json!({
            "low_stock_threshold": 35,
            "expiry_warning": false,
            "email_report": true
        });
        let (status, _) = send(app.clone(), post_json("/settings", valid)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app, get_req("/settings")).await;
        assert_eq!(body["low_stock_threshold"], 35);
        assert_eq!(body["expiry_warning"], false);
    }

    #[tokio::test]
    async fn dismissing_an_alert_removes_it_once() {
        let app = app();
        let (status, body) = send(app.clone(), get_req("/alerts?kind=stock")).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap().to_string())
            .collect();
        // Ciprofloxacin is seeded out of stock
        assert!(ids.contains(&"stock-4".to_string()));

        let (status, _) = send(app.clone(), get_req("/alerts/stock-4/dismiss")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(app, get_req("/alerts/stock-4/dismiss")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_falls_back_to_the_shared_global_search() {
        let app = app();
        let (status, _) = send(app.clone(), post_json("/search", json!({ "query": "amox" }))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app.clone(), get_req("/inventory/pharmacy")).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Amoxicillin 500mg");

        // An explicit search parameter overrides the shared one.
        let (_, body) = send(app, get_req("/inventory/pharmacy?search=")).await;
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn dashboard_reports_counts_and_valuation() {
        let (status, body) = send(app(), get_req("/dashboard")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pharmacy"]["total_items"], 5);
        assert_eq!(body["lab"]["total_items"], 5);
        // 450*1.50 + 12*15.00 + 80*35.00 + 200*25.00
        assert_eq!(body["inventory_value"], "8655.00");
        assert!(body["active_alerts"].as_u64().unwrap() >= 2);
    }
}
