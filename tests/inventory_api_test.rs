mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::{response_json, response_text, TestApp};

fn product_codes(body: &Value) -> Vec<String> {
    let mut codes: Vec<String> = body["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| p["Product Code"].as_str().unwrap_or_default().to_string())
        .collect();
    codes.sort();
    codes
}

fn new_product(code: &str) -> Value {
    json!({
        "Product Name": "Nitric Acid 70%",
        "Product Code": code,
        "U/M": "Drum",
        "Net Weight (Per Package)": "60",
        "Gross Weight (Per Package)": 65.5,
        "Hazardous Material? (x if Yes)": "x",
        "Hazmat Class": "8 (5.1)",
        "Packing Group": "II",
        "Active Status": "Active"
    })
}

async fn product_lifecycle(app: TestApp) {
    let response = app.request(Method::GET, "/api/inventory", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        product_codes(&body),
        ["GLY001", "UN1090", "UN1824", "UN1830", "UN2014"]
    );

    let response = app
        .request(
            Method::POST,
            "/api/inventory/add",
            Some(json!({ "product": new_product("UN2031") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["product"]["Inventory Type"], "HAZMAT");
    let id: i64 = body["product"]["ID"]
        .as_str()
        .expect("string id")
        .parse()
        .expect("numeric id");
    assert!(id > 5);

    let response = app
        .request(
            Method::POST,
            "/api/inventory/add",
            Some(json!({ "product": new_product("UN2031") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Product code already exists");

    let mut renamed = new_product("UN2031");
    renamed["Product Name"] = json!("Nitric Acid 68%");
    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/{id}"),
            Some(json!({ "product": renamed })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await["product"]["Product Name"],
        "Nitric Acid 68%"
    );

    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/{id}"),
            Some(json!({ "product": new_product("UN1830") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(Method::DELETE, &format!("/api/inventory/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::DELETE, &format!("/api/inventory/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "Product not found");
}

#[tokio::test]
async fn product_lifecycle_memory_store() {
    product_lifecycle(TestApp::new().await).await;
}

#[tokio::test]
async fn product_lifecycle_sql_store() {
    product_lifecycle(TestApp::with_sql_store().await).await;
}

async fn bulk_replace_round_trip(app: TestApp) {
    let payload = json!({
        "products": [
            { "ID": "10", "Product Name": "Acetone", "Product Code": "UN1090", "Active Status": "Active" },
            { "Product Name": "Glycerin", "Product Code": "GLY001", "Active Status": "Inactive" }
        ]
    });
    let response = app
        .request(Method::POST, "/api/inventory/update", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["success"], true);

    let body = response_json(app.request(Method::GET, "/api/inventory", None).await).await;
    assert_eq!(product_codes(&body), ["GLY001", "UN1090"]);
    let glycerin = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["Product Code"] == "GLY001")
        .unwrap();
    assert_eq!(glycerin["ID"], "11");
}

#[tokio::test]
async fn bulk_replace_round_trip_memory_store() {
    bulk_replace_round_trip(TestApp::new().await).await;
}

#[tokio::test]
async fn bulk_replace_round_trip_sql_store() {
    bulk_replace_round_trip(TestApp::with_sql_store().await).await;
}

#[tokio::test]
async fn bulk_replace_requires_product_array() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/update",
            Some(json!({ "products": "not a list" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["error"],
        "Invalid products data format"
    );

    let response = app
        .request_raw(Method::POST, "/api/inventory/update", "{ not json")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(app.request(Method::GET, "/api/inventory", None).await).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn bulk_replace_rejects_duplicate_codes() {
    let app = TestApp::new().await;
    let payload = json!({
        "products": [
            { "Product Name": "A", "Product Code": "DUP" },
            { "Product Name": "B", "Product Code": "DUP" }
        ]
    });
    let response = app
        .request(Method::POST, "/api/inventory/update", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "conflict");
}

#[tokio::test]
async fn add_rejects_blank_code() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/inventory/add",
            Some(json!({ "product": { "Product Name": "Nameless", "Product Code": "  " } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Invalid product data");
}

#[tokio::test]
async fn unknown_product_id_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::PUT,
            "/api/inventory/abc",
            Some(json!({ "product": new_product("X1") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, "/api/inventory/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_serves_csv_attachment() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/inventory/export", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("Inventory_Export_"));

    let csv = response_text(response).await;
    let mut lines = csv.lines();
    let header_row = lines.next().unwrap();
    assert!(header_row.starts_with("ID,Product Name,Product Code,U/M"));
    assert!(header_row.ends_with("Inventory Type"));
    assert_eq!(lines.count(), 5);
}

#[tokio::test]
async fn export_of_empty_inventory_is_header_only() {
    let app = TestApp::empty().await;
    let response = app.request(Method::GET, "/api/inventory/export", None).await;
    let csv = response_text(response).await;
    assert_eq!(csv.lines().count(), 1);
}

#[tokio::test]
async fn bulk_replace_rejects_unstorable_ids() {
    let app = TestApp::new().await;
    let payload = json!({
        "products": [
            { "ID": "9223372036854775807", "Product Name": "Acetone", "Product Code": "UN1090" },
            { "Product Name": "Glycerin", "Product Code": "GLY001" }
        ]
    });
    let response = app
        .request(Method::POST, "/api/inventory/update", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "validation_error");

    let body = response_json(app.request(Method::GET, "/api/inventory", None).await).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 5);
}
