mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::{response_json, response_text, TestApp};

fn client(code: &str, name: &str) -> Value {
    json!({
        "Client Name": name,
        "Client Code": code,
        "Address": "1 Harbor Way",
        "City": "Baltimore",
        "State": "MD",
        "ZIP": 21230,
        "Phone": "410-555-0100",
        "Email": "receiving@example.com",
        "Contact Person": "Dana Reyes",
        "Status": "Active"
    })
}

fn client_codes(body: &Value) -> Vec<String> {
    let mut codes: Vec<String> = body["clients"]
        .as_array()
        .expect("clients array")
        .iter()
        .map(|c| c["Client Code"].as_str().unwrap_or_default().to_string())
        .collect();
    codes.sort();
    codes
}

async fn client_lifecycle(app: TestApp) {
    let body = response_json(app.request(Method::GET, "/api/clients", None).await).await;
    assert_eq!(
        client_codes(&body),
        ["APS001", "BRN002", "CHT003", "HWK005", "UNV004"]
    );

    let response = app
        .request(
            Method::POST,
            "/api/clients/add",
            Some(json!({ "client": client("HBR006", "Harbor Labs") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["client"]["ZIP"], "21230");

    let response = app
        .request(
            Method::POST,
            "/api/clients/add",
            Some(json!({ "client": client("HBR006", "Harbor Labs Again") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Client code already exists");

    let response = app
        .request(
            Method::PUT,
            "/api/clients/HBR006",
            Some(json!({ "client": client("HBR007", "Harbor Labs") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["client"]["Client Code"], "HBR007");

    let response = app
        .request(
            Method::PUT,
            "/api/clients/HBR007",
            Some(json!({ "client": client("APS001", "Harbor Labs") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["error"],
        "New client code already exists"
    );

    let response = app
        .request(
            Method::PUT,
            "/api/clients/NOPE01",
            Some(json!({ "client": client("NOPE01", "Nobody") })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, "/api/clients/HBR007", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.request(Method::DELETE, "/api/clients/HBR007", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "Client not found");
}

#[tokio::test]
async fn client_lifecycle_memory_store() {
    client_lifecycle(TestApp::new().await).await;
}

#[tokio::test]
async fn client_lifecycle_sql_store() {
    client_lifecycle(TestApp::with_sql_store().await).await;
}

async fn bulk_replace_clients(app: TestApp) {
    let payload = json!({
        "clients": [client("AAA001", "Alpha Chemicals"), client("BBB002", "Beta Supply")]
    });
    let response = app
        .request(Method::POST, "/api/clients/update", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(app.request(Method::GET, "/api/clients", None).await).await;
    assert_eq!(client_codes(&body), ["AAA001", "BBB002"]);
}

#[tokio::test]
async fn bulk_replace_clients_memory_store() {
    bulk_replace_clients(TestApp::new().await).await;
}

#[tokio::test]
async fn bulk_replace_clients_sql_store() {
    bulk_replace_clients(TestApp::with_sql_store().await).await;
}

#[tokio::test]
async fn bulk_replace_rejects_non_array() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::POST, "/api/clients/update", Some(json!({ "clients": {} })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["error"],
        "Invalid clients data format"
    );
}

#[tokio::test]
async fn add_requires_client_envelope() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::POST, "/api/clients/add", Some(client("ZZZ001", "Bare")))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Invalid client data");
}

#[tokio::test]
async fn export_quotes_fields_with_commas() {
    let app = TestApp::empty().await;
    let mut record = client("CMA001", "Acme, Inc.");
    record["Address"] = json!("12 \"Old\" Mill Rd");
    let response = app
        .request(
            Method::POST,
            "/api/clients/update",
            Some(json!({ "clients": [record] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/clients/export", None).await;
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Clients_Export_"));

    let csv = response_text(response).await;
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Client Name,Client Code,Address,City,State,ZIP,Phone,Email,Contact Person,Status"
    );
    assert!(lines[1].starts_with("\"Acme, Inc.\",CMA001,\"12 \"\"Old\"\" Mill Rd\",Baltimore"));
}
