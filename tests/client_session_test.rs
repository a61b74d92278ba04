mod common;

use assert_matches::assert_matches;
use bol_api::bol::{ItemField, ShipmentDetails};
use bol_api::catalog::DataSource;
use bol_api::client::{ApiClient, ClientError, Session, OFFLINE_READ_ONLY};
use bol_api::seed::{sample_clients, sample_products};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::TestApp;

async fn live_session() -> (TestApp, Session) {
    let app = TestApp::new().await;
    let url = app.spawn().await;
    let api = ApiClient::new(url).unwrap();
    let session = Session::open(api).await.unwrap();
    (app, session)
}

#[tokio::test]
async fn session_loads_live_catalog() {
    let (_app, session) = live_session().await;
    assert!(!session.is_offline());
    assert_eq!(session.state().all_products().len(), 5);
    assert_eq!(session.state().all_clients().len(), 5);
    assert_eq!(session.state().active_clients().len(), 4);
    assert_eq!(session.state().active_products()[0].name, "Acetone");
}

#[tokio::test]
async fn product_edits_go_through_bulk_replace() {
    let (app, mut session) = live_session().await;

    let mut product = sample_products().remove(0);
    product.code = "UN2031".to_string();
    product.name = "Nitric Acid".to_string();
    session.add_product(product.clone()).await.unwrap();

    let added = session
        .state()
        .find_product_by_code("UN2031")
        .cloned()
        .unwrap();
    assert_eq!(added.id, Some(6));

    let err = session.add_product(product).await.unwrap_err();
    assert_matches!(err, ClientError::Invalid(_));

    let mut renamed = added.clone();
    renamed.name = "Nitric Acid 68%".to_string();
    session.update_product(6, renamed).await.unwrap();
    assert_eq!(
        session.state().find_product(6).unwrap().name,
        "Nitric Acid 68%"
    );

    let removed = session.delete_product(6).await.unwrap();
    assert_eq!(removed.code, "UN2031");
    assert!(session.state().find_product(6).is_none());

    let stored = app.state.store.list_products().await.unwrap();
    assert_eq!(stored.len(), 5);
}

#[tokio::test]
async fn client_edits_go_through_bulk_replace() {
    let (_app, mut session) = live_session().await;

    let mut client = sample_clients().remove(0);
    client.code = "NEW010".to_string();
    client.name = "Newco Labs".to_string();
    session.add_client(client.clone()).await.unwrap();
    assert!(session.state().find_client("NEW010").is_some());

    client.city = "York".to_string();
    session.update_client("NEW010", client).await.unwrap();
    assert_eq!(session.state().find_client("NEW010").unwrap().city, "York");

    session.delete_client("NEW010").await.unwrap();
    let err = session.delete_client("NEW010").await.unwrap_err();
    assert_matches!(err, ClientError::Invalid(_));
}

#[tokio::test]
async fn composed_document_is_saved_and_listed() {
    let (_app, mut session) = live_session().await;

    let pallet = session.composer_mut().add_pallet();
    session.set_item_field(pallet, ItemField::Quantity, "1").unwrap();
    let item = session.composer_mut().add_product_item().unwrap();
    session.set_item_field(item, ItemField::ProductId, "4").unwrap();
    session.set_item_field(item, ItemField::Quantity, "2").unwrap();
    assert_eq!(session.total_weight(), dec!(94));

    let client = session.state().find_client("BRN002").cloned().unwrap();
    let shipment = ShipmentDetails::default().with_consignee(&client);
    let document = session.compose(&shipment).unwrap();
    assert!(document.html.contains("Reading"));

    let message = session.save_document(&document).await.unwrap();
    assert!(message.contains(&document.filename));

    let files = session.api().list_bol_files().await.unwrap();
    assert_eq!(files[0].name, document.filename);
    let html = session.api().view_bol(&document.filename).await.unwrap();
    assert_eq!(html, document.html);
}

#[tokio::test]
async fn unreachable_server_falls_back_to_demonstration_data() {
    let api = ApiClient::new("http://127.0.0.1:1").unwrap();
    let session = Session::open(api).await.unwrap();

    assert!(session.is_offline());
    assert_matches!(session.state().source(), DataSource::Offline { .. });
    let mut codes: Vec<_> = session
        .state()
        .all_products()
        .iter()
        .map(|p| p.code.clone())
        .collect();
    codes.sort();
    let mut expected: Vec<_> = sample_products().into_iter().map(|p| p.code).collect();
    expected.sort();
    assert_eq!(codes, expected);
    assert_eq!(session.state().all_clients().len(), sample_clients().len());
}

#[tokio::test]
async fn offline_session_refuses_writes() {
    let reserved = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = reserved.local_addr().unwrap();
    drop(reserved);

    let api = ApiClient::new(format!("http://{addr}")).unwrap();
    let mut session = Session::open(api).await.unwrap();
    assert!(session.is_offline());

    // Server comes up after the demonstration data was loaded.
    let app = TestApp::empty().await;
    app.serve(tokio::net::TcpListener::bind(addr).await.unwrap());

    let mut product = sample_products().remove(0);
    product.code = "UN2031".to_string();
    let offline = |err: ClientError| matches!(err, ClientError::Invalid(m) if m == OFFLINE_READ_ONLY);

    assert!(offline(session.add_product(product.clone()).await.unwrap_err()));
    assert!(offline(session.update_product(1, product).await.unwrap_err()));
    assert!(offline(session.delete_product(1).await.unwrap_err()));

    let client = sample_clients().remove(0);
    let code = client.code.clone();
    assert!(offline(session.add_client(client.clone()).await.unwrap_err()));
    assert!(offline(session.update_client(&code, client).await.unwrap_err()));
    assert!(offline(session.delete_client(&code).await.unwrap_err()));

    let pallet = session.composer_mut().add_pallet();
    session.set_item_field(pallet, ItemField::Quantity, "1").unwrap();
    let item = session.composer_mut().add_product_item().unwrap();
    session.set_item_field(item, ItemField::ProductId, "4").unwrap();
    session.set_item_field(item, ItemField::Quantity, "2").unwrap();
    let document = session.compose(&ShipmentDetails::default()).unwrap();
    assert!(offline(session.save_document(&document).await.unwrap_err()));

    assert!(session.is_offline());
    assert_eq!(session.state().all_products().len(), sample_products().len());
    assert_eq!(session.state().all_clients().len(), sample_clients().len());
    assert!(app.state.store.list_products().await.unwrap().is_empty());
    assert!(app.state.store.list_clients().await.unwrap().is_empty());
    assert!(app.state.store.list_documents(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn error_answers_do_not_trigger_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/inventory"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Failed to load inventory",
            "code": "internal_error",
            "timestamp": "2025-03-04T10:30:00.000Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clients": [] })))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let err = Session::open(api).await.err().unwrap();
    assert_matches!(
        err,
        ClientError::Api { status: 500, message } if message == "Failed to load inventory"
    );
}

#[tokio::test]
async fn plain_error_bodies_are_reported_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/inventory/9"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/clients/X"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    let err = api.delete_product(9).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 502, message } if message == "upstream down");

    let err = api.delete_client("X").await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, message } if message == "Not Found");
}

#[tokio::test]
async fn save_bol_posts_content_and_filename() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save-bol"))
        .and(body_partial_json(json!({ "filename": "BOL_1.html" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "BOL saved as BOL_1.html"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(format!("{}/", server.uri())).unwrap();
    let message = api.save_bol("<p/>", "BOL_1.html").await.unwrap();
    assert_eq!(message, "BOL saved as BOL_1.html");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).unwrap();
    assert_matches!(api.list_clients().await, Err(ClientError::Decode(_)));
}
