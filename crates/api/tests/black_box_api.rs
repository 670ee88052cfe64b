use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use aiventory_api::app::services::AppServices;
use aiventory_api::prediction::DisabledPredictionClient;
use aiventory_auth::Hs256TokenCodec;
use aiventory_store::{
    InMemoryInvoiceStore, InMemoryMovementStore, InMemoryProductStore, InMemoryStaffStore,
    InMemorySupplierStore,
};

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod, wired with in-memory stores and no external
    /// prediction service, bound to an ephemeral port.
    async fn spawn() -> Self {
        let services = Arc::new(AppServices {
            products: Arc::new(InMemoryProductStore::new()),
            movements: Arc::new(InMemoryMovementStore::new()),
            suppliers: Arc::new(InMemorySupplierStore::new()),
            invoices: Arc::new(InMemoryInvoiceStore::new()),
            staff: Arc::new(InMemoryStaffStore::new()),
            predictions: Arc::new(DisabledPredictionClient),
            tokens: Arc::new(Hs256TokenCodec::new(JWT_SECRET.as_bytes())),
        });

        let app = aiventory_api::app::build_app_with(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register_and_login(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&json!({
            "username": "alice",
            "display_name": "Alice D",
            "role": "admin",
            "password": "s3cret-password",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "username": "alice", "password": "s3cret-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn create_product(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/products", base_url))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_login_and_bearer_access() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = register_and_login(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Alice D");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Mint a token signed with the right secret but already expired.
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": uuid::Uuid::now_v7(),
        "name": "Ghost",
        "role": "staff",
        "iat": now - 7200,
        "exp": now - 3600,
    });
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv.base_url).await;

    let created = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({
            "name": "Arabica Beans 1kg",
            "barcode": "4800016641003",
            "unit_price": 1250,
            "initial_stock": 40,
            "reorder_level": 50,
        }),
    )
    .await;

    let id = created["Product_id"].as_str().unwrap().to_string();
    assert_eq!(created["Product_name"], "Arabica Beans 1kg");
    assert_eq!(created["Product_stock"], 40);
    assert_eq!(created["reorder_level"], 50);

    // List
    let res = client
        .get(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    // Update
    let res = client
        .put(format!("{}/products/{}", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Arabica Beans 1kg (roasted)", "reorder_level": 30 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["Product_name"], "Arabica Beans 1kg (roasted)");
    assert_eq!(updated["reorder_level"], 30);

    // Barcode lookup
    let res = client
        .get(format!("{}/products/barcode/4800016641003", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let found: serde_json::Value = res.json().await.unwrap();
    assert_eq!(found["Product_id"].as_str().unwrap(), id);

    // Duplicate barcode conflicts
    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Clone", "barcode": "4800016641003" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Delete, then 404
    let res = client
        .delete(format!("{}/products/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_patch_adjusts_and_records_history() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv.base_url).await;

    let created = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "name": "Robusta Beans", "initial_stock": 30, "reorder_level": 50 }),
    )
    .await;
    let id = created["Product_id"].as_str().unwrap().to_string();

    // Receive 20, then sell 5.
    let res = client
        .patch(format!("{}/products/{}/stock", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 20, "action": "add", "reason": "delivery" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["new_stock"], 50);

    let res = client
        .patch(format!("{}/products/{}/stock", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 5, "action": "remove", "reason": "sale", "user_name": "Bob" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["new_stock"], 45);

    // History is newest-first with the mobile client's wire fields.
    let res = client
        .get(format!("{}/products/{}/history", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let entries: serde_json::Value = res.json().await.unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["stock_movement_type"], "out");
    assert_eq!(entries[0]["stock_movement_quantity"], 5);
    assert_eq!(entries[0]["quantity_display"], "-5");
    assert_eq!(entries[0]["user_name"], "Bob");
    assert_eq!(entries[0]["action"], "sale");
    assert!(entries[0]["stock_movement_id"].is_string());
    assert!(entries[0]["sm_date"].is_string());

    assert_eq!(entries[1]["stock_movement_type"], "in");
    assert_eq!(entries[1]["stock_movement_quantity"], 20);
    assert_eq!(entries[1]["quantity_display"], "+20");
    assert_eq!(entries[1]["user_name"], "Alice D");

    // Removing more than available is rejected and leaves stock alone.
    let res = client
        .patch(format!("{}/products/{}/stock", srv.base_url, id))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 1000, "action": "remove" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["Product_stock"], 45);
}

#[tokio::test]
async fn history_degrades_to_empty_for_unknown_product() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv.base_url).await;

    let res = client
        .get(format!(
            "{}/products/{}/history",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let entries: serde_json::Value = res.json().await.unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn prediction_without_service_falls_back_deterministically() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv.base_url).await;

    let created = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "name": "Filter Papers", "initial_stock": 40, "reorder_level": 50 }),
    )
    .await;
    let id = created["Product_id"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/predictions/products/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["days_until_depletion"], 7);
    assert_eq!(body["suggested_reorder_quantity"], 50);
    assert_eq!(body["predicted_depletion_date"], serde_json::Value::Null);
    assert_eq!(body["status"], "At Risk");
    assert_eq!(body["source"], "heuristic");
}

#[tokio::test]
async fn chart_reconstructs_projects_and_labels() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv.base_url).await;

    // Start at 30, receive 20, sell 5: current stock 45, log newest-first
    // [out 5, in 20], reconstructed series [30, 25, 45].
    let created = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "name": "Espresso Blend", "initial_stock": 30, "reorder_level": 50 }),
    )
    .await;
    let id = created["Product_id"].as_str().unwrap().to_string();

    for body in [
        json!({ "quantity": 20, "action": "add" }),
        json!({ "quantity": 5, "action": "remove" }),
    ] {
        let res = client
            .patch(format!("{}/products/{}/stock", srv.base_url, id))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(format!("{}/predictions/products/{}/chart", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();

    let labels = body["labels"].as_array().unwrap();
    let history = body["history"].as_array().unwrap();
    let projection = body["projection"].as_array().unwrap();
    let threshold = body["threshold"].as_array().unwrap();

    // 3 historical points + 3 projected (horizon = min(7, 3)).
    assert_eq!(labels.len(), 6);
    assert_eq!(history.len(), 6);
    assert_eq!(projection.len(), 6);
    assert_eq!(threshold.len(), 6);
    assert_eq!(labels[2], "Now");

    assert_eq!(history[0], 30.0);
    assert_eq!(history[1], 25.0);
    assert_eq!(history[2], 45.0);
    assert!(history[3].is_null());

    // Rising trend: avg change = (30 - 45) / 3 = -5.
    assert!(projection[0].is_null());
    assert_eq!(projection[3], 50.0);
    assert_eq!(projection[4], 55.0);
    assert_eq!(projection[5], 60.0);
    assert_eq!(body["avg_daily_change"], -5.0);

    assert!(threshold.iter().all(|v| *v == serde_json::json!(50.0)));
    assert_eq!(body["status"], "At Risk");
}

#[tokio::test]
async fn supplier_and_invoice_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &srv.base_url).await;

    // Supplier
    let res = client
        .post(format!("{}/suppliers", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Highland Traders",
            "contact": { "email": "orders@highland.example" },
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let supplier: serde_json::Value = res.json().await.unwrap();
    let supplier_id = supplier["id"].as_str().unwrap().to_string();

    let res = client
        .put(format!("{}/suppliers/{}", srv.base_url, supplier_id))
        .bearer_auth(&token)
        .json(&json!({ "contact": { "email": "sales@highland.example", "phone": "+63 917 000 0000" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["contact"]["email"], "sales@highland.example");

    // Invoice
    let product = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "name": "Arabica Beans 1kg", "unit_price": 1250, "initial_stock": 10 }),
    )
    .await;
    let product_id = product["Product_id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "number": "INV-0042",
            "customer_name": "Cafe Aurora",
            "lines": [
                { "product_id": product_id, "description": "Arabica Beans 1kg", "quantity": 3, "unit_price": 1250 }
            ],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let invoice: serde_json::Value = res.json().await.unwrap();
    assert_eq!(invoice["total"], 3750);
    assert_eq!(invoice["status"], "issued");

    // Duplicate invoice number conflicts.
    let res = client
        .post(format!("{}/invoices", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "number": "INV-0042",
            "customer_name": "Cafe Aurora",
            "lines": [
                { "product_id": product_id, "description": "again", "quantity": 1, "unit_price": 1 }
            ],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
