use bloodbank_api::app::services;
use bloodbank_infra::{BankConfig, BankState};
use bloodbank_inventory::InventoryMap;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(bank: services::SharedBank) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = bloodbank_api::app::build_app(bank);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_stock(stock: &[(&str, u64)]) -> Self {
        let inv: InventoryMap = stock.iter().map(|(g, n)| (*g, *n)).collect();
        Self::spawn(services::in_memory_bank(BankState::with_inventory(inv))).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(client: &reqwest::Client, url: String) -> serde_json::Value {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_outside_api_prefix() {
    let srv = TestServer::with_stock(&[]).await;
    let root = srv.base_url.trim_end_matches("/api");

    let res = reqwest::get(format!("{}/health", root)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn inventory_add_and_remove_report_new_count() {
    let srv = TestServer::with_stock(&[("A+", 2)]).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/inventory/add", srv.base_url),
        json!({ "group": "A+", "qty": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "group": "A+", "qty": 5 }));

    // qty defaults to 1
    let (_, body) = post_json(
        &client,
        format!("{}/inventory/remove", srv.base_url),
        json!({ "group": "A+" }),
    )
    .await;
    assert_eq!(body["qty"], 4);

    // Clamped at zero.
    let (_, body) = post_json(
        &client,
        format!("{}/inventory/remove", srv.base_url),
        json!({ "group": "A+", "qty": 40 }),
    )
    .await;
    assert_eq!(body["qty"], 0);

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv, json!({ "A+": 0 }));
}

#[tokio::test]
async fn donor_registration_credits_inventory() {
    let srv = TestServer::with_stock(&[]).await;
    let client = reqwest::Client::new();

    let (status, donor) = post_json(
        &client,
        format!("{}/donors", srv.base_url),
        json!({ "name": "A", "age": 30, "blood": "B+", "contact": "555-0101" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(donor["name"], "A");
    assert!(donor["id"].as_str().is_some());
    assert!(donor["createdAt"].as_str().is_some());

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv["B+"], 1);

    let donors = get_json(&client, format!("{}/donors", srv.base_url)).await;
    assert_eq!(donors.as_array().unwrap().len(), 1);
    assert_eq!(donors[0]["id"], donor["id"]);
}

#[tokio::test]
async fn donors_are_listed_most_recent_first() {
    let srv = TestServer::with_stock(&[]).await;
    let client = reqwest::Client::new();

    for name in ["first", "second"] {
        post_json(
            &client,
            format!("{}/donors", srv.base_url),
            json!({ "name": name, "age": 40, "blood": "O-", "contact": "" }),
        )
        .await;
    }

    let donors = get_json(&client, format!("{}/donors", srv.base_url)).await;
    assert_eq!(donors[0]["name"], "second");
    assert_eq!(donors[1]["name"], "first");
}

#[tokio::test]
async fn donor_missing_required_fields_is_rejected() {
    let srv = TestServer::with_stock(&[]).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/donors", srv.base_url),
        json!({ "age": 30, "blood": "B+" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv, json!({}));
}

#[tokio::test]
async fn deleting_donor_is_idempotent_and_keeps_inventory() {
    let srv = TestServer::with_stock(&[]).await;
    let client = reqwest::Client::new();

    let (_, donor) = post_json(
        &client,
        format!("{}/donors", srv.base_url),
        json!({ "name": "A", "age": 30, "blood": "B+", "contact": "" }),
    )
    .await;
    let id = donor["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let res = client
            .delete(format!("{}/donors/{}", srv.base_url, id))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "ok": true }));
    }

    let res = client
        .delete(format!("{}/donors/does-not-exist", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let donors = get_json(&client, format!("{}/donors", srv.base_url)).await;
    assert!(donors.as_array().unwrap().is_empty());
    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv["B+"], 1);
}

#[tokio::test]
async fn request_is_fulfilled_then_pending() {
    let srv = TestServer::with_stock(&[("O+", 8)]).await;
    let client = reqwest::Client::new();
    let body = json!({ "name": "City Hospital", "blood": "O+", "qty": 5, "loc": "Ward 3", "contact": "555" });

    let (status, first) = post_json(&client, format!("{}/requests", srv.base_url), body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["request"]["status"], "fulfilled");
    assert_eq!(first["message"], "Allocated 5 unit(s)");

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv["O+"], 3);

    let (_, second) = post_json(&client, format!("{}/requests", srv.base_url), body).await;
    assert_eq!(second["request"]["status"], "pending");
    assert!(second["message"].as_str().unwrap().contains("Available: 3"));

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv["O+"], 3);

    let requests = get_json(&client, format!("{}/requests", srv.base_url)).await;
    let requests = requests.as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["id"], second["request"]["id"]);
    assert_eq!(requests[1]["status"], "fulfilled");
}

#[tokio::test]
async fn request_with_non_positive_qty_is_rejected() {
    let srv = TestServer::with_stock(&[("O+", 8)]).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/requests", srv.base_url),
        json!({ "name": "Clinic", "blood": "O+", "qty": 0, "loc": "", "contact": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let requests = get_json(&client, format!("{}/requests", srv.base_url)).await;
    assert!(requests.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn file_backed_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = BankConfig {
        db_file: dir.path().join("db.json"),
        ..BankConfig::default()
    };
    let client = reqwest::Client::new();

    {
        let srv = TestServer::spawn(services::build_bank(&cfg).unwrap()).await;
        post_json(
            &client,
            format!("{}/donors", srv.base_url),
            json!({ "name": "A", "age": 30, "blood": "B+", "contact": "" }),
        )
        .await;
    }

    let srv = TestServer::spawn(services::build_bank(&cfg).unwrap()).await;
    let donors = get_json(&client, format!("{}/donors", srv.base_url)).await;
    assert_eq!(donors[0]["name"], "A");
    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv["B+"], 1);
}

#[tokio::test]
async fn inventory_body_without_group_is_a_json_validation_error() {
    let srv = TestServer::with_stock(&[("O+", 4)]).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/inventory/add", srv.base_url),
        json!({ "qty": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("group"));

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv, json!({ "O+": 4 }));
}

#[tokio::test]
async fn form_style_quantities_are_coerced() {
    let srv = TestServer::with_stock(&[("B-", 5)]).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/inventory/add", srv.base_url),
        json!({ "group": "B-", "qty": "3" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qty"], 8);

    // A negative add debits, still clamped at zero.
    let (status, body) = post_json(
        &client,
        format!("{}/inventory/add", srv.base_url),
        json!({ "group": "B-", "qty": -20 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qty"], 0);

    let (status, body) = post_json(
        &client,
        format!("{}/donors", srv.base_url),
        json!({ "name": "Ada", "age": "31", "blood": "B-", "contact": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 31);
}

#[tokio::test]
async fn malformed_bodies_are_json_validation_errors() {
    let srv = TestServer::with_stock(&[("A+", 2)]).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/inventory/remove", srv.base_url),
        json!({ "group": "A+", "qty": "lots" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = post_json(
        &client,
        format!("{}/requests", srv.base_url),
        json!({ "name": "Clinic", "blood": "A+", "qty": 1.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(format!("{}/donors", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let inv = get_json(&client, format!("{}/inventory", srv.base_url)).await;
    assert_eq!(inv, json!({ "A+": 2 }));
}
