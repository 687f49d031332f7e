//! Black-box test: start the real server on a free port with in-memory
//! adapters and walk a customer from menu browsing to a placed order.
//!
//!   cargo test --test api_test

use std::net::TcpListener;
use std::time::Duration;

use bento_service::domain::pricing::PricingConfig;
use bento_service::{build_server, AppState, Repositories};
use chrono::{Days, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("free port")
}

/// Spawn the server and wait until it answers. Returns the base URL.
async fn spawn_app() -> String {
    let port = free_port();
    let state = AppState::new(Repositories::in_memory(), PricingConfig::default());
    let server = build_server(state, "127.0.0.1", port).expect("bind server");
    tokio::spawn(server);

    let base = format!("http://127.0.0.1:{port}");
    let client = Client::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        if client.get(format!("{base}/menu")).send().await.is_ok() {
            return base;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("server on port {port} did not start within 10 s");
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn browse_fill_cart_and_check_out() {
    let base = spawn_app().await;
    let http = Client::new();
    let customer = Uuid::new_v4();

    // Vegetarian items, cheapest first.
    let menu: Vec<Value> = http
        .get(format!("{base}/menu?vegetarian=true&sort=price_low"))
        .send()
        .await
        .expect("GET /menu")
        .json()
        .await
        .expect("menu json");
    assert!(!menu.is_empty());
    assert!(menu.iter().all(|m| m["vegetarian"] == json!(true)));

    let resp = http
        .put(format!("{base}/customers/{customer}/membership"))
        .json(&json!({ "tier": "GOLD" }))
        .send()
        .await
        .expect("PUT membership");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = http
        .post(format!("{base}/customers/{customer}/cart/items"))
        .json(&json!({ "menu_item_id": 2, "quantity": 2 }))
        .send()
        .await
        .expect("POST cart item")
        .json()
        .await
        .expect("cart json");
    // 15000 less 10%, delivery waived for GOLD.
    assert_eq!(cart["pricing"]["discount"], json!(1500));
    assert_eq!(cart["pricing"]["delivery_fee"], json!(0));
    assert_eq!(cart["pricing"]["total"], json!(13500));

    let delivery_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .expect("date");
    let resp = http
        .post(format!("{base}/customers/{customer}/orders"))
        .json(&json!({
            "recipient": "Lee Jiwoo",
            "phone": "010-9876-5432",
            "address": "45 Sejong-daero",
            "address_detail": "Apt 1203",
            "delivery_date": delivery_date,
            "delivery_slot": "morning",
            "payment_method": "transfer"
        }))
        .send()
        .await
        .expect("POST order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("order json");
    assert_eq!(order["status"], json!("PENDING"));
    assert_eq!(order["membership"], json!("GOLD"));
    assert_eq!(order["pricing"]["total"], json!(13500));

    let cart: Value = http
        .get(format!("{base}/customers/{customer}/cart"))
        .send()
        .await
        .expect("GET cart")
        .json()
        .await
        .expect("cart json");
    assert_eq!(cart["item_count"], json!(0));

    let order_id = order["id"].as_str().expect("order id");
    let fetched: Value = http
        .get(format!("{base}/orders/{order_id}"))
        .send()
        .await
        .expect("GET order")
        .json()
        .await
        .expect("order json");
    assert_eq!(fetched["order_number"], order["order_number"]);
}

#[tokio::test]
async fn errors_are_json_with_status() {
    let base = spawn_app().await;
    let http = Client::new();

    let resp = http
        .get(format!("{base}/menu/999"))
        .send()
        .await
        .expect("GET /menu/999");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("error json");
    assert!(body["error"].as_str().is_some());

    let resp = http
        .post(format!("{base}/customers/{}/orders", Uuid::new_v4()))
        .json(&json!({
            "recipient": "Lee Jiwoo",
            "phone": "010-9876-5432",
            "address": "45 Sejong-daero",
            "delivery_date": "2099-01-01",
            "delivery_slot": "evening",
            "payment_method": "card"
        }))
        .send()
        .await
        .expect("POST order");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
