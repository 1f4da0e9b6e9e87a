//! End-to-end API tests over an in-memory database.
//!
//! Each test builds a fresh app, so state never leaks between tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use comanda::core::{build_router, Config, ServerState};
use comanda::db::DbService;

async fn test_app() -> Router {
    let db = DbService::memory().await.expect("in-memory db");
    let state = ServerState::with_db(Config::from_env(), db);
    build_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a restaurant and log in; returns (token, slug).
async fn register_and_login(app: &Router, slug: &str) -> (String, String) {
    let email = format!("{slug}@example.com");
    let (status, _) = send(
        app,
        "POST",
        "/api/tenants/register",
        None,
        Some(json!({
            "slug": slug,
            "name": format!("Restaurant {slug}"),
            "email": email,
            "password": "secret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/api/tenants/login",
        None,
        Some(json!({ "email": email, "password": "secret-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    (token, slug.to_string())
}

/// First table id of the authenticated tenant.
async fn first_table_id(app: &Router, token: &str) -> String {
    let (status, body) = send(app, "GET", "/api/tables", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    body[0]["id"].as_str().unwrap().to_string()
}

fn pad_thai_line() -> Value {
    json!({
        "menu_item_id": "pad-thai",
        "name": "Pad Thai",
        "unit_price": "120",
        "quantity": 2,
        "spice_level": 1,
    })
}

async fn place_order(app: &Router, slug: &str, table_id: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/public/orders/{slug}"),
        None,
        Some(json!({ "table_id": table_id, "lines": [pad_thai_line()] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn health_check() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_seeds_tables_and_login_works() {
    let app = test_app().await;
    let (token, _) = register_and_login(&app, "golden-dragon").await;

    let (status, body) = send(&app, "GET", "/api/tables", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let tables = body.as_array().unwrap();
    assert_eq!(tables.len(), 15);
    assert_eq!(tables[0]["number"], 1);
    assert_eq!(tables[14]["number"], 15);
}

#[tokio::test]
async fn register_rejects_taken_slug_and_bad_slug() {
    let app = test_app().await;
    register_and_login(&app, "golden-dragon").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/tenants/register",
        None,
        Some(json!({
            "slug": "golden-dragon",
            "name": "Copycat",
            "email": "other@example.com",
            "password": "secret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    let (status, _) = send(
        &app,
        "POST",
        "/api/tenants/register",
        None,
        Some(json!({
            "slug": "Golden Dragon",
            "name": "Bad Slug",
            "email": "bad@example.com",
            "password": "secret-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = test_app().await;
    register_and_login(&app, "golden-dragon").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/tenants/login",
        None,
        Some(json!({
            "email": "golden-dragon@example.com",
            "password": "wrong-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = test_app().await;
    let (status, _) = send(&app, "GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_table_lookup_is_slug_scoped() {
    let app = test_app().await;
    let (token_a, slug_a) = register_and_login(&app, "restaurant-a").await;
    let (_, slug_b) = register_and_login(&app, "restaurant-b").await;
    let table_a = first_table_id(&app, &token_a).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/public/tables/{slug_a}/{table_a}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["number"], 1);

    // Same table id through the wrong restaurant's slug resolves to nothing.
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/public/tables/{slug_b}/{table_a}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/public/tables/no-such-restaurant/{table_a}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_submission_snapshots_lines() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let order = place_order(&app, &slug, &table_id).await;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["table_number"], 1);
    let lines = order["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["name"], "Pad Thai");
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["unit_price"], "120");
}

#[tokio::test]
async fn order_submission_merges_identical_lines() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let (status, order) = send(
        &app,
        "POST",
        &format!("/api/public/orders/{slug}"),
        None,
        Some(json!({
            "table_id": table_id,
            "lines": [pad_thai_line(), pad_thai_line()],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let lines = order["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 4);
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/public/orders/{slug}"),
        None,
        Some(json!({ "table_id": table_id, "lines": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0010");
}

#[tokio::test]
async fn foreign_table_id_does_not_resolve() {
    let app = test_app().await;
    let (token_a, _) = register_and_login(&app, "restaurant-a").await;
    let (_, slug_b) = register_and_login(&app, "restaurant-b").await;
    let table_a = first_table_id(&app, &token_a).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/public/orders/{slug_b}"),
        None,
        Some(json!({ "table_id": table_a, "lines": [pad_thai_line()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0011");
}

#[tokio::test]
async fn order_walks_the_full_lifecycle() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;
    let order = place_order(&app, &slug, &table_id).await;
    let order_id = order["id"].as_str().unwrap();
    let uri = format!("/api/orders/{order_id}/status");

    for target in ["preparing", "ready", "served", "completed"] {
        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "status": target })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {target}");
        assert_eq!(body["status"], target);
    }
}

#[tokio::test]
async fn illegal_transitions_are_rejected() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;
    let order = place_order(&app, &slug, &table_id).await;
    let order_id = order["id"].as_str().unwrap();
    let uri = format!("/api/orders/{order_id}/status");

    // Skipping preparing is not allowed.
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "status": "ready" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");

    // Advance to served, then cancellation is no longer possible.
    for target in ["preparing", "ready", "served"] {
        let (status, _) = send(
            &app,
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "status": target })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn repeated_same_target_is_a_noop() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;
    let order = place_order(&app, &slug, &table_id).await;
    let order_id = order["id"].as_str().unwrap();
    let uri = format!("/api/orders/{order_id}/status");

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "status": "preparing" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "preparing");
    }
}

#[tokio::test]
async fn concurrent_same_target_both_succeed() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;
    let order = place_order(&app, &slug, &table_id).await;
    let order_id = order["id"].as_str().unwrap();
    let uri = format!("/api/orders/{order_id}/status");
    let payload = json!({ "status": "preparing" });

    let (a, b) = tokio::join!(
        send(&app, "PUT", &uri, Some(&token), Some(payload.clone())),
        send(&app, "PUT", &uri, Some(&token), Some(payload.clone())),
    );
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(a.1["status"], "preparing");
    assert_eq!(b.1["status"], "preparing");
}

#[tokio::test]
async fn tenants_cannot_touch_each_others_orders() {
    let app = test_app().await;
    let (token_a, slug_a) = register_and_login(&app, "restaurant-a").await;
    let (token_b, _) = register_and_login(&app, "restaurant-b").await;
    let table_a = first_table_id(&app, &token_a).await;
    let order = place_order(&app, &slug_a, &table_a).await;
    let order_id = order["id"].as_str().unwrap();

    let (status, body) = send(&app, "GET", "/api/orders", Some(&token_b), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    // Mutation through the wrong tenant reads as absence, not denial.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&token_b),
        Some(json!({ "status": "preparing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&token_a),
        Some(json!({ "status": "preparing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn order_list_filters_by_status() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;
    let first = place_order(&app, &slug, &table_id).await;
    place_order(&app, &slug, &table_id).await;

    let first_id = first["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{first_id}/status"),
        Some(&token),
        Some(json!({ "status": "preparing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        "/api/orders?status=preparing",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["status"], "preparing");

    let (status, _) = send(
        &app,
        "GET",
        "/api/orders?status=bogus",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_exclude_cancelled_orders() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let kept = place_order(&app, &slug, &table_id).await;
    let cancelled = place_order(&app, &slug, &table_id).await;
    let cancelled_id = cancelled["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{cancelled_id}/status"),
        Some(&token),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = send(&app, "GET", "/api/orders/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["all_time"]["count"], 1);
    assert_eq!(stats["all_time"]["revenue"], "240");
    // The surviving order is pending and still counts.
    assert_eq!(kept["status"], "pending");
    assert_eq!(stats["today"]["count"], 1);
    assert_eq!(stats["today"]["revenue"], "240");
}

#[tokio::test]
async fn booking_lifecycle_and_validation() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let uri = format!("/api/public/bookings/{slug}");

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        None,
        Some(json!({
            "customer_name": "Ada",
            "customer_phone": "555-0101",
            "guests": 0,
            "date": "2026-09-01",
            "time": "19:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        None,
        Some(json!({
            "customer_name": "Ada",
            "customer_phone": "555-0101",
            "guests": 4,
            "date": "01/09/2026",
            "time": "19:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, booking) = send(
        &app,
        "POST",
        &uri,
        None,
        Some(json!({
            "customer_name": "Ada",
            "customer_phone": "555-0101",
            "guests": 4,
            "date": "2026-09-01",
            "time": "19:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "pending");
    let booking_id = booking["id"].as_str().unwrap();

    let status_uri = format!("/api/bookings/{booking_id}/status");
    let (status, body) = send(
        &app,
        "PUT",
        &status_uri,
        Some(&token),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    // Completion requires confirmation first, which we now have.
    let (status, _) = send(
        &app,
        "PUT",
        &status_uri,
        Some(&token),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Terminal bookings cannot be cancelled.
    let (status, _) = send(
        &app,
        "PUT",
        &status_uri,
        Some(&token),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/bookings/{booking_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/bookings", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn waiter_call_acknowledge_is_idempotent() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let (status, call) = send(
        &app,
        "POST",
        &format!("/api/public/waiter-calls/{slug}"),
        None,
        Some(json!({ "table_id": table_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(call["status"], "pending");
    assert_eq!(call["table_number"], 1);
    let call_id = call["id"].as_str().unwrap();

    let uri = format!("/api/waiter-calls/{call_id}/acknowledge");
    for _ in 0..2 {
        let (status, body) = send(&app, "PUT", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "acknowledged");
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/waiter-calls?status=pending",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_waiter_calls_are_not_deduplicated() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;
    let uri = format!("/api/public/waiter-calls/{slug}");

    for _ in 0..3 {
        let (status, _) = send(
            &app,
            "POST",
            &uri,
            None,
            Some(json!({ "table_id": table_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/waiter-calls?status=pending",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn kitchen_view_stops_at_ready() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let shown = place_order(&app, &slug, &table_id).await;
    let hidden = place_order(&app, &slug, &table_id).await;
    let hidden_id = hidden["id"].as_str().unwrap();
    for target in ["preparing", "ready", "served"] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/orders/{hidden_id}/status"),
            Some(&token),
            Some(json!({ "status": target })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/public/kitchen/{slug}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], shown["id"]);
}

#[tokio::test]
async fn staff_view_aggregates_everything() {
    let app = test_app().await;
    let (token, slug) = register_and_login(&app, "golden-dragon").await;
    let table_id = first_table_id(&app, &token).await;

    let order = place_order(&app, &slug, &table_id).await;
    let order_id = order["id"].as_str().unwrap();
    for target in ["preparing", "ready", "served"] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/orders/{order_id}/status"),
            Some(&token),
            Some(json!({ "status": target })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/public/waiter-calls/{slug}"),
        None,
        Some(json!({ "table_id": table_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/public/bookings/{slug}"),
        None,
        Some(json!({
            "customer_name": "Ada",
            "customer_phone": "555-0101",
            "guests": 2,
            "date": today,
            "time": "20:00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, view) = send(
        &app,
        "GET",
        &format!("/api/public/staff/{slug}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["restaurant_name"], "Restaurant golden-dragon");
    // Served orders stay visible to the floor even though the kitchen drops them.
    assert_eq!(view["orders"].as_array().unwrap().len(), 1);
    assert_eq!(view["orders"][0]["status"], "served");
    assert_eq!(view["waiter_calls"].as_array().unwrap().len(), 1);
    assert_eq!(view["bookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn table_management_roundtrip() {
    let app = test_app().await;
    let (token, _) = register_and_login(&app, "golden-dragon").await;

    let (status, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(&token),
        Some(json!({ "number": 16, "name": "Terrace 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["number"], 16);
    let table_id = table["id"].as_str().unwrap();

    // Numbers are unique within the tenant.
    let (status, _) = send(
        &app,
        "POST",
        "/api/tables",
        Some(&token),
        Some(json!({ "number": 16 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/tables/{table_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/tables", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 15);
}
