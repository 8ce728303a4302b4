//! REST round-trips over the seeded dashboard:
//! JSON → HTTP request → handler → DataService → HTTP response → JSON.

use axum::http::StatusCode;
use axum_test::TestServer;
use rentdesk::core::events::EventEnvelope;
use rentdesk::prelude::*;
use serde_json::{Value, json};
use tokio::sync::broadcast;

fn make_server() -> TestServer {
    let router = ServerBuilder::new().with_seed_data().build().unwrap();
    TestServer::new(router)
}

fn make_server_with_events() -> (TestServer, broadcast::Receiver<EventEnvelope>) {
    let host = Arc::new(
        ServerBuilder::new()
            .with_seed_data()
            .with_event_bus(64)
            .build_host()
            .unwrap(),
    );
    let rx = host.event_bus().unwrap().subscribe();
    let router = rentdesk::server::build_router(host, Vec::new());
    (TestServer::new(router), rx)
}

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_u64().unwrap())
        .collect()
}

// ==============================================================
// List, search and status filter
// ==============================================================

#[tokio::test]
async fn test_list_rooms() {
    let server = make_server();

    let resp = server.get("/rooms").await;
    resp.assert_status(StatusCode::OK);

    let body: Value = resp.json();
    assert_eq!(body["count"], 6);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(body["data"][0]["code"], "P101");
    assert_eq!(body["data"][0]["status"], "occupied");
    assert_eq!(body["data"][1]["tenant"], Value::Null);
}

#[tokio::test]
async fn test_search_rooms() {
    let server = make_server();

    let body: Value = server.get("/rooms?q=p20").await.json();
    assert_eq!(ids(&body), vec![4, 5, 6]);

    let body: Value = server.get("/rooms?q=P20&status=available").await.json();
    assert_eq!(ids(&body), vec![4]);
}

#[tokio::test]
async fn test_search_tenants_by_name() {
    let server = make_server();

    let body: Value = server
        .get("/tenants")
        .add_query_param("q", "trần")
        .await
        .json();

    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Trần Thị B");
    assert_eq!(body["data"][0]["citizenId"], "009876543210");
}

#[tokio::test]
async fn test_filter_invoices_by_status() {
    let server = make_server();

    let body: Value = server.get("/invoices?status=overdue").await.json();
    assert_eq!(ids(&body), vec![2]);

    let body: Value = server.get("/invoices?status=all").await.json();
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let server = make_server();

    let resp = server.get("/invoices?status=cancelled").await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = resp.json();
    assert_eq!(body["code"], "INVALID_VALUE");
    assert_eq!(body["details"]["value"], "cancelled");
}

#[tokio::test]
async fn test_status_options() {
    let server = make_server();

    let body: Value = server.get("/statuses/invoices").await.json();
    assert_eq!(
        body["data"],
        json!([
            {"value": "unpaid", "label": "Chưa thanh toán"},
            {"value": "paid", "label": "Đã thanh toán"},
            {"value": "overdue", "label": "Quá hạn"},
        ])
    );
}

// ==============================================================
// Get
// ==============================================================

#[tokio::test]
async fn test_get_invoice() {
    let server = make_server();

    let resp = server.get("/invoices/2").await;
    resp.assert_status(StatusCode::OK);

    let body: Value = resp.json();
    assert_eq!(body["room"], "P203");
    assert_eq!(body["amount"], 3_000_000);
    assert_eq!(body["dueDate"], "10/11/2025");
}

#[tokio::test]
async fn test_get_missing_record() {
    let server = make_server();

    let resp = server.get("/rooms/42").await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let body: Value = resp.json();
    assert_eq!(body["code"], "ENTITY_NOT_FOUND");
    assert_eq!(body["details"]["id"], 42);
}

// ==============================================================
// Create
// ==============================================================

#[tokio::test]
async fn test_create_room() {
    let server = make_server();

    let resp = server
        .post("/rooms")
        .json(&json!({
            "code": " P301 ",
            "area": "28",
            "price": "2.800.000",
            "floor": 3,
            "status": "occupied",
            "tenant": "Hoàng Văn E"
        }))
        .await;

    resp.assert_status(StatusCode::CREATED);

    let body: Value = resp.json();
    assert_eq!(body["id"], 7);
    assert_eq!(body["code"], "P301");
    assert_eq!(body["price"], 2_800_000);
    assert_eq!(body["floor"], 3);
    assert_eq!(body["tenant"], "Hoàng Văn E");

    let list: Value = server.get("/rooms").await.json();
    assert_eq!(list["count"], 7);
}

#[tokio::test]
async fn test_create_invoice_without_room_is_rejected() {
    let server = make_server();

    let resp = server
        .post("/invoices")
        .json(&json!({"room": "", "tenant": "ABC", "amount": "1000"}))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = resp.json();
    assert_eq!(body["code"], "MISSING_FIELDS");
    assert_eq!(body["message"], "Vui lòng nhập Phòng và Khách thuê");
    assert_eq!(body["details"]["fields"], json!(["room"]));

    let list: Value = server.get("/invoices").await.json();
    assert_eq!(list["count"], 3);
}

#[tokio::test]
async fn test_create_with_unknown_status_is_invalid_value() {
    let server = make_server();

    let resp = server
        .post("/rooms")
        .json(&json!({"code": "P301", "status": "sold"}))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = resp.json();
    assert_eq!(body["code"], "INVALID_VALUE");
    assert_eq!(body["details"]["field"], "body");

    // Same error shape as a bad PUT body
    let resp = server.put("/rooms/1").json(&json!({"status": "sold"})).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["code"], "INVALID_VALUE");

    let list: Value = server.get("/rooms").await.json();
    assert_eq!(list["count"], 6);
}

#[tokio::test]
async fn test_create_on_empty_collection_starts_at_one() {
    let server = make_server();
    for id in 1..=3 {
        server.delete(&format!("/tenants/{id}")).await;
    }

    let body: Value = server
        .post("/tenants")
        .json(&json!({"name": "Hoàng Văn E", "phone": "0933000111", "room": "P102"}))
        .await
        .json();

    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "active");
}

// ==============================================================
// Update
// ==============================================================

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let server = make_server();

    let resp = server
        .put("/rooms/2")
        .json(&json!({"price": "2.700.000"}))
        .await;

    resp.assert_status(StatusCode::OK);

    let body: Value = resp.json();
    assert_eq!(body["id"], 2);
    assert_eq!(body["code"], "P102");
    assert_eq!(body["area"], 25);
    assert_eq!(body["price"], 2_700_000);
    assert_eq!(body["status"], "available");
}

#[tokio::test]
async fn test_room_made_available_loses_tenant() {
    let server = make_server();

    let body: Value = server
        .put("/rooms/1")
        .json(&json!({"status": "available"}))
        .await
        .json();

    assert_eq!(body["status"], "available");
    assert_eq!(body["tenant"], Value::Null);
}

#[tokio::test]
async fn test_update_with_blank_required_field() {
    let server = make_server();

    let resp = server.put("/rooms/1").json(&json!({"code": "   "})).await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = resp.json();
    assert_eq!(body["message"], "Vui lòng nhập mã phòng");

    let room: Value = server.get("/rooms/1").await.json();
    assert_eq!(room["code"], "P101");
}

#[tokio::test]
async fn test_update_missing_record() {
    let server = make_server();

    let resp = server.put("/tenants/42").json(&json!({"name": "X"})).await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

// ==============================================================
// Delete
// ==============================================================

#[tokio::test]
async fn test_delete_room() {
    let server = make_server();

    let resp = server.delete("/rooms/3").await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/rooms").await.json();
    assert_eq!(ids(&body), vec![1, 2, 4, 5, 6]);

    server.get("/rooms/3").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_record_is_idempotent() {
    let server = make_server();

    server.delete("/invoices/42").await.assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/invoices").await.json();
    assert_eq!(body["count"], 3);
}

// ==============================================================
// Payments, stats, settings
// ==============================================================

#[tokio::test]
async fn test_pay_invoice() {
    let server = make_server();

    let resp = server.post("/invoices/2/pay").await;
    resp.assert_status(StatusCode::OK);

    let body: Value = resp.json();
    assert_eq!(body["status"], "paid");

    let overdue: Value = server.get("/invoices?status=overdue").await.json();
    assert_eq!(overdue["count"], 0);

    server.post("/invoices/42/pay").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats() {
    let server = make_server();

    let body: Value = server.get("/stats").await.json();
    assert_eq!(body["total_rooms"], 6);
    assert_eq!(body["occupied_rooms"], 4);
    assert_eq!(body["occupancy_rate"], 67);
    assert_eq!(body["paid_revenue"], 2_500_000);
    assert_eq!(body["outstanding"], 5_500_000);
    assert_eq!(body["overdue"][0]["room"], "P203");
    assert_eq!(body["recent_activities"], json!([]));
}

#[tokio::test]
async fn test_stats_lists_recent_activities() {
    let server = make_server();

    server.post("/invoices/2/pay").await.assert_status(StatusCode::OK);

    let body: Value = server.get("/stats").await.json();
    let recent = body["recent_activities"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["event"]["kind"], "notice");
    assert_eq!(recent[0]["event"]["message"], "Đã ghi nhận thanh toán cho Phạm Thị D");
    assert_eq!(recent[1]["event"]["action"], "updated");
    assert_eq!(recent[1]["event"]["entity_id"], 2);
}

#[tokio::test]
async fn test_settings() {
    let server = make_server();

    let body: Value = server.get("/settings").await.json();
    assert_eq!(body["property"]["name"], "Nhà trọ Xanh");
    assert_eq!(body["localization"]["locale"], "vi-VN");
}

#[tokio::test]
async fn test_save_settings_section() {
    let server = make_server();

    let resp = server
        .put("/settings/localization")
        .json(&json!({"locale": "en-US", "time_format": "12h"}))
        .await;

    resp.assert_status(StatusCode::OK);
    let body: Value = resp.json();
    assert_eq!(body["localization"]["locale"], "en-US");
    assert_eq!(body["localization"]["currency"], "VND");

    let settings: Value = server.get("/settings").await.json();
    assert_eq!(settings["localization"]["time_format"], "12h");

    // Edit buffers now group with the new locale
    let resp = server.put("/rooms/1").json(&json!({"area": 26})).await;
    resp.assert_status(StatusCode::OK);
    assert_eq!(resp.json::<Value>()["price"], 2_500_000);

    let activities: Value = server.get("/activities?limit=1").await.json();
    assert_eq!(activities["data"][0]["event"]["message"], "Lưu thay đổi phòng thành công");
}

#[tokio::test]
async fn test_save_settings_notices() {
    let server = make_server();

    for (section, patch, notice) in [
        ("general", json!({"name": "Nhà trọ Hồng"}), "Đã lưu thông tin chung"),
        ("notifications", json!({"sms": true}), "Đã lưu cài đặt thông báo"),
        ("billing", json!({"auto_reminder_days": 5}), "Đã lưu cài đặt hóa đơn"),
        ("account", json!({"email": "chu@example.com"}), "Đã lưu thông tin tài khoản"),
    ] {
        server
            .put(&format!("/settings/{section}"))
            .json(&patch)
            .await
            .assert_status(StatusCode::OK);

        let activities: Value = server.get("/activities?limit=1").await.json();
        assert_eq!(activities["data"][0]["event"]["message"], notice);
    }

    let settings: Value = server.get("/settings").await.json();
    assert_eq!(settings["property"]["name"], "Nhà trọ Hồng");
    assert_eq!(settings["notifications"]["sms"], true);
    assert_eq!(settings["billing"]["auto_reminder_days"], 5);
    assert_eq!(settings["owner"]["email"], "chu@example.com");
}

#[tokio::test]
async fn test_save_settings_rejects_bad_input() {
    let server = make_server();

    let resp = server.put("/settings/theme").json(&json!({"theme": "dark"})).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["details"]["field"], "section");

    let resp = server
        .put("/settings/billing")
        .json(&json!({"contract_warning_days": "soon"}))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["code"], "INVALID_VALUE");

    let settings: Value = server.get("/settings").await.json();
    assert_eq!(settings["billing"]["contract_warning_days"], 30);
}

#[tokio::test]
async fn test_activity_feed() {
    let server = make_server();

    server.delete("/rooms/3").await.assert_status(StatusCode::NO_CONTENT);
    server
        .post("/tenants")
        .json(&json!({"name": "Hoàng Văn E", "phone": "0933000111", "room": "P102"}))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = server.get("/activities").await.json();
    assert_eq!(body["count"], 4);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["event"]["message"], "Đã thêm khách thuê Hoàng Văn E");
    assert_eq!(data[1]["event"]["action"], "created");
    assert_eq!(data[1]["event"]["entity_type"], "tenant");
    assert_eq!(data[3]["event"]["action"], "deleted");
    assert_eq!(data[3]["event"]["entity_id"], 3);
    assert!(data[0]["sequence"].as_u64() > data[3]["sequence"].as_u64());

    let body: Value = server.get("/activities?limit=2").await.json();
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_health() {
    let server = make_server();
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
}

// ==============================================================
// Events
// ==============================================================

#[tokio::test]
async fn test_mutations_publish_events_and_notices() {
    let (server, mut rx) = make_server_with_events();

    server.delete("/rooms/3").await.assert_status(StatusCode::NO_CONTENT);

    let deleted = rx.recv().await.unwrap();
    assert_eq!(deleted.event.action(), "deleted");
    assert_eq!(deleted.event.entity_type(), Some("room"));
    assert_eq!(deleted.event.entity_id(), Some(3));

    let notice = rx.recv().await.unwrap();
    match notice.event {
        DeskEvent::Notice(notice) => assert_eq!(notice.message, "Đã xóa phòng P103"),
        other => panic!("expected a notice, got {:?}", other),
    }
    assert!(notice.sequence > deleted.sequence);
}

#[tokio::test]
async fn test_rejected_submit_publishes_error_notice() {
    let (server, mut rx) = make_server_with_events();

    server
        .post("/tenants")
        .json(&json!({"name": "Hoàng Văn E"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let envelope = rx.recv().await.unwrap();
    match envelope.event {
        DeskEvent::Notice(notice) => {
            assert_eq!(notice.level, NoticeLevel::Error);
            assert_eq!(notice.message, "Vui lòng nhập tối thiểu Tên, Số điện thoại và Mã phòng");
        }
        other => panic!("expected a notice, got {:?}", other),
    }
}
