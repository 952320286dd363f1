use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use wedding_api::{AppStateInner, router, uploads::UploadStorage};
use wedding_db::{Database, Store};

const BOUNDARY: &str = "wedding-test-boundary";

async fn app() -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let store = Store::new(Database::open_in_memory().unwrap());
    let uploads = UploadStorage::new(tmp.path().join("uploads")).await.unwrap();
    let state = Arc::new(AppStateInner { store, uploads });
    (router(state), tmp)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let body = res.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_photo(description: &str, order: &str, file_name: &str, data: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\n{description}\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"orderNum\"\r\n\r\n{order}\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{file_name}\"\r\n\
         Content-Type: image/jpeg\r\n\r\n{data}\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
    );
    Request::post("/api/photos")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _tmp) = app().await;
    let (status, body) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn gallery_starts_with_placeholders_in_order() {
    let (app, _tmp) = app().await;
    let (status, body) = send_json(&app, get("/api/photos")).await;
    assert_eq!(status, StatusCode::OK);

    let orders: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["orderNum"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2]);
}

#[tokio::test]
async fn photo_by_url_then_update_and_delete() {
    let (app, _tmp) = app().await;

    let (status, created) = send_json(
        &app,
        with_json(
            "POST",
            "/api/photos",
            json!({ "url": "https://example.com/vows.jpg", "description": "vows", "orderNum": "0" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["url"], json!("https://example.com/vows.jpg"));
    let id = created["photoId"].as_i64().unwrap();

    // order 0 sorts ahead of the placeholders
    assert_eq!(created["photos"][0]["id"].as_i64(), Some(id));
    assert_eq!(created["photos"].as_array().unwrap().len(), 3);

    let (status, updated) = send_json(
        &app,
        with_json(
            "PUT",
            &format!("/api/photos/{}", id),
            json!({ "description": "the vows", "orderNum": 9 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated["photo"],
        json!({ "id": id, "description": "the vows", "orderNum": 9 })
    );

    let (_, photos) = send_json(&app, get("/api/photos")).await;
    let last = photos.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["id"].as_i64(), Some(id));

    let (status, deleted) = send_json(
        &app,
        Request::delete(format!("/api/photos/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "success": true }));

    let (_, photos) = send_json(&app, get("/api/photos")).await;
    assert_eq!(photos.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_of_missing_photo_succeeds() {
    let (app, _tmp) = app().await;
    let (status, body) = send_json(
        &app,
        with_json(
            "PUT",
            "/api/photos/4040",
            json!({ "description": "nobody", "orderNum": "x" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["photo"],
        json!({ "id": 4040, "description": "nobody", "orderNum": 0 })
    );
}

#[tokio::test]
async fn photo_without_url_or_file_is_rejected() {
    let (app, _tmp) = app().await;
    let (status, body) = send_json(
        &app,
        with_json("POST", "/api/photos", json!({ "description": "no image" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn uploaded_photo_is_stored_and_served() {
    let (app, _tmp) = app().await;
    let (status, created) = send_json(
        &app,
        multipart_photo("first dance", "5th", "Dance.JPG", "JPEGDATA"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let url = created["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".jpg"));

    let photo = created["photos"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["url"] == json!(url))
        .unwrap()
        .clone();
    assert_eq!(photo["description"], json!("first dance"));
    assert_eq!(photo["orderNum"], json!(5));

    let (status, body) = send(&app, get(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"JPEGDATA");
}

#[tokio::test]
async fn guest_lifecycle() {
    let (app, _tmp) = app().await;

    let (status, body) = send_json(
        &app,
        with_json("POST", "/api/guests", json!({ "name": "Ana", "attendance": "attending" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("phone"));

    for (name, phone) in [("Ana", "555-0100"), ("Ben", "555-0199")] {
        let (status, body) = send_json(
            &app,
            with_json(
                "POST",
                "/api/guests",
                json!({
                    "name": name,
                    "phone": phone,
                    "message": "See you there",
                    "attendance": "attending"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
    }

    let (_, guests) = send_json(&app, get("/api/guests")).await;
    let names: Vec<&str> = guests
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ben", "Ana"]);

    let (_, found) = send_json(&app, get("/api/guests?search=0199")).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    let ben = found[0]["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        Request::delete(format!("/api/guests/{}", ben))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, guests) = send_json(&app, get("/api/guests")).await;
    assert_eq!(guests.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn likes_count_stats_and_export() {
    let (app, _tmp) = app().await;

    let (status, body) = send(&app, get("/api/likes/export")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"id,ip,created_at\n");

    for _ in 0..2 {
        let (status, stats) = send_json(
            &app,
            Request::post("/api/likes")
                .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["success"], json!(true));
        assert!(stats["totalLikes"].as_i64().unwrap() >= 1);
    }

    let (_, count) = send_json(&app, get("/api/likes/count")).await;
    assert_eq!(count, json!({ "count": 2 }));

    let (_, stats) = send_json(&app, get("/api/likes/stats")).await;
    assert_eq!(stats["totalLikes"], json!(2));
    assert_eq!(stats["todayLikes"], json!(2));
    assert_eq!(stats["trend"][0]["percentage"], json!(100));

    let res = app.clone().oneshot(get("/api/likes/export")).await.unwrap();
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=likes.csv"
    );
    assert!(
        res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let body = res.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(",203.0.113.7,"));
}
