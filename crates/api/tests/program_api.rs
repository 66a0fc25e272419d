//! HTTP-level integration tests for the `/programs` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, with an in-memory object storage.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with_storage, enroll, enrollment_form, get,
    post_multipart, put_json, MemoryStorage, MultipartForm, GIF, JPEG, PNG,
};
use sqlx::PgPool;

fn listing_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

fn slot_orders(json: &serde_json::Value) -> Vec<i64> {
    json["data"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["slot_order"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Enrollment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_with_images_assigns_slots_in_input_order(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::default());
    let app = build_test_app_with_storage(pool.clone(), storage.clone());

    let form = enrollment_form("Gallery Walk")
        .png("first.png")
        .file("images", "second.jpg", "image/jpeg", JPEG)
        .png("third.png");
    let id = enroll(app, form).await;

    let app = build_test_app_with_storage(pool, storage.clone());
    let json = body_json(get(app, &format!("/api/v1/programs/{id}")).await).await;

    assert_eq!(slot_orders(&json), vec![0, 1, 2]);
    let urls: Vec<String> = json["data"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["url"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(urls, storage.urls());
    assert!(urls[0].starts_with("https://cdn.test/program/"));
    assert!(urls[1].ends_with(".jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_returns_created_program_detail(pool: PgPool) {
    let id = enroll(build_test_app(pool.clone()), enrollment_form("Beach Walk")).await;

    let response = get(build_test_app(pool), &format!("/api/v1/programs/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let program = &json["data"]["program"];
    assert_eq!(program["name"], "Beach Walk");
    assert_eq!(program["price"], 15000);
    assert_eq!(program["latitude"], 33.45);
    assert_eq!(json["data"]["host"]["email"], "host@example.com");
    assert_eq!(json["data"]["images"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_upload_failure_returns_502_and_stores_nothing(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::failing_at(1));
    let app = build_test_app_with_storage(pool.clone(), storage.clone());

    let form = enrollment_form("Doomed").png("a.png").png("b.png").png("c.png");
    let response = post_multipart(app, "/api/v1/programs", form).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "IMAGE_UPLOAD_FAILED");
    // First upload went through, the batch stopped at the failure.
    assert_eq!(storage.upload_count(), 1);

    let programs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM programs")
        .fetch_one(&pool)
        .await
        .unwrap();
    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(programs, 0);
    assert_eq!(members, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_rejects_invalid_coordinates(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::default());
    let app = build_test_app_with_storage(pool, storage.clone());

    let form = enrollment_form("Nowhere")
        .text("latitude", "95.0")
        .png("a.png");
    // Later parts override earlier ones with the same name.
    let response = post_multipart(app, "/api/v1/programs", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(storage.upload_count(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_accepts_gif_images(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::default());
    let app = build_test_app_with_storage(pool, storage.clone());

    let form = enrollment_form("Animated").file("images", "wave.gif", "image/gif", GIF);
    let response = post_multipart(app, "/api/v1/programs", form).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(storage.upload_count(), 1);
    assert!(storage.urls()[0].ends_with(".gif"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_rejects_non_image_upload(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::default());
    let app = build_test_app_with_storage(pool, storage.clone());

    let form = enrollment_form("Text file").file("images", "notes.txt", "text/plain", b"hi");
    let response = post_multipart(app, "/api/v1/programs", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(storage.upload_count(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_rejects_mismatched_content_type(pool: PgPool) {
    let app = build_test_app(pool);
    let form = enrollment_form("Liar").file("images", "a.jpg", "image/jpeg", PNG);
    let response = post_multipart(app, "/api/v1/programs", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_missing_field_returns_400(pool: PgPool) {
    let app = build_test_app(pool);
    let form = MultipartForm::new()
        .text("host_email", "host@example.com")
        .text("host_name", "Host");
    let response = post_multipart(app, "/api/v1/programs", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_rejects_too_many_images(pool: PgPool) {
    let app = build_test_app(pool);
    // test_config allows 5 per request.
    let mut form = enrollment_form("Crowded");
    for i in 0..6 {
        form = form.png(&format!("{i}.png"));
    }
    let response = post_multipart(app, "/api/v1/programs", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_puts_covered_programs_first_newest_first(pool: PgPool) {
    let bare_old = enroll(build_test_app(pool.clone()), enrollment_form("Bare old")).await;
    let covered_old = enroll(
        build_test_app(pool.clone()),
        enrollment_form("Covered old").png("a.png"),
    )
    .await;
    let bare_new = enroll(build_test_app(pool.clone()), enrollment_form("Bare new")).await;
    let covered_new = enroll(
        build_test_app(pool.clone()),
        enrollment_form("Covered new").png("a.png").png("b.png"),
    )
    .await;

    let json = body_json(get(build_test_app(pool), "/api/v1/programs").await).await;

    assert_eq!(
        listing_ids(&json),
        vec![covered_new, covered_old, bare_new, bare_old]
    );
    let programs = json["data"].as_array().unwrap();
    assert!(programs[0]["main_image_url"].is_string());
    assert!(programs[1]["main_image_url"].is_string());
    assert!(programs[2]["main_image_url"].is_null());
    assert!(programs[3]["main_image_url"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_excludes_closed_programs(pool: PgPool) {
    let open = enroll(build_test_app(pool.clone()), enrollment_form("Open")).await;
    let closed = enroll(build_test_app(pool.clone()), enrollment_form("Closed")).await;
    sqlx::query("UPDATE programs SET status_id = 2 WHERE id = $1")
        .bind(closed)
        .execute(&pool)
        .await
        .unwrap();

    let json = body_json(get(build_test_app(pool), "/api/v1/programs").await).await;
    assert_eq!(listing_ids(&json), vec![open]);
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn date_and_chat_link_lookups(pool: PgPool) {
    let id = enroll(build_test_app(pool.clone()), enrollment_form("Walk")).await;

    let date = body_json(
        get(build_test_app(pool.clone()), &format!("/api/v1/programs/{id}/date")).await,
    )
    .await;
    assert_eq!(date["data"]["program_id"], id);
    assert_eq!(date["data"]["start_date_time"], "2026-05-01T09:00:00Z");
    assert_eq!(date["data"]["spend_time"], "2 hours");

    let chat = body_json(
        get(build_test_app(pool), &format!("/api/v1/programs/{id}/chat-link")).await,
    )
    .await;
    assert_eq!(chat["data"]["chat_link"], "https://chat.example.com/walk");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookups_on_missing_program_return_404(pool: PgPool) {
    for path in [
        "/api/v1/programs/999999",
        "/api/v1/programs/999999/date",
        "/api/v1/programs/999999/chat-link",
    ] {
        let response = get(build_test_app(pool.clone()), path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
}

// ---------------------------------------------------------------------------
// Add images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_images_appends_after_existing_slots(pool: PgPool) {
    let id = enroll(
        build_test_app(pool.clone()),
        enrollment_form("Gallery").png("a.png").png("b.png"),
    )
    .await;

    let response = post_multipart(
        build_test_app(pool.clone()),
        &format!("/api/v1/programs/{id}/images"),
        MultipartForm::new().png("c.png").png("d.png"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let new_slots: Vec<i64> = created["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["slot_order"].as_i64().unwrap())
        .collect();
    assert_eq!(new_slots, vec![2, 3]);

    let json = body_json(get(build_test_app(pool), &format!("/api/v1/programs/{id}")).await).await;
    assert_eq!(slot_orders(&json), vec![0, 1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sequential_single_additions_have_no_gaps(pool: PgPool) {
    let id = enroll(build_test_app(pool.clone()), enrollment_form("Empty gallery")).await;

    for name in ["first.png", "second.png"] {
        let response = post_multipart(
            build_test_app(pool.clone()),
            &format!("/api/v1/programs/{id}/images"),
            MultipartForm::new().png(name),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(build_test_app(pool.clone()), &format!("/api/v1/programs/{id}")).await).await;
    assert_eq!(slot_orders(&json), vec![1, 2]);

    // Additions never fill the cover slot, so the program still lists
    // without a cover.
    let listing = body_json(get(build_test_app(pool), "/api/v1/programs").await).await;
    assert_eq!(listing_ids(&listing), vec![id]);
    assert!(listing["data"][0]["main_image_url"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_images_to_missing_program_returns_404(pool: PgPool) {
    let storage = Arc::new(MemoryStorage::default());
    let response = post_multipart(
        build_test_app_with_storage(pool, storage.clone()),
        "/api/v1/programs/999999/images",
        MultipartForm::new().png("a.png"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(storage.upload_count(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_images_without_files_returns_400(pool: PgPool) {
    let id = enroll(build_test_app(pool.clone()), enrollment_form("Walk")).await;
    let response = post_multipart(
        build_test_app(pool),
        &format!("/api/v1/programs/{id}/images"),
        MultipartForm::new().text("note", "nothing attached"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update details
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_details_changes_only_target_fields(pool: PgPool) {
    let id = enroll(
        build_test_app(pool.clone()),
        enrollment_form("Walk").png("a.png"),
    )
    .await;
    let before = body_json(get(build_test_app(pool.clone()), &format!("/api/v1/programs/{id}")).await).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/programs/{id}/details"),
        serde_json::json!({
            "program_description": "Updated description",
            "road_name_address": "99 New-ro, Seogwipo",
            "host_description": "Updated host bio",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let after = body_json(get(build_test_app(pool), &format!("/api/v1/programs/{id}")).await).await;
    let (b, a) = (&before["data"], &after["data"]);

    assert_eq!(a["program"]["description"], "Updated description");
    assert_eq!(a["program"]["road_name_address"], "99 New-ro, Seogwipo");
    assert_eq!(a["host"]["description"], "Updated host bio");

    for field in [
        "name",
        "category",
        "start_date_time",
        "price",
        "chat_link",
        "spend_time",
        "latitude",
        "longitude",
        "status_id",
        "member_id",
    ] {
        assert_eq!(a["program"][field], b["program"][field], "program.{field}");
    }
    for field in ["email", "name"] {
        assert_eq!(a["host"][field], b["host"][field], "host.{field}");
    }
    assert_eq!(a["images"], b["images"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_details_on_missing_program_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/api/v1/programs/999999/details",
        serde_json::json!({
            "program_description": "x",
            "road_name_address": "y",
            "host_description": "z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_details_rejects_empty_address(pool: PgPool) {
    let id = enroll(build_test_app(pool.clone()), enrollment_form("Walk")).await;
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/programs/{id}/details"),
        serde_json::json!({
            "program_description": "x",
            "road_name_address": "",
            "host_description": "z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Malformed requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_details_missing_field_returns_json_400(pool: PgPool) {
    let id = enroll(build_test_app(pool.clone()), enrollment_form("Walk")).await;
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/programs/{id}/details"),
        serde_json::json!({ "program_description": "only this" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("road_name_address"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_returns_json_400(pool: PgPool) {
    for path in [
        "/api/v1/programs/abc",
        "/api/v1/programs/abc/date",
        "/api/v1/programs/abc/chat-link",
    ] {
        let response = get(build_test_app(pool.clone()), path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enroll_without_multipart_body_returns_json_400(pool: PgPool) {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/programs")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{}"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(build_test_app(pool), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
