//! Diary HTTP API Tests
//!
//! Drives the full router in-process: routing, status codes, JSON bodies,
//! validation, and not-found handling.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use diarydb::diary::{
    DiaryEntry, DiaryError, DiaryRepository, DiaryResult, DiaryService, InMemoryDiaryRepository,
    ManualClock, NewDiaryEntry,
};
use diarydb::http_server::HttpServer;

// =============================================================================
// Test Utilities
// =============================================================================

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 10, 7, 30, 0).unwrap()
}

fn app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let service =
        DiaryService::with_clock(Arc::new(InMemoryDiaryRepository::new()), clock.clone());
    (HttpServer::new(service).router(), clock)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn create(router: &Router, title: &str, content: &str, author: &str) -> Value {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/diaries",
        Some(json!({"title": title, "content": content, "author": author})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json_body(&body)
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_diary() {
    let (router, _) = app();
    let created = create(&router, "새로운 일기", "새로운 내용", "새로운 작성자").await;

    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["title"], "새로운 일기");
    assert_eq!(created["content"], "새로운 내용");
    assert_eq!(created["author"], "새로운 작성자");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let created_at: DateTime<Utc> =
        serde_json::from_value(created["createdAt"].clone()).unwrap();
    assert_eq!(created_at, start());
}

#[tokio::test]
async fn test_create_blank_title_is_bad_request() {
    let (router, _) = app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/diaries",
        Some(json!({"title": "", "content": "내용", "author": "작성자"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json_body(&body);
    assert_eq!(body["code"], 400);
    assert_eq!(body["fields"][0]["field"], "title");
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let (router, _) = app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/diaries",
        Some(json!({"title": "t".repeat(101), "author": "a".repeat(51)})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<String> = json_body(&body)["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["title", "content", "author"]);
}

#[tokio::test]
async fn test_create_malformed_json_is_bad_request() {
    let (router, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/diaries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_get_diary_round_trip() {
    let (router, _) = app();
    let created = create(&router, "조회할 일기", "조회할 내용", "조회할 작성자").await;

    let uri = format!("/api/diaries/{}", created["id"]);
    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), created);
}

#[tokio::test]
async fn test_get_missing_diary_is_empty_not_found() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::GET, "/api/diaries/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_get_non_numeric_id_is_bad_request() {
    let (router, _) = app();
    let (status, _) = send(&router, Method::GET, "/api/diaries/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_all_diaries() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::GET, "/api/diaries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));

    create(&router, "일기1", "내용1", "작성자1").await;
    create(&router, "일기2", "내용2", "작성자2").await;

    let (status, body) = send(&router, Method::GET, "/api/diaries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_diaries_by_author() {
    let (router, _) = app();
    create(&router, "홍길동의 일기1", "내용1", "홍길동").await;
    create(&router, "홍길동의 일기2", "내용2", "홍길동").await;
    create(&router, "김철수의 일기", "내용3", "김철수").await;

    // 홍길동
    let (status, body) = send(
        &router,
        Method::GET,
        "/api/diaries/author/%ED%99%8D%EA%B8%B8%EB%8F%99",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let found = json_body(&body);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|d| d["author"] == "홍길동"));

    // "홍길동 " with a trailing space matches nothing
    let (status, body) = send(
        &router,
        Method::GET,
        "/api/diaries/author/%ED%99%8D%EA%B8%B8%EB%8F%99%20",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn test_search_by_title_keyword() {
    let (router, _) = app();
    create(&router, "summer trip", "beach", "a").await;
    create(&router, "Summer plans", "work", "a").await;
    create(&router, "winter", "snow", "a").await;

    let (status, body) = send(&router, Method::GET, "/api/diaries/search?keyword=summer", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = json_body(&body);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["title"], "summer trip");

    let (status, _) = send(&router, Method::GET, "/api/diaries/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_diary() {
    let (router, clock) = app();
    let created = create(&router, "원래 제목", "원래 내용", "원래 작성자").await;
    let uri = format!("/api/diaries/{}", created["id"]);

    clock.advance(Duration::minutes(3));
    let (status, body) = send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({"title": "수정된 제목", "content": "수정된 내용", "author": "다른 사람"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = json_body(&body);
    assert_eq!(updated["title"], "수정된 제목");
    assert_eq!(updated["content"], "수정된 내용");
    assert_eq!(updated["author"], "원래 작성자");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let updated_at: DateTime<Utc> =
        serde_json::from_value(updated["updatedAt"].clone()).unwrap();
    assert_eq!(updated_at, start() + Duration::minutes(3));
}

#[tokio::test]
async fn test_update_title_only_keeps_content() {
    let (router, clock) = app();
    let created = create(&router, "원래 제목", "원래 내용", "원래 작성자").await;
    let uri = format!("/api/diaries/{}", created["id"]);

    clock.advance(Duration::seconds(1));
    let (status, body) = send(&router, Method::PUT, &uri, Some(json!({"title": "새 제목"}))).await;
    assert_eq!(status, StatusCode::OK);

    let updated = json_body(&body);
    assert_eq!(updated["content"], "원래 내용");
    let before: DateTime<Utc> = serde_json::from_value(created["updatedAt"].clone()).unwrap();
    let after: DateTime<Utc> = serde_json::from_value(updated["updatedAt"].clone()).unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn test_update_content_too_long_is_bad_request() {
    let (router, _) = app();
    let created = create(&router, "제목", "내용", "작성자").await;
    let uri = format!("/api/diaries/{}", created["id"]);

    let (status, body) = send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({"content": "x".repeat(1001)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["fields"][0]["field"], "content");

    // Unchanged
    let (_, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(json_body(&body)["content"], "내용");
}

#[tokio::test]
async fn test_update_missing_diary_is_not_found() {
    let (router, _) = app();
    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/diaries/999",
        Some(json!({"title": "수정된 제목"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_create_get_delete_scenario() {
    let (router, _) = app();
    let created = create(&router, "새로운 일기", "새로운 내용", "새로운 작성자").await;
    let uri = format!("/api/diaries/{}", created["id"]);

    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), created);

    let (status, body) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again is a failure, not a silent success
    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Storage failures and health
// =============================================================================

struct OfflineRepository;

impl DiaryRepository for OfflineRepository {
    fn save(&self, _: NewDiaryEntry) -> DiaryResult<DiaryEntry> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn update(&self, _: &DiaryEntry) -> DiaryResult<()> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn find_by_id(&self, _: i64) -> DiaryResult<Option<DiaryEntry>> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn find_all(&self) -> DiaryResult<Vec<DiaryEntry>> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn find_by_author(&self, _: &str) -> DiaryResult<Vec<DiaryEntry>> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn find_by_title_containing(&self, _: &str) -> DiaryResult<Vec<DiaryEntry>> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn exists_by_id(&self, _: i64) -> DiaryResult<bool> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
    fn delete_by_id(&self, _: i64) -> DiaryResult<()> {
        Err(DiaryError::Storage("database offline".to_string()))
    }
}

#[tokio::test]
async fn test_storage_failure_is_server_error_not_not_found() {
    let router = HttpServer::new(DiaryService::new(Arc::new(OfflineRepository))).router();

    let (status, body) = send(&router, Method::GET, "/api/diaries/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["code"], 500);

    let (status, _) = send(&router, Method::DELETE, "/api/diaries/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let (router, _) = app();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "ok");
}
