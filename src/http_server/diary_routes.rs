//! Diary HTTP Routes
//!
//! CRUD endpoints for diary entries, nested under `/api/diaries`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::errors::ApiResult;
use crate::diary::{
    CreateDiaryRequest, DiaryRepository, DiaryResponse, DiaryService, InMemoryDiaryRepository,
    UpdateDiaryRequest,
};

// ==================
// Shared State
// ==================

/// Diary state shared across handlers
pub struct DiaryState {
    pub service: DiaryService,
}

impl DiaryState {
    pub fn new(service: DiaryService) -> Self {
        Self { service }
    }

    /// State over a fresh in-memory store
    pub fn in_memory() -> Self {
        let repository: Arc<dyn DiaryRepository> = Arc::new(InMemoryDiaryRepository::new());
        Self::new(DiaryService::new(repository))
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
}

// ==================
// Diary Routes
// ==================

/// Create diary routes
pub fn diary_routes(state: Arc<DiaryState>) -> Router {
    Router::new()
        .route("/", get(list_diaries_handler).post(create_diary_handler))
        .route("/search", get(search_diaries_handler))
        .route("/author/:author", get(diaries_by_author_handler))
        .route(
            "/:id",
            get(get_diary_handler)
                .put(update_diary_handler)
                .delete(delete_diary_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_diary_handler(
    State(state): State<Arc<DiaryState>>,
    payload: Result<Json<CreateDiaryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DiaryResponse>)> {
    let Json(request) = payload?;
    let created = state.service.create_diary(request.validate()?)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_diary_handler(
    State(state): State<Arc<DiaryState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DiaryResponse>> {
    let Path(id) = id?;
    Ok(Json(state.service.get_diary(id)?))
}

async fn list_diaries_handler(
    State(state): State<Arc<DiaryState>>,
) -> ApiResult<Json<Vec<DiaryResponse>>> {
    Ok(Json(state.service.get_all_diaries()?))
}

async fn update_diary_handler(
    State(state): State<Arc<DiaryState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDiaryRequest>, JsonRejection>,
) -> ApiResult<Json<DiaryResponse>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    request.validate()?;
    Ok(Json(state.service.update_diary(id, request)?))
}

async fn delete_diary_handler(
    State(state): State<Arc<DiaryState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.service.delete_diary(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn diaries_by_author_handler(
    State(state): State<Arc<DiaryState>>,
    author: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<DiaryResponse>>> {
    let Path(author) = author?;
    Ok(Json(state.service.get_diaries_by_author(&author)?))
}

async fn search_diaries_handler(
    State(state): State<Arc<DiaryState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<DiaryResponse>>> {
    let Query(query) = query?;
    Ok(Json(state.service.search_diaries(&query.keyword)?))
}
