//! # Diary HTTP Server Module
//!
//! Axum server exposing the diary API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/diaries/*` - Diary CRUD

pub mod config;
pub mod diary_routes;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use diary_routes::DiaryState;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
