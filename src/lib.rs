//! diarydb - diary entries over HTTP
//!
//! Layers, leaves first:
//! - [`diary`]: entries, stores, validation, and the diary service
//! - [`http_server`]: axum routes mapping requests onto the service
//! - [`cli`]: configuration, logging, and process bootstrap

pub mod cli;
pub mod diary;
pub mod http_server;
