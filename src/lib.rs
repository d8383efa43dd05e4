//! Cafemetrics - cafeteria analytics micro-service
//!
//! Answers natural-language questions about a cafeteria ordering database:
//! a fixed set of aggregate SQL queries feeds a deterministic forecast and
//! alert engine, and an LLM turns the computed metrics into a conversational
//! answer. The engine is fully usable without the HTTP surface, and every
//! failure degrades its portion of the output instead of the response.

pub mod cli;
mod config;
pub mod core;
pub mod db;
pub mod engine;
pub mod routes;
pub mod utils;

pub use config::{
    AnalyticsConfig, DatabaseConfig, LLMConfig, LoggingConfig, ServerConfig, Settings,
};
pub use db::Database;
pub use engine::response::AnalyzeResponse;
pub use engine::AnalyticsEngine;
