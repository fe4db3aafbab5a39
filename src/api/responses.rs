//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain acknowledgement, e.g. after a stop or delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error body returned with every non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub version: String,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(uptime: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            app: "udo".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
            timestamp,
        }
    }
}
