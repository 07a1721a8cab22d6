//! Response envelope
//!
//! Every API body (except `/health`) is wrapped as
//! `{ success, data | error, meta: { timestamp, version } }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use mpm_common::time::{format_timestamp, now};

/// Envelope version reported in `meta.version`
pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub timestamp: String,
    pub version: &'static str,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: format_timestamp(&now()),
            version: API_VERSION,
        }
    }
}

/// Success body
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub meta: Meta,
}

/// Successful handler result with its status code
#[derive(Debug)]
pub struct Success<T> {
    pub status: StatusCode,
    pub data: T,
}

impl<T> Success<T> {
    /// 200 OK
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            success: true,
            data: self.data,
            meta: Meta::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
