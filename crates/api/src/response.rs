//! Uniform response envelope.
//!
//! Every gift endpoint answers with `{ "status", "data", "error" }`:
//! successes carry the payload and an empty error list, failures carry
//! `data: null` and a single message. Use [`Envelope`] instead of ad-hoc
//! `serde_json::json!` bodies so the shape stays identical everywhere.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard `{ "status": u16, "data": T | null, "error": [String] }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Envelope::success(StatusCode::CREATED, gift.to_record()))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub data: Option<T>,
    pub error: Vec<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            data: Some(data),
            error: Vec::new(),
        }
    }
}

impl Envelope<()> {
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: None,
            error: vec![message.into()],
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_shape() {
        let body = serde_json::to_value(Envelope::success(StatusCode::OK, vec![1, 2])).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": 200, "data": [1, 2], "error": []})
        );
    }

    #[test]
    fn failure_shape() {
        let body = serde_json::to_value(Envelope::failure(
            StatusCode::BAD_REQUEST,
            "Invalid gift ID format",
        ))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": 400,
                "data": null,
                "error": ["Invalid gift ID format"],
            })
        );
    }

    #[test]
    fn response_status_follows_envelope() {
        let response = Envelope::success(StatusCode::CREATED, "x").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
