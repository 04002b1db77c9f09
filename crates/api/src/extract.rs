//! Request extractors that reject through [`AppError`].
//!
//! Axum's own `Json` rejection answers with a plain-text body and a 415/422
//! status. Wrapping it keeps malformed bodies inside the response envelope
//! with a 400, the same as any other invalid input.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body whose rejection renders as a 400 envelope.
///
/// ```ignore
/// async fn create(JsonBody(input): JsonBody<GiftInput>) -> AppResult<...> { ... }
/// ```
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected JSON body");
                Err(AppError::BadRequest(rejection.body_text()))
            }
        }
    }
}
