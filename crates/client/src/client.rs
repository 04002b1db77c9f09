use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use giftlist_core::gift::{
    parse_gift_id, validate_base_price, GiftInput, GiftPatch, GiftRecord,
};
use giftlist_core::report::{build_report, GiftReport};
use serde::de::DeserializeOwned;

use crate::envelope::{decode_data, decode_failure};
use crate::error::ClientError;

/// HTTP client for the gift catalog API.
///
/// Besides the typed calls it keeps the message of the most recent failure
/// ([`last_error`](Self::last_error)) and whether a call is in flight
/// ([`is_loading`](Self::is_loading)), so a UI can render both without
/// threading results around.
pub struct GiftsClient {
    client: reqwest::Client,
    base_url: String,
    last_error: Mutex<Option<String>>,
    in_flight: AtomicUsize,
}

impl GiftsClient {
    /// Create a client for an API rooted at `base_url`, e.g.
    /// `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            last_error: Mutex::new(None),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// GET /gifts. Newest first; empty when the API returns `data: null`.
    pub async fn get_all_gifts(&self) -> Result<Vec<GiftRecord>, ClientError> {
        self.track(self.fetch_all()).await
    }

    /// GET /gifts/{id}. `Ok(None)` when the gift does not exist.
    pub async fn get_gift_by_id(&self, id: &str) -> Result<Option<GiftRecord>, ClientError> {
        self.track(self.fetch_one(id)).await
    }

    /// POST /gifts.
    pub async fn create_gift(&self, input: &GiftInput) -> Result<GiftRecord, ClientError> {
        self.track(self.send_create(input)).await
    }

    /// PUT /gifts/{id} with any subset of the four fields.
    pub async fn update_gift(
        &self,
        id: &str,
        patch: &GiftPatch,
    ) -> Result<GiftRecord, ClientError> {
        self.track(self.send_update(id, patch)).await
    }

    /// DELETE /gifts/{id}.
    pub async fn delete_gift(&self, id: &str) -> Result<(), ClientError> {
        self.track(self.send_delete(id)).await
    }

    /// Fetch every gift and aggregate the reporting figures locally.
    pub async fn report(&self) -> Result<GiftReport, ClientError> {
        let gifts = self.get_all_gifts().await?;
        Ok(build_report(&gifts))
    }

    /// Message of the most recent failed call, if not cleared since.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear_error(&self) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// True while at least one call is awaiting the API.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    // ---- private helpers ----

    async fn fetch_all(&self) -> Result<Vec<GiftRecord>, ClientError> {
        let response = self.client.get(self.url("/gifts")).send().await?;
        Ok(Self::parse_response::<Vec<GiftRecord>>(response)
            .await?
            .unwrap_or_default())
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<GiftRecord>, ClientError> {
        parse_gift_id(id)?;
        let response = self
            .client
            .get(self.url(&format!("/gifts/{id}")))
            .send()
            .await?;
        match Self::parse_response::<GiftRecord>(response).await {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    async fn send_create(&self, input: &GiftInput) -> Result<GiftRecord, ClientError> {
        if let Some(price) = input.base_price {
            validate_base_price(price)?;
        }
        let response = self
            .client
            .post(self.url("/gifts"))
            .json(input)
            .send()
            .await?;
        Self::require_data(response).await
    }

    async fn send_update(&self, id: &str, patch: &GiftPatch) -> Result<GiftRecord, ClientError> {
        parse_gift_id(id)?;
        if let Some(Some(price)) = patch.base_price {
            validate_base_price(price)?;
        }
        let response = self
            .client
            .put(self.url(&format!("/gifts/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::require_data(response).await
    }

    async fn send_delete(&self, id: &str) -> Result<(), ClientError> {
        parse_gift_id(id)?;
        let response = self
            .client
            .delete(self.url(&format!("/gifts/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run one call with the loading counter raised.
    ///
    /// The previous error is cleared when the call starts and replaced by
    /// this call's error if it fails.
    async fn track<T>(
        &self,
        call: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        let _guard = InFlight::enter(&self.in_flight);
        self.clear_error();
        let result = call.await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Gift API call failed");
            *self
                .last_error
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(e.to_string());
        }
        result
    }

    /// Decode a response into its `data` payload, or the API error.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(decode_failure(status, &body));
        }
        decode_data(&body)
    }

    async fn require_data<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        Self::parse_response(response)
            .await?
            .ok_or_else(|| ClientError::UnexpectedResponse("response carried no data".into()))
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await?;
        Err(decode_failure(status, &body))
    }
}

/// Keeps the in-flight counter raised for as long as it lives.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Nothing listens here; a request that got past validation would fail
    /// with `ClientError::Http`.
    const DEAD_URL: &str = "http://127.0.0.1:9";

    fn input(price: f64) -> GiftInput {
        GiftInput {
            title: "Mug".into(),
            description: "Ceramic".into(),
            image_url: "https://example.com/mug.jpg".into(),
            base_price: Some(price),
        }
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_locally() {
        let client = GiftsClient::new(DEAD_URL);

        let err = client.get_gift_by_id("invalid-id").await.unwrap_err();
        assert_matches!(err, ClientError::Validation(msg) if msg == "Invalid gift ID format");

        let err = client.delete_gift("123").await.unwrap_err();
        assert_matches!(err, ClientError::Validation(_));

        let err = client
            .update_gift("nope", &GiftPatch::default())
            .await
            .unwrap_err();
        assert_matches!(err, ClientError::Validation(_));
    }

    #[tokio::test]
    async fn negative_price_is_rejected_locally() {
        let client = GiftsClient::new(DEAD_URL);

        let err = client.create_gift(&input(-100.0)).await.unwrap_err();
        assert_matches!(
            err,
            ClientError::Validation(msg) if msg == "Base price cannot be negative"
        );

        let patch = GiftPatch {
            base_price: Some(Some(-1.0)),
            ..GiftPatch::default()
        };
        let err = client
            .update_gift("5fe3df67-72e5-4504-abc7-d2f433cd61ba", &patch)
            .await
            .unwrap_err();
        assert_matches!(err, ClientError::Validation(_));
    }

    #[tokio::test]
    async fn failures_are_recorded_until_cleared() {
        let client = GiftsClient::new(DEAD_URL);
        assert!(client.last_error().is_none());

        let _ = client.get_gift_by_id("invalid-id").await;
        assert_eq!(client.last_error().as_deref(), Some("Invalid gift ID format"));
        assert!(!client.is_loading());

        client.clear_error();
        assert!(client.last_error().is_none());
    }

    #[tokio::test]
    async fn a_new_call_clears_the_previous_error() {
        let client = GiftsClient::new(DEAD_URL);

        let _ = client.get_gift_by_id("invalid-id").await;
        assert!(client.last_error().is_some());

        let _ = client.get_gift_by_id("still-invalid").await;
        assert_eq!(client.last_error().as_deref(), Some("Invalid gift ID format"));

        let _ = client.get_all_gifts().await;
        assert_ne!(client.last_error().as_deref(), Some("Invalid gift ID format"));
    }

    #[tokio::test]
    async fn transport_failure_is_http_error() {
        let client = GiftsClient::new(DEAD_URL);
        let err = client.get_all_gifts().await.unwrap_err();
        assert_matches!(err, ClientError::Http(_));
        assert!(client.last_error().is_some());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = GiftsClient::new("http://localhost:3000/");
        assert_eq!(client.url("/gifts"), "http://localhost:3000/gifts");
    }
}
