//! `reqwest`-backed implementation of [`StoreApi`].

use crate::api::{ApiError, StoreApi};
use crate::model::catalog::GradeList;
use crate::model::{CreatedOrder, Grade, Order, OrderPayload, OrderReview, Pricing, Subject};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// HTTP client for the storefront backend.
///
/// Every call re-fetches; nothing is cached.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpStoreApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// `{base}/api/{segments..}`, each segment percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push("api").extend(segments);
        }
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Backend call failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[instrument(skip(self))]
    async fn list_grades(&self) -> Result<Vec<Grade>, ApiError> {
        let list: GradeList = self.get_json(&["grades"]).await?;
        Ok(list.grades)
    }

    #[instrument(skip(self))]
    async fn list_subjects(&self, grade: &str) -> Result<Vec<Subject>, ApiError> {
        self.get_json(&["subjects", grade]).await
    }

    #[instrument(skip(self))]
    async fn pricing(&self) -> Result<Pricing, ApiError> {
        self.get_json(&["pricing"]).await
    }

    #[instrument(skip(self, payload), fields(shape = %payload.shape(), total = payload.total_amount()))]
    async fn create_order(&self, payload: &OrderPayload) -> Result<CreatedOrder, ApiError> {
        let url = self.endpoint(&["orders"])?;
        debug!(%url, "POST");
        let resp = self.http.post(url).json(payload).send().await?;
        Self::decode(resp).await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json(&["orders"]).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        self.get_json(&["orders", id]).await
    }

    #[instrument(skip(self, review), fields(status = %review.status))]
    async fn update_order(&self, id: &str, review: &OrderReview) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders", id])?;
        debug!(%url, "PUT");
        let resp = self.http.put(url).json(review).send().await?;
        Self::decode(resp).await
    }
}
