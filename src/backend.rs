//! HTTP client for the booking backend API.
//!
//! The backend owns spaces, bookings, availability and payments; this
//! frontend only reads space details and forwards booking submissions.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::booking::models::Space;
use crate::booking::submission::BookingSubmission;
use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend rejected credentials")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend validation failed: {0}")]
    Validation(String),

    #[error("Backend returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> BackendResult<Self> {
        let client = Client::builder().timeout(config.backend_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Space detail (`GET /spaces/{id}`)
    pub async fn get_space(&self, space_id: &str) -> BackendResult<Space> {
        self.get(&format!("spaces/{}", space_id)).await
    }

    /// Create a booking (`POST /bookings`); returns the backend's body as-is
    pub async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> BackendResult<serde_json::Value> {
        self.post("bookings", submission).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> BackendResult<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> BackendResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Backend responded {}: {}", status, body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthorized,
                StatusCode::NOT_FOUND => BackendError::NotFound(body),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    BackendError::Validation(body)
                }
                _ => BackendError::Upstream { status, body },
            });
        }

        response.json().await.map_err(Into::into)
    }
}


#[cfg(test)]
mod tests {
    use super::stub::StubBackend;
    use super::*;
    use crate::booking::models::{BookingDraft, BookingType, PriceUnit, SpacePrice};
    use crate::booking::submission::build_submission;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let config = Config {
            backend_url: "http://backend:8000/api/".to_string(),
            ..Config::default()
        };
        let client = BackendClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "http://backend:8000/api");
        assert_eq!(client.url("spaces/abc"), "http://backend:8000/api/spaces/abc");
        assert_eq!(client.url("/bookings"), "http://backend:8000/api/bookings");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        let config = Config {
            backend_url: "http://127.0.0.1:9".to_string(),
            backend_timeout: std::time::Duration::from_secs(2),
            ..Config::default()
        };
        let client = BackendClient::new(&config).unwrap();

        let err = client.get_space("loft-1").await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }

    // ==================== against a running backend ====================

    #[tokio::test]
    async fn test_get_space_success() {
        let backend = StubBackend::start().await;
        let client = BackendClient::new(&backend.config).unwrap();

        let space = client.get_space("studio-9").await.unwrap();

        assert_eq!(space.id, "studio-9");
        assert_eq!(space.capacity, Some(25));
        assert_eq!(space.price.amount, dec!(100));
        assert_eq!(space.price.unit, PriceUnit::Hour);
        assert_eq!(backend.space_fetches(), 1);
    }

    #[tokio::test]
    async fn test_error_statuses_map_to_typed_errors() {
        let backend = StubBackend::start().await;
        let client = BackendClient::new(&backend.config).unwrap();

        match client.get_space("missing").await {
            Err(BackendError::NotFound(body)) => assert_eq!(body, "404 for missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(matches!(client.get_space("locked").await, Err(BackendError::Unauthorized)));
        assert!(matches!(client.get_space("private").await, Err(BackendError::Unauthorized)));
        assert!(matches!(client.get_space("malformed").await, Err(BackendError::Validation(_))));
        assert!(matches!(client.get_space("rejected").await, Err(BackendError::Validation(_))));
        match client.get_space("broken").await {
            Err(BackendError::Upstream { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "500 for broken");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_booking_returns_backend_body() {
        let backend = StubBackend::start().await;
        let client = BackendClient::new(&backend.config).unwrap();

        let draft = BookingDraft {
            booking_type: Some(BookingType::Multi),
            check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            check_out_date: NaiveDate::from_ymd_opt(2024, 1, 3),
            guests: Some(4),
            event_type: "Retreat".to_string(),
            ..Default::default()
        };
        let price = SpacePrice {
            amount: dec!(250),
            unit: PriceUnit::Day,
        };
        let submission = build_submission("villa", &price, &draft).unwrap();

        let created = client.create_booking(&submission).await.unwrap();

        assert_eq!(created["id"], "bk-1");
        assert_eq!(created["spaceId"], "villa");
        assert_eq!(created["totalPrice"], "500");
        assert_eq!(created["startDateTime"], "2024-01-01T00:00:00");
    }
}
