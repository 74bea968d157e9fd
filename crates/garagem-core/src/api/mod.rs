//! Typed REST client for the car inventory backend.
//!
//! The backend exposes a single `car` resource. The single-item GET is
//! asymmetric with the list endpoint: the list returns a bare array of
//! summary DTOs while `GET /car/{id}` wraps the record in an
//! `{ id, value: ... }` envelope.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{compact_text, normalize_base_url};

/// Wire representation of a car as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummaryDto {
    pub id: String,
    pub image_url: String,
    pub name: String,
    pub licence: String,
}

/// Nested location object under the `place` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDto {
    pub lat: f64,
    pub long: f64,
}

/// Full wire representation of a car.
///
/// Used as the POST body and as the envelope's nested `value`, where the
/// backend may omit `id` (the envelope's outer `id` is authoritative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    #[serde(default)]
    pub id: String,
    pub image_url: String,
    pub year: String,
    pub name: String,
    pub licence: String,
    pub place: PlaceDto,
}

/// Envelope returned by `GET /car/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarResponseDto {
    pub id: String,
    pub value: CarDto,
}

/// HTTP client for the car resource.
#[derive(Debug, Clone)]
pub struct CarApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl CarApiClient {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into()).map_err(Error::InvalidInput)?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { base_url, client })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /car` - list all cars as summary DTOs.
    pub async fn list_cars(&self) -> Result<Vec<CarSummaryDto>> {
        let response = self
            .client
            .get(format!("{}/car", self.base_url))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(response.json::<Vec<CarSummaryDto>>().await?)
    }

    /// `GET /car/{id}` - fetch a single car envelope.
    pub async fn fetch_car(&self, id: &str) -> Result<CarResponseDto> {
        let response = self
            .client
            .get(self.car_url(id))
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(response.json::<CarResponseDto>().await?)
    }

    /// `POST /car` - create a car from a full DTO.
    pub async fn create_car(&self, car: &CarDto) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/car", self.base_url))
            .json(car)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Api("Failed to add car".to_string()))
        }
    }

    /// `PATCH /car/{id}` - partial update with an ad-hoc field map.
    pub async fn update_car(&self, id: &str, fields: &serde_json::Value) -> Result<()> {
        let response = self
            .client
            .patch(self.car_url(id))
            .json(fields)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Api("Failed to update car".to_string()))
        }
    }

    /// `DELETE /car/{id}`.
    ///
    /// Unlike the other mutating calls, a failure here carries the HTTP
    /// status code so the UI can show which code the backend answered with.
    pub async fn delete_car(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.car_url(id)).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Api(format!(
                "Failed to delete car (HTTP {})",
                response.status().as_u16()
            )))
        }
    }

    fn car_url(&self, id: &str) -> String {
        format!("{}/car/{}", self.base_url, urlencoding::encode(id))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}
