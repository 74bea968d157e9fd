//! Car repository: maps wire DTOs to domain models over the REST client.
//!
//! Every operation returns `Result`; transport and deserialization failures
//! surface as `Err` values and never cross this boundary as panics.

use serde_json::json;

use crate::api::{CarApiClient, CarDto, CarResponseDto, CarSummaryDto, PlaceDto};
use crate::error::Result;
use crate::models::{Car, CarDetail};

/// Storage-agnostic car operations consumed by the UI layers.
pub trait CarRepository {
    /// List all cars as display projections.
    fn get_cars(&self) -> impl std::future::Future<Output = Result<Vec<Car>>> + Send;

    /// Fetch a single car and flatten the response envelope.
    fn get_car_by_id(&self, id: &str) -> impl std::future::Future<Output = Result<CarDetail>> + Send;

    /// Create a new car.
    fn add_car(&self, car: &CarDetail) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Update an existing car.
    fn update_car(&self, car: &CarDetail) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Delete a car by id.
    fn delete_car(&self, id: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// REST-backed implementation of [`CarRepository`].
#[derive(Debug, Clone)]
pub struct RestCarRepository {
    api: CarApiClient,
}

impl RestCarRepository {
    #[must_use]
    pub const fn new(api: CarApiClient) -> Self {
        Self { api }
    }

    /// Convenience constructor from a base URL.
    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::new(CarApiClient::new(base_url)?))
    }
}

impl CarRepository for RestCarRepository {
    async fn get_cars(&self) -> Result<Vec<Car>> {
        let dtos = self.api.list_cars().await?;
        Ok(dtos.into_iter().map(summary_to_car).collect())
    }

    async fn get_car_by_id(&self, id: &str) -> Result<CarDetail> {
        let envelope = self.api.fetch_car(id).await?;
        Ok(envelope_to_detail(envelope))
    }

    async fn add_car(&self, car: &CarDetail) -> Result<()> {
        self.api.create_car(&detail_to_dto(car)).await
    }

    async fn update_car(&self, car: &CarDetail) -> Result<()> {
        self.api.update_car(&car.id, &update_field_map(car)).await
    }

    async fn delete_car(&self, id: &str) -> Result<()> {
        self.api.delete_car(id).await
    }
}

fn summary_to_car(dto: CarSummaryDto) -> Car {
    Car {
        id: dto.id,
        image_url: dto.image_url,
        name: dto.name,
        licence: dto.licence,
    }
}

/// Flatten the `{ id, value: { ..., place: { lat, long } } }` envelope.
///
/// The outer `id` is authoritative; a nested `value.id` is ignored.
fn envelope_to_detail(envelope: CarResponseDto) -> CarDetail {
    CarDetail {
        id: envelope.id,
        image_url: envelope.value.image_url,
        year: envelope.value.year,
        name: envelope.value.name,
        licence: envelope.value.licence,
        latitude: envelope.value.place.lat,
        longitude: envelope.value.place.long,
    }
}

fn detail_to_dto(car: &CarDetail) -> CarDto {
    CarDto {
        id: car.id.clone(),
        image_url: car.image_url.clone(),
        year: car.year.clone(),
        name: car.name.clone(),
        licence: car.licence.clone(),
        place: PlaceDto {
            lat: car.latitude,
            long: car.longitude,
        },
    }
}

/// Ad-hoc field map sent to `PATCH /car/{id}`.
///
/// The update endpoint takes a loose map rather than the create DTO; the
/// shapes coincide today but the backend treats them as distinct contracts.
fn update_field_map(car: &CarDetail) -> serde_json::Value {
    json!({
        "id": car.id,
        "imageUrl": car.image_url,
        "year": car.year,
        "name": car.name,
        "licence": car.licence,
        "place": { "lat": car.latitude, "long": car.longitude },
    })
}
