//! Data access layer for the mobile app.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use garagem_core::config::ClientConfig;
use garagem_core::storage::{ImageStorage, ImageStorageConfig};
use garagem_core::{Car, CarDetail, CarRepository, Error, Result, RestCarRepository};

/// Thin async wrapper around the `garagem-core` repository APIs.
#[derive(Clone)]
pub struct MobileCarStore {
    repo: RestCarRepository,
    image_storage: Option<ImageStorage>,
}

impl MobileCarStore {
    /// Build the store from resolved client config and the environment.
    pub fn new_from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config.require_api_base_url()?;
        let image_storage = ImageStorageConfig::from_env()?.map(ImageStorage::new);
        Ok(Self {
            repo: RestCarRepository::from_base_url(base_url)?,
            image_storage,
        })
    }

    /// List all cars for the home screen.
    pub async fn list_cars(&self) -> Result<Vec<Car>> {
        self.repo.get_cars().await
    }

    /// Fetch one car for the detail and edit screens.
    pub async fn fetch_car(&self, id: &str) -> Result<CarDetail> {
        let id = normalize_id(id)?;
        self.repo.get_car_by_id(&id).await
    }

    /// Create a car.
    pub async fn add_car(&self, car: &CarDetail) -> Result<()> {
        self.repo.add_car(car).await
    }

    /// Update an existing car.
    pub async fn update_car(&self, car: &CarDetail) -> Result<()> {
        self.repo.update_car(car).await
    }

    /// Delete a car.
    pub async fn delete_car(&self, id: &str) -> Result<()> {
        let id = normalize_id(id)?;
        self.repo.delete_car(&id).await
    }

    /// Whether photo upload is available on this install.
    pub const fn can_upload_images(&self) -> bool {
        self.image_storage.is_some()
    }

    /// Upload a freshly picked photo, returning the URL to store.
    pub async fn upload_image(&self, bytes: &[u8], content_type: Option<&str>) -> Result<String> {
        let storage = self.image_storage.as_ref().ok_or_else(|| {
            Error::Storage("Image storage is not configured".to_string())
        })?;
        storage.upload_image(bytes, content_type).await
    }
}

fn normalize_id(id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidInput("Car id cannot be empty".to_string()));
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_requires_an_api_base_url() {
        let config = ClientConfig::default();
        assert!(MobileCarStore::new_from_config(&config).is_err());
    }

    #[test]
    fn normalize_id_rejects_blank_values() {
        assert!(normalize_id("  ").is_err());
        assert_eq!(normalize_id(" abc ").unwrap(), "abc");
    }
}
