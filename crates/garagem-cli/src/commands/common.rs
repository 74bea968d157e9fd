use std::path::Path;

use serde::Serialize;

use garagem_core::config::ClientConfig;
use garagem_core::models::licence_display_label;
use garagem_core::storage::{ImageStorage, ImageStorageConfig};
use garagem_core::{Car, CarDetail, RestCarRepository};

use crate::error::CliError;

/// Build the REST repository from an explicit URL or the environment.
pub fn build_repository(api_url: Option<&str>) -> Result<RestCarRepository, CliError> {
    let config = match api_url {
        Some(url) => ClientConfig::from_raw(Some(url.to_string()), None),
        None => ClientConfig::from_env(),
    };
    let base_url = config.require_api_base_url()?;
    tracing::debug!("Using car API at {base_url}");
    Ok(RestCarRepository::from_base_url(base_url)?)
}

/// Validate a user-supplied car id.
pub fn require_car_id(id: &str) -> Result<&str, CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::EmptyCarId);
    }
    Ok(id)
}

/// JSON projection of a list row.
#[derive(Debug, Serialize)]
pub struct CarListItem {
    pub id: String,
    pub name: String,
    pub licence: String,
    pub image_url: String,
}

pub fn car_to_list_item(car: &Car) -> CarListItem {
    CarListItem {
        id: car.id.clone(),
        name: car.name.clone(),
        licence: car.licence.clone(),
        image_url: car.image_url.clone(),
    }
}

pub fn format_car_lines(cars: &[Car]) -> Vec<String> {
    if cars.is_empty() {
        return vec!["No cars yet.".to_string()];
    }

    cars.iter()
        .map(|car| {
            format!(
                "{}  {}  {}",
                car.id,
                car.name,
                licence_display_label(&car.licence)
            )
        })
        .collect()
}

pub fn format_detail_lines(car: &CarDetail) -> Vec<String> {
    vec![
        format!("ID:       {}", car.id),
        format!("Name:     {}", car.name),
        format!("Year:     {}", car.year),
        format!("{}", licence_display_label(&car.licence)),
        format!("Photo:    {}", car.image_url),
        format!("Location: {:.6}, {:.6}", car.latitude, car.longitude),
    ]
}

/// Read a local image and upload it, returning the stored URL.
pub async fn upload_image_file(path: &Path) -> Result<String, CliError> {
    let storage_config =
        ImageStorageConfig::from_env()?.ok_or(CliError::StorageNotConfigured)?;
    let storage = ImageStorage::new(storage_config);

    let bytes = std::fs::read(path)?;
    let content_type = mime_guess::from_path(path).first_raw();

    Ok(storage.upload_image(&bytes, content_type).await?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_car() -> Car {
        Car {
            id: "x".to_string(),
            image_url: "u".to_string(),
            name: "Fit".to_string(),
            licence: "XYZ".to_string(),
        }
    }

    #[test]
    fn list_lines_use_the_display_licence() {
        let lines = format_car_lines(&[sample_car()]);
        assert_eq!(lines, vec!["x  Fit  Placa: XYZ".to_string()]);
    }

    #[test]
    fn empty_list_prints_a_hint() {
        assert_eq!(format_car_lines(&[]), vec!["No cars yet.".to_string()]);
    }

    #[test]
    fn detail_lines_include_location() {
        let detail = CarDetail {
            id: "abc".to_string(),
            image_url: "u".to_string(),
            year: "2020".to_string(),
            name: "Civic".to_string(),
            licence: "ABC123".to_string(),
            latitude: 1.0,
            longitude: 2.0,
        };
        let lines = format_detail_lines(&detail);
        assert!(lines.contains(&"Placa: ABC123".to_string()));
        assert!(lines.contains(&"Location: 1.000000, 2.000000".to_string()));
    }

    #[test]
    fn json_item_keeps_the_raw_licence() {
        let item = car_to_list_item(&sample_car());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["licence"], "XYZ");
    }

    #[test]
    fn require_car_id_rejects_blank_values() {
        assert!(require_car_id("  ").is_err());
        assert_eq!(require_car_id(" abc ").unwrap(), "abc");
    }
}
