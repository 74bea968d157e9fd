use std::path::PathBuf;

use garagem_core::{CarDetail, CarRepository};

use crate::commands::common::{build_repository, require_car_id, upload_image_file};
use crate::error::CliError;

#[derive(Default)]
pub struct EditArgs {
    pub name: Option<String>,
    pub year: Option<String>,
    pub licence: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub image: Option<PathBuf>,
    pub image_url: Option<String>,
}

pub async fn run_edit(api_url: Option<&str>, id: &str, args: EditArgs) -> Result<(), CliError> {
    let id = require_car_id(id)?;
    let repo = build_repository(api_url)?;

    // Edits are sparse; fetch the current record and overlay the flags.
    let current = repo.get_car_by_id(id).await?;

    let image_url = match (&args.image, args.image_url) {
        (Some(path), _) => Some(upload_image_file(path).await?),
        (None, url) => url,
    };

    let updated = apply_edits(current, &args.name, &args.year, &args.licence, args.lat, args.long, image_url)?;

    repo.update_car(&updated).await?;
    println!("Updated car {} ({})", updated.name, updated.id);
    Ok(())
}

fn apply_edits(
    mut car: CarDetail,
    name: &Option<String>,
    year: &Option<String>,
    licence: &Option<String>,
    lat: Option<f64>,
    long: Option<f64>,
    image_url: Option<String>,
) -> Result<CarDetail, CliError> {
    if let Some(name) = name {
        car.name = non_empty(name, "Name")?;
    }
    if let Some(year) = year {
        car.year = non_empty(year, "Year")?;
    }
    if let Some(licence) = licence {
        car.licence = non_empty(licence, "Licence")?;
    }
    if let Some(lat) = lat {
        car.latitude = lat;
    }
    if let Some(long) = long {
        car.longitude = long;
    }
    if let Some(image_url) = image_url {
        car.image_url = non_empty(&image_url, "Image URL")?;
    }
    Ok(car)
}

fn non_empty(value: &str, field: &'static str) -> Result<String, CliError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::EmptyField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn current() -> CarDetail {
        CarDetail {
            id: "abc".to_string(),
            image_url: "u".to_string(),
            year: "2020".to_string(),
            name: "Civic".to_string(),
            licence: "ABC123".to_string(),
            latitude: 1.0,
            longitude: 2.0,
        }
    }

    #[test]
    fn unset_flags_keep_the_current_values() {
        let updated = apply_edits(current(), &None, &None, &None, None, None, None).unwrap();
        assert_eq!(updated, current());
    }

    #[test]
    fn set_flags_overlay_the_record() {
        let updated = apply_edits(
            current(),
            &Some("Fit".to_string()),
            &None,
            &None,
            Some(-23.55),
            None,
            None,
        )
        .unwrap();
        assert_eq!(updated.name, "Fit");
        assert_eq!(updated.latitude, -23.55);
        assert_eq!(updated.year, "2020");
    }

    #[test]
    fn blank_override_is_rejected() {
        let result = apply_edits(current(), &Some("  ".to_string()), &None, &None, None, None, None);
        assert!(result.is_err());
    }
}
