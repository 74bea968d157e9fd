use std::path::PathBuf;

use garagem_core::{CarDetail, CarId, CarRepository};

use crate::commands::common::{build_repository, upload_image_file};
use crate::error::CliError;

pub struct AddArgs {
    pub name: String,
    pub year: String,
    pub licence: String,
    pub lat: f64,
    pub long: f64,
    pub image: Option<PathBuf>,
    pub image_url: Option<String>,
}

pub async fn run_add(api_url: Option<&str>, args: AddArgs) -> Result<(), CliError> {
    let name = require_field(&args.name, "Name")?;
    let year = require_field(&args.year, "Year")?;
    let licence = require_field(&args.licence, "Licence")?;

    let image_url = match (&args.image, args.image_url.as_deref()) {
        (Some(path), _) => upload_image_file(path).await?,
        (None, Some(url)) => require_field(url, "Image URL")?,
        (None, None) => return Err(CliError::MissingImage),
    };

    let repo = build_repository(api_url)?;
    let car = CarDetail {
        id: CarId::new().as_str(),
        image_url,
        year,
        name,
        licence,
        latitude: args.lat,
        longitude: args.long,
    };

    repo.add_car(&car).await?;
    println!("Added car {} ({})", car.name, car.id);
    Ok(())
}

fn require_field(value: &str, field: &'static str) -> Result<String, CliError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CliError::EmptyField(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_field_rejects_blank_values() {
        assert!(require_field("  ", "Name").is_err());
        assert_eq!(require_field(" Civic ", "Name").unwrap(), "Civic");
    }
}
