//! Car models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a car, generated client-side as a UUID v4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarId(Uuid);

impl CarId {
    /// Create a new unique car ID using UUID v4
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CarId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A car as shown in the inventory list.
///
/// Display-only projection of the full record; the backend's list endpoint
/// omits year and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Opaque identifier as returned by the backend
    pub id: String,
    /// URL of the car photo
    pub image_url: String,
    /// Model name
    pub name: String,
    /// Licence plate, unformatted
    pub licence: String,
}

/// The full car record backing the detail and edit screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDetail {
    pub id: String,
    pub image_url: String,
    pub year: String,
    pub name: String,
    pub licence: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Presentation label for a licence plate.
///
/// Lives here so the mobile list view and the CLI render the same text.
/// The repository layer returns the raw plate; formatting is a view concern.
#[must_use]
pub fn licence_display_label(licence: &str) -> String {
    format!("Placa: {licence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_id_unique() {
        let id1 = CarId::new();
        let id2 = CarId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_car_id_parse() {
        let id = CarId::new();
        let parsed: CarId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_car_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<CarId>().is_err());
    }

    #[test]
    fn test_licence_display_label() {
        assert_eq!(licence_display_label("XYZ"), "Placa: XYZ");
        assert_eq!(licence_display_label("ABC1D23"), "Placa: ABC1D23");
    }
}
