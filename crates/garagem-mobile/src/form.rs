//! Add/edit form state and validation.
//!
//! Validation runs before any network call: a form that fails here never
//! reaches the repository.

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarForm {
    pub name: String,
    pub year: String,
    pub licence: String,
    /// URL of an already-hosted photo.
    pub image_url: String,
    /// Local path of a freshly picked photo, uploaded on save.
    pub image_path: String,
    pub location: Option<(f64, f64)>,
    /// Editing keeps the stored photo when no new one is picked.
    pub editing: bool,
}

/// Field-level validation messages, `None` when the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFormErrors {
    pub name: Option<String>,
    pub year: Option<String>,
    pub licence: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl CarFormErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.year.is_none()
            && self.licence.is_none()
            && self.location.is_none()
            && self.image.is_none()
    }
}

/// Validate the form, returning one message per offending field.
#[must_use]
pub fn validate(form: &CarForm) -> CarFormErrors {
    let mut errors = CarFormErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("O nome não pode estar vazio".to_string());
    }
    if form.year.trim().is_empty() {
        errors.year = Some("Ano não pode estar vazio".to_string());
    }
    if form.licence.trim().is_empty() {
        errors.licence = Some("A placa não pode estar vazia".to_string());
    }
    if form.location.is_none() {
        errors.location = Some("Selecione uma localização no mapa".to_string());
    }
    if !form.editing && form.image_path.trim().is_empty() && form.image_url.trim().is_empty() {
        errors.image = Some("Selecione uma imagem".to_string());
    }

    errors
}

/// Parse a coordinate text input. Accepts a comma as the decimal separator.
#[must_use]
pub fn parse_coordinate(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Combine two coordinate inputs into a location.
#[must_use]
pub fn parse_location(lat_input: &str, long_input: &str) -> Option<(f64, f64)> {
    Some((parse_coordinate(lat_input)?, parse_coordinate(long_input)?))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_form() -> CarForm {
        CarForm {
            name: "Civic".to_string(),
            year: "2020".to_string(),
            licence: "ABC123".to_string(),
            image_url: "https://img.example.com/car.jpg".to_string(),
            image_path: String::new(),
            location: Some((1.0, 2.0)),
            editing: false,
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn blank_fields_get_their_own_messages() {
        let form = CarForm {
            name: "  ".to_string(),
            year: String::new(),
            licence: String::new(),
            location: None,
            ..valid_form()
        };
        let errors = validate(&form);
        assert_eq!(errors.name.as_deref(), Some("O nome não pode estar vazio"));
        assert_eq!(errors.year.as_deref(), Some("Ano não pode estar vazio"));
        assert_eq!(
            errors.licence.as_deref(),
            Some("A placa não pode estar vazia")
        );
        assert_eq!(
            errors.location.as_deref(),
            Some("Selecione uma localização no mapa")
        );
    }

    #[test]
    fn new_car_requires_an_image() {
        let form = CarForm {
            image_url: String::new(),
            image_path: String::new(),
            ..valid_form()
        };
        let errors = validate(&form);
        assert_eq!(errors.image.as_deref(), Some("Selecione uma imagem"));
    }

    #[test]
    fn editing_keeps_the_stored_image() {
        let form = CarForm {
            image_url: String::new(),
            image_path: String::new(),
            editing: true,
            ..valid_form()
        };
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn picked_image_path_satisfies_the_image_rule() {
        let form = CarForm {
            image_url: String::new(),
            image_path: "/storage/pics/car.jpg".to_string(),
            ..valid_form()
        };
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn parse_coordinate_handles_comma_decimals() {
        assert_eq!(parse_coordinate("-23,55"), Some(-23.55));
        assert_eq!(parse_coordinate(" 1.5 "), Some(1.5));
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("abc"), None);
        assert_eq!(parse_coordinate("NaN"), None);
    }

    #[test]
    fn parse_location_requires_both_coordinates() {
        assert_eq!(parse_location("1.0", "2.0"), Some((1.0, 2.0)));
        assert_eq!(parse_location("1.0", ""), None);
        assert_eq!(parse_location("", "2.0"), None);
    }
}
