//! Device location access.
//!
//! The maps SDK stays outside this app; coordinates are plain fields on the
//! form. This module only answers "where is the device right now" for the
//! use-current-position shortcut.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

pub trait LocationProvider {
    /// The device's last known position as `(latitude, longitude)`.
    fn current_location(&self) -> Result<(f64, f64), String>;
}

const ENV_DEVICE_LAT: &str = "GARAGEM_DEVICE_LAT";
const ENV_DEVICE_LONG: &str = "GARAGEM_DEVICE_LONG";

/// Environment-backed provider.
///
/// The Android launcher exports the platform fix into the process
/// environment before the shell starts; dev builds can set the variables by
/// hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocationProvider;

impl LocationProvider for EnvLocationProvider {
    fn current_location(&self) -> Result<(f64, f64), String> {
        read_location(|key| std::env::var(key).ok())
    }
}

fn read_location(lookup: impl Fn(&str) -> Option<String>) -> Result<(f64, f64), String> {
    let latitude = parse_env_coordinate(&lookup, ENV_DEVICE_LAT)?;
    let longitude = parse_env_coordinate(&lookup, ENV_DEVICE_LONG)?;
    Ok((latitude, longitude))
}

fn parse_env_coordinate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<f64, String> {
    let raw = lookup(key).ok_or_else(|| "Não foi possível obter a localização.".to_string())?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("{key} is not a valid coordinate"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_mean_no_location() {
        let error = read_location(|_| None).unwrap_err();
        assert!(error.contains("localização"));
    }

    #[test]
    fn both_coordinates_are_required() {
        let result = read_location(|key| {
            (key == ENV_DEVICE_LAT).then(|| "-23.55".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn valid_variables_parse_to_a_fix() {
        let location = read_location(|key| {
            Some(match key {
                ENV_DEVICE_LAT => " -23.55 ".to_string(),
                _ => "-46.63".to_string(),
            })
        })
        .unwrap();
        assert_eq!(location, (-23.55, -46.63));
    }

    #[test]
    fn garbage_coordinates_are_rejected() {
        let result = read_location(|_| Some("not-a-number".to_string()));
        assert!(result.is_err());
    }
}
