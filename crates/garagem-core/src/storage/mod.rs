//! S3-compatible object storage for car photos.
//!
//! The mobile app and CLI upload a picked image before saving the car; the
//! backend only ever sees the resulting public URL.

use std::env;

use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use aws_types::region::Region;
use uuid::Uuid;

use crate::util::normalize_base_url;
use crate::{Error, Result};

const ENV_ENDPOINT: &str = "GARAGEM_STORAGE_ENDPOINT";
const ENV_BUCKET: &str = "GARAGEM_STORAGE_BUCKET";
const ENV_ACCESS_KEY_ID: &str = "GARAGEM_STORAGE_ACCESS_KEY_ID";
const ENV_SECRET_ACCESS_KEY: &str = "GARAGEM_STORAGE_SECRET_ACCESS_KEY";
const ENV_PUBLIC_BASE_URL: &str = "GARAGEM_STORAGE_PUBLIC_BASE_URL";

/// Image storage configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageStorageConfig {
    /// S3-compatible endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key id for S3-compatible auth.
    pub access_key_id: String,
    /// Secret access key for S3-compatible auth.
    pub secret_access_key: String,
    /// Optional public URL base for serving images.
    pub public_base_url: Option<String>,
}

impl ImageStorageConfig {
    /// Load image storage configuration from environment variables.
    ///
    /// Returns `Ok(None)` when no storage variables are set.
    /// Returns an error when only a partial configuration is provided.
    pub fn from_env() -> Result<Option<Self>> {
        parse_config(|key| env::var(key).ok())
    }
}

/// Object-storage backed image store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageStorage {
    config: ImageStorageConfig,
}

impl ImageStorage {
    #[must_use]
    pub const fn new(config: ImageStorageConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ImageStorageConfig {
        &self.config
    }

    /// Upload image bytes and return the URL to store on the car record.
    pub async fn upload_image(&self, bytes: &[u8], content_type: Option<&str>) -> Result<String> {
        let object_key = build_image_key();
        let client = self.s3_client();

        let mut request = client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .body(ByteStream::from(bytes.to_vec()));

        if let Some(content_type) = normalize_content_type(content_type) {
            request = request.content_type(content_type);
        }

        request.send().await.map_err(|error| {
            storage_error("put_object", &self.config.bucket, Some(&object_key), error)
        })?;

        Ok(self.object_url(&object_key))
    }

    /// Delete an uploaded image by object key.
    pub async fn delete_image(&self, object_key: &str) -> Result<()> {
        let object_key = normalize_object_key(object_key)?;
        let client = self.s3_client();

        client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|error| {
                storage_error(
                    "delete_object",
                    &self.config.bucket,
                    Some(&object_key),
                    error,
                )
            })?;

        Ok(())
    }

    /// Resolve the serving URL for an object key.
    ///
    /// Prefers the configured public base; otherwise falls back to the
    /// path-style endpoint URL.
    #[must_use]
    pub fn object_url(&self, object_key: &str) -> String {
        let key = object_key.trim_matches('/');
        self.config.public_base_url.as_ref().map_or_else(
            || format!("{}/{}/{key}", self.config.endpoint, self.config.bucket),
            |base| format!("{base}/{key}"),
        )
    }

    fn s3_client(&self) -> Client {
        let credentials = Credentials::new(
            self.config.access_key_id.clone(),
            self.config.secret_access_key.clone(),
            None,
            None,
            "garagem-core-image-storage",
        );

        let sdk_config = aws_sdk_s3::config::Builder::new()
            .region(Region::new("auto"))
            .credentials_provider(credentials)
            .endpoint_url(&self.config.endpoint)
            .force_path_style(true)
            .build();

        Client::from_conf(sdk_config)
    }
}

/// Object key for a freshly picked car image.
#[must_use]
pub fn build_image_key() -> String {
    format!("images/car_image_{}", Uuid::new_v4())
}

fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<ImageStorageConfig>> {
    let endpoint = lookup(ENV_ENDPOINT).map(|value| value.trim().to_string());
    let bucket = lookup(ENV_BUCKET).map(|value| value.trim().to_string());
    let access_key_id = lookup(ENV_ACCESS_KEY_ID).map(|value| value.trim().to_string());
    let secret_access_key = lookup(ENV_SECRET_ACCESS_KEY).map(|value| value.trim().to_string());
    let public_base_url = lookup(ENV_PUBLIC_BASE_URL).map(|value| value.trim().to_string());

    let any_present = endpoint.is_some()
        || bucket.is_some()
        || access_key_id.is_some()
        || secret_access_key.is_some()
        || public_base_url.is_some();

    if !any_present {
        return Ok(None);
    }

    let mut missing = Vec::new();
    if endpoint.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_ENDPOINT);
    }
    if bucket.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_BUCKET);
    }
    if access_key_id.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_ACCESS_KEY_ID);
    }
    if secret_access_key.as_ref().map_or(true, String::is_empty) {
        missing.push(ENV_SECRET_ACCESS_KEY);
    }

    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Image storage configuration is incomplete. Missing: {}",
            missing.join(", ")
        )));
    }

    let endpoint = endpoint.expect("validated above");
    let endpoint = normalize_base_url(&endpoint).map_err(Error::InvalidInput)?;
    let public_base_url = match public_base_url.filter(|value| !value.is_empty()) {
        Some(value) => Some(normalize_base_url(&value).map_err(Error::InvalidInput)?),
        None => None,
    };

    Ok(Some(ImageStorageConfig {
        endpoint,
        bucket: bucket.expect("validated above"),
        access_key_id: access_key_id.expect("validated above"),
        secret_access_key: secret_access_key.expect("validated above"),
        public_base_url,
    }))
}

fn storage_error(
    operation: &str,
    bucket: &str,
    object_key: Option<&str>,
    error: impl std::fmt::Display,
) -> Error {
    let target = object_key.map_or_else(|| bucket.to_string(), |key| format!("{bucket}/{key}"));
    Error::Storage(format!("Storage {operation} failed for {target}: {error}"))
}

fn normalize_object_key(object_key: &str) -> Result<String> {
    let object_key = object_key.trim().trim_matches('/').to_string();
    if object_key.is_empty() {
        return Err(Error::InvalidInput(
            "Image object_key cannot be empty".to_string(),
        ));
    }
    Ok(object_key)
}

fn normalize_content_type(content_type: Option<&str>) -> Option<String> {
    let value = content_type?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> ImageStorageConfig {
        ImageStorageConfig {
            endpoint: "https://storage.example.com".to_string(),
            bucket: "cars".to_string(),
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
            public_base_url: None,
        }
    }

    #[test]
    fn build_image_key_uses_expected_namespace() {
        let key = build_image_key();
        assert!(key.starts_with("images/car_image_"));

        let suffix = key.trim_start_matches("images/car_image_");
        assert!(Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn missing_all_variables_means_storage_disabled() {
        let parsed = parse_config(|_| None).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn partial_configuration_is_an_error() {
        let error = parse_config(|key| {
            (key == ENV_BUCKET).then(|| "cars".to_string())
        })
        .unwrap_err();
        assert!(error.to_string().contains(ENV_ENDPOINT));
    }

    #[test]
    fn object_url_prefers_public_base() {
        let mut config = full_config();
        config.public_base_url = Some("https://img.example.com".to_string());
        let storage = ImageStorage::new(config);
        assert_eq!(
            storage.object_url("/images/car_image_1/"),
            "https://img.example.com/images/car_image_1"
        );
    }

    #[test]
    fn object_url_falls_back_to_endpoint_path() {
        let storage = ImageStorage::new(full_config());
        assert_eq!(
            storage.object_url("images/car_image_1"),
            "https://storage.example.com/cars/images/car_image_1"
        );
    }

    #[test]
    fn normalize_object_key_rejects_empty() {
        assert!(normalize_object_key("  / ").is_err());
        assert_eq!(normalize_object_key("/a/b/").unwrap(), "a/b");
    }
}
