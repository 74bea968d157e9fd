//! Shared phone / Google sign-in client logic.
//!
//! The auth provider is an opaque external service reached over HTTPS. The
//! phone flow is two requests: request a one-time code, then submit it. Some
//! devices get instant verification, in which case the first request already
//! returns a session.

use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{compact_text, normalize_base_url};

/// Validity window requested for a phone verification code.
pub const CODE_VALIDITY_SECONDS: i64 = 60;

/// Country prefix applied when the user omits one.
const DEFAULT_COUNTRY_PREFIX: &str = "+55";

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Outcome of a phone verification request.
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneAuthEvent {
    /// A code was sent; submit it together with this id.
    CodeSent { verification_id: String },
    /// The device was verified without a code round-trip.
    VerificationCompleted(AuthSession),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Auth is not configured for this build.")]
    NotConfigured,
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

#[derive(Clone)]
pub struct PhoneAuthClient<S: SessionPersistence> {
    auth_url: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> PhoneAuthClient<S> {
    pub fn new(url: impl AsRef<str>, store: S) -> AuthResult<Self> {
        let auth_url = normalize_base_url(url.as_ref()).map_err(AuthError::InvalidConfiguration)?;
        Ok(Self {
            auth_url,
            client: Client::builder().build()?,
            store,
        })
    }

    /// Load the persisted session, dropping it when already expired.
    ///
    /// There is no refresh round-trip: an expired session simply means the
    /// user signs in again.
    pub fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if stored_session.is_expired() {
            tracing::debug!("Persisted session expired; clearing");
            self.store.clear_session()?;
            return Ok(None);
        }

        Ok(Some(stored_session))
    }

    /// Request a verification code for a phone number.
    pub async fn request_code(&self, phone_number: &str) -> AuthResult<PhoneAuthEvent> {
        let phone_number = normalize_phone_number(phone_number)?;

        let payload = serde_json::json!({
            "phone": phone_number,
            "channel": "sms",
            "valid_for_secs": CODE_VALIDITY_SECONDS,
        });
        let response = self
            .send_auth_request(format!("{}/otp", self.auth_url), &payload)
            .await?;

        if let Some(session) = response.clone().into_session()? {
            self.store.save_session(&session)?;
            return Ok(PhoneAuthEvent::VerificationCompleted(session));
        }

        let verification_id = response.verification_id.ok_or_else(|| {
            AuthError::Api("Code request response did not include a verification id".to_string())
        })?;
        Ok(PhoneAuthEvent::CodeSent { verification_id })
    }

    /// Exchange a verification id and code for a session.
    pub async fn sign_in_with_code(
        &self,
        verification_id: &str,
        code: &str,
    ) -> AuthResult<AuthSession> {
        if verification_id.trim().is_empty() {
            return Err(AuthError::Api("Verification id is required".to_string()));
        }
        if code.trim().is_empty() {
            return Err(AuthError::Api("Verification code is required".to_string()));
        }

        let payload = serde_json::json!({
            "verification_id": verification_id,
            "code": code.trim(),
        });
        let response = self
            .send_auth_request(format!("{}/verify", self.auth_url), &payload)
            .await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Verify response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Exchange an external Google id token for a session.
    pub async fn sign_in_with_google(&self, id_token: &str) -> AuthResult<AuthSession> {
        if id_token.trim().is_empty() {
            return Err(AuthError::Api("Google id token is required".to_string()));
        }

        let payload = serde_json::json!({
            "id_token": id_token,
        });
        let response = self
            .client
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "id_token")])
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        let payload = response.json::<AuthResponse>().await?;
        let session = payload.into_session()?.ok_or_else(|| {
            AuthError::Api("Token exchange did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Sign out and clear the persisted session.
    ///
    /// A 401 means the token was already invalid server-side; the local
    /// session is cleared either way.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !(response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        self.store.clear_session()?;
        Ok(())
    }

    async fn send_auth_request(
        &self,
        url: String,
        payload: &serde_json::Value,
    ) -> AuthResult<AuthResponse> {
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<AuthResponse>().await?)
    }
}

/// Normalize a phone number, applying the default country prefix.
///
/// Separator characters are stripped; a leading `+` is kept when the caller
/// already provided a country code.
pub fn normalize_phone_number(raw: &str) -> AuthResult<String> {
    let has_prefix = raw.trim_start().starts_with('+');
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(AuthError::Api("Phone number is required".to_string()));
    }

    if has_prefix {
        Ok(format!("+{digits}"))
    } else {
        Ok(format!("{DEFAULT_COUNTRY_PREFIX}{digits}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AuthResponse {
    verification_id: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<AuthUser>,
}

impl AuthResponse {
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let expires_at = self.expires_at.or_else(|| {
            self.expires_in
                .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
        });

        match (self.access_token, self.refresh_token, expires_at, self.user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user,
                }))
            }
            (None, None, None, _) => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<AuthErrorResponse>(body) {
        if let Some(message) = payload
            .message
            .or(payload.error_description)
            .or(payload.error)
        {
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

fn unix_timestamp_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthUser {
        AuthUser {
            id: "user".to_string(),
            display_name: Some("User".to_string()),
            email: Some("user@example.com".to_string()),
            photo_url: None,
        }
    }

    #[test]
    fn normalize_phone_number_applies_default_prefix() {
        assert_eq!(
            normalize_phone_number("11 98765-4321").unwrap(),
            "+5511987654321"
        );
    }

    #[test]
    fn normalize_phone_number_keeps_explicit_prefix() {
        assert_eq!(
            normalize_phone_number("+1 (555) 010-0200").unwrap(),
            "+15550100200"
        );
    }

    #[test]
    fn normalize_phone_number_rejects_empty_input() {
        assert!(normalize_phone_number("").is_err());
        assert!(normalize_phone_number(" - ").is_err());
    }

    #[test]
    fn response_without_session_fields_means_code_flow() {
        let response = AuthResponse {
            verification_id: Some("vid".to_string()),
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: None,
        };
        assert!(response.into_session().unwrap().is_none());
    }

    #[test]
    fn partial_session_fields_are_an_error() {
        let response = AuthResponse {
            verification_id: None,
            access_token: Some("token".to_string()),
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: Some(sample_user()),
        };
        assert!(response.into_session().is_err());
    }

    #[test]
    fn expires_in_is_converted_to_absolute_expiry() {
        let response = AuthResponse {
            verification_id: None,
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            expires_at: None,
            expires_in: Some(3_600),
            user: Some(sample_user()),
        };
        let session = response.into_session().unwrap().unwrap();
        assert!(session.expires_at > unix_timestamp_now());
        assert!(!session.is_expired());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: sample_user(),
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn stale_session_is_expired() {
        let session = AuthSession {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 1,
            user: sample_user(),
        };
        assert!(session.is_expired());
    }
}
