//! Phone / Google authentication service with secure session storage.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use garagem_core::auth::{
    AuthResult, PhoneAuthClient, PhoneAuthEvent, SessionPersistence,
};
pub use garagem_core::auth::{AuthError, AuthSession, AuthUser};
use garagem_core::config::ClientConfig;

use crate::secret_store;

#[derive(Debug, Clone, Copy, Default)]
struct SessionStore;

impl SessionPersistence for SessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        match secret_store::read_secret(secret_store::SECRET_AUTH_SESSION) {
            Ok(Some(value)) => Ok(Some(serde_json::from_str(&value)?)),
            Ok(None) => Ok(None),
            Err(error) => Err(AuthError::SecureStorage(error)),
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let serialized = serde_json::to_string(session)?;
        secret_store::write_secret(secret_store::SECRET_AUTH_SESSION, &serialized)
            .map_err(AuthError::SecureStorage)
    }

    fn clear_session(&self) -> AuthResult<()> {
        secret_store::delete_secret(secret_store::SECRET_AUTH_SESSION)
            .map_err(AuthError::SecureStorage)
    }
}

#[derive(Clone)]
pub struct PhoneAuthService {
    inner: PhoneAuthClient<SessionStore>,
}

impl PhoneAuthService {
    /// Build the service from resolved client config.
    ///
    /// Returns `Ok(None)` when no auth endpoint is configured; the app then
    /// skips the login screen entirely.
    pub fn new_from_config(config: &ClientConfig) -> AuthResult<Option<Self>> {
        let Some(url) = config.auth_base_url.clone() else {
            return Ok(None);
        };
        Ok(Some(Self::new(url)?))
    }

    pub fn new(url: impl AsRef<str>) -> AuthResult<Self> {
        Ok(Self {
            inner: PhoneAuthClient::new(url, SessionStore)?,
        })
    }

    pub fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        self.inner.restore_session()
    }

    pub async fn request_code(&self, phone_number: &str) -> AuthResult<PhoneAuthEvent> {
        self.inner.request_code(phone_number).await
    }

    pub async fn sign_in_with_code(
        &self,
        verification_id: &str,
        code: &str,
    ) -> AuthResult<AuthSession> {
        self.inner.sign_in_with_code(verification_id, code).await
    }

    pub async fn sign_in_with_google(&self, id_token: &str) -> AuthResult<AuthSession> {
        self.inner.sign_in_with_google(id_token).await
    }

    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.inner.sign_out(access_token).await
    }
}

#[cfg(test)]
mod tests {
    use garagem_core::auth::normalize_phone_number;

    use super::*;

    #[test]
    fn new_from_config_returns_none_without_auth_endpoint() {
        let config = ClientConfig::default();
        assert!(PhoneAuthService::new_from_config(&config)
            .unwrap()
            .is_none());
    }

    #[test]
    fn new_rejects_invalid_auth_url() {
        assert!(PhoneAuthService::new("auth.example.com").is_err());
    }

    #[test]
    fn session_store_roundtrip() {
        let store = SessionStore;
        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());

        let session = AuthSession {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: 4_102_444_800,
            user: AuthUser {
                id: "user".to_string(),
                display_name: None,
                email: None,
                photo_url: None,
            },
        };
        store.save_session(&session).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(session));

        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn default_country_prefix_is_applied() {
        assert_eq!(
            normalize_phone_number("11987654321").unwrap(),
            "+5511987654321"
        );
    }
}
