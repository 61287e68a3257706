use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use super::auth_model::{AuthSession, AuthUser};
use super::auth_traits::AuthServiceTrait;
use crate::api::{AdminApiTrait, LoginRequest, VerifyRequest};
use crate::cache::CacheService;
use crate::constants::ADMIN_ROLE;
use crate::errors::{Error, Result, ValidationError};
use crate::validation::{is_valid_mobile, INVALID_MOBILE_MESSAGE};

const SEND_OTP_FAILED: &str = "Failed to send OTP. Please try again.";
const INVALID_VERIFY_RESPONSE: &str = "Invalid response from server. Please try again.";

pub struct AuthService {
    api: Arc<dyn AdminApiTrait>,
    cache: CacheService,
}

impl AuthService {
    pub fn new(api: Arc<dyn AdminApiTrait>, cache: CacheService) -> Self {
        Self { api, cache }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn send_otp(&self, mobile: &str) -> Result<String> {
        if !is_valid_mobile(mobile) {
            return Err(ValidationError::InvalidInput(INVALID_MOBILE_MESSAGE.to_string()).into());
        }

        let response = self
            .api
            .login(&LoginRequest {
                mobile: mobile.to_string(),
                role: ADMIN_ROLE.to_string(),
            })
            .await?;

        match response.message_text() {
            Some(message) => Ok(message.to_string()),
            None => Err(Error::api(SEND_OTP_FAILED)),
        }
    }

    async fn resend_otp(&self, mobile: &str) -> Result<String> {
        self.send_otp(mobile).await
    }

    async fn verify_otp(&self, mobile: &str, otp: &str) -> Result<AuthSession> {
        let response = self
            .api
            .verify(&VerifyRequest {
                mobile: mobile.to_string(),
                otp: otp.to_string(),
            })
            .await?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::api(INVALID_VERIFY_RESPONSE))?;

        let session = AuthSession {
            user: AuthUser {
                id: response.id.unwrap_or_default(),
                name: mobile.to_string(),
                mobile: mobile.to_string(),
                role: response.role.unwrap_or_else(|| ADMIN_ROLE.to_string()),
                email: None,
            },
            token: token.clone(),
            is_authenticated: true,
        };

        self.cache.set_session(&session).await?;
        self.api.set_access_token(Some(token));
        info!("Administrator {} signed in", session.user.id);
        Ok(session)
    }

    async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api.logout().await {
            warn!("Logout call failed, clearing session anyway: {}", e);
        }
        self.api.set_access_token(None);
        self.cache.clear_session().await
    }

    fn session(&self) -> Option<AuthSession> {
        self.cache.session()
    }

    fn is_authenticated(&self) -> bool {
        self.session().is_some_and(|s| s.is_authenticated)
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session().map(|s| s.user)
    }

    fn user_id(&self) -> Option<i64> {
        self.session().and_then(|s| s.user_id())
    }

    fn restore_token(&self) -> bool {
        match self.session() {
            Some(session) if session.is_authenticated => {
                self.api.set_access_token(Some(session.token));
                true
            }
            _ => false,
        }
    }
}
