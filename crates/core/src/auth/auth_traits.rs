use async_trait::async_trait;

use super::auth_model::{AuthSession, AuthUser};
use crate::errors::Result;

/// Mobile + OTP sign-in for administrators.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    /// Requests an OTP; returns the backend's confirmation message.
    async fn send_otp(&self, mobile: &str) -> Result<String>;
    async fn resend_otp(&self, mobile: &str) -> Result<String>;
    async fn verify_otp(&self, mobile: &str, otp: &str) -> Result<AuthSession>;
    /// Ends the session. Local state is cleared even when the backend call fails.
    async fn logout(&self) -> Result<()>;

    fn session(&self) -> Option<AuthSession>;
    fn is_authenticated(&self) -> bool;
    fn current_user(&self) -> Option<AuthUser>;
    fn user_id(&self) -> Option<i64>;
    /// Hands a persisted token back to the API client after a restart.
    fn restore_token(&self) -> bool;
}
