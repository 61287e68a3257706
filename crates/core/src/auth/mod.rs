//! Auth module - OTP sign-in and the persisted admin session.

mod auth_model;
mod auth_service;
mod auth_traits;

#[cfg(test)]
mod auth_service_tests;

pub use auth_model::{AuthSession, AuthUser, OtpRequest, OtpVerification};
pub use auth_service::AuthService;
pub use auth_traits::AuthServiceTrait;
