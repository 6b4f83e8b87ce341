//! CAPTCHA verification port.

use crate::error::AppError;
use async_trait::async_trait;

/// Verifies a CAPTCHA response token against an external provider.
///
/// # Implementations
///
/// - [`crate::infrastructure::captcha::RecaptchaVerifier`] - reCAPTCHA `siteverify` over HTTPS
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Returns `Ok(true)` when the provider accepts `token`.
    ///
    /// `remote_ip` is forwarded to the provider when known.
    ///
    /// # Errors
    ///
    /// Implementations may return [`AppError::Internal`] for misconfiguration;
    /// provider outages are reported as `Ok(false)`.
    async fn verify(&self, token: &str, remote_ip: Option<String>) -> Result<bool, AppError>;
}
