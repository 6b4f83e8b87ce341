//! reCAPTCHA `siteverify` client.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::domain::captcha::CaptchaVerifier;
use crate::error::AppError;

/// Google's verification endpoint.
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Response body of the `siteverify` endpoint.
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Verifies tokens by posting them, with the shared secret, to the
/// provider's `siteverify` endpoint.
///
/// Transport failures, non-2xx answers and unreadable bodies all count as a
/// rejected token.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl RecaptchaVerifier {
    /// Creates a verifier for `verify_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the secret is empty or the HTTP
    /// client cannot be built.
    pub fn new(
        verify_url: impl Into<String>,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AppError::internal(
                "CAPTCHA secret must not be empty",
                serde_json::json!({}),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build HTTP client",
                    serde_json::json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self {
            client,
            verify_url: verify_url.into(),
            secret,
        })
    }

    async fn request(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<SiteVerifyResponse, reqwest::Error> {
        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        self.client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json::<SiteVerifyResponse>()
            .await
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    #[instrument(skip(self, token, remote_ip), fields(url = %self.verify_url))]
    async fn verify(&self, token: &str, remote_ip: Option<String>) -> Result<bool, AppError> {
        match self.request(token, remote_ip.as_deref()).await {
            Ok(response) if response.success => {
                debug!("CAPTCHA token accepted");
                Ok(true)
            }
            Ok(response) => {
                warn!(error_codes = ?response.error_codes, "CAPTCHA token rejected");
                Ok(false)
            }
            Err(e) => {
                error!(error = %e, "CAPTCHA verification error");
                Ok(false)
            }
        }
    }
}
