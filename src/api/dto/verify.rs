//! DTOs for the CAPTCHA verification endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Token produced by the CAPTCHA widget. Missing tokens are rejected.
    #[serde(default)]
    pub captcha_token: Option<String>,
}

/// Returned only after the CAPTCHA passed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub redirect_url: String,
}
