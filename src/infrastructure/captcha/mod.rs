//! CAPTCHA provider integrations.
//!
//! - [`RecaptchaVerifier`] - Google reCAPTCHA (and API-compatible providers)

mod recaptcha;

pub use recaptcha::{DEFAULT_VERIFY_URL, RecaptchaVerifier};
