//! Gate page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use crate::application::services::GateView;
use crate::domain::gate::GateStep;
use crate::state::AppState;
use crate::web::ads::AdSettings;
use crate::web::error::PageError;

/// Interstitial page for the first two steps.
///
/// Renders `templates/gate.html`: a banner slot, a social bar slot, a
/// countdown and a link to the next step that unlocks when the countdown
/// ends. `ad_config` is the [`AdSettings::page_config`] JSON.
#[derive(Template, WebTemplate)]
#[template(path = "gate.html")]
pub struct GateTemplate {
    pub step_number: u8,
    pub next_path: String,
    pub delay_seconds: u64,
    pub ad_config: String,
}

/// Final page with the CAPTCHA widget.
///
/// Renders `templates/captcha.html`; the form posts the widget token to
/// `verify_path` and navigates to the returned `redirectUrl`.
#[derive(Template, WebTemplate)]
#[template(path = "captcha.html")]
pub struct CaptchaTemplate {
    pub site_key: String,
    pub verify_path: String,
    pub delay_seconds: u64,
    pub ad_config: String,
}

impl GateTemplate {
    fn from_view(view: &GateView, ads: &AdSettings) -> Self {
        Self {
            step_number: view.step.number().unwrap_or(1),
            next_path: view.next_path.clone(),
            delay_seconds: delay_seconds(view.step),
            ad_config: ads.page_config(),
        }
    }
}

fn delay_seconds(step: GateStep) -> u64 {
    step.advance_delay().map(|d| d.as_secs()).unwrap_or(0)
}

/// First gate. Counts the visit.
///
/// # Endpoint
///
/// `GET /{short_id}`
pub async fn gate1_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<GateTemplate, PageError> {
    let view = state.gate_service.enter(GateStep::Gate1, &short_id).await?;
    Ok(GateTemplate::from_view(&view, &state.ads))
}

/// Second gate.
///
/// # Endpoint
///
/// `GET /step2/{short_id}`
pub async fn gate2_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<GateTemplate, PageError> {
    let view = state.gate_service.enter(GateStep::Gate2, &short_id).await?;
    Ok(GateTemplate::from_view(&view, &state.ads))
}

/// Third gate with the CAPTCHA challenge.
///
/// # Endpoint
///
/// `GET /step3/{short_id}`
pub async fn gate3_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<CaptchaTemplate, PageError> {
    let view = state.gate_service.enter(GateStep::Gate3, &short_id).await?;

    Ok(CaptchaTemplate {
        site_key: state.captcha_site_key.clone(),
        verify_path: view.next_path,
        delay_seconds: delay_seconds(view.step),
        ad_config: state.ads.page_config(),
    })
}
