//! The gate sequence a visitor walks before the redirect is released.
//!
//! ```text
//! Gate1 ──(8s)──▶ Gate2 ──(8s)──▶ Gate3 ──(CAPTCHA ok)──▶ Verified
//! ```
//!
//! Nothing is stored between steps. Each step re-resolves the short
//! identifier, and only [`GateStep::Gate1`] has a side effect (the click
//! counter). Advancement is driven by the client following the link to the
//! next step once the on-page delay has elapsed.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateStep {
    Gate1,
    Gate2,
    /// Carries the CAPTCHA challenge.
    Gate3,
    Verified,
}

impl GateStep {
    /// Steps that render a page, in visiting order.
    pub const PAGES: [GateStep; 3] = [GateStep::Gate1, GateStep::Gate2, GateStep::Gate3];

    /// The step that follows this one, if any.
    pub fn next(self) -> Option<GateStep> {
        match self {
            GateStep::Gate1 => Some(GateStep::Gate2),
            GateStep::Gate2 => Some(GateStep::Gate3),
            GateStep::Gate3 => Some(GateStep::Verified),
            GateStep::Verified => None,
        }
    }

    /// Route of this step for `short_id`.
    ///
    /// [`GateStep::Verified`] maps to the verification endpoint.
    pub fn path(self, short_id: &str) -> String {
        match self {
            GateStep::Gate1 => format!("/{short_id}"),
            GateStep::Gate2 => format!("/step2/{short_id}"),
            GateStep::Gate3 => format!("/step3/{short_id}"),
            GateStep::Verified => format!("/verify/{short_id}"),
        }
    }

    /// Whether visiting this step counts as a click.
    pub fn counts_click(self) -> bool {
        self == GateStep::Gate1
    }

    /// How long the page waits before letting the visitor continue.
    ///
    /// Presentation only: the server never checks it.
    pub fn advance_delay(self) -> Option<Duration> {
        match self {
            GateStep::Gate1 | GateStep::Gate2 => Some(Duration::from_secs(8)),
            GateStep::Gate3 => Some(Duration::from_secs(5)),
            GateStep::Verified => None,
        }
    }

    /// 1-based position among the page steps.
    pub fn number(self) -> Option<u8> {
        match self {
            GateStep::Gate1 => Some(1),
            GateStep::Gate2 => Some(2),
            GateStep::Gate3 => Some(3),
            GateStep::Verified => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GateStep::Gate1 => "gate1",
            GateStep::Gate2 => "gate2",
            GateStep::Gate3 => "gate3",
            GateStep::Verified => "verified",
        }
    }
}

impl fmt::Display for GateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
