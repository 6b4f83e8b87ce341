//! Gate page handlers.

mod gates;

pub use gates::{CaptchaTemplate, GateTemplate, gate1_handler, gate2_handler, gate3_handler};
