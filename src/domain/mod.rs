//! Domain layer containing business entities and logic.
//!
//! It defines entities, the gate state machine, and the ports (traits) the
//! infrastructure layer implements.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`gate`] - The three-step gate sequence
//! - [`repositories`] - Data access trait definitions
//! - [`captcha`] - CAPTCHA verification port
//!
//! # Gate Flow
//!
//! 1. Visitor opens `/{short_id}`: click counted, gate 1 rendered
//! 2. Visitor follows `/step2/{short_id}` after the delay
//! 3. Visitor follows `/step3/{short_id}` and solves the CAPTCHA
//! 4. `POST /verify/{short_id}` checks the token and returns the destination

pub mod captcha;
pub mod entities;
pub mod gate;
pub mod repositories;
