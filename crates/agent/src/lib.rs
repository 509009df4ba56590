//! Conversational orchestration over the palaver negotiation core.
//!
//! This crate turns raw inbound customer messages into outbound replies:
//! - Extracts price tokens from natural language (`extract`)
//! - Routes each message between negotiation and templated small talk
//!   (`composer`)
//! - Serializes processing per customer so bargaining rounds never
//!   interleave
//!
//! # Key Types
//!
//! - `ResponseComposer` - per-message orchestrator and the external API
//! - `PriceExtractor` - pluggable amount-parsing strategy
//! - `Clock` - injectable wall-clock hour for greeting selection
//!
//! # Decision Principle
//!
//! The composer never decides prices, stages or acceptance. Those are
//! deterministic decisions made by `palaver_core::NegotiationEngine`;
//! the composer only classifies, extracts and relays.

pub mod composer;
pub mod extract;

pub use composer::{Clock, FixedHourClock, ProductContext, ResponseComposer, SystemClock};
pub use extract::{contains_negotiation_marker, NairaPriceExtractor, PriceExtractor};
