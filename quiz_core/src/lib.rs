//! # Quiz Core
//!
//! The fair pairing question engine. Given a store of company records, the
//! engine picks a question kind, finds two companies that form a fair,
//! non-repetitive comparison, renders the question text, and drives a
//! per-session state machine (question → answer → feedback → next question)
//! with a one-time promotional reveal tied to score.
//!
//! ## Core Components
//!
//! - **config**: immutable engine configuration (cooldown windows, fairness
//!   thresholds, promo threshold)
//! - **question**: question kinds, fair pair selection, text rendering
//! - **cooldown**: bounded-recency exclusion of kinds and companies
//! - **session**: per-player game state
//! - **engine**: the game-facing operations
//!
//! ## Design Philosophy
//!
//! - **Session-Owned State**: all mutable game state lives in a
//!   [`GameSession`] value the host owns; the engine itself is immutable
//!   per request
//! - **Store-Agnostic**: any [`company_data::CompanyStore`] works, and the
//!   engine tolerates records disappearing underneath it
//! - **Non-Fatal**: every failure degrades to a displayable condition;
//!   nothing in this crate aborts the host

pub mod config;
pub mod cooldown;
pub mod engine;
pub mod error;
pub mod question;
pub mod session;

pub use config::*;
pub use cooldown::*;
pub use engine::*;
pub use error::*;
pub use question::*;
pub use session::*;
