//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the host application.
///
/// This is deliberately small: invalid transitions (answering with no
/// pending question, unknown side values) are silently ignored, and stale
/// references and parse failures degrade to fallback rendering instead of
/// erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EngineError {
    /// No question kind could produce a fair pair under the current
    /// cooldown state. Clears itself as histories age out or the store
    /// grows; the game stays playable.
    #[error("Ei suutnud küsimust genereerida. Proovi uuesti.")]
    DataUnavailable,
}
