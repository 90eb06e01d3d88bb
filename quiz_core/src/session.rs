//! Per-session game state.

use company_data::CompanyId;
use serde::{Deserialize, Serialize};

use crate::cooldown::Cooldown;
use crate::question::QuestionKind;

/// Left/right position of a company in a question, also used for the
/// player's pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Parse a transport-level side parameter. Unknown values yield `None`
    /// and the host drops the submission.
    pub fn parse(raw: &str) -> Option<Side> {
        match raw {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentQuestion {
    pub kind: QuestionKind,
    pub text: String,
    pub left: CompanyId,
    pub right: CompanyId,
    pub correct_side: Side,
    pub correct_id: CompanyId,
}

/// Outcome of the last answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub selected: Side,
    pub correct_side: Side,
}

/// Coarse position in the question/answer/feedback cycle, derived from
/// which fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoQuestion,
    AwaitingAnswer,
    ShowingFeedback,
}

/// All mutable state for one player's game.
///
/// The host owns one value per session (typically serialized into its
/// session storage) and serializes access to it; nothing here is shared
/// across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    pub score: i32,
    pub cooldown: Cooldown,
    pub current_question: Option<CurrentQuestion>,
    pub feedback: Option<Feedback>,
    /// True once the one-time promo reveal has fired for this session.
    pub promo_shown: bool,
    /// One-shot signal, consumed by the next feedback view.
    pub promo_pending: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.feedback.is_some() {
            SessionPhase::ShowingFeedback
        } else if self.current_question.is_some() {
            SessionPhase::AwaitingAnswer
        } else {
            SessionPhase::NoQuestion
        }
    }

    /// Back to a fresh game: zero score, empty histories, promo re-armed.
    pub fn reset(&mut self) {
        *self = GameSession::default();
    }

    /// Consume the one-shot promo signal.
    pub(crate) fn take_promo(&mut self) -> bool {
        std::mem::take(&mut self.promo_pending)
    }
}
