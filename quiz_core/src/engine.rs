//! The game-facing engine: question generation, answering, feedback.

use company_data::{Company, CompanyId, CompanyStore};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::question::{question_text, select_pair};
use crate::session::{CurrentQuestion, Feedback, GameSession, SessionPhase, Side};

/// Display record for one side of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCard {
    pub id: CompanyId,
    pub name: String,
    pub registry_code: String,
    pub legal_form: String,
    pub registered_date: String,
    pub county: String,
    pub activity: String,
    pub ceo: String,
    pub employees: Option<f64>,
    pub revenue: Option<f64>,
    pub profit: Option<f64>,
    pub labor_taxes: Option<f64>,
    pub vat_number: String,
    /// False when the record vanished from the store after the question
    /// was generated.
    pub available: bool,
}

impl CompanyCard {
    fn from_company(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            registry_code: company.registry_code.clone(),
            legal_form: company.legal_form.clone(),
            registered_date: company.registered_date.clone(),
            county: company.county.clone(),
            activity: company.activity.clone(),
            ceo: company.ceo.clone(),
            employees: company.employees,
            revenue: company.revenue,
            profit: company.profit,
            labor_taxes: company.labor_taxes,
            vat_number: company.vat_number.clone(),
            available: true,
        }
    }

    /// Fallback card for a stale reference.
    fn unavailable(id: CompanyId) -> Self {
        Self {
            id,
            name: "?".to_string(),
            registry_code: String::new(),
            legal_form: String::new(),
            registered_date: String::new(),
            county: String::new(),
            activity: String::new(),
            ceo: String::new(),
            employees: None,
            revenue: None,
            profit: None,
            labor_taxes: None,
            vat_number: String::new(),
            available: false,
        }
    }
}

/// The question as shown to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub text: String,
    pub left: CompanyCard,
    pub right: CompanyCard,
}

/// Render-ready payload returned by every game operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub score: i32,
    pub points_to_win: i32,
    pub question: Option<QuestionView>,
    pub feedback: Option<Feedback>,
    /// One-shot promo reveal; true at most once per session.
    pub show_promo: bool,
    pub error: Option<EngineError>,
}

/// The fair pairing question engine.
///
/// Owns a read handle on the company store and an immutable configuration.
/// All per-player state lives in the [`GameSession`] passed to each call,
/// so one engine can serve any number of independent sessions.
pub struct QuizEngine<S: CompanyStore> {
    store: S,
    config: GameConfig,
}

impl<S: CompanyStore> QuizEngine<S> {
    pub fn new(store: S, config: GameConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serve the current state: the pending feedback if an answer was just
    /// submitted, otherwise a freshly generated question.
    pub fn load_or_init(&self, session: &mut GameSession) -> GameView {
        self.load_or_init_with(session, &mut rand::thread_rng())
    }

    /// Rng-injectable variant of [`load_or_init`](QuizEngine::load_or_init).
    pub fn load_or_init_with<R: Rng + ?Sized>(
        &self,
        session: &mut GameSession,
        rng: &mut R,
    ) -> GameView {
        if session.phase() == SessionPhase::ShowingFeedback {
            return self.feedback_view(session);
        }
        self.generate(session, rng)
    }

    /// Judge a submitted answer.
    ///
    /// Only valid while a question is awaiting an answer; submissions with
    /// no pending question, or while feedback is already showing, change
    /// nothing and return the current state. Score moves by exactly one in
    /// either direction, and the promo reveal arms the first time the
    /// score reaches the threshold.
    pub fn submit_answer(&self, session: &mut GameSession, side: Side) -> GameView {
        if session.phase() != SessionPhase::AwaitingAnswer {
            debug!("answer ignored: no question awaiting");
            return self.snapshot(session);
        }
        let Some(question) = session.current_question.clone() else {
            return self.snapshot(session);
        };

        let correct = side == question.correct_side;
        if correct {
            session.score += 1;
        } else {
            session.score -= 1;
        }
        session.feedback = Some(Feedback {
            correct,
            selected: side,
            correct_side: question.correct_side,
        });

        if session.score >= self.config.promo_threshold && !session.promo_shown {
            session.promo_shown = true;
            session.promo_pending = true;
            debug!(score = session.score, "promo reveal unlocked");
        }

        self.feedback_view(session)
    }

    /// Clear feedback and move on to the next question.
    pub fn continue_after_feedback(&self, session: &mut GameSession) -> GameView {
        self.continue_after_feedback_with(session, &mut rand::thread_rng())
    }

    /// Rng-injectable variant of
    /// [`continue_after_feedback`](QuizEngine::continue_after_feedback).
    pub fn continue_after_feedback_with<R: Rng + ?Sized>(
        &self,
        session: &mut GameSession,
        rng: &mut R,
    ) -> GameView {
        session.feedback = None;
        self.generate(session, rng)
    }

    /// Reset the whole game: score, histories, promo state.
    pub fn reset(&self, session: &mut GameSession) -> GameView {
        session.reset();
        GameView {
            score: 0,
            points_to_win: self.config.promo_threshold,
            question: None,
            feedback: None,
            show_promo: false,
            error: None,
        }
    }

    /// Try each cooldown-eligible kind in random order until one yields a
    /// fair pair, then place the answer on a uniformly random side.
    fn generate<R: Rng + ?Sized>(&self, session: &mut GameSession, rng: &mut R) -> GameView {
        let mut kinds = session.cooldown.available_kinds(&self.config);
        kinds.shuffle(rng);
        let excluded = session.cooldown.excluded_company_ids(&self.config);

        for kind in kinds {
            let Some((winner, loser)) = select_pair(kind, &self.store, &excluded, &self.config, rng)
            else {
                continue;
            };

            let text = question_text(kind, &winner);
            let (left, right, correct_side) = if rng.gen_bool(0.5) {
                (winner.clone(), loser.clone(), Side::Left)
            } else {
                (loser.clone(), winner.clone(), Side::Right)
            };

            session.cooldown.record(kind, winner.id, loser.id, &self.config);
            session.current_question = Some(CurrentQuestion {
                kind,
                text: text.clone(),
                left: left.id,
                right: right.id,
                correct_side,
                correct_id: winner.id,
            });
            debug!(?kind, "question generated");

            return GameView {
                score: session.score,
                points_to_win: self.config.promo_threshold,
                question: Some(QuestionView {
                    text,
                    left: CompanyCard::from_company(&left),
                    right: CompanyCard::from_company(&right),
                }),
                feedback: None,
                show_promo: false,
                error: None,
            };
        }

        warn!("no question kind produced a fair pair");
        session.current_question = None;
        GameView {
            score: session.score,
            points_to_win: self.config.promo_threshold,
            question: None,
            feedback: None,
            show_promo: false,
            error: Some(EngineError::DataUnavailable),
        }
    }

    /// The feedback payload: the same question and companies plus the
    /// outcome. Idempotent except for the one-shot promo signal.
    fn feedback_view(&self, session: &mut GameSession) -> GameView {
        let question = session
            .current_question
            .as_ref()
            .map(|question| self.question_view(question));
        GameView {
            score: session.score,
            points_to_win: self.config.promo_threshold,
            question,
            feedback: session.feedback,
            show_promo: session.take_promo(),
            error: None,
        }
    }

    /// Current state without advancing anything; returned for ignored
    /// submissions.
    fn snapshot(&self, session: &GameSession) -> GameView {
        GameView {
            score: session.score,
            points_to_win: self.config.promo_threshold,
            question: session
                .current_question
                .as_ref()
                .map(|question| self.question_view(question)),
            feedback: session.feedback,
            show_promo: false,
            error: None,
        }
    }

    fn question_view(&self, question: &CurrentQuestion) -> QuestionView {
        QuestionView {
            text: question.text.clone(),
            left: self.card(question.left),
            right: self.card(question.right),
        }
    }

    /// Resolve a display card, tolerating the record disappearing from the
    /// store between generation and rendering.
    fn card(&self, id: CompanyId) -> CompanyCard {
        match self.store.get(id) {
            Some(company) => CompanyCard::from_company(&company),
            None => {
                warn!(%id, "company vanished from store, rendering placeholder");
                CompanyCard::unavailable(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionKind;
    use company_data::InMemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn eligible_company(name: &str) -> Company {
        Company::new(name, name)
            .with_legal_form("OÜ")
            .with_registered_date("01.01.2010")
            .with_county("Tallinn, Harju maakond")
            .with_activity("Jaekaubandus")
            .with_ceo("Mati Maasikas")
            .with_vat_number("EE100000001")
            .with_financials(10.0, 100_000.0, 10_000.0, 5_000.0)
    }

    /// Twelve records differing in every compared attribute, so most kinds
    /// can always find a pair.
    fn varied_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for i in 0..12_i32 {
            let mut company = eligible_company(&format!("Firma {i}"));
            company.registered_date = format!("01.01.{}", 1990 + i * 3);
            company.county = format!("Linn {i}, Maakond{i} maakond");
            company.ceo = format!("Juht {i}");
            company.activity = format!("Tegevusala {i}");
            company.legal_form = if i % 2 == 0 { "OÜ" } else { "AS" }.to_string();
            company.employees = Some(f64::from(10 + i * 30));
            company.revenue = Some(f64::from(i) * 3_000_000.0);
            company.profit = Some(f64::from(i) * 700_000.0);
            company.labor_taxes = Some(f64::from(i) * 150_000.0);
            store.insert(company);
        }
        store
    }

    fn engine(store: InMemoryStore) -> QuizEngine<InMemoryStore> {
        QuizEngine::new(store, GameConfig::default())
    }

    #[test]
    fn test_revenue_round_trip_scenario() {
        // Two companies identical except for revenue: the only fair pair
        // is a revenue question with the richer one as the answer.
        let mut store = InMemoryStore::new();
        let mut poor = eligible_company("Poor");
        poor.revenue = Some(100_000.0);
        let mut rich = eligible_company("Rich");
        rich.revenue = Some(3_000_000.0);
        let rich_id = store.insert(rich);
        store.insert(poor);
        let engine = engine(store);

        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(3);
        let view = engine.load_or_init_with(&mut session, &mut rng);

        let question = session.current_question.as_ref().unwrap();
        assert_eq!(question.kind, QuestionKind::Revenue);
        assert_eq!(question.correct_id, rich_id);
        assert!(view.question.unwrap().text.contains("käive"));
        assert!(view.error.is_none());
        assert_eq!(session.phase(), SessionPhase::AwaitingAnswer);
    }

    #[test]
    fn test_generate_data_unavailable() {
        let mut store = InMemoryStore::new();
        store.insert(eligible_company("Lonely"));
        let engine = engine(store);

        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(3);
        let view = engine.load_or_init_with(&mut session, &mut rng);

        assert_eq!(view.error, Some(EngineError::DataUnavailable));
        assert!(view.question.is_none());
        assert_eq!(session.phase(), SessionPhase::NoQuestion);
        assert_eq!(view.points_to_win, engine.config().promo_threshold);
        assert_eq!(engine.store().len(), 1);
        // Displayable message for the host.
        assert_eq!(
            view.error.unwrap().to_string(),
            "Ei suutnud küsimust genereerida. Proovi uuesti."
        );
    }

    #[test]
    fn test_wrong_answer_decrements_score() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(5);
        engine.load_or_init_with(&mut session, &mut rng);

        let correct_side = session.current_question.as_ref().unwrap().correct_side;
        let wrong_side = match correct_side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        let view = engine.submit_answer(&mut session, wrong_side);

        assert_eq!(session.score, -1);
        let feedback = view.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.selected, wrong_side);
        assert_eq!(feedback.correct_side, correct_side);
        assert_eq!(session.phase(), SessionPhase::ShowingFeedback);
    }

    #[test]
    fn test_correct_answer_increments_score() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(5);
        engine.load_or_init_with(&mut session, &mut rng);

        let correct_side = session.current_question.as_ref().unwrap().correct_side;
        let view = engine.submit_answer(&mut session, correct_side);

        assert_eq!(session.score, 1);
        assert!(view.feedback.unwrap().correct);
    }

    #[test]
    fn test_invalid_submissions_are_ignored() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();

        // No question yet.
        let view = engine.submit_answer(&mut session, Side::Left);
        assert_eq!(session.score, 0);
        assert!(view.feedback.is_none());

        // Feedback already showing: a second submission changes nothing.
        let mut rng = StdRng::seed_from_u64(5);
        engine.load_or_init_with(&mut session, &mut rng);
        let correct_side = session.current_question.as_ref().unwrap().correct_side;
        engine.submit_answer(&mut session, correct_side);
        assert_eq!(session.score, 1);

        engine.submit_answer(&mut session, correct_side);
        engine.submit_answer(&mut session, Side::Left);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_feedback_view_idempotent_promo_once() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();
        session.score = 4;

        let mut rng = StdRng::seed_from_u64(11);
        engine.load_or_init_with(&mut session, &mut rng);
        let correct_side = session.current_question.as_ref().unwrap().correct_side;
        let first = engine.submit_answer(&mut session, correct_side);

        assert_eq!(session.score, 5);
        assert!(first.show_promo);
        assert!(session.promo_shown);

        // Re-viewing the feedback repeats the payload, not the promo.
        let second = engine.load_or_init_with(&mut session, &mut rng);
        assert!(!second.show_promo);
        assert_eq!(second.feedback, first.feedback);
        assert_eq!(
            second.question.as_ref().unwrap().text,
            first.question.as_ref().unwrap().text
        );

        let third = engine.load_or_init_with(&mut session, &mut rng);
        assert!(!third.show_promo);
        assert_eq!(third.feedback, first.feedback);
    }

    #[test]
    fn test_promo_fires_only_once_per_session() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();
        session.score = 4;
        let mut rng = StdRng::seed_from_u64(13);

        let mut promo_count = 0;
        for _ in 0..6 {
            let generated = engine.load_or_init_with(&mut session, &mut rng);
            if generated.error.is_some() {
                continue;
            }
            let correct_side = session.current_question.as_ref().unwrap().correct_side;
            let view = engine.submit_answer(&mut session, correct_side);
            if view.show_promo {
                promo_count += 1;
            }
            engine.continue_after_feedback_with(&mut session, &mut rng);
        }

        assert!(session.score >= 5);
        assert_eq!(promo_count, 1);

        // Reset re-arms the promo.
        engine.reset(&mut session);
        assert!(!session.promo_shown);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_cooldown_invariants_over_many_rounds() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(17);
        let config = GameConfig::default();

        let mut seen_kinds: Vec<QuestionKind> = Vec::new();
        let mut seen_ids: Vec<CompanyId> = Vec::new();

        for round in 0..20 {
            // Exactly one generation per round, so the local history stays
            // in step with the session's cooldown windows.
            let view = if round == 0 {
                engine.load_or_init_with(&mut session, &mut rng)
            } else {
                engine.continue_after_feedback_with(&mut session, &mut rng)
            };
            assert!(view.error.is_none(), "varied store should always pair");
            let question = session.current_question.clone().unwrap();

            let kind_window = seen_kinds
                .iter()
                .rev()
                .take(config.type_cooldown)
                .copied()
                .collect::<Vec<_>>();
            assert!(
                !kind_window.contains(&question.kind),
                "{:?} repeated within its cooldown window",
                question.kind
            );

            let id_window = seen_ids
                .iter()
                .rev()
                .take(config.company_cooldown * 2)
                .copied()
                .collect::<Vec<_>>();
            assert!(!id_window.contains(&question.left));
            assert!(!id_window.contains(&question.right));

            seen_kinds.push(question.kind);
            seen_ids.push(question.correct_id);
            let loser = if question.correct_side == Side::Left {
                question.right
            } else {
                question.left
            };
            seen_ids.push(loser);

            engine.submit_answer(&mut session, question.correct_side);
        }
    }

    #[test]
    fn test_exclusion_is_never_dropped() {
        // With exactly one pairable duo, the cooldown exclusion empties the
        // pool for the next question. Generation reports unavailability
        // instead of relaxing the exclusion.
        let mut store = InMemoryStore::new();
        let mut poor = eligible_company("Poor");
        poor.revenue = Some(100_000.0);
        let mut rich = eligible_company("Rich");
        rich.revenue = Some(3_000_000.0);
        store.insert(rich);
        store.insert(poor);
        let engine = engine(store);

        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(31);
        let first = engine.load_or_init_with(&mut session, &mut rng);
        assert!(first.question.is_some());

        let correct_side = session.current_question.as_ref().unwrap().correct_side;
        engine.submit_answer(&mut session, correct_side);
        let second = engine.continue_after_feedback_with(&mut session, &mut rng);

        assert_eq!(second.error, Some(EngineError::DataUnavailable));
        assert_eq!(session.phase(), SessionPhase::NoQuestion);
    }

    #[test]
    fn test_stale_reference_renders_placeholder() {
        let store = varied_store();
        let engine_before = QuizEngine::new(store.clone(), GameConfig::default());
        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(19);

        engine_before.load_or_init_with(&mut session, &mut rng);
        let question = session.current_question.clone().unwrap();
        let correct_side = question.correct_side;
        engine_before.submit_answer(&mut session, correct_side);
        let score_before = session.score;

        // The import pipeline removed a referenced record under us.
        let mut changed = store;
        changed.remove(question.left);
        let engine_after = QuizEngine::new(changed, GameConfig::default());

        let view = engine_after.load_or_init_with(&mut session, &mut rng);
        let shown = view.question.unwrap();
        assert!(!shown.left.available);
        assert_eq!(shown.left.name, "?");
        assert!(shown.right.available);
        assert_eq!(view.score, score_before);
        assert!(view.feedback.is_some());
    }

    #[test]
    fn test_reset_returns_empty_view() {
        let engine = engine(varied_store());
        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(23);
        engine.load_or_init_with(&mut session, &mut rng);
        engine.submit_answer(&mut session, Side::Left);

        let view = engine.reset(&mut session);

        assert_eq!(view.score, 0);
        assert!(view.question.is_none());
        assert!(view.feedback.is_none());
        assert!(!view.show_promo);
        assert_eq!(session.phase(), SessionPhase::NoQuestion);
    }

    #[test]
    fn test_left_right_placement_varies() {
        let engine = engine(varied_store());
        let mut rng = StdRng::seed_from_u64(29);
        let mut seen_left = false;
        let mut seen_right = false;

        for _ in 0..30 {
            let mut session = GameSession::new();
            engine.load_or_init_with(&mut session, &mut rng);
            match session.current_question.unwrap().correct_side {
                Side::Left => seen_left = true,
                Side::Right => seen_right = true,
            }
        }

        assert!(seen_left && seen_right);
    }
}
