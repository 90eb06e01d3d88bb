//! Bounded-recency exclusion of question kinds and companies.

use company_data::CompanyId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::GameConfig;
use crate::question::QuestionKind;

/// Session-scoped memory of recently used question kinds and company ids.
///
/// Both histories are truncated to their exclusion windows on every
/// update, so the session payload stays bounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cooldown {
    recent_kinds: Vec<QuestionKind>,
    recent_company_ids: Vec<CompanyId>,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Question kinds outside the cooldown window.
    ///
    /// Falls back to the full kind set when everything is cooling down, so
    /// the cooldown can never block generation forever.
    pub fn available_kinds(&self, config: &GameConfig) -> Vec<QuestionKind> {
        let window_start = self.recent_kinds.len().saturating_sub(config.type_cooldown);
        let recent = &self.recent_kinds[window_start..];
        let available: Vec<QuestionKind> = QuestionKind::ALL
            .iter()
            .copied()
            .filter(|kind| !recent.contains(kind))
            .collect();
        if available.is_empty() {
            QuestionKind::ALL.to_vec()
        } else {
            available
        }
    }

    /// Company ids excluded from new candidate pools: the last
    /// `company_cooldown * 2` entries (a winner and a loser per question).
    pub fn excluded_company_ids(&self, config: &GameConfig) -> HashSet<CompanyId> {
        let window = config.company_cooldown * 2;
        let window_start = self.recent_company_ids.len().saturating_sub(window);
        self.recent_company_ids[window_start..].iter().copied().collect()
    }

    /// Record a generated question: the kind once, both company ids.
    pub fn record(
        &mut self,
        kind: QuestionKind,
        winner: CompanyId,
        loser: CompanyId,
        config: &GameConfig,
    ) {
        self.recent_kinds.push(kind);
        self.recent_company_ids.push(winner);
        self.recent_company_ids.push(loser);
        truncate_front(&mut self.recent_kinds, config.type_cooldown);
        truncate_front(&mut self.recent_company_ids, config.company_cooldown * 2);
    }

    pub fn clear(&mut self) {
        self.recent_kinds.clear();
        self.recent_company_ids.clear();
    }

    /// Kinds used recently, oldest first.
    pub fn recent_kinds(&self) -> &[QuestionKind] {
        &self.recent_kinds
    }

    /// Company ids used recently, oldest first.
    pub fn recent_company_ids(&self) -> &[CompanyId] {
        &self.recent_company_ids
    }
}

/// Keep only the last `keep` entries.
fn truncate_front<T>(items: &mut Vec<T>, keep: usize) {
    if items.len() > keep {
        items.drain(..items.len() - keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_available_initially() {
        let cooldown = Cooldown::new();
        let config = GameConfig::default();
        assert_eq!(cooldown.available_kinds(&config).len(), QuestionKind::ALL.len());
    }

    #[test]
    fn test_recent_kinds_are_excluded() {
        let mut cooldown = Cooldown::new();
        let config = GameConfig::default();
        let a = CompanyId::new();
        let b = CompanyId::new();

        cooldown.record(QuestionKind::Revenue, a, b, &config);
        cooldown.record(QuestionKind::Ceo, a, b, &config);

        let available = cooldown.available_kinds(&config);
        assert!(!available.contains(&QuestionKind::Revenue));
        assert!(!available.contains(&QuestionKind::Ceo));
        assert_eq!(available.len(), QuestionKind::ALL.len() - 2);
    }

    #[test]
    fn test_full_set_fallback_when_everything_cools_down() {
        let mut cooldown = Cooldown::new();
        let config = GameConfig {
            type_cooldown: QuestionKind::ALL.len(),
            ..Default::default()
        };
        for kind in QuestionKind::ALL {
            cooldown.record(kind, CompanyId::new(), CompanyId::new(), &config);
        }

        assert_eq!(cooldown.available_kinds(&config).len(), QuestionKind::ALL.len());
    }

    #[test]
    fn test_kind_history_truncated_to_window() {
        let mut cooldown = Cooldown::new();
        let config = GameConfig::default();
        for kind in QuestionKind::ALL {
            cooldown.record(kind, CompanyId::new(), CompanyId::new(), &config);
        }

        assert_eq!(cooldown.recent_kinds().len(), config.type_cooldown);
        // Only the last five kinds are still cooling down.
        let available = cooldown.available_kinds(&config);
        assert!(available.contains(&QuestionKind::Age));
        assert!(!available.contains(&QuestionKind::Vat));
    }

    #[test]
    fn test_excluded_company_ids_window() {
        let mut cooldown = Cooldown::new();
        let config = GameConfig::default();
        let pairs: Vec<(CompanyId, CompanyId)> =
            (0..4).map(|_| (CompanyId::new(), CompanyId::new())).collect();
        for (winner, loser) in &pairs {
            cooldown.record(QuestionKind::Revenue, *winner, *loser, &config);
        }

        let excluded = cooldown.excluded_company_ids(&config);
        assert_eq!(excluded.len(), config.company_cooldown * 2);
        // The last two questions' companies are excluded, the first two's are not.
        assert!(excluded.contains(&pairs[3].0));
        assert!(excluded.contains(&pairs[2].1));
        assert!(!excluded.contains(&pairs[0].0));
        assert!(!excluded.contains(&pairs[1].1));
    }

    #[test]
    fn test_clear() {
        let mut cooldown = Cooldown::new();
        let config = GameConfig::default();
        cooldown.record(QuestionKind::Age, CompanyId::new(), CompanyId::new(), &config);

        cooldown.clear();

        assert!(cooldown.recent_kinds().is_empty());
        assert!(cooldown.recent_company_ids().is_empty());
    }
}
