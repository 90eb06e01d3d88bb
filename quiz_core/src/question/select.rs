//! Fair pair search over a bounded random sample.

use company_data::{Company, CompanyFilter, CompanyId, CompanyStore, VatPresence};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use crate::config::GameConfig;
use crate::question::QuestionKind;

/// Find a `(winner, loser)` pair for the given kind, or `None` when the
/// sampled records contain no fair comparison.
///
/// Draws a bounded random sample (cap `config.sample_cap`) from the
/// eligible, cooldown-excluded records, shuffles it, and scans ordered
/// pairs until one satisfies the kind's fairness predicate. The scan is
/// first-match, not best-match: the bounded O(n²) pass keeps cost
/// predictable and the per-attempt resampling keeps repeated plays varied.
/// Callers that get `None` should try a different kind rather than retry
/// with a larger sample.
pub fn select_pair<S, R>(
    kind: QuestionKind,
    store: &S,
    excluded: &HashSet<CompanyId>,
    config: &GameConfig,
    rng: &mut R,
) -> Option<(Company, Company)>
where
    S: CompanyStore,
    R: Rng + ?Sized,
{
    if kind == QuestionKind::Vat {
        return select_vat_pair(store, excluded, rng);
    }

    let filter = CompanyFilter::eligible().excluding(excluded.iter().copied());
    let mut sample = store.sample(&filter, config.sample_cap, rng);
    sample.shuffle(rng);

    for first in &sample {
        for second in &sample {
            if first.id == second.id {
                continue;
            }
            if let Some((winner, loser)) = kind.judge(first, second, &config.thresholds) {
                return Some((winner.clone(), loser.clone()));
            }
        }
    }

    debug!(?kind, sample_len = sample.len(), "no fair pair in sample");
    None
}

/// One record with a vat number and one without, drawn independently from
/// the eligible base. Fails when either draw comes back empty.
fn select_vat_pair<S, R>(
    store: &S,
    excluded: &HashSet<CompanyId>,
    rng: &mut R,
) -> Option<(Company, Company)>
where
    S: CompanyStore,
    R: Rng + ?Sized,
{
    let base = CompanyFilter::eligible().excluding(excluded.iter().copied());
    let with_vat = store.sample_one(&base.clone().with_vat(VatPresence::Present), rng)?;
    let without_vat = store.sample_one(&base.with_vat(VatPresence::Absent), rng)?;
    Some((with_vat, without_vat))
}
