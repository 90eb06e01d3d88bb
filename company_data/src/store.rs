//! Query surface over company records.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::company::{Company, CompanyId};

/// Vat-number presence filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VatPresence {
    #[default]
    Any,
    Present,
    Absent,
}

/// Filter over company records.
///
/// Covers the slice of the persistence layer's query surface the quiz
/// needs: quiz eligibility, vat presence, and exclusion by id.
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    /// Keep only quiz-eligible records.
    pub eligible_only: bool,
    pub vat: VatPresence,
    pub exclude_ids: HashSet<CompanyId>,
}

impl CompanyFilter {
    /// Filter down to quiz-eligible records.
    pub fn eligible() -> Self {
        Self {
            eligible_only: true,
            ..Default::default()
        }
    }

    pub fn with_vat(mut self, vat: VatPresence) -> Self {
        self.vat = vat;
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = CompanyId>) -> Self {
        self.exclude_ids.extend(ids);
        self
    }

    /// Whether a record passes this filter.
    pub fn matches(&self, company: &Company) -> bool {
        if self.eligible_only && !company.is_quiz_eligible() {
            return false;
        }
        match self.vat {
            VatPresence::Any => {}
            VatPresence::Present => {
                if company.vat_number.is_empty() {
                    return false;
                }
            }
            VatPresence::Absent => {
                if !company.vat_number.is_empty() {
                    return false;
                }
            }
        }
        !self.exclude_ids.contains(&company.id)
    }
}

/// Read-only query surface the quiz engine consumes.
///
/// The backing store may be mutated at any time by the import pipeline, so
/// callers must tolerate `get` failing for an id they saw earlier.
pub trait CompanyStore {
    /// Fetch a single record by id.
    fn get(&self, id: CompanyId) -> Option<Company>;

    /// Up to `limit` matching records, in random order.
    fn sample<R: Rng + ?Sized>(
        &self,
        filter: &CompanyFilter,
        limit: usize,
        rng: &mut R,
    ) -> Vec<Company>;

    /// One random matching record, if any.
    fn sample_one<R: Rng + ?Sized>(&self, filter: &CompanyFilter, rng: &mut R) -> Option<Company> {
        self.sample(filter, 1, rng).pop()
    }

    /// Number of matching records.
    fn count(&self, filter: &CompanyFilter) -> usize;
}

/// HashMap-backed store, used in tests and by hosts without a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    companies: HashMap<CompanyId, Company>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning its id.
    pub fn insert(&mut self, company: Company) -> CompanyId {
        let id = company.id;
        self.companies.insert(id, company);
        id
    }

    /// Remove a record by id.
    pub fn remove(&mut self, id: CompanyId) -> Option<Company> {
        self.companies.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Number of records passing the store-level completeness rule.
    pub fn complete_count(&self) -> usize {
        self.companies
            .values()
            .filter(|company| company.is_complete())
            .count()
    }
}

impl CompanyStore for InMemoryStore {
    fn get(&self, id: CompanyId) -> Option<Company> {
        self.companies.get(&id).cloned()
    }

    fn sample<R: Rng + ?Sized>(
        &self,
        filter: &CompanyFilter,
        limit: usize,
        rng: &mut R,
    ) -> Vec<Company> {
        let mut matching: Vec<Company> = self
            .companies
            .values()
            .filter(|company| filter.matches(company))
            .cloned()
            .collect();
        matching.shuffle(rng);
        matching.truncate(limit);
        matching
    }

    fn count(&self, filter: &CompanyFilter) -> usize {
        self.companies
            .values()
            .filter(|company| filter.matches(company))
            .count()
    }
}
