//! Company record definitions.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for company records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    /// Create a new random company ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a company ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty company ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One business record from the registry.
///
/// String fields are empty and numeric fields `None` when the upstream
/// source did not provide them; the import pipeline fills in whatever it
/// can and this crate treats every field as optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub registry_code: String,
    pub legal_form: String,
    pub status: String,
    pub status_text: String,
    /// Registration date as `DD.MM.YYYY`, or empty when unknown.
    pub registered_date: String,
    pub address: String,
    /// Free-form region string, typically `"address, city, X maakond"`.
    pub county: String,
    pub postal_code: String,
    pub activity_code: String,
    pub activity: String,
    pub vat_number: String,
    pub state_taxes: Option<f64>,
    pub labor_taxes: Option<f64>,
    pub ceo: String,
    /// Comma-separated board member names.
    pub board_members: String,
    pub employees: Option<f64>,
    pub revenue: Option<f64>,
    pub profit: Option<f64>,
    pub report_year: String,
    pub registry_link: String,
}

impl Company {
    /// Create a new record with the given name and registry code.
    pub fn new(name: impl Into<String>, registry_code: impl Into<String>) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            registry_code: registry_code.into(),
            ..Default::default()
        }
    }

    pub fn with_legal_form(mut self, legal_form: impl Into<String>) -> Self {
        self.legal_form = legal_form.into();
        self
    }

    pub fn with_registered_date(mut self, date: impl Into<String>) -> Self {
        self.registered_date = date.into();
        self
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = county.into();
        self
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = activity.into();
        self
    }

    pub fn with_ceo(mut self, ceo: impl Into<String>) -> Self {
        self.ceo = ceo.into();
        self
    }

    pub fn with_vat_number(mut self, vat_number: impl Into<String>) -> Self {
        self.vat_number = vat_number.into();
        self
    }

    pub fn with_board_members(mut self, board_members: impl Into<String>) -> Self {
        self.board_members = board_members.into();
        self
    }

    /// Set all four financial figures at once.
    pub fn with_financials(
        mut self,
        employees: f64,
        revenue: f64,
        profit: f64,
        labor_taxes: f64,
    ) -> Self {
        self.employees = Some(employees);
        self.revenue = Some(revenue);
        self.profit = Some(profit);
        self.labor_taxes = Some(labor_taxes);
        self
    }

    /// Year the company was registered, parsed from `DD.MM.YYYY`.
    ///
    /// `None` when the date is empty or unparseable.
    pub fn registered_year(&self) -> Option<i32> {
        if self.registered_date.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(&self.registered_date, "%d.%m.%Y")
            .ok()
            .map(|date| date.year())
    }

    /// Normalized county name: the last comma-separated segment of the
    /// region string, `" maakond"` suffix stripped, lowercased.
    ///
    /// `"Pärnu mnt 1, Tallinn, Harju maakond"` becomes `"harju"`.
    pub fn county_name(&self) -> Option<String> {
        if self.county.is_empty() {
            return None;
        }
        let last = self.county.split(',').last()?.trim();
        let name = last.replace(" maakond", "");
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Board members as individual names.
    pub fn board_member_list(&self) -> Vec<String> {
        if self.board_members.is_empty() {
            return Vec::new();
        }
        self.board_members
            .split(',')
            .map(|member| member.trim().to_string())
            .collect()
    }

    /// Store-level completeness: every descriptive field filled in, board
    /// members listed, all financial figures present.
    ///
    /// Note: this predicate requires board members but not a vat number.
    /// Quiz eligibility is the other way around (see [`is_quiz_eligible`]);
    /// the two definitions diverge in the registry product and are kept
    /// separate on purpose.
    ///
    /// [`is_quiz_eligible`]: Company::is_quiz_eligible
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.registry_code.is_empty()
            && !self.legal_form.is_empty()
            && !self.registered_date.is_empty()
            && !self.county.is_empty()
            && !self.activity.is_empty()
            && !self.ceo.is_empty()
            && !self.board_members.is_empty()
            && self.employees.is_some()
            && self.revenue.is_some()
            && self.profit.is_some()
            && self.labor_taxes.is_some()
    }

    /// Game-side eligibility: every descriptive field filled in, all
    /// financial figures present, and a vat number. Board members are not
    /// required here.
    pub fn is_quiz_eligible(&self) -> bool {
        !self.name.is_empty()
            && !self.registry_code.is_empty()
            && !self.legal_form.is_empty()
            && !self.registered_date.is_empty()
            && !self.county.is_empty()
            && !self.activity.is_empty()
            && !self.ceo.is_empty()
            && !self.vat_number.is_empty()
            && self.employees.is_some()
            && self.revenue.is_some()
            && self.profit.is_some()
            && self.labor_taxes.is_some()
    }
}
