//! Question kind definitions and fairness judgements.

use company_data::Company;
use serde::{Deserialize, Serialize};

use crate::config::FairnessThresholds;

/// The ten comparison question kinds.
///
/// Each kind carries its own fairness predicate and winner rule in
/// [`judge`](QuestionKind::judge); the serde tags are the stable strings
/// the session surface stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Which company is older.
    Age,
    /// Which has more employees.
    Employees,
    /// Which has higher revenue.
    Revenue,
    /// Which has higher profit.
    Profit,
    /// Which has higher labor costs.
    LaborTaxes,
    /// Which company is in the named county.
    County,
    /// Which company is led by the named CEO.
    Ceo,
    /// Which company has the named activity.
    Activity,
    /// Which company has the named legal form.
    LegalForm,
    /// Which company has a vat number.
    Vat,
}

impl QuestionKind {
    /// Every kind, in declaration order.
    pub const ALL: [QuestionKind; 10] = [
        QuestionKind::Age,
        QuestionKind::Employees,
        QuestionKind::Revenue,
        QuestionKind::Profit,
        QuestionKind::LaborTaxes,
        QuestionKind::County,
        QuestionKind::Ceo,
        QuestionKind::Activity,
        QuestionKind::LegalForm,
        QuestionKind::Vat,
    ];

    /// Judge whether two records form a fair comparison for this kind.
    ///
    /// Returns `(winner, loser)` when the pair qualifies: the winner is the
    /// company the question text will be phrased around. For the
    /// attribute-difference kinds (county, ceo, activity, legal form) either
    /// company could serve as the answer and the first one is chosen.
    ///
    /// `Vat` is paired by two independent draws in the selector instead and
    /// always returns `None` here.
    pub fn judge<'a>(
        &self,
        a: &'a Company,
        b: &'a Company,
        thresholds: &FairnessThresholds,
    ) -> Option<(&'a Company, &'a Company)> {
        match self {
            QuestionKind::Age => {
                let year_a = a.registered_year()?;
                let year_b = b.registered_year()?;
                if (year_a - year_b).abs() >= thresholds.years {
                    // The older company is the answer.
                    Some(if year_a < year_b { (a, b) } else { (b, a) })
                } else {
                    None
                }
            }
            QuestionKind::Employees => {
                judge_numeric(a, b, a.employees, b.employees, thresholds.employees)
            }
            QuestionKind::Revenue => judge_numeric(a, b, a.revenue, b.revenue, thresholds.revenue),
            QuestionKind::Profit => judge_numeric(a, b, a.profit, b.profit, thresholds.profit),
            QuestionKind::LaborTaxes => {
                judge_numeric(a, b, a.labor_taxes, b.labor_taxes, thresholds.labor_taxes)
            }
            QuestionKind::County => {
                let county_a = a.county_name()?;
                let county_b = b.county_name()?;
                if county_a != county_b {
                    Some((a, b))
                } else {
                    None
                }
            }
            QuestionKind::Ceo => judge_distinct_text(a, b, &a.ceo, &b.ceo),
            QuestionKind::Activity => judge_distinct_text(a, b, &a.activity, &b.activity),
            QuestionKind::LegalForm => judge_distinct_text(a, b, &a.legal_form, &b.legal_form),
            QuestionKind::Vat => None,
        }
    }
}

/// Higher value wins; both values must be present and far enough apart.
fn judge_numeric<'a>(
    a: &'a Company,
    b: &'a Company,
    value_a: Option<f64>,
    value_b: Option<f64>,
    min_diff: f64,
) -> Option<(&'a Company, &'a Company)> {
    let value_a = value_a?;
    let value_b = value_b?;
    if (value_a - value_b).abs() >= min_diff {
        Some(if value_a > value_b { (a, b) } else { (b, a) })
    } else {
        None
    }
}

/// Both texts must be non-empty and distinct; the first company wins.
fn judge_distinct_text<'a>(
    a: &'a Company,
    b: &'a Company,
    text_a: &str,
    text_b: &str,
) -> Option<(&'a Company, &'a Company)> {
    if !text_a.is_empty() && !text_b.is_empty() && text_a != text_b {
        Some((a, b))
    } else {
        None
    }
}
