//! Estonian question text rendering.

use company_data::Company;

use crate::question::QuestionKind;

/// Maximum activity description length before truncation.
const ACTIVITY_PREVIEW_LEN: usize = 60;

/// Render the question for a kind, phrased around the correct company.
///
/// Pure and deterministic. Parse failures degrade to generic phrasings or
/// fallback labels rather than failing the question.
pub fn question_text(kind: QuestionKind, correct: &Company) -> String {
    match kind {
        QuestionKind::Age => match correct.registered_year() {
            Some(year) => format!("Milline ettevõte asutati aastal {year}?"),
            None => "Milline ettevõte on vanem?".to_string(),
        },
        QuestionKind::Employees => {
            let employees = correct.employees.unwrap_or(0.0) as i64;
            format!("Millisel ettevõttel on {employees} töötajat?")
        }
        QuestionKind::Revenue => format!(
            "Millisel ettevõttel on käive {} eurot?",
            format_euros(correct.revenue.unwrap_or(0.0))
        ),
        QuestionKind::Profit => format!(
            "Millisel ettevõttel on kasum {} eurot?",
            format_euros(correct.profit.unwrap_or(0.0))
        ),
        QuestionKind::LaborTaxes => format!(
            "Millisel ettevõttel on tööjõukulud {} eurot?",
            format_euros(correct.labor_taxes.unwrap_or(0.0))
        ),
        QuestionKind::County => format!("Milline ettevõte asub {}?", county_display(correct)),
        QuestionKind::Ceo => format!("Millist ettevõtet juhib {}?", correct.ceo),
        QuestionKind::Activity => format!(
            "Milline ettevõte tegeleb: {}?",
            activity_preview(&correct.activity)
        ),
        QuestionKind::LegalForm => format!("Milline ettevõte on {}?", correct.legal_form),
        QuestionKind::Vat => format!(
            "Millisel ettevõttel on KMKR number {}?",
            correct.vat_number
        ),
    }
}

/// Format a euro amount at a readable magnitude: millions to one decimal,
/// thousands rounded, small values raw.
fn format_euros(value: f64) -> String {
    let value = value as i64;
    if value >= 1_000_000 {
        format!("{:.1} miljonit", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.0} tuhat", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// County name re-capitalized for display with the `" maakond"` suffix
/// re-appended; falls back to the raw last segment, then `"?"`.
fn county_display(company: &Company) -> String {
    if let Some(name) = company.county_name() {
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            return format!("{}{} maakond", first.to_uppercase(), chars.as_str());
        }
    }
    let last = company.county.split(',').last().unwrap_or("").trim();
    if last.is_empty() {
        "?".to_string()
    } else {
        last.to_string()
    }
}

/// First 60 characters of the activity text, with an ellipsis when cut.
/// Counted in characters, not bytes - the descriptions are Estonian.
fn activity_preview(activity: &str) -> String {
    if activity.chars().count() > ACTIVITY_PREVIEW_LEN {
        let preview: String = activity.chars().take(ACTIVITY_PREVIEW_LEN).collect();
        format!("{preview}...")
    } else {
        activity.to_string()
    }
}
