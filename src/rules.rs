//! Credit risk rules.
//!
//! Each rule reads one statement of a [`FinancialDataset`], derives a metric
//! and maps it to a [`Flag`] through a fixed threshold. Missing values count
//! as zero, so every rule produces a flag for any input.

use crate::errors::AppError;
use crate::models::{FinancialDataset, Flag, FlagReport};
use serde_json::Value;

/// Minimum net revenue (5 crore) for a green revenue flag.
pub const REVENUE_THRESHOLD: f64 = 50_000_000.0;
/// Highest borrowing-to-revenue ratio that is still green.
pub const BORROWING_TO_REVENUE_MAX: f64 = 0.25;
/// Minimum interest service coverage ratio for a green ISCR flag.
pub const ISCR_MIN: f64 = 2.0;

pub const TOTAL_REVENUE_5CR_FLAG: &str = "TOTAL_REVENUE_5CR_FLAG";
pub const BORROWING_TO_REVENUE_FLAG: &str = "BORROWING_TO_REVENUE_FLAG";
pub const ISCR_FLAG: &str = "ISCR_FLAG";

/// A named rule evaluated against the selected statement.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&FinancialDataset, usize) -> Flag,
}

/// Rules applied by [`evaluate`]. They are independent of each other.
pub const RULES: [Rule; 3] = [
    Rule {
        name: TOTAL_REVENUE_5CR_FLAG,
        evaluate: total_revenue_5cr_flag,
    },
    Rule {
        name: BORROWING_TO_REVENUE_FLAG,
        evaluate: borrowing_to_revenue_flag,
    },
    Rule {
        name: ISCR_FLAG,
        evaluate: iscr_flag,
    },
];

/// Absent amounts count as zero.
fn amount(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Index of the first standalone statement, or 0 if there is none.
///
/// The returned index is not guaranteed to exist (an empty list also yields
/// 0); the metric functions treat a missing statement as all-zero.
pub fn select_latest_index(dataset: &FinancialDataset) -> usize {
    dataset
        .financials
        .iter()
        .position(|statement| statement.is_standalone())
        .unwrap_or(0)
}

/// `pnl.lineItems.net_revenue` of the statement at `index`.
pub fn total_revenue(dataset: &FinancialDataset, index: usize) -> f64 {
    dataset
        .statement(index)
        .and_then(|statement| statement.line_items())
        .map(|items| amount(items.net_revenue))
        .unwrap_or(0.0)
}

/// Long-term plus short-term borrowings of the statement at `index`.
pub fn total_borrowing(dataset: &FinancialDataset, index: usize) -> f64 {
    dataset
        .statement(index)
        .and_then(|statement| statement.liabilities())
        .map(|liabilities| {
            amount(liabilities.long_term_borrowings) + amount(liabilities.short_term_borrowings)
        })
        .unwrap_or(0.0)
}

/// Interest service coverage ratio: `(PBIT + depreciation + 1) / (interest + 1)`.
///
/// The `+1` terms keep the ratio defined when interest is zero. Returns 0.0
/// when the statement has no `pnl.lineItems`, or when interest is exactly -1.
pub fn interest_service_coverage_ratio(dataset: &FinancialDataset, index: usize) -> f64 {
    let Some(items) = dataset
        .statement(index)
        .and_then(|statement| statement.line_items())
    else {
        return 0.0;
    };

    let numerator =
        amount(items.profit_before_interest_and_tax) + amount(items.depreciation) + 1.0;
    let denominator = amount(items.interest) + 1.0;
    if denominator == 0.0 {
        return 0.0;
    }

    numerator / denominator
}

/// GREEN when net revenue is at least 5 crore, otherwise RED.
pub fn total_revenue_5cr_flag(dataset: &FinancialDataset, index: usize) -> Flag {
    if total_revenue(dataset, index) >= REVENUE_THRESHOLD {
        Flag::Green
    } else {
        Flag::Red
    }
}

/// GREEN when borrowings are at most a quarter of revenue, otherwise AMBER.
///
/// Zero revenue gives AMBER regardless of borrowings.
pub fn borrowing_to_revenue_flag(dataset: &FinancialDataset, index: usize) -> Flag {
    let revenue = total_revenue(dataset, index);
    if revenue == 0.0 {
        return Flag::Amber;
    }

    let ratio = total_borrowing(dataset, index) / revenue;
    if ratio <= BORROWING_TO_REVENUE_MAX {
        Flag::Green
    } else {
        Flag::Amber
    }
}

/// GREEN when ISCR is at least 2, otherwise RED.
pub fn iscr_flag(dataset: &FinancialDataset, index: usize) -> Flag {
    if interest_service_coverage_ratio(dataset, index) >= ISCR_MIN {
        Flag::Green
    } else {
        Flag::Red
    }
}

/// Selects the latest statement once and applies every rule to it.
pub fn evaluate(dataset: &FinancialDataset) -> FlagReport {
    let index = select_latest_index(dataset);
    FlagReport {
        flags: RULES
            .iter()
            .map(|rule| (rule.name.to_string(), (rule.evaluate)(dataset, index)))
            .collect(),
    }
}

/// Parses an uploaded document and evaluates its `data` object.
///
/// # Errors
///
/// * `AppError::InvalidJson` - the bytes are not a JSON document.
/// * `AppError::InvalidDataStructure` - the document has no `data` object.
pub fn analyze_document(content: &[u8]) -> Result<FlagReport, AppError> {
    let document: Value = serde_json::from_slice(content).map_err(|_| AppError::InvalidJson)?;
    let dataset =
        FinancialDataset::from_document(document).ok_or(AppError::InvalidDataStructure)?;
    Ok(evaluate(&dataset))
}
