//! Validation and normalization utilities

use bigdecimal::{BigDecimal, RoundingMode};

use crate::types::*;

/// Default and maximum number of transactions returned per page
pub const DEFAULT_PAGE_LIMIT: usize = 25;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::Validation(
            "amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Truncate an amount to two decimal digits, rounding toward negative
/// infinity: `floor(amount * 100) / 100`. `10.555` becomes `10.55`.
pub fn normalize_amount(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(AMOUNT_SCALE, RoundingMode::Floor)
}

/// Page index requested by a caller, with anything absent or negative mapped to 0
pub fn clamp_page(page: Option<i64>) -> usize {
    match page {
        Some(page) if page > 0 => usize::try_from(page).unwrap_or(usize::MAX),
        _ => 0,
    }
}

/// Page size requested by a caller. Absent, non-positive and oversized
/// values all fall back to `max`.
pub fn clamp_limit(limit: Option<i64>, max: usize) -> usize {
    match limit.and_then(|limit| usize::try_from(limit).ok()) {
        Some(limit) if limit > 0 && limit <= max => limit,
        _ => max,
    }
}
