//! Estimated-value computation from a parsed price record.

use thiserror::Error;

use crate::prices::PriceRecord;

/// Errors from valuation.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// A price component required by the item's condition flags has no
    /// value. Not coerced to zero: zero is a legitimate price.
    #[error("{component} price unavailable but required for valuation")]
    ComponentUnavailable { component: &'static str },
}

/// Compute the estimated resale value for an item.
///
/// Additive, in fixed order: the loose price when available, plus the
/// box-only price when the item has its box, plus the manual-only price when
/// it has its manual. An unavailable box/manual price for a flagged item is
/// an error. Pure and recomputed fresh on every call.
pub fn estimate(
    prices: &PriceRecord,
    has_box: bool,
    has_manual: bool,
) -> Result<f64, ValuationError> {
    let mut value = 0.0;

    if let Some(loose) = prices.loose {
        value += loose;
    }

    if has_box {
        value += prices.box_only.ok_or(ValuationError::ComponentUnavailable {
            component: "box-only",
        })?;
    }

    if has_manual {
        value += prices
            .manual_only
            .ok_or(ValuationError::ComponentUnavailable {
                component: "manual-only",
            })?;
    }

    Ok(value)
}
