//! This module contains the display types used to render a stock as compact inline text.

use std::fmt;

use crate::models::{StockRecord, StockType};

/// The size displayed for an envelope that has no parent sheet size.
pub const DEFAULT_ENVELOPE_SIZE: &str = "Env";

/// The weight displayed for a stock that has no basis weight.
pub const UNKNOWN_WEIGHT: &str = "?";

/// The formatted version of a press sheet cost, always with 4 fractional digits.
pub struct Cost(pub f64);

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.4}", self.0)
    }
}

/// The formatted version of a basis weight, truncated to an integer.
///
/// A missing or zero weight is displayed as [`UNKNOWN_WEIGHT`].
pub struct BasisWeight<'a>(pub Option<&'a serde_json::Number>);

impl fmt::Display for BasisWeight<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) if n.as_f64().is_some_and(|w| w != 0.) => {
                let w = n
                    .as_i64()
                    .unwrap_or_else(|| n.as_f64().unwrap_or_default() as i64);
                write!(f, "{w}")
            }
            _ => f.write_str(UNKNOWN_WEIGHT),
        }
    }
}

/// The compact inline version of a stock, as embedded in the documentation.
///
/// Envelopes are displayed as `{brand} {size} ({sku}/${cost})`, the other stocks as
/// `{brand} {weight}# {finish} ({sku}/${cost})`.
pub struct CompactStock<'a>(pub &'a StockRecord);

impl fmt::Display for CompactStock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stock = self.0;

        match stock.stock_type {
            StockType::Envelope => write!(
                f,
                "{} {}",
                stock.brand,
                stock
                    .parent_sheet_size
                    .as_deref()
                    .unwrap_or(DEFAULT_ENVELOPE_SIZE)
            )?,
            _ => {
                write!(
                    f,
                    "{} {}#",
                    stock.brand,
                    BasisWeight(stock.basis_weight.as_ref())
                )?;
                if let Some(finish) = &stock.finish {
                    write!(f, " {finish}")?;
                }
            }
        }

        write!(f, " ({}/{})", stock.sku, Cost(stock.true_cost))
    }
}

/// Returns the compact inline text of the provided stock.
///
/// See [`CompactStock`].
#[inline]
pub fn format_stock(stock: &StockRecord) -> String {
    CompactStock(stock).to_string()
}
