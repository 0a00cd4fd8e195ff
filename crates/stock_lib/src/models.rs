//! This module contains the [`StockRecord`] struct, the shape of an entry of the master stock list.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// The category of a paper stock.
///
/// The master stock list stores it as a plain string. The categories that are embedded in the
/// documentation have their own variant, any other is kept as written so it can be saved back
/// unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockType {
    /// A cover stock.
    Cover,
    /// A text stock.
    Text,
    /// An offset stock.
    Offset,
    /// A bond stock.
    Bond,
    /// An envelope.
    Envelope,
    /// Any other category.
    Other(String),
}

impl StockType {
    /// Returns the name of the category, as written in the master stock list.
    pub fn as_str(&self) -> &str {
        match self {
            StockType::Cover => "Cover",
            StockType::Text => "Text",
            StockType::Offset => "Offset",
            StockType::Bond => "Bond",
            StockType::Envelope => "Envelope",
            StockType::Other(other) => other,
        }
    }
}

impl From<String> for StockType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Cover" => StockType::Cover,
            "Text" => StockType::Text,
            "Offset" => StockType::Offset,
            "Bond" => StockType::Bond,
            "Envelope" => StockType::Envelope,
            _ => StockType::Other(value),
        }
    }
}

impl From<StockType> for String {
    fn from(value: StockType) -> Self {
        match value {
            StockType::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for StockType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct StockFields {
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Basis_Weight", default)]
    basis_weight: Option<serde_json::Number>,
    #[serde(rename = "Finish", default)]
    finish: Option<String>,
    #[serde(rename = "Stock_Type")]
    stock_type: StockType,
    #[serde(rename = "SKU")]
    sku: String,
    #[serde(rename = "True_Cost_Per_Press_Sheet")]
    true_cost: f64,
    #[serde(rename = "Parent_Sheet_Size", default)]
    parent_sheet_size: Option<String>,
}

/// A paper stock of the master stock list.
///
/// The entry is kept as it was read, and it's serialized back unchanged: same keys, same order,
/// same numbers. The typed fields are read from it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct StockRecord {
    /// The brand of the stock, e.g. `Endurance`.
    pub brand: String,
    /// The basis weight, in pounds.
    pub basis_weight: Option<serde_json::Number>,
    /// The finish, e.g. `Gloss` or `Silk`.
    pub finish: Option<String>,
    /// The category of the stock.
    pub stock_type: StockType,
    /// The SKU, unique across the stock list.
    pub sku: String,
    /// The true cost of a press sheet, in dollars.
    pub true_cost: f64,
    /// The parent sheet size, only set for some envelopes.
    pub parent_sheet_size: Option<String>,
    raw: serde_json::Map<String, serde_json::Value>,
}

impl StockRecord {
    /// Returns the entry of the stock list this stock was read from.
    #[inline]
    pub fn raw(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.raw
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for StockRecord {
    type Error = serde_json::Error;

    fn try_from(raw: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let fields: StockFields = serde_json::from_value(serde_json::Value::Object(raw.clone()))?;

        Ok(Self {
            brand: fields.brand,
            basis_weight: fields.basis_weight,
            finish: fields.finish,
            stock_type: fields.stock_type,
            sku: fields.sku,
            true_cost: fields.true_cost,
            parent_sheet_size: fields.parent_sheet_size,
            raw,
        })
    }
}

impl Serialize for StockRecord {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
