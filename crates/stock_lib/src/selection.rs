//! This module contains the [`Selection`] of the stocks embedded in the documentation, and the
//! [`select()`] function used to pick them from the master stock list.

use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use itertools::Itertools as _;
use serde::Deserialize;

use crate::{
    error::{StockError, StockResult},
    models::StockRecord,
};

/// The SKUs of the 20 most common stocks.
///
/// Update this list as usage patterns change, and bump [`TOP_20_VERSION`].
pub const TOP_20_SKUS: [&str; 20] = [
    "10735784", // Endurance 100# Gloss Cover
    "10703893", // Endurance 130# Gloss Cover
    "10735801", // Endurance 80# Gloss Text
    "10735785", // Endurance 100# Gloss Text
    "20033067", // Endurance 130# Silk Cover
    "10735802", // Endurance 100# Silk Cover
    "10735826", // Endurance 80# Silk Text
    "10003756", // Williamsburg 60# Offset
    "10003757", // Williamsburg 70# Offset
    "10003759", // Williamsburg 24# Bond
    "10003758", // Williamsburg 20# Bond
    "10766056", // Seville #10 Envelope
    "10766155", // Seville #9 Envelope
    "10354144", // Hammermill 60# Offset
    "10354152", // Hammermill 70# Offset
    "10354160", // Hammermill 80# Cover
    "10735798", // Sterling 100# Gloss Cover
    "10735816", // Sterling 80# Gloss Text
    "10735806", // Cougar 100# Smooth Cover
    "10735830", // Cougar 80# Smooth Text
];

/// The version of [`TOP_20_SKUS`].
pub const TOP_20_VERSION: u32 = 1;

/// A curated list of stocks, embedded in the documentation for frequent lookup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Selection {
    /// The version of the list.
    #[serde(default = "default_version")]
    pub version: u32,
    /// The label of the list, displayed in the heading of the generated section (e.g. `Top 20`).
    pub label: String,
    /// The SKUs of the selected stocks, in order.
    pub skus: Vec<String>,
}

fn default_version() -> u32 {
    1
}

impl Selection {
    /// Returns a selection from its label and SKUs.
    pub fn new<L, I>(label: L, skus: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            version: default_version(),
            label: label.into(),
            skus: skus.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the built-in selection of the 20 most common stocks.
    pub fn top_20() -> Self {
        Self {
            version: TOP_20_VERSION,
            ..Self::new("Top 20", TOP_20_SKUS)
        }
    }

    /// Reads a selection from a JSON file, with the `version`, `label` and `skus` fields.
    pub fn from_file<P: AsRef<Path>>(path: P) -> StockResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StockError::MissingFile(path.to_owned()));
        }

        let file = File::open(path).map_err(StockError::io(path))?;
        let selection: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            StockError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;

        tracing::info!(
            "Using selection \"{}\" v{} ({} SKUs) from {}",
            selection.label,
            selection.version,
            selection.skus.len(),
            path.display()
        );

        Ok(selection)
    }

    /// Returns the amount of SKUs in the selection.
    #[inline]
    pub fn len(&self) -> usize {
        self.skus.len()
    }

    /// Returns true if the selection has no SKU.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }

    /// Returns true if the provided SKU is part of the selection.
    pub fn contains(&self, sku: &str) -> bool {
        self.skus.iter().any(|s| s == sku)
    }
}

impl Default for Selection {
    #[inline]
    fn default() -> Self {
        Self::top_20()
    }
}

/// The result of the [`select()`] function.
#[derive(Debug)]
pub struct Selected<'a> {
    /// The selected stocks, in the order of the stock list.
    pub stocks: Vec<&'a StockRecord>,
    /// The SKUs of the selection that weren't found in the stock list, in the order of the
    /// selection.
    pub missing: Vec<&'a str>,
}

impl Selected<'_> {
    /// Returns true if every SKU of the selection was found.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Returns the stocks that are part of the provided selection.
///
/// The SKUs of the selection that aren't in the stock list don't make this function fail. They
/// are logged as a warning and returned in [`Selected::missing`].
pub fn select<'a>(stocks: &'a [StockRecord], selection: &'a Selection) -> Selected<'a> {
    let wanted = selection
        .skus
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>();
    let mut found = HashSet::with_capacity(wanted.len());

    let stocks = stocks
        .iter()
        .filter(|stock| wanted.contains(stock.sku.as_str()))
        .filter(|stock| {
            let first = found.insert(stock.sku.as_str());
            if !first {
                tracing::debug!("Ignoring duplicate of SKU {}", stock.sku);
            }
            first
        })
        .collect::<Vec<_>>();

    let missing = selection
        .skus
        .iter()
        .map(String::as_str)
        .filter(|sku| !found.contains(sku))
        .unique()
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        tracing::warn!(
            "{} SKUs from the {} selection not found in the stock list: {}",
            missing.len(),
            selection.label,
            missing.iter().join(", ")
        );
    }

    Selected { stocks, missing }
}

#[cfg(test)]
mod tests {
    use crate::models::StockRecord;

    use super::{Selection, TOP_20_SKUS, select};

    fn stock(sku: &str) -> StockRecord {
        serde_json::from_value(serde_json::json!({
            "Brand": "Williamsburg",
            "Basis_Weight": 60,
            "Finish": "Smooth",
            "Stock_Type": "Offset",
            "SKU": sku,
            "True_Cost_Per_Press_Sheet": 0.03,
        }))
        .expect("stock should deserialize")
    }

    #[test]
    fn top_20_has_20_unique_skus() {
        let selection = Selection::top_20();
        assert_eq!(selection.len(), 20);
        assert_eq!(selection.label, "Top 20");
        assert!(selection.contains("10735784"));
        let mut skus = TOP_20_SKUS.to_vec();
        skus.sort();
        skus.dedup();
        assert_eq!(skus.len(), 20);
    }

    #[test]
    fn select_only_listed_stocks() {
        let stocks = ["1", "2", "3", "4"].map(stock);
        let selection = Selection::new("test", ["3", "1"]);

        let selected = select(&stocks, &selection);

        let skus = selected.stocks.iter().map(|s| s.sku.as_str()).collect::<Vec<_>>();
        assert_eq!(skus, ["1", "3"]);
        assert!(selected.is_complete());
    }

    #[test]
    fn select_reports_missing_skus() {
        let stocks = ["1", "2"].map(stock);
        let selection = Selection::new("test", ["9", "2", "8"]);

        let selected = select(&stocks, &selection);

        assert_eq!(selected.stocks.len(), 1);
        assert_eq!(selected.missing, ["9", "8"]);
    }

    #[test]
    fn select_at_most_selection_len() {
        let stocks = ["1", "1", "2", "2", "3"].map(stock);
        let selection = Selection::new("test", ["1", "2"]);

        let selected = select(&stocks, &selection);

        assert!(selected.stocks.len() <= selection.len());
        assert!(selected.stocks.iter().all(|s| selection.contains(&s.sku)));
    }

    #[test]
    fn select_with_empty_selection() {
        let stocks = ["1", "2"].map(stock);
        let selection = Selection::new("empty", Vec::<String>::new());

        let selected = select(&stocks, &selection);

        assert!(selected.stocks.is_empty());
        assert!(selected.missing.is_empty());
    }

    #[test]
    fn selection_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("selection.json");
        std::fs::write(&path, r#"{"label": "Top 3", "skus": ["1", "2", "3"]}"#)?;

        let selection = Selection::from_file(&path)?;

        assert_eq!(selection, Selection::new("Top 3", ["1", "2", "3"]));
        Ok(())
    }

    #[test]
    fn selection_file_missing() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let err = Selection::from_file(dir.path().join("selection.json"))
            .expect_err("selection should not load");

        assert!(matches!(err, crate::StockError::MissingFile(_)));
        Ok(())
    }
}
