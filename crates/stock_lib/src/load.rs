//! This module contains the loading of the master stock list.

use std::{fs::File, io::BufReader, path::Path};

use itertools::Itertools as _;

use crate::{
    error::{StockError, StockResult},
    models::StockRecord,
};

/// Loads the stocks of the JSON stock list at the provided path.
///
/// The stock list is expected to be an array of [`StockRecord`]s. Duplicate SKUs are logged as a
/// warning but don't make the load fail.
pub fn load_stock_list<P: AsRef<Path>>(path: P) -> StockResult<Vec<StockRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StockError::MissingFile(path.to_owned()));
    }

    let file = File::open(path).map_err(StockError::io(path))?;
    let stocks: Vec<StockRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StockError::Parse {
            path: path.to_owned(),
            source,
        })?;

    let duplicates = stocks.iter().map(|s| s.sku.as_str()).duplicates().join(", ");
    if !duplicates.is_empty() {
        tracing::warn!("Duplicate SKUs in {}: {duplicates}", path.display());
    }

    tracing::info!("Loaded {} stocks from {}", stocks.len(), path.display());

    Ok(stocks)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{error::StockError, models::StockType};

    use super::load_stock_list;

    #[test]
    fn load_valid_list() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("master_stock_list.json");
        fs::write(
            &path,
            r##"[
                {
                    "Brand": "Williamsburg",
                    "Basis_Weight": 24,
                    "Finish": "Smooth",
                    "Stock_Type": "Bond",
                    "SKU": "10003759",
                    "True_Cost_Per_Press_Sheet": 0.0311
                },
                {
                    "Brand": "Seville",
                    "Basis_Weight": null,
                    "Finish": null,
                    "Stock_Type": "Envelope",
                    "SKU": "10766056",
                    "True_Cost_Per_Press_Sheet": 0.0412,
                    "Parent_Sheet_Size": "#10"
                }
            ]"##,
        )?;

        let stocks = load_stock_list(&path)?;

        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].stock_type, StockType::Bond);
        assert_eq!(stocks[1].parent_sheet_size.as_deref(), Some("#10"));
        Ok(())
    }

    #[test]
    fn load_missing_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nope.json");

        let err = load_stock_list(&path).expect_err("load should fail");

        assert!(matches!(err, StockError::MissingFile(p) if p == path));
        Ok(())
    }

    #[test]
    fn load_malformed_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("master_stock_list.json");
        fs::write(&path, r#"[{"Brand": "Williamsburg", "SKU": }]"#)?;

        let err = load_stock_list(&path).expect_err("load should fail");

        assert!(matches!(err, StockError::Parse { .. }));
        Ok(())
    }

    #[test]
    fn load_record_without_cost() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("master_stock_list.json");
        fs::write(
            &path,
            r#"[{"Brand": "Williamsburg", "Stock_Type": "Bond", "SKU": "1"}]"#,
        )?;

        let err = load_stock_list(&path).expect_err("load should fail");

        assert!(matches!(err, StockError::Parse { .. }));
        Ok(())
    }
}
