//! This module contains the writing of the full reference stock list.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write as _},
    path::Path,
};

use crate::{
    error::{StockError, StockResult},
    models::StockRecord,
    selection::Selection,
};

/// The result of the [`write_archive()`] function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveReport {
    /// The amount of stocks written to the file.
    pub written: usize,
    /// The amount of written stocks that aren't part of the selection.
    pub outside_selection: usize,
}

fn open_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Writes the provided stocks to the file at the provided path, as JSON indented with 2 spaces.
///
/// Every stock is written, including those of the selection, which are also embedded in the
/// documentation. The selection is only used to count the stocks that are outside of it.
pub fn write_archive<P: AsRef<Path>>(
    path: P,
    stocks: &[StockRecord],
    selection: &Selection,
) -> StockResult<ArchiveReport> {
    let path = path.as_ref();

    let mut writer = open_file(path)
        .map(BufWriter::new)
        .map_err(StockError::io(path))?;
    serde_json::to_writer_pretty(&mut writer, stocks).map_err(|source| StockError::Serialize {
        path: path.to_owned(),
        source,
    })?;
    writer.flush().map_err(StockError::io(path))?;

    let report = ArchiveReport {
        written: stocks.len(),
        outside_selection: stocks.iter().filter(|s| !selection.contains(&s.sku)).count(),
    };

    tracing::info!(
        "Saved full list ({} stocks, {} outside of the {} selection) to {}",
        report.written,
        report.outside_selection,
        selection.label,
        path.display()
    );

    Ok(report)
}
