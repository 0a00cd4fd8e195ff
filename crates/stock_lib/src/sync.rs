//! This module contains the whole synchronization of the documentation with the stock list.
//!
//! The stock list is loaded, the selected stocks are rendered into the embedded section of the
//! documentation, then the full stock list is saved to the reference file. If the section can't
//! be found in the documentation, the synchronization stops before writing the reference file.

use std::path::{Path, PathBuf};

use crate::{
    DEFAULT_ARCHIVE_PATH, DEFAULT_SKILL_DOC_PATH, DEFAULT_STOCK_LIST_PATH,
    archive::{self, ArchiveReport},
    document::{self, PatchStatus, SectionNotFound},
    error::StockResult,
    load::load_stock_list,
    section::{self, Category},
    selection::{Selection, select},
};

/// The paths of the files handled by the synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    /// The master stock list, read.
    pub stock_list: PathBuf,
    /// The documentation, patched.
    pub skill_doc: PathBuf,
    /// The full reference stock list, written.
    pub archive: PathBuf,
}

impl SyncPaths {
    /// Returns the default paths, relative to the provided directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            stock_list: dir.join(DEFAULT_STOCK_LIST_PATH),
            skill_doc: dir.join(DEFAULT_SKILL_DOC_PATH),
            archive: dir.join(DEFAULT_ARCHIVE_PATH),
        }
    }
}

impl Default for SyncPaths {
    #[inline]
    fn default() -> Self {
        Self::in_dir("")
    }
}

/// The summary of a completed synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    /// The amount of stocks in the stock list.
    pub total_stocks: usize,
    /// The amount of stocks of the selection found in the stock list.
    pub embedded: usize,
    /// The SKUs of the selection that weren't found.
    pub missing: Vec<String>,
    /// The amount of stocks displayed for each category of the section.
    pub categories: Vec<(Category, usize)>,
    /// Whether the documentation was updated or already up-to-date.
    pub document: PatchStatus,
    /// The report of the written reference file.
    pub archive: ArchiveReport,
}

/// The outcome of the [`run()`] function.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Every step completed.
    Completed(SyncSummary),
    /// The section wasn't found in the documentation, so the synchronization stopped.
    SectionNotFound(SectionNotFound),
}

impl SyncOutcome {
    /// Returns true if every step completed.
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, SyncOutcome::Completed(_))
    }
}

/// Synchronizes the documentation with the stock list.
///
/// The steps are run in order, and the first fatal error is returned. A partial synchronization
/// is possible: if writing the reference file fails, the documentation is already patched.
pub fn run(paths: &SyncPaths, selection: &Selection) -> StockResult<SyncOutcome> {
    tracing::info!("Loading master stock list...");
    let stocks = load_stock_list(&paths.stock_list)?;

    tracing::info!("Generating embedded {} section...", selection.label);
    let selected = select(&stocks, selection);
    let groups = section::group(selected.stocks.iter().copied());
    let rendered = section::render_section(&groups, selection);
    tracing::info!(
        "Generated compact inline format for {} stocks",
        selected.stocks.len()
    );

    tracing::info!("Updating {}...", paths.skill_doc.display());
    let document = match document::patch_file(&paths.skill_doc, &rendered)? {
        PatchStatus::NotFound(reason) => return Ok(SyncOutcome::SectionNotFound(reason)),
        status => status,
    };

    tracing::info!("Creating backup of full stock list...");
    let archive = archive::write_archive(&paths.archive, &stocks, selection)?;

    Ok(SyncOutcome::Completed(SyncSummary {
        total_stocks: stocks.len(),
        embedded: selected.stocks.len(),
        missing: selected.missing.iter().map(|s| (*s).to_owned()).collect(),
        categories: groups
            .iter()
            .map(|(category, stocks)| (category, stocks.len()))
            .collect(),
        document,
        archive,
    }))
}
