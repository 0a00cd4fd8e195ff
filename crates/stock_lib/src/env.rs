use std::path::PathBuf;

use mkenv::prelude::*;

use crate::{error::StockResult, selection::Selection, sync::SyncPaths};

/// The default path to the master stock list.
pub const DEFAULT_STOCK_LIST_PATH: &str = "mpa-cost-pricing/references/master_stock_list.json";
/// The default path to the documentation embedding the selected stocks.
pub const DEFAULT_SKILL_DOC_PATH: &str = "mpa-cost-pricing/SKILL.md";
/// The default path to the full reference stock list.
pub const DEFAULT_ARCHIVE_PATH: &str = "mpa-cost-pricing/references/master_stock_list_full.json";

mkenv::make_config! {
    /// The environment used to locate the files handled by the synchronization.
    pub struct SyncEnv {
        /// The path to the master stock list.
        pub stock_list_path: {
            var_name: "STOCK_LIST_PATH",
            layers: [
                or_default_val(|| DEFAULT_STOCK_LIST_PATH.to_owned()),
            ],
            description: "The path to the JSON master stock list",
            default_val_fmt: "mpa-cost-pricing/references/master_stock_list.json",
        },

        /// The path to the documentation embedding the selected stocks.
        pub skill_doc_path: {
            var_name: "SKILL_DOC_PATH",
            layers: [
                or_default_val(|| DEFAULT_SKILL_DOC_PATH.to_owned()),
            ],
            description: "The path to the documentation containing the \
                `### Common Paper Stocks` section",
            default_val_fmt: "mpa-cost-pricing/SKILL.md",
        },

        /// The path to the full reference stock list.
        pub archive_path: {
            var_name: "STOCK_ARCHIVE_PATH",
            layers: [
                or_default_val(|| DEFAULT_ARCHIVE_PATH.to_owned()),
            ],
            description: "The path to the JSON file receiving the full stock list",
            default_val_fmt: "mpa-cost-pricing/references/master_stock_list_full.json",
        },

        /// The path to a JSON file overriding the built-in selection.
        pub selection_file: {
            var_name: "STOCK_SELECTION_FILE",
            layers: [or_default()],
            description: "The path to a JSON file with the `label` and `skus` of the stocks \
                to embed in the documentation",
            default_val_fmt: "empty (built-in Top 20)",
        },
    }
}

impl SyncEnv {
    /// Returns the paths of the files handled by the synchronization.
    ///
    /// **Caution**: The environment must have been initialized.
    pub fn paths(&self) -> SyncPaths {
        SyncPaths {
            stock_list: PathBuf::from(self.stock_list_path.get()),
            skill_doc: PathBuf::from(self.skill_doc_path.get()),
            archive: PathBuf::from(self.archive_path.get()),
        }
    }

    /// Returns the selection of the stocks to embed in the documentation.
    ///
    /// This is the built-in [`Selection::top_20()`], unless a selection file is configured.
    ///
    /// **Caution**: The environment must have been initialized.
    pub fn selection(&self) -> StockResult<Selection> {
        let file = self.selection_file.get();
        if file.is_empty() {
            Ok(Selection::top_20())
        } else {
            Selection::from_file(file)
        }
    }
}
