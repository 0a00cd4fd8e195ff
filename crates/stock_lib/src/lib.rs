//! The library synchronizing the pricing documentation with the master stock list.
//!
//! The master stock list is a JSON array of paper stocks, the single source of truth for the
//! prices. A curated [`Selection`](selection::Selection) of these stocks is embedded in the
//! documentation, in its `### Common Paper Stocks` section, so that the most common ones can be
//! looked up without reading the whole list. The full list is then saved to a separate reference
//! file.
//!
//! The whole process is run by the [`sync::run()`] function. The binary running it is in the
//! `generate-skill` package.

#![warn(missing_docs)]

mod env;

pub mod archive;
pub mod document;
pub mod error;
pub mod format;
pub mod load;
pub mod models;
pub mod section;
pub mod selection;
pub mod sync;


pub use env::*;
pub use error::{StockError, StockResult};
