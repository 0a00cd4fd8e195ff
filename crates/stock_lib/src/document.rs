//! This module contains the patch of the embedded section of the documentation.
//!
//! The document is split in three parts: the text before the section, the section itself, and
//! the text after it. The section starts at the first [`SECTION_HEADER`] and ends right before
//! the next `###` heading marker.

use std::{fs, path::Path};

use nom::{
    Parser as _,
    bytes::complete::{tag, take_until},
    combinator::recognize,
};

use crate::error::{StockError, StockResult};

/// The header of the embedded section.
pub const SECTION_HEADER: &str = "### Common Paper Stocks";

const HEADING_MARKER: &str = "###";

/// The reason why the embedded section couldn't be found in a document.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SectionNotFound {
    /// The document has no section header.
    #[error("the document has no `### Common Paper Stocks` header")]
    MissingHeader,
    /// No heading follows the section, so its end is unknown.
    #[error("no `###` heading follows the `### Common Paper Stocks` section")]
    Unterminated,
}

/// A document split around its embedded section.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DocumentSections<'a> {
    /// The text before the section.
    pub prefix: &'a str,
    /// The section, from its header to the next heading marker (excluded).
    pub section: &'a str,
    /// The text after the section, starting with the next heading marker.
    pub suffix: &'a str,
}

fn parse_sections(input: &str) -> nom::IResult<&str, (&str, &str)> {
    (
        take_until(SECTION_HEADER),
        recognize((tag(SECTION_HEADER), take_until(HEADING_MARKER))),
    )
        .parse(input)
}

impl<'a> DocumentSections<'a> {
    /// Splits the provided document around its embedded section.
    pub fn parse(document: &'a str) -> Result<Self, SectionNotFound> {
        match parse_sections(document) {
            Ok((suffix, (prefix, section))) => Ok(Self {
                prefix,
                section,
                suffix,
            }),
            Err(_) if document.contains(SECTION_HEADER) => Err(SectionNotFound::Unterminated),
            Err(_) => Err(SectionNotFound::MissingHeader),
        }
    }

    /// Returns the document with its section replaced by the provided one.
    ///
    /// The new section is followed by a blank line.
    pub fn replace_section(&self, section: &str) -> String {
        let mut out =
            String::with_capacity(self.prefix.len() + section.len() + 2 + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(section);
        out.push_str("\n\n");
        out.push_str(self.suffix);
        out
    }
}

/// Returns the provided document with its embedded section replaced by the provided one.
pub fn patch(document: &str, section: &str) -> Result<String, SectionNotFound> {
    DocumentSections::parse(document).map(|sections| sections.replace_section(section))
}

/// The result of the [`patch_file()`] function.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PatchStatus {
    /// The section was replaced and the file was written.
    Updated,
    /// The file already contained the section, so it wasn't written.
    UpToDate,
    /// The section wasn't found, the file wasn't written.
    NotFound(SectionNotFound),
}

impl PatchStatus {
    /// Returns true if the section was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        !matches!(self, PatchStatus::NotFound(_))
    }
}

/// Replaces the embedded section of the document at the provided path.
///
/// A document without the section isn't an error: the reason is logged as a warning and
/// returned in [`PatchStatus::NotFound`], and the document is left unchanged.
pub fn patch_file<P: AsRef<Path>>(path: P, section: &str) -> StockResult<PatchStatus> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StockError::MissingFile(path.to_owned()));
    }

    let document = fs::read_to_string(path).map_err(StockError::io(path))?;

    let patched = match patch(&document, section) {
        Ok(patched) => patched,
        Err(e) => {
            tracing::warn!(
                "No changes made to {}: {e}. Check the section headings.",
                path.display()
            );
            return Ok(PatchStatus::NotFound(e));
        }
    };

    if patched == document {
        tracing::info!("{} is already up-to-date", path.display());
        return Ok(PatchStatus::UpToDate);
    }

    fs::write(path, patched).map_err(StockError::io(path))?;
    tracing::info!("Updated embedded section in {}", path.display());

    Ok(PatchStatus::Updated)
}
