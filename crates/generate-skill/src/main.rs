//! The generator of the embedded paper stock section of the pricing documentation.
//!
//! It reads the master stock list, the only source of the paper prices, and regenerates the
//! `### Common Paper Stocks` section of the documentation from it. The full stock list is then
//! saved to a separate reference file.
//!
//! Run it after updating the prices in the master stock list, after changing the stocks of the
//! selection, or before rebuilding the skill package. The paths are configured with environment
//! variables, see [`SyncEnv`].

use std::{path::Path, process::ExitCode};

use anyhow::Context as _;
use mkenv::prelude::*;
use stock_lib::{
    SyncEnv,
    document::PatchStatus,
    selection::Selection,
    sync::{self, SyncOutcome, SyncPaths, SyncSummary},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 60;

fn setup_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow::format_err!("{e}"))
}

fn print_rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_summary(summary: &SyncSummary, paths: &SyncPaths, selection: &Selection) {
    let mut table = prettytable::Table::init(vec![prettytable::row!["Category", "Stocks"]]);
    for (category, count) in &summary.categories {
        table.add_row(prettytable::row![category, count]);
    }

    match summary.document {
        PatchStatus::UpToDate => println!("✔ {} was already up-to-date", paths.skill_doc.display()),
        _ => println!("✔ Updated embedded section in {}", paths.skill_doc.display()),
    }
    println!(
        "✔ Saved full list ({} stocks) to {}",
        summary.archive.written,
        paths.archive.display()
    );
    println!();

    print_rule();
    println!("SUCCESS!");
    print_rule();
    println!("{table}");
    println!(
        "Embedded in {}: {} stocks ({} selection v{})",
        file_name(&paths.skill_doc),
        summary.embedded,
        selection.label,
        selection.version
    );
    if !summary.missing.is_empty() {
        println!("Not found in the stock list: {}", summary.missing.join(", "));
    }
    println!(
        "Available via references: {} stocks total ({} outside of the selection)",
        summary.total_stocks, summary.archive.outside_selection
    );
    println!();

    let skill_dir = paths
        .skill_doc
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    println!("Next steps:");
    println!("1. Review changes: git diff {}", paths.skill_doc.display());
    println!(
        "2. Rebuild skill: cd {dir} && zip -r ../{name}-v2.1.0.skill .",
        dir = skill_dir.display(),
        name = file_name(skill_dir),
    );
    println!(
        "3. Commit: git add {}/ && git commit -m 'Update pricing data'",
        skill_dir.display()
    );
    println!();
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Returns the exit status of the program for the provided outcome: 0 if every step completed,
/// 1 if the section wasn't found in the documentation.
fn exit_status(outcome: &SyncOutcome) -> u8 {
    match outcome {
        SyncOutcome::Completed(_) => 0,
        SyncOutcome::SectionNotFound(_) => 1,
    }
}

fn main() -> anyhow::Result<ExitCode> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env file"),
        _ => (),
    }
    setup_tracing()?;

    let env = SyncEnv::define();
    env.try_init().map_err(|e| anyhow::anyhow!("{e}"))?;
    let paths = env.paths();
    let selection = env
        .selection()
        .context("couldn't load the stock selection")?;

    print_rule();
    println!("MPA Cost & Pricing Skill - Price Data Generator");
    print_rule();
    println!();

    let outcome = sync::run(&paths, &selection).with_context(|| {
        format!(
            "couldn't synchronize {} with {}",
            paths.skill_doc.display(),
            paths.stock_list.display()
        )
    })?;

    match &outcome {
        SyncOutcome::Completed(summary) => print_summary(summary, &paths, &selection),
        SyncOutcome::SectionNotFound(reason) => println!(
            "✗ Failed to update {}: {reason}",
            paths.skill_doc.display()
        ),
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}

#[cfg(test)]
mod tests {
    use stock_lib::{
        archive::ArchiveReport,
        document::{PatchStatus, SectionNotFound},
        sync::{SyncOutcome, SyncSummary},
    };

    use super::exit_status;

    #[test]
    fn exit_1_without_section() {
        assert_eq!(
            exit_status(&SyncOutcome::SectionNotFound(SectionNotFound::MissingHeader)),
            1
        );
        assert_eq!(
            exit_status(&SyncOutcome::SectionNotFound(SectionNotFound::Unterminated)),
            1
        );
    }

    #[test]
    fn exit_0_when_completed() {
        let summary = SyncSummary {
            total_stocks: 3,
            embedded: 3,
            missing: Vec::new(),
            categories: Vec::new(),
            document: PatchStatus::UpToDate,
            archive: ArchiveReport {
                written: 3,
                outside_selection: 0,
            },
        };

        assert_eq!(exit_status(&SyncOutcome::Completed(summary)), 0);
    }
}
