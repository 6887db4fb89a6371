//! Running a recipe and printing its report

use colored::Colorize;
use splice_content::GroupResolution;
use splice_core::{FileReport, FileResult, Recipe, RunOptions, RunReport, Runner};
use splice_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Run `recipe` under `root` and print the outcome.
///
/// Any file left unchanged by a missing anchor or close marker turns
/// into [`CliError::NotApplied`], so every subcommand fails the same way.
pub(crate) fn execute(
    root: NormalizedPath,
    recipe: &Recipe,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let runner = Runner::with_options(root, RunOptions { dry_run });
    let report = runner.run(recipe)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    match report.first_miss() {
        Some(miss) => Err(CliError::NotApplied {
            file: miss.file.clone(),
            reason: describe(&miss.result),
        }),
        None => Ok(()),
    }
}

pub(crate) fn describe(result: &FileResult) -> String {
    match result {
        FileResult::Spliced(outcome) => outcome.to_string(),
        FileResult::Relocated(relocation) => {
            let mut parts = vec![format!("moved {} key(s)", relocation.moved.len())];
            match &relocation.group {
                Some(GroupResolution::Grouped) => parts.push("grouped members".to_string()),
                Some(GroupResolution::AlreadyGrouped) => {
                    parts.push("group already present".to_string())
                }
                Some(GroupResolution::MembersIncomplete { missing }) => {
                    parts.push(format!("group skipped, missing {}", missing.join(", ")))
                }
                None => {}
            }
            parts.join(", ")
        }
    }
}

fn print_report(report: &RunReport) {
    // Misses are reported once, on stderr, by the caller.
    for file in report.files.iter().filter(|f| f.is_applied()) {
        print_file(file, report.dry_run);
    }

    if report.dry_run {
        println!();
        println!("{}", "Dry run: no files were written.".dimmed());
    }
}

fn print_file(file: &FileReport, dry_run: bool) {
    let status = if dry_run {
        "DRY".yellow().bold()
    } else {
        "OK".green().bold()
    };
    println!(
        "{} {} {} ({}{} {}{})",
        status,
        file.file.cyan(),
        describe(&file.result),
        "+".green(),
        file.summary.added,
        "-".red(),
        file.summary.removed
    );

    if let Some(diff) = file.diff.as_deref().filter(|d| !d.is_empty()) {
        println!();
        print_diff(diff);
        println!();
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        let colored = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("  {}", colored);
    }
}
