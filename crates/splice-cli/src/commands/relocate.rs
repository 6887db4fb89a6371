//! Relocate command implementation

use std::path::Path;

use splice_content::{GroupRule, KeyMove};
use splice_core::{Recipe, RelocateStep, Step};
use splice_fs::NormalizedPath;

use super::report::execute;
use crate::error::Result;

/// Run the relocate command over `files`, in order
pub fn run_relocate(
    path: &Path,
    files: Vec<String>,
    moves: Vec<KeyMove>,
    group: Option<GroupRule>,
    dry_run: bool,
) -> Result<()> {
    let step = Step::Relocate(RelocateStep {
        files,
        moves,
        group,
    });
    execute(NormalizedPath::new(path), &Recipe::new(vec![step]), dry_run, false)
}
