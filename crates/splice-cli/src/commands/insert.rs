//! Insert command implementation

use std::path::Path;

use splice_core::{InsertStep, Recipe, Step};
use splice_fs::NormalizedPath;

use super::report::execute;
use crate::cli::FragmentArgs;
use crate::error::Result;

/// Run the insert command against `file`, relative to `path`
pub fn run_insert(
    path: &Path,
    file: String,
    anchor: String,
    fragment: FragmentArgs,
    dry_run: bool,
) -> Result<()> {
    let step = Step::Insert(InsertStep {
        file,
        anchor,
        fragment: fragment.fragment,
        fragment_file: fragment.fragment_file,
    });
    execute(NormalizedPath::new(path), &Recipe::new(vec![step]), dry_run, false)
}
