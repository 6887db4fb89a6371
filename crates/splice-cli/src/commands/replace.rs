//! Replace command implementation

use std::path::Path;

use splice_core::{Recipe, ReplaceStep, Step};
use splice_fs::NormalizedPath;

use super::report::execute;
use crate::cli::FragmentArgs;
use crate::error::Result;

/// Run the replace command against `file`, relative to `path`
pub fn run_replace(
    path: &Path,
    file: String,
    anchor: String,
    close: String,
    balance_with: Option<String>,
    fragment: FragmentArgs,
    dry_run: bool,
) -> Result<()> {
    let step = Step::Replace(ReplaceStep {
        file,
        anchor,
        close,
        balance_with,
        fragment: fragment.fragment,
        fragment_file: fragment.fragment_file,
    });
    execute(NormalizedPath::new(path), &Recipe::new(vec![step]), dry_run, false)
}
