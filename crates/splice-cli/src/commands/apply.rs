//! Apply command implementation
//!
//! Runs a recipe file. Step paths resolve against `--root`, or the
//! directory holding the recipe when no root is given.

use std::path::Path;

use splice_core::Recipe;
use splice_fs::NormalizedPath;

use super::report::execute;
use crate::error::{CliError, Result};

/// Run the apply command
pub fn run_apply(
    path: &Path,
    recipe: &str,
    root: Option<&str>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let cwd = NormalizedPath::new(path);
    let recipe_path = NormalizedPath::new(recipe).resolve_against(&cwd);
    let loaded = Recipe::load(&recipe_path)?;
    if loaded.steps.is_empty() {
        return Err(CliError::user(format!("recipe {} has no steps", recipe_path)));
    }

    let root = match root {
        Some(dir) => NormalizedPath::new(dir).resolve_against(&cwd),
        None => recipe_path.parent().unwrap_or(cwd),
    };
    tracing::debug!(recipe = %recipe_path, root = %root, "applying recipe");

    execute(root, &loaded, dry_run, json)
}
