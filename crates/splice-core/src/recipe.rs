//! Recipe files: the edits to make, as data
//!
//! Recipes are TOML, JSON or YAML (by extension). In TOML each step is
//! an `[[step]]` table tagged with `kind`:
//!
//! ```toml
//! [[step]]
//! kind = "insert"
//! file = "client/src/pages/Home.jsx"
//! anchor = "Common Commands Section"
//! fragment_file = "fragments/ui-showcase.jsx"
//!
//! [[step]]
//! kind = "relocate"
//! files = ["client/src/locales/en.json", "client/src/locales/zh.json"]
//! moves = [{ from = "cta", to = "home" }]
//! group = { parent = "home", key = "commands", members = ["heading", "subheading", "items"] }
//! ```

use serde::{Deserialize, Serialize};
use splice_content::{CloseStrategy, GroupRule, KeyMove, RelocationPlan};
use splice_fs::{ConfigStore, NormalizedPath};

use crate::{Error, Result};

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, rename = "step", alias = "steps")]
    pub steps: Vec<Step>,
}

/// One edit, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Insert(InsertStep),
    Replace(ReplaceStep),
    Relocate(RelocateStep),
}

impl Step {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Replace(_) => "replace",
            Self::Relocate(_) => "relocate",
        }
    }
}

/// Insert a fragment before the first line containing `anchor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStep {
    pub file: String,
    pub anchor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_file: Option<String>,
}

/// Replace the block opened by `anchor` and ended by `close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceStep {
    pub file: String,
    pub anchor: String,
    pub close: String,
    /// Opening token for nesting-aware matching; indentation is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_file: Option<String>,
}

impl ReplaceStep {
    pub fn strategy(&self) -> CloseStrategy {
        match &self.balance_with {
            Some(open) => CloseStrategy::Balanced { open: open.clone() },
            None => CloseStrategy::Indentation,
        }
    }
}

/// Apply the same relocation plan to each file, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocateStep {
    pub files: Vec<String>,
    #[serde(default)]
    pub moves: Vec<KeyMove>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRule>,
}

impl RelocateStep {
    pub fn plan(&self) -> RelocationPlan {
        RelocationPlan {
            moves: self.moves.clone(),
            group: self.group.clone(),
        }
    }
}

/// Where a text step's fragment comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentSource<'a> {
    Inline(&'a str),
    File(&'a str),
}

pub(crate) fn fragment_source<'a>(
    step: usize,
    inline: &'a Option<String>,
    file: &'a Option<String>,
) -> Result<FragmentSource<'a>> {
    match (inline, file) {
        (Some(text), None) => Ok(FragmentSource::Inline(text)),
        (None, Some(path)) => Ok(FragmentSource::File(path)),
        (Some(_), Some(_)) => Err(Error::invalid(
            step,
            "set either `fragment` or `fragment_file`, not both",
        )),
        (None, None) => Err(Error::invalid(
            step,
            "one of `fragment` or `fragment_file` is required",
        )),
    }
}

impl Recipe {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Load and validate a recipe file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let recipe: Recipe = ConfigStore::new().load(path)?;
        recipe.validate()?;
        tracing::debug!(path = %path, steps = recipe.steps.len(), "loaded recipe");
        Ok(recipe)
    }

    /// Check every step before anything touches the disk.
    pub fn validate(&self) -> Result<()> {
        for (idx, step) in self.steps.iter().enumerate() {
            let number = idx + 1;
            match step {
                Step::Insert(insert) => {
                    require(number, "file", &insert.file)?;
                    require(number, "anchor", &insert.anchor)?;
                    fragment_source(number, &insert.fragment, &insert.fragment_file)?;
                }
                Step::Replace(replace) => {
                    require(number, "file", &replace.file)?;
                    require(number, "anchor", &replace.anchor)?;
                    require(number, "close", replace.close.trim())?;
                    if let Some(open) = &replace.balance_with {
                        require(number, "balance_with", open)?;
                        if replace.close.contains(open.as_str()) {
                            return Err(Error::invalid(
                                number,
                                "`balance_with` must not occur inside `close`",
                            ));
                        }
                    }
                    fragment_source(number, &replace.fragment, &replace.fragment_file)?;
                }
                Step::Relocate(relocate) => {
                    if relocate.files.is_empty() {
                        return Err(Error::invalid(number, "`files` is empty"));
                    }
                    if relocate.moves.is_empty() && relocate.group.is_none() {
                        return Err(Error::invalid(number, "nothing to do: no moves and no group"));
                    }
                    if let Some(group) = &relocate.group {
                        require(number, "group.key", &group.key)?;
                        if group.members.is_empty() {
                            return Err(Error::invalid(number, "`group.members` is empty"));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn require(step: usize, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(step, format!("`{}` is empty", field)));
    }
    Ok(())
}
