//! Diff previews of pending changes

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Lines of context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Render a unified diff between `old` and `new`.
///
/// Returns an empty string when the texts are equal.
pub fn unified_diff(old: &str, new: &str, label: &str) -> String {
    if old == new {
        return String::new();
    }

    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(&format!("a/{}", label), &format!("b/{}", label))
        .to_string()
}

/// Line counts of a change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    /// Ratio from 0.0 to 1.0
    pub similarity: f64,
}

impl DiffSummary {
    pub fn compute(old: &str, new: &str) -> Self {
        let diff = TextDiff::from_lines(old, new);
        let (mut added, mut removed) = (0, 0);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => added += 1,
                ChangeTag::Delete => removed += 1,
                ChangeTag::Equal => {}
            }
        }
        Self {
            added,
            removed,
            similarity: diff.ratio() as f64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}
