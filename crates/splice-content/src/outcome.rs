//! Typed results of text splicing

use std::fmt;

use serde::Serialize;

/// Whether a splice was applied, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The document was changed starting at `line` (0-based).
    Applied {
        line: usize,
        removed: usize,
        inserted: usize,
    },
    /// The document was left untouched.
    NotApplied { reason: Miss },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn miss(&self) -> Option<&Miss> {
        match self {
            Self::Applied { .. } => None,
            Self::NotApplied { reason } => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied {
                line,
                removed: 0,
                inserted,
            } => write!(f, "inserted {} line(s) before line {}", inserted, line + 1),
            Self::Applied {
                line,
                removed,
                inserted,
            } => write!(
                f,
                "replaced lines {}-{} with {} line(s)",
                line + 1,
                line + removed,
                inserted
            ),
            Self::NotApplied { reason } => write!(f, "not applied: {}", reason),
        }
    }
}

/// Reason a splice could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Miss {
    AnchorNotFound {
        anchor: String,
    },
    CloseNotFound {
        anchor: String,
        close: String,
        start_line: usize,
    },
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnchorNotFound { anchor } => write!(f, "anchor {} not found", anchor),
            Self::CloseNotFound {
                anchor,
                close,
                start_line,
            } => write!(
                f,
                "no closing {:?} found for anchor {} at line {}",
                close,
                anchor,
                start_line + 1
            ),
        }
    }
}

/// Lines produced by a splice together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub lines: Vec<String>,
    pub outcome: Outcome,
}

impl Spliced {
    pub(crate) fn unchanged(lines: &[String], reason: Miss) -> Self {
        Self {
            lines: lines.to_vec(),
            outcome: Outcome::NotApplied { reason },
        }
    }
}
