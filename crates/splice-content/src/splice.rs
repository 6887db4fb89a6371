//! Anchor-based insertion and bounded replacement on lines

use serde::{Deserialize, Serialize};

use crate::anchor::{LineMatcher, first_match, leading_whitespace};
use crate::outcome::{Miss, Outcome, Spliced};

/// How the end of a replaced block is located.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CloseStrategy {
    /// First later line whose trimmed text equals the closing marker and
    /// whose indentation equals the start line's.
    #[default]
    Indentation,
    /// Track occurrences of `open` against the closing marker and stop
    /// where the count returns to zero. `open` must not occur inside the
    /// closing marker.
    Balanced { open: String },
}

/// Insert `fragment` immediately before the first line accepted by `anchor`.
///
/// Without a matching line the lines come back unchanged with
/// [`Miss::AnchorNotFound`].
pub fn insert_before_anchor<M>(lines: &[String], anchor: &M, fragment: &[String]) -> Spliced
where
    M: LineMatcher + ?Sized,
{
    let Some(index) = first_match(lines, anchor) else {
        tracing::debug!(anchor = %anchor.describe(), "anchor not found");
        return Spliced::unchanged(
            lines,
            Miss::AnchorNotFound {
                anchor: anchor.describe(),
            },
        );
    };
    warn_if_ambiguous(lines, index, anchor);

    let mut out = Vec::with_capacity(lines.len() + fragment.len());
    out.extend_from_slice(&lines[..index]);
    out.extend_from_slice(fragment);
    out.extend_from_slice(&lines[index..]);

    tracing::debug!(line = index, inserted = fragment.len(), "fragment inserted");
    Spliced {
        lines: out,
        outcome: Outcome::Applied {
            line: index,
            removed: 0,
            inserted: fragment.len(),
        },
    }
}

/// Replace the block from the first anchor line through its close with
/// `replacement`, both ends inclusive.
pub fn replace_bounded_block<M>(
    lines: &[String],
    anchor: &M,
    closing_marker: &str,
    replacement: &[String],
    strategy: &CloseStrategy,
) -> Spliced
where
    M: LineMatcher + ?Sized,
{
    let Some(start) = first_match(lines, anchor) else {
        tracing::debug!(anchor = %anchor.describe(), "start anchor not found");
        return Spliced::unchanged(
            lines,
            Miss::AnchorNotFound {
                anchor: anchor.describe(),
            },
        );
    };
    warn_if_ambiguous(lines, start, anchor);

    let close = match strategy {
        CloseStrategy::Indentation => find_indented_close(lines, start, closing_marker),
        CloseStrategy::Balanced { open } => find_balanced_close(lines, start, open, closing_marker),
    };
    let Some(end) = close else {
        tracing::debug!(start, close = closing_marker, ?strategy, "closing marker not found");
        return Spliced::unchanged(
            lines,
            Miss::CloseNotFound {
                anchor: anchor.describe(),
                close: closing_marker.trim().to_string(),
                start_line: start,
            },
        );
    };

    let mut out = Vec::with_capacity(lines.len() - (end - start + 1) + replacement.len());
    out.extend_from_slice(&lines[..start]);
    out.extend_from_slice(replacement);
    out.extend_from_slice(&lines[end + 1..]);

    tracing::debug!(start, end, inserted = replacement.len(), "block replaced");
    Spliced {
        lines: out,
        outcome: Outcome::Applied {
            line: start,
            removed: end - start + 1,
            inserted: replacement.len(),
        },
    }
}

fn find_indented_close(lines: &[String], start: usize, closing_marker: &str) -> Option<usize> {
    let indent = leading_whitespace(&lines[start]);
    let marker = closing_marker.trim();
    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| line.trim() == marker && leading_whitespace(line) == indent)
        .map(|(idx, _)| idx)
}

fn find_balanced_close(
    lines: &[String],
    start: usize,
    open: &str,
    closing_marker: &str,
) -> Option<usize> {
    let close = closing_marker.trim();
    if open.is_empty() || close.is_empty() {
        return None;
    }

    let mut depth: isize = 0;
    let mut opened = false;
    for (idx, line) in lines.iter().enumerate().skip(start) {
        let opens = line.matches(open).count() as isize;
        let closes = line.matches(close).count() as isize;
        if !opened {
            // Closes seen before the block opens belong to something else.
            if opens == 0 {
                continue;
            }
            opened = true;
        }
        depth += opens - closes;
        if closes > 0 && depth <= 0 {
            return Some(idx);
        }
    }
    None
}

fn warn_if_ambiguous<M>(lines: &[String], first: usize, anchor: &M)
where
    M: LineMatcher + ?Sized,
{
    if let Some(offset) = first_match(&lines[first + 1..], anchor) {
        tracing::warn!(
            anchor = %anchor.describe(),
            first = first + 1,
            next = first + offset + 2,
            "anchor matches more than one line; using the first"
        );
    }
}
