//! Content transformations for splice
//!
//! Pure functions from input content to output content plus an outcome.
//! Nothing in this crate reads or writes files; see `splice-fs` and the
//! runner in `splice-core` for the I/O boundary.
//!
//! - [`splice`]: insert a fragment before an anchor line, or replace an
//!   anchor-bounded block of lines.
//! - [`relocate`]: move JSON entries under another key, with an optional
//!   fallback grouping step.
//! - [`diff`]: unified diff previews of a pending change.

pub mod anchor;
pub mod diff;
pub mod error;
pub mod json;
pub mod outcome;
pub mod path;
pub mod relocate;
pub mod splice;
pub mod text;

pub use anchor::{Anchor, LineMatcher};
pub use diff::{DiffSummary, unified_diff};
pub use error::{Error, Result};
pub use json::{parse_json, relocate_json, render_json};
pub use outcome::{Miss, Outcome, Spliced};
pub use relocate::{
    GroupResolution, GroupRule, KeyMove, RelocationPlan, RelocationReport, relocate_keys,
};
pub use splice::{CloseStrategy, insert_before_anchor, replace_bounded_block};
pub use text::{LineEnding, TextDocument, split_fragment};
