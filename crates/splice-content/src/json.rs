//! JSON parsing and rendering for relocated documents

use serde_json::Value;

use crate::error::Result;
use crate::relocate::{RelocationPlan, RelocationReport, relocate_keys};

/// Parse a JSON document, keeping key order.
pub fn parse_json(source: &str) -> Result<Value> {
    Ok(serde_json::from_str(source)?)
}

/// Render with two-space indentation and unescaped non-ASCII text.
pub fn render_json(value: &Value, trailing_newline: bool) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    if trailing_newline {
        out.push('\n');
    }
    Ok(out)
}

/// Parse `source`, apply `plan`, and render the result.
///
/// The output ends with a newline exactly when `source` did.
pub fn relocate_json(source: &str, plan: &RelocationPlan) -> Result<(String, RelocationReport)> {
    let mut document = parse_json(source)?;
    let report = relocate_keys(&mut document, plan)?;
    let rendered = render_json(&document, source.ends_with('\n'))?;
    Ok((rendered, report))
}
