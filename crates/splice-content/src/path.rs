//! Dotted key paths into JSON values
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `home.commands.heading`
//! - Array indexing: `items[0].title`
//! - The empty path names the root value.
//!
//! # Examples
//!
//! ```
//! use splice_content::path::{parse_path, PathSegment, get_at_path};
//! use serde_json::json;
//!
//! let path = parse_path("home.items[0]");
//! assert_eq!(path, vec![
//!     PathSegment::Key("home".to_string()),
//!     PathSegment::Key("items".to_string()),
//!     PathSegment::Index(0),
//! ]);
//!
//! let value = json!({"home": {"items": ["init"]}});
//! assert_eq!(get_at_path(&value, &path), Some(&json!("init")));
//! ```

use serde_json::Value;

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in an object (e.g., "commands" in "home.commands")
    Key(String),
    /// An index in an array (e.g., 0 in `items[0]`)
    Index(usize),
}

/// Parse a path string into segments.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                }
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                if let Ok(index) = index_str.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => current_key.push(ch),
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    segments
}

/// Borrow the value at `segments`, if present.
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.get(key),
        PathSegment::Index(idx) => current.get(*idx),
    })
}

/// Mutably borrow the value at `segments`, if present.
pub fn get_at_path_mut<'a>(value: &'a mut Value, segments: &[PathSegment]) -> Option<&'a mut Value> {
    segments.iter().try_fold(value, |current, segment| match segment {
        PathSegment::Key(key) => current.get_mut(key),
        PathSegment::Index(idx) => current.get_mut(*idx),
    })
}

/// Remove and return the value at `segments`.
///
/// Object keys are removed with `shift_remove`, so the remaining keys keep
/// their relative order. The root itself cannot be removed.
pub fn remove_at_path(value: &mut Value, segments: &[PathSegment]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;
    let parent = get_at_path_mut(value, parents)?;

    match (parent, last) {
        (Value::Object(map), PathSegment::Key(key)) => map.shift_remove(key),
        (Value::Array(arr), PathSegment::Index(idx)) if *idx < arr.len() => Some(arr.remove(*idx)),
        _ => None,
    }
}
