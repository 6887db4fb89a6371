//! Moving JSON entries to a different nesting level
//!
//! A [`RelocationPlan`] is a list of unconditional [`KeyMove`]s followed
//! by an optional [`GroupRule`]. Moves are deliberately unguarded: a
//! plan that already ran fails on the second run with
//! [`Error::MissingKey`]. The group rule is guarded and becomes a no-op
//! once its key exists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::path::{PathSegment, get_at_path, get_at_path_mut, parse_path, remove_at_path};

/// Move the entry at `from` into the object at `to`, keeping its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMove {
    pub from: String,
    pub to: String,
}

impl KeyMove {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for KeyMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Parses `FROM=TO`, e.g. `architecture=home`.
impl FromStr for KeyMove {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s
            .split_once('=')
            .ok_or_else(|| Error::invalid_rule(s, "expected FROM=TO"))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() {
            return Err(Error::invalid_rule(s, "source path is empty"));
        }
        Ok(Self::new(from, to))
    }
}

/// Nest `members` of `parent` under a new `key`, unless `key` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRule {
    #[serde(default)]
    pub parent: String,
    pub key: String,
    pub members: Vec<String>,
}

/// Parses `PARENT.KEY=M1,M2,...`, e.g. `home.commands=heading,subheading,items`.
impl FromStr for GroupRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (target, members) = s
            .split_once('=')
            .ok_or_else(|| Error::invalid_rule(s, "expected PARENT.KEY=MEMBER,..."))?;
        let target = target.trim();
        let (parent, key) = match target.rsplit_once('.') {
            Some((parent, key)) => (parent, key),
            None => ("", target),
        };
        if key.is_empty() {
            return Err(Error::invalid_rule(s, "group key is empty"));
        }
        let members: Vec<String> = members
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .collect();
        if members.is_empty() {
            return Err(Error::invalid_rule(s, "no members listed"));
        }
        Ok(Self {
            parent: parent.to_string(),
            key: key.to_string(),
            members,
        })
    }
}

/// Ordered moves plus an optional fallback grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationPlan {
    #[serde(default)]
    pub moves: Vec<KeyMove>,
    #[serde(default)]
    pub group: Option<GroupRule>,
}

/// How the group rule resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GroupResolution {
    Grouped,
    AlreadyGrouped,
    MembersIncomplete { missing: Vec<String> },
}

/// What a plan did to one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelocationReport {
    pub moved: Vec<KeyMove>,
    pub group: Option<GroupResolution>,
}

impl RelocationReport {
    /// Whether the document changed at all.
    pub fn changed(&self) -> bool {
        !self.moved.is_empty() || self.group == Some(GroupResolution::Grouped)
    }
}

/// Apply `plan` to `document`.
///
/// On error the document may be partially modified and should be
/// discarded; callers write nothing in that case.
pub fn relocate_keys(document: &mut Value, plan: &RelocationPlan) -> Result<RelocationReport> {
    let mut report = RelocationReport::default();

    for key_move in &plan.moves {
        apply_move(document, key_move)?;
        tracing::debug!(%key_move, "moved entry");
        report.moved.push(key_move.clone());
    }

    if let Some(rule) = &plan.group {
        let resolution = apply_group(document, rule)?;
        tracing::debug!(key = %rule.key, ?resolution, "group rule resolved");
        report.group = Some(resolution);
    }

    Ok(report)
}

fn apply_move(document: &mut Value, key_move: &KeyMove) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidMove {
        from: key_move.from.clone(),
        to: key_move.to.clone(),
        reason: reason.to_string(),
    };

    let from = parse_path(&key_move.from);
    let to = parse_path(&key_move.to);
    let name = match from.last() {
        Some(PathSegment::Key(name)) => name.clone(),
        Some(PathSegment::Index(_)) => return Err(invalid("source must end in an object key")),
        None => return Err(invalid("source path is empty")),
    };
    if to.starts_with(&from) {
        return Err(invalid("cannot move an entry into itself"));
    }

    // The destination is resolved before the source is taken out.
    match get_at_path(document, &to) {
        None => return Err(Error::missing(&key_move.to)),
        Some(dest) if !dest.is_object() => {
            return Err(Error::NotAnObject {
                path: key_move.to.clone(),
            });
        }
        Some(_) => {}
    }

    let value = remove_at_path(document, &from).ok_or_else(|| Error::missing(&key_move.from))?;
    let dest = get_at_path_mut(document, &to)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::missing(&key_move.to))?;
    dest.insert(name, value);
    Ok(())
}

fn apply_group(document: &mut Value, rule: &GroupRule) -> Result<GroupResolution> {
    if rule.members.is_empty() {
        return Err(Error::invalid_rule(&rule.key, "no members listed"));
    }

    let parent = get_at_path_mut(document, &parse_path(&rule.parent))
        .ok_or_else(|| Error::missing(&rule.parent))?
        .as_object_mut()
        .ok_or_else(|| Error::NotAnObject {
            path: rule.parent.clone(),
        })?;

    if parent.contains_key(&rule.key) {
        return Ok(GroupResolution::AlreadyGrouped);
    }

    let missing: Vec<String> = rule
        .members
        .iter()
        .filter(|member| !parent.contains_key(member.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Ok(GroupResolution::MembersIncomplete { missing });
    }

    let mut group = Map::new();
    for member in &rule.members {
        if let Some(value) = parent.shift_remove(member) {
            group.insert(member.clone(), value);
        }
    }
    parent.insert(rule.key.clone(), Value::Object(group));
    Ok(GroupResolution::Grouped)
}
