//! Line matchers used to locate anchors

/// Predicate deciding whether a line is an anchor.
///
/// Implemented by [`Anchor`] for literal substrings and by any
/// `Fn(&str) -> bool`, so callers can supply synthetic matchers.
pub trait LineMatcher {
    fn matches(&self, line: &str) -> bool;

    /// Human-readable form used in diagnostics.
    fn describe(&self) -> String {
        "<predicate>".to_string()
    }
}

impl<F> LineMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, line: &str) -> bool {
        self(line)
    }
}

/// Literal substring anchor. Not a pattern language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    needle: String,
}

impl Anchor {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }
}

impl LineMatcher for Anchor {
    fn matches(&self, line: &str) -> bool {
        line.contains(&self.needle)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.needle)
    }
}

/// Index of the first line accepted by `matcher`.
pub fn first_match<M>(lines: &[String], matcher: &M) -> Option<usize>
where
    M: LineMatcher + ?Sized,
{
    lines.iter().position(|line| matcher.matches(line))
}

/// Count of leading whitespace characters.
pub fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> Vec<String> {
        source.lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_anchor_is_substring_not_pattern() {
        let anchor = Anchor::new("{/* Hero.* */}");
        assert!(!anchor.matches("{/* Hero Section */}"));
        assert!(anchor.matches("  {/* Hero.* */}"));
    }

    #[test]
    fn test_first_match_picks_earliest() {
        let doc = lines("a\nmarker one\nmarker two");
        assert_eq!(first_match(&doc, &Anchor::new("marker")), Some(1));
        assert_eq!(first_match(&doc, &Anchor::new("absent")), None);
    }

    #[test]
    fn test_closure_matcher() {
        let doc = lines("alpha\nbeta\ngamma");
        let matcher = |line: &str| line.ends_with("ta");
        assert_eq!(first_match(&doc, &matcher), Some(1));
        assert_eq!(matcher.describe(), "<predicate>");
    }

    #[test]
    fn test_leading_whitespace_counts_chars() {
        assert_eq!(leading_whitespace("    </motion.div>"), 4);
        assert_eq!(leading_whitespace("\t\t<div>"), 2);
        assert_eq!(leading_whitespace("\u{3000}界面"), 1);
        assert_eq!(leading_whitespace("   "), 3);
        assert_eq!(leading_whitespace("x"), 0);
    }
}
