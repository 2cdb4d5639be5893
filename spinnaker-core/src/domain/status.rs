//! Status sets configured by the operator

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A set of acceptable execution statuses
///
/// An empty set places no constraint: every status is accepted when
/// filtering, and the `out` step does not wait for any status at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(BTreeSet<String>);

impl StatusSet {
    /// Creates an empty status set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no statuses were configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of configured statuses
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Strict membership test
    pub fn contains(&self, status: &str) -> bool {
        self.0.contains(status)
    }

    /// Filter semantics: an empty set accepts every status
    pub fn accepts(&self, status: &str) -> bool {
        self.is_empty() || self.contains(status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StatusSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_accepts_everything() {
        let statuses = StatusSet::new();
        assert!(statuses.accepts("SUCCEEDED"));
        assert!(statuses.accepts(""));
        assert!(!statuses.contains("SUCCEEDED"));
    }

    #[test]
    fn test_membership() {
        let statuses: StatusSet = ["SUCCEEDED", "TERMINAL"].into_iter().collect();
        assert!(statuses.accepts("SUCCEEDED"));
        assert!(statuses.accepts("TERMINAL"));
        assert!(!statuses.accepts("RUNNING"));
        assert_eq!(statuses.len(), 2);
    }

    #[test]
    fn test_deserializes_from_list_and_collapses_duplicates() {
        let statuses: StatusSet =
            serde_json::from_str(r#"["SUCCEEDED", "SUCCEEDED", "CANCELED"]"#).unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses.to_string(), "CANCELED, SUCCEEDED");
    }
}
