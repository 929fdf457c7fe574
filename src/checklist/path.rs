//! External path encoding
//!
//! Clients address nodes by a sequence of sibling indices, sent either as a
//! native JSON integer array or as a comma-separated string (`"0,2,1"`).
//! The empty path addresses the root list. Indices travel as signed
//! integers so a negative input is reported as out-of-range during
//! resolution rather than failing to decode.

use serde::{Deserialize, Deserializer};

use crate::types::{HomesteadError, Result};

/// A positional node path
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(Vec<i64>);

impl NodePath {
    pub fn new(indices: Vec<i64>) -> Self {
        Self(indices)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[i64] {
        &self.0
    }

    /// Parse the comma-separated query form
    ///
    /// Blank input and empty segments are skipped, so `""`, `" "` and
    /// `"0,,1"` parse to the root path and `[0, 1]` respectively.
    pub fn parse(s: &str) -> Result<Self> {
        let mut indices = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let index = part.parse::<i64>().map_err(|_| {
                HomesteadError::InvalidPath(format!("'{}' is not an integer index", part))
            })?;
            indices.push(index);
        }
        Ok(Self(indices))
    }
}

impl From<Vec<i64>> for NodePath {
    fn from(indices: Vec<i64>) -> Self {
        Self(indices)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Encoded {
            Indices(Vec<i64>),
            Text(String),
        }

        match Option::<Encoded>::deserialize(deserializer)? {
            None => Ok(NodePath::default()),
            Some(Encoded::Indices(indices)) => Ok(NodePath(indices)),
            Some(Encoded::Text(text)) => NodePath::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        assert_eq!(NodePath::parse("0,2,1").unwrap().indices(), &[0, 2, 1]);
    }

    #[test]
    fn test_parse_blank_is_root() {
        assert!(NodePath::parse("").unwrap().is_empty());
        assert!(NodePath::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        assert_eq!(NodePath::parse("0,,1,").unwrap().indices(), &[0, 1]);
    }

    #[test]
    fn test_parse_keeps_negative_indices() {
        // Rejected later, during resolution, as out of range
        assert_eq!(NodePath::parse("-1").unwrap().indices(), &[-1]);
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        assert!(matches!(
            NodePath::parse("0,a"),
            Err(HomesteadError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_deserialize_from_array() {
        let path: NodePath = serde_json::from_str("[0, 2]").unwrap();
        assert_eq!(path.indices(), &[0, 2]);
    }

    #[test]
    fn test_deserialize_from_string() {
        let path: NodePath = serde_json::from_str("\"0,2\"").unwrap();
        assert_eq!(path.indices(), &[0, 2]);
    }

    #[test]
    fn test_deserialize_from_null() {
        let path: NodePath = serde_json::from_str("null").unwrap();
        assert!(path.is_empty());
    }
}
