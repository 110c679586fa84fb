//! Equality predicates over record metadata.
//!
//! A query is a flat AND of `(dotted path, expected string)` pairs. A record
//! satisfies a predicate only when the path resolves to a JSON string equal to
//! the expected value; numbers, booleans, objects, arrays and null never match.

use models::Metadata;

/// Conventional prefix callers may put in front of a path, e.g. `metadata.allergens.eggs`.
pub const METADATA_PREFIX: &str = "metadata.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    path: String,
    expected: String,
}

impl Predicate {
    /// A leading `metadata.` is dropped once, since paths are resolved from the metadata root.
    pub fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        let path = path.into();
        let path = match path.strip_prefix(METADATA_PREFIX) {
            Some(rest) => rest.to_string(),
            None => path,
        };
        Self { path, expected: expected.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        metadata.resolve_str(&self.path) == Some(self.expected.as_str())
    }
}

/// Conjunction of predicates. The empty query matches every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    predicates: Vec<Predicate>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, path: impl Into<String>, expected: impl Into<String>) -> Self {
        self.push(path, expected);
        self
    }

    pub fn push(&mut self, path: impl Into<String>, expected: impl Into<String>) {
        self.predicates.push(Predicate::new(path, expected));
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.predicates.iter().all(|p| p.matches(metadata))
    }
}

impl<K, V> FromIterator<(K, V)> for SearchQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (path, expected) in iter {
            query.push(path, expected);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(v: serde_json::Value) -> Metadata {
        Metadata::try_from(v).expect("object metadata")
    }

    #[test]
    fn strips_metadata_prefix_once() {
        assert_eq!(Predicate::new("metadata.allergens.eggs", "true").path(), "allergens.eggs");
        assert_eq!(Predicate::new("metadata.metadata.x", "1").path(), "metadata.x");
        assert_eq!(Predicate::new("metadata", "1").path(), "metadata");
        assert_eq!(Predicate::new("abc", "1").path(), "abc");
    }

    #[test]
    fn string_leaves_match_exactly() {
        let m = meta(json!({"abc": "123", "obj": {"aaa": {"bbb": "ccc"}}}));
        assert!(SearchQuery::new().and("abc", "123").matches(&m));
        assert!(SearchQuery::new().and("metadata.obj.aaa.bbb", "ccc").matches(&m));
        assert!(!SearchQuery::new().and("abc", "1234").matches(&m));
        assert!(!SearchQuery::new().and("abc", " 123").matches(&m));
    }

    #[test]
    fn non_string_leaves_never_match() {
        let m = meta(json!({"n": 123, "b": true, "z": null, "o": {"k": "v"}, "l": ["x"]}));
        for (path, expected) in [("n", "123"), ("b", "true"), ("z", "null"), ("o", "{\"k\":\"v\"}"), ("l", "x")] {
            assert!(!Predicate::new(path, expected).matches(&m), "{path} should not match");
        }
    }

    #[test]
    fn predicates_are_and_combined() {
        let m = meta(json!({"abc": "123", "enabled": "true"}));
        let both: SearchQuery = [("abc", "123"), ("enabled", "true")].into_iter().collect();
        assert_eq!(both.len(), 2);
        assert!(both.matches(&m));
        let one_wrong: SearchQuery = [("abc", "123"), ("enabled", "false")].into_iter().collect();
        assert!(!one_wrong.matches(&m));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(SearchQuery::new().is_empty());
        assert!(SearchQuery::new().matches(&Metadata::new()));
    }
}
