//! Parameter binder.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ast::Value;

/// Ordered placeholder → value table owned by one query.
///
/// Keys are `<tag>p<n>` where `n` is the count at insertion time. Keys are never
/// reused or renumbered.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    tag: &'static str,
    entries: Vec<(String, Value)>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new("@")
    }
}

impl Parameters {
    /// Create an empty binder emitting `tag` as the placeholder prefix.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            entries: Vec::new(),
        }
    }

    /// Bind `value` and return its placeholder. Equal values get distinct placeholders.
    pub fn add(&mut self, value: impl Into<Value>) -> String {
        let key = format!("{}p{}", self.tag, self.entries.len());
        self.entries.push((key.clone(), value.into()));
        key
    }

    /// Append the entries of `other` without renumbering.
    ///
    /// The caller guarantees the two key spaces do not collide.
    pub fn merge(&mut self, other: Parameters) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_are_positional() {
        let mut params = Parameters::default();
        assert_eq!(params.add(1), "@p0");
        assert_eq!(params.add(1), "@p1");
        assert_eq!(params.add("x"), "@p2");
        assert_eq!(params.get("@p1"), Some(&Value::Int(1)));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_tag_prefix() {
        let mut params = Parameters::new(":");
        assert_eq!(params.add(true), ":p0");
    }

    #[test]
    fn test_merge_concatenates_without_renumbering() {
        let mut a = Parameters::default();
        a.add(1);
        let mut b = Parameters::default();
        b.add(2);
        a.merge(b);

        let keys: Vec<&str> = a.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["@p0", "@p0"]);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut params = Parameters::default();
        params.add(10);
        params.add("x");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"@p0":{"Int":10},"@p1":{"String":"x"}}"#);
    }
}
