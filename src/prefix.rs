//! Prefix maps: short labels for IRI namespaces

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::NamedNode;
use crate::{RdfError, Result};

/// A mapping between prefix labels and IRI namespaces
///
/// Used by the Turtle reader and writer and carried as annotation on
/// [`crate::Graph`] values. Explicit `insert` calls are last-writer-wins;
/// implicit merges (graph `add`) keep the first writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixMap {
    map: BTreeMap<String, String>,
}

impl PrefixMap {
    /// Creates an empty prefix map
    pub fn new() -> Self {
        PrefixMap::default()
    }

    /// Creates a prefix map from (label, namespace) pairs
    pub fn from_pairs<I, P, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<String>,
        N: Into<String>,
    {
        let mut map = PrefixMap::new();
        for (prefix, namespace) in pairs {
            map.insert(prefix, namespace);
        }
        map
    }

    /// Inserts a mapping, replacing any existing namespace for the label
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> &mut Self {
        self.map.insert(prefix.into(), namespace.into());
        self
    }

    /// Removes a mapping
    pub fn delete(&mut self, prefix: &str) -> &mut Self {
        self.map.remove(prefix);
        self
    }

    /// Removes all mappings
    pub fn clear(&mut self) -> &mut Self {
        self.map.clear();
        self
    }

    /// Returns the namespace bound to a label
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.map.get(prefix).map(String::as_str)
    }

    /// Returns true if no mappings are present
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Iterates over (label, namespace) pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Merges another map, keeping this map's binding on conflicts
    pub fn merge(&mut self, other: &PrefixMap) -> &mut Self {
        for (prefix, namespace) in &other.map {
            self.map
                .entry(prefix.clone())
                .or_insert_with(|| namespace.clone());
        }
        self
    }

    /// Merges another map, resolving conflicts with the given function
    ///
    /// The resolver receives the label and both namespaces (own first) and
    /// returns the namespace to keep.
    pub fn merge_with<F>(&mut self, other: &PrefixMap, mut resolve: F) -> &mut Self
    where
        F: FnMut(&str, &str, &str) -> String,
    {
        for (prefix, namespace) in &other.map {
            match self.map.get(prefix) {
                Some(existing) if existing != namespace => {
                    let kept = resolve(prefix, existing, namespace);
                    self.map.insert(prefix.clone(), kept);
                }
                Some(_) => {}
                None => {
                    self.map.insert(prefix.clone(), namespace.clone());
                }
            }
        }
        self
    }

    /// Expands a `prefix:local` pair into an IRI
    pub fn expand(&self, prefixed: &str) -> Result<NamedNode> {
        let (prefix, local) = prefixed.split_once(':').ok_or_else(|| {
            RdfError::InvalidTerm(format!("'{prefixed}' is not a prefixed name"))
        })?;
        let namespace = self.get(prefix).ok_or_else(|| {
            RdfError::InvalidTerm(format!("undefined prefix '{prefix}'"))
        })?;
        NamedNode::new(format!("{namespace}{local}"))
    }

    /// Shrinks an IRI into a (label, local part) pair
    ///
    /// Chooses the longest matching namespace; returns `None` if no
    /// namespace is a prefix of the IRI.
    pub fn shrink<'a>(&self, iri: &'a str) -> Option<(&str, &'a str)> {
        self.map
            .iter()
            .filter_map(|(prefix, namespace)| {
                iri.strip_prefix(namespace.as_str())
                    .map(|local| (prefix.as_str(), namespace.as_str(), local))
            })
            .max_by_key(|(_, namespace, _)| namespace.len())
            .map(|(prefix, _, local)| (prefix, local))
    }
}

impl<P: Into<String>, N: Into<String>> FromIterator<(P, N)> for PrefixMap {
    fn from_iter<I: IntoIterator<Item = (P, N)>>(iter: I) -> Self {
        PrefixMap::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_last_writer_wins() {
        let mut map = PrefixMap::new();
        map.insert("ex", "http://a/");
        map.insert("ex", "http://b/");
        assert_eq!(map.get("ex"), Some("http://b/"));
    }

    #[test]
    fn test_merge_is_first_writer_wins() {
        let mut map = PrefixMap::from_pairs([("ex", "http://a/")]);
        let other = PrefixMap::from_pairs([("ex", "http://b/"), ("foaf", "http://f/")]);
        map.merge(&other);
        assert_eq!(map.get("ex"), Some("http://a/"));
        assert_eq!(map.get("foaf"), Some("http://f/"));
    }

    #[test]
    fn test_merge_with_resolver() {
        let mut map = PrefixMap::from_pairs([("ex", "http://a/")]);
        let other = PrefixMap::from_pairs([("ex", "http://b/")]);
        map.merge_with(&other, |_, _, theirs| theirs.to_string());
        assert_eq!(map.get("ex"), Some("http://b/"));
    }

    #[test]
    fn test_expand() {
        let map = PrefixMap::from_pairs([("ex", "http://example.org/")]);
        assert_eq!(
            map.expand("ex:thing").unwrap().as_str(),
            "http://example.org/thing"
        );
        assert!(map.expand("unknown:thing").is_err());
        assert!(map.expand("noseparator").is_err());
    }

    #[test]
    fn test_shrink_prefers_longest_namespace() {
        let map = PrefixMap::from_pairs([
            ("ex", "http://example.org/"),
            ("sub", "http://example.org/sub/"),
        ]);
        assert_eq!(
            map.shrink("http://example.org/sub/x"),
            Some(("sub", "x"))
        );
        assert_eq!(map.shrink("http://example.org/y"), Some(("ex", "y")));
        assert_eq!(map.shrink("http://other.org/z"), None);
    }
}
