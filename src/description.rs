//! Descriptions: all statements sharing one subject

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::coerce::{TryIntoObject, TryIntoPredicate, TryIntoSubject};
use crate::model::{NamedNode, Object, Subject, Term, Triple};
use crate::xsd::XsdValue;
use crate::Result;

/// All statements about one subject: a mapping predicate → object set
///
/// The subject is fixed at construction and never changes. There are no
/// duplicate (predicate, object) pairs; a description with no predications
/// is valid but empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    subject: Subject,
    predications: BTreeMap<NamedNode, BTreeSet<Object>>,
}

impl Description {
    /// Creates an empty description of the given subject
    pub fn new(subject: impl TryIntoSubject) -> Result<Self> {
        Ok(Description {
            subject: subject.try_into_subject()?,
            predications: BTreeMap::new(),
        })
    }

    /// Creates a description from the triples about `subject`
    ///
    /// Triples whose subject differs are silently dropped.
    pub fn from_triples<I>(subject: impl TryIntoSubject, triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut description = Description::new(subject)?;
        let mut dropped = 0usize;
        for triple in triples {
            let (s, p, o) = triple.into_parts();
            if s == description.subject {
                description.insert_pair(p, o);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, subject = %description.subject, "dropped statements with foreign subjects");
        }
        Ok(description)
    }

    /// Returns the described subject
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns true if this description describes the given subject
    pub fn describes(&self, subject: &Subject) -> bool {
        self.subject == *subject
    }

    /// Returns a copy of this description about a different subject
    pub fn with_subject(&self, subject: impl TryIntoSubject) -> Result<Description> {
        Ok(Description {
            subject: subject.try_into_subject()?,
            predications: self.predications.clone(),
        })
    }

    fn insert_pair(&mut self, predicate: NamedNode, object: Object) {
        self.predications.entry(predicate).or_default().insert(object);
    }

    /// Adds one statement; duplicates collapse
    pub fn add(
        &mut self,
        predicate: impl TryIntoPredicate,
        object: impl TryIntoObject,
    ) -> Result<&mut Self> {
        let predicate = predicate.try_into_predicate()?;
        let object = object.try_into_object()?;
        self.insert_pair(predicate, object);
        Ok(self)
    }

    /// Adds several objects under one predicate
    ///
    /// Coercion failures abort before anything is inserted.
    pub fn add_many<I>(&mut self, predicate: impl TryIntoPredicate, objects: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: TryIntoObject,
    {
        let predicate = predicate.try_into_predicate()?;
        let objects = objects
            .into_iter()
            .map(TryIntoObject::try_into_object)
            .collect::<Result<Vec<_>>>()?;
        for object in objects {
            self.insert_pair(predicate.clone(), object);
        }
        Ok(self)
    }

    /// Merges another description; a foreign subject makes this a no-op
    pub fn add_description(&mut self, other: &Description) -> &mut Self {
        if other.subject == self.subject {
            for (predicate, objects) in &other.predications {
                for object in objects {
                    self.insert_pair(predicate.clone(), object.clone());
                }
            }
        }
        self
    }

    /// Replaces all objects under the predicate with a single one
    pub fn put(
        &mut self,
        predicate: impl TryIntoPredicate,
        object: impl TryIntoObject,
    ) -> Result<&mut Self> {
        let predicate = predicate.try_into_predicate()?;
        let object = object.try_into_object()?;
        self.predications
            .insert(predicate, BTreeSet::from([object]));
        Ok(self)
    }

    /// Replaces all objects under the predicate with the given ones
    ///
    /// An empty list removes the predicate entirely. Other predicates are
    /// untouched.
    pub fn put_many<I>(&mut self, predicate: impl TryIntoPredicate, objects: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: TryIntoObject,
    {
        let predicate = predicate.try_into_predicate()?;
        let objects = objects
            .into_iter()
            .map(TryIntoObject::try_into_object)
            .collect::<Result<BTreeSet<_>>>()?;
        if objects.is_empty() {
            self.predications.remove(&predicate);
        } else {
            self.predications.insert(predicate, objects);
        }
        Ok(self)
    }

    /// Removes one statement; an emptied predicate disappears
    pub fn delete(
        &mut self,
        predicate: impl TryIntoPredicate,
        object: impl TryIntoObject,
    ) -> Result<&mut Self> {
        let predicate = predicate.try_into_predicate()?;
        let object = object.try_into_object()?;
        if let Some(objects) = self.predications.get_mut(&predicate) {
            objects.remove(&object);
            if objects.is_empty() {
                self.predications.remove(&predicate);
            }
        }
        Ok(self)
    }

    /// Removes several objects under one predicate
    pub fn delete_many<I>(
        &mut self,
        predicate: impl TryIntoPredicate,
        objects: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: TryIntoObject,
    {
        let predicate = predicate.try_into_predicate()?;
        let objects = objects
            .into_iter()
            .map(TryIntoObject::try_into_object)
            .collect::<Result<Vec<_>>>()?;
        if let Some(existing) = self.predications.get_mut(&predicate) {
            for object in &objects {
                existing.remove(object);
            }
            if existing.is_empty() {
                self.predications.remove(&predicate);
            }
        }
        Ok(self)
    }

    /// Removes all statements for the given predicates
    pub fn delete_predicates<I>(&mut self, predicates: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: TryIntoPredicate,
    {
        let predicates = predicates
            .into_iter()
            .map(TryIntoPredicate::try_into_predicate)
            .collect::<Result<Vec<_>>>()?;
        for predicate in &predicates {
            self.predications.remove(predicate);
        }
        Ok(self)
    }

    /// Rewrites the objects under a predicate with the given function
    ///
    /// The function receives the current object set; returning an empty
    /// list removes the predicate. An absent predicate leaves the
    /// description unchanged and the function uncalled.
    pub fn update<F>(&mut self, predicate: impl TryIntoPredicate, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&BTreeSet<Object>) -> Vec<Object>,
    {
        let predicate = predicate.try_into_predicate()?;
        if let Some(current) = self.predications.get(&predicate) {
            let replacement: BTreeSet<Object> = f(current).into_iter().collect();
            if replacement.is_empty() {
                self.predications.remove(&predicate);
            } else {
                self.predications.insert(predicate, replacement);
            }
        }
        Ok(self)
    }

    /// Like [`update`](Self::update), but inserts `init` when the
    /// predicate is absent
    ///
    /// The function is never called with the initial value.
    pub fn update_or<F, I>(
        &mut self,
        predicate: impl TryIntoPredicate,
        init: I,
        f: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&BTreeSet<Object>) -> Vec<Object>,
        I: IntoIterator,
        I::Item: TryIntoObject,
    {
        let predicate = predicate.try_into_predicate()?;
        if self.predications.contains_key(&predicate) {
            self.update(predicate, f)
        } else {
            self.add_many(predicate, init)
        }
    }

    /// Returns the objects under a predicate
    pub fn get(&self, predicate: &NamedNode) -> Option<&BTreeSet<Object>> {
        self.predications.get(predicate)
    }

    /// Returns the first object under a predicate
    pub fn first(&self, predicate: &NamedNode) -> Option<&Object> {
        self.predications.get(predicate).and_then(|set| set.iter().next())
    }

    /// Removes and returns some statement; which one is unspecified
    pub fn pop(&mut self) -> Option<Triple> {
        let predicate = self.predications.keys().next()?.clone();
        let objects = self.predications.get_mut(&predicate)?;
        let object = objects.iter().next()?.clone();
        objects.remove(&object);
        if objects.is_empty() {
            self.predications.remove(&predicate);
        }
        Some(Triple::new(self.subject.clone(), predicate, object))
    }

    /// The set of predicates
    pub fn predicates(&self) -> BTreeSet<NamedNode> {
        self.predications.keys().cloned().collect()
    }

    /// The set of resource objects (literals are excluded)
    pub fn objects(&self) -> BTreeSet<Object> {
        self.objects_where(Object::is_resource)
    }

    /// The set of objects satisfying the filter
    pub fn objects_where<F>(&self, filter: F) -> BTreeSet<Object>
    where
        F: Fn(&Object) -> bool,
    {
        self.predications
            .values()
            .flatten()
            .filter(|o| filter(o))
            .cloned()
            .collect()
    }

    /// The set of all resources appearing in this description
    pub fn resources(&self) -> BTreeSet<Term> {
        let mut resources: BTreeSet<Term> = BTreeSet::new();
        resources.insert(self.subject.clone().into());
        for (predicate, objects) in &self.predications {
            resources.insert(Term::NamedNode(predicate.clone()));
            for object in objects {
                if object.is_resource() {
                    resources.insert(object.clone().into());
                }
            }
        }
        resources
    }

    /// Restricts the description to the listed predicates
    pub fn take<I>(&self, predicates: I) -> Result<Description>
    where
        I: IntoIterator,
        I::Item: TryIntoPredicate,
    {
        let predicates = predicates
            .into_iter()
            .map(TryIntoPredicate::try_into_predicate)
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Description {
            subject: self.subject.clone(),
            predications: self
                .predications
                .iter()
                .filter(|(p, _)| predicates.contains(*p))
                .map(|(p, os)| (p.clone(), os.clone()))
                .collect(),
        })
    }

    /// Number of statements
    pub fn triple_count(&self) -> usize {
        self.predications.values().map(BTreeSet::len).sum()
    }

    /// Number of distinct predicates
    pub fn predicate_count(&self) -> usize {
        self.predications.len()
    }

    /// Returns true if no statements are present
    pub fn is_empty(&self) -> bool {
        self.predications.is_empty()
    }

    /// Membership test for a (predicate, object) pair
    pub fn contains(&self, predicate: &NamedNode, object: &Object) -> bool {
        self.predications
            .get(predicate)
            .is_some_and(|objects| objects.contains(object))
    }

    /// Iterates over the statements as triples
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        self.predications.iter().flat_map(move |(predicate, objects)| {
            objects.iter().map(move |object| {
                Triple::new(self.subject.clone(), predicate.clone(), object.clone())
            })
        })
    }

    /// Iterates over (predicate, object set) pairs in predicate order
    pub fn predications(&self) -> impl Iterator<Item = (&NamedNode, &BTreeSet<Object>)> {
        self.predications.iter()
    }

    /// Projects literal objects into native values, keyed by predicate
    pub fn values(&self) -> BTreeMap<NamedNode, Vec<XsdValue>> {
        self.values_with(|_, object| object.as_literal().and_then(|l| l.to_value()))
    }

    /// Projects objects through a mapping function, keyed by predicate
    ///
    /// Objects for which the function returns `None` are skipped; a
    /// predicate with no mapped objects does not appear in the result.
    pub fn values_with<F, V>(&self, f: F) -> BTreeMap<NamedNode, Vec<V>>
    where
        F: Fn(&NamedNode, &Object) -> Option<V>,
    {
        let mut result = BTreeMap::new();
        for (predicate, objects) in &self.predications {
            let mapped: Vec<V> = objects.iter().filter_map(|o| f(predicate, o)).collect();
            if !mapped.is_empty() {
                result.insert(predicate.clone(), mapped);
            }
        }
        result
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in self.triples() {
            writeln!(f, "{triple}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    const EX_S: &str = "http://example.org/s";
    const EX_P1: &str = "http://example.org/p1";
    const EX_P2: &str = "http://example.org/p2";

    fn node(iri: &str) -> NamedNode {
        NamedNode::new(iri).unwrap()
    }

    #[test]
    fn test_add_collapses_duplicates() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "o").unwrap();
        d.add(EX_P1, "o").unwrap();
        assert_eq!(d.triple_count(), 1);
    }

    #[test]
    fn test_put_replaces_predicate_set_only() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "o1").unwrap();
        d.add(EX_P2, "o2").unwrap();
        d.put(EX_P1, "o3").unwrap();

        let p1 = node(EX_P1);
        let p2 = node(EX_P2);
        assert_eq!(d.get(&p1).unwrap().len(), 1);
        assert!(d.contains(&p1, &Object::Literal(Literal::new_simple_literal("o3"))));
        assert!(d.contains(&p2, &Object::Literal(Literal::new_simple_literal("o2"))));
    }

    #[test]
    fn test_delete_removes_emptied_predicate() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "o").unwrap();
        d.delete(EX_P1, "o").unwrap();
        assert!(d.is_empty());
        assert!(d.get(&node(EX_P1)).is_none());
    }

    #[test]
    fn test_delete_predicates() {
        let mut d = Description::new(EX_S).unwrap();
        d.add_many(EX_P1, ["a", "b"]).unwrap();
        d.add(EX_P2, "c").unwrap();
        d.delete_predicates([EX_P1]).unwrap();
        assert_eq!(d.triple_count(), 1);
    }

    #[test]
    fn test_add_description_foreign_subject_is_noop() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "o").unwrap();
        let mut other = Description::new("http://example.org/other").unwrap();
        other.add(EX_P2, "x").unwrap();
        d.add_description(&other);
        assert_eq!(d.triple_count(), 1);
    }

    #[test]
    fn test_from_triples_drops_foreign_subjects() {
        let s = Subject::NamedNode(node(EX_S));
        let other = Subject::NamedNode(node("http://example.org/other"));
        let triples = vec![
            Triple::new(s.clone(), node(EX_P1), Literal::new_simple_literal("a")),
            Triple::new(other, node(EX_P1), Literal::new_simple_literal("b")),
        ];
        let d = Description::from_triples(EX_S, triples).unwrap();
        assert_eq!(d.triple_count(), 1);
    }

    #[test]
    fn test_update_present_and_absent() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, 1i64).unwrap();

        // Present: rewrite
        d.update(EX_P1, |_| vec![Object::Literal(Literal::from(2i64))])
            .unwrap();
        assert_eq!(
            d.first(&node(EX_P1)).unwrap(),
            &Object::Literal(Literal::from(2i64))
        );

        // Absent without init: no-op, function not called
        d.update(EX_P2, |_| panic!("must not be called")).unwrap();
        assert!(d.get(&node(EX_P2)).is_none());

        // Absent with init: insert, function not called
        d.update_or(EX_P2, ["seed"], |_| panic!("must not be called"))
            .unwrap();
        assert_eq!(d.get(&node(EX_P2)).unwrap().len(), 1);

        // Empty replacement removes the predicate
        d.update(EX_P1, |_| Vec::new()).unwrap();
        assert!(d.get(&node(EX_P1)).is_none());
    }

    #[test]
    fn test_objects_excludes_literals_by_default() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "literal").unwrap();
        d.add(EX_P1, node("http://example.org/o")).unwrap();
        assert_eq!(d.objects().len(), 1);
        assert_eq!(d.objects_where(|_| true).len(), 2);
    }

    #[test]
    fn test_pop() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "o").unwrap();
        let popped = d.pop().unwrap();
        assert_eq!(popped.predicate().as_str(), EX_P1);
        assert!(d.is_empty());
        assert!(d.pop().is_none());
    }

    #[test]
    fn test_take() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "a").unwrap();
        d.add(EX_P2, "b").unwrap();
        let restricted = d.take([EX_P1]).unwrap();
        assert_eq!(restricted.triple_count(), 1);
        assert_eq!(restricted.subject(), d.subject());
    }

    #[test]
    fn test_values() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, 42i64).unwrap();
        d.add(EX_P1, node("http://example.org/o")).unwrap();
        let values = d.values();
        assert_eq!(values[&node(EX_P1)], vec![XsdValue::Integer(42)]);
    }

    #[test]
    fn test_bulk_add_is_atomic() {
        let mut d = Description::new(EX_S).unwrap();
        d.add(EX_P1, "keep").unwrap();
        let before = d.clone();
        let result = d.add_many("not an iri", ["x"]);
        assert!(result.is_err());
        assert_eq!(d, before);
    }
}
