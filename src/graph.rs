//! Graphs: optionally named sets of triples indexed by subject

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::description::Description;
use crate::model::coerce::{
    TryIntoGraphName, TryIntoObject, TryIntoPredicate, TryIntoSubject,
};
use crate::model::{GraphName, NamedNode, Object, Subject, Term, Triple};
use crate::prefix::PrefixMap;
use crate::Result;

/// Anything a graph can be built from or mutated with
///
/// Inputs flatten to a list of triples; inputs that carry a prefix map
/// (other graphs) keep it so merges can apply the first-writer-wins rule.
#[derive(Debug, Clone, Default)]
pub struct GraphData {
    triples: Vec<Triple>,
    prefixes: Option<PrefixMap>,
    base_iri: Option<NamedNode>,
}

/// Conversion into [`GraphData`]
pub trait IntoGraphData {
    fn into_graph_data(self) -> Result<GraphData>;
}

impl IntoGraphData for GraphData {
    fn into_graph_data(self) -> Result<GraphData> {
        Ok(self)
    }
}

impl IntoGraphData for Triple {
    fn into_graph_data(self) -> Result<GraphData> {
        Ok(GraphData {
            triples: vec![self],
            ..GraphData::default()
        })
    }
}

impl IntoGraphData for &Triple {
    fn into_graph_data(self) -> Result<GraphData> {
        self.clone().into_graph_data()
    }
}

impl<S, P, O> IntoGraphData for (S, P, O)
where
    S: TryIntoSubject,
    P: TryIntoPredicate,
    O: TryIntoObject,
{
    fn into_graph_data(self) -> Result<GraphData> {
        crate::model::coerce::coerce_triple(self.0, self.1, self.2)?.into_graph_data()
    }
}

impl IntoGraphData for Description {
    fn into_graph_data(self) -> Result<GraphData> {
        Ok(GraphData {
            triples: self.triples().collect(),
            ..GraphData::default()
        })
    }
}

impl IntoGraphData for &Description {
    fn into_graph_data(self) -> Result<GraphData> {
        self.clone().into_graph_data()
    }
}

impl IntoGraphData for Graph {
    fn into_graph_data(self) -> Result<GraphData> {
        Ok(GraphData {
            triples: self.triples().collect(),
            prefixes: self.prefixes,
            base_iri: self.base_iri,
        })
    }
}

impl IntoGraphData for &Graph {
    fn into_graph_data(self) -> Result<GraphData> {
        self.clone().into_graph_data()
    }
}

impl<T: IntoGraphData> IntoGraphData for Vec<T> {
    fn into_graph_data(self) -> Result<GraphData> {
        let mut combined = GraphData::default();
        for item in self {
            let data = item.into_graph_data()?;
            combined.triples.extend(data.triples);
            match (&mut combined.prefixes, data.prefixes) {
                (Some(own), Some(other)) => {
                    own.merge(&other);
                }
                (own @ None, Some(other)) => *own = Some(other),
                _ => {}
            }
            if combined.base_iri.is_none() {
                combined.base_iri = data.base_iri;
            }
        }
        Ok(combined)
    }
}

/// An optionally named set of triples
///
/// Triples are indexed by subject into [`Description`]s. A graph may carry
/// a prefix map and a base IRI; both are annotations and take no part in
/// equality.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: Option<GraphName>,
    descriptions: BTreeMap<Subject, Description>,
    prefixes: Option<PrefixMap>,
    base_iri: Option<NamedNode>,
}

impl PartialEq for Graph {
    /// Graphs are equal when their names and triples match; prefix map and
    /// base IRI are ignored
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.descriptions == other.descriptions
    }
}

impl Eq for Graph {}

impl Graph {
    /// Creates an empty unnamed graph
    pub fn new() -> Self {
        Graph::default()
    }

    /// Creates an empty named graph
    pub fn named(name: impl TryIntoGraphName) -> Result<Self> {
        let mut graph = Graph::new();
        graph.set_name(name)?;
        Ok(graph)
    }

    /// Creates a graph seeded with the given data
    ///
    /// When the data is another graph, its prefixes and base IRI are
    /// inherited; its name is always dropped.
    pub fn from_data(data: impl IntoGraphData) -> Result<Self> {
        let data = data.into_graph_data()?;
        let mut graph = Graph {
            name: None,
            descriptions: BTreeMap::new(),
            prefixes: data.prefixes.clone(),
            base_iri: data.base_iri.clone(),
        };
        for triple in data.triples {
            graph.insert(triple);
        }
        Ok(graph)
    }

    /// Sets the graph name, replacing self
    pub fn with_name(mut self, name: impl TryIntoGraphName) -> Result<Self> {
        self.set_name(name)?;
        Ok(self)
    }

    /// Sets the prefix map, replacing self
    pub fn with_prefixes(mut self, prefixes: PrefixMap) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    /// Sets the base IRI, replacing self
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self> {
        self.set_base_iri(base_iri)?;
        Ok(self)
    }

    /// Returns the graph name, if any
    pub fn name(&self) -> Option<&GraphName> {
        self.name.as_ref()
    }

    /// Sets the graph name; the default-graph sentinel clears it
    pub fn set_name(&mut self, name: impl TryIntoGraphName) -> Result<&mut Self> {
        self.name = match name.try_into_graph_name()? {
            GraphName::DefaultGraph => None,
            other => Some(other),
        };
        Ok(self)
    }

    /// Returns the prefix map, if any
    pub fn prefixes(&self) -> Option<&PrefixMap> {
        self.prefixes.as_ref()
    }

    /// Returns the base IRI, if any
    pub fn base_iri(&self) -> Option<&NamedNode> {
        self.base_iri.as_ref()
    }

    /// Sets the base IRI
    pub fn set_base_iri(&mut self, base_iri: impl Into<String>) -> Result<&mut Self> {
        self.base_iri = Some(NamedNode::new(base_iri.into())?);
        Ok(self)
    }

    /// Removes the base IRI
    pub fn clear_base_iri(&mut self) -> &mut Self {
        self.base_iri = None;
        self
    }

    /// Adds prefix mappings; conflicts are last-writer-wins
    pub fn add_prefixes<I, P, N>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<String>,
        N: Into<String>,
    {
        let prefixes = self.prefixes.get_or_insert_with(PrefixMap::new);
        for (prefix, namespace) in pairs {
            prefixes.insert(prefix, namespace);
        }
        self
    }

    /// Adds prefix mappings, resolving conflicts with the given function
    pub fn add_prefixes_with<F>(&mut self, other: &PrefixMap, resolve: F) -> &mut Self
    where
        F: FnMut(&str, &str, &str) -> String,
    {
        self.prefixes
            .get_or_insert_with(PrefixMap::new)
            .merge_with(other, resolve);
        self
    }

    /// Removes the given prefix labels
    pub fn delete_prefixes<I, P>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        if let Some(prefixes) = &mut self.prefixes {
            for label in labels {
                prefixes.delete(label.as_ref());
            }
        }
        self
    }

    /// Removes all prefix mappings
    pub fn clear_prefixes(&mut self) -> &mut Self {
        self.prefixes = None;
        self
    }

    /// Removes prefix map and base IRI
    pub fn clear_metadata(&mut self) -> &mut Self {
        self.prefixes = None;
        self.base_iri = None;
        self
    }

    /// Inserts a single triple
    pub fn insert(&mut self, triple: Triple) -> &mut Self {
        let (subject, predicate, object) = triple.into_parts();
        let description = self
            .descriptions
            .entry(subject.clone())
            .or_insert_with(|| {
                Description::new(subject).expect("subject is already a valid term")
            });
        // Coercion cannot fail on already-valid model types
        let _ = description.add(predicate, object);
        self
    }

    /// Removes a single triple; an emptied description disappears
    pub fn remove(&mut self, triple: &Triple) -> &mut Self {
        if let Some(description) = self.descriptions.get_mut(triple.subject()) {
            let _ = description.delete(triple.predicate(), triple.object());
            if description.is_empty() {
                self.descriptions.remove(triple.subject());
            }
        }
        self
    }

    /// Merges data into the graph; duplicate triples collapse
    ///
    /// Adding another graph also merges its prefix map with
    /// first-writer-wins on conflicting labels.
    pub fn add(&mut self, data: impl IntoGraphData) -> Result<&mut Self> {
        let data = data.into_graph_data()?;
        for triple in data.triples {
            self.insert(triple);
        }
        if let Some(other) = data.prefixes {
            match &mut self.prefixes {
                Some(own) => {
                    own.merge(&other);
                }
                none => *none = Some(other),
            }
        }
        Ok(self)
    }

    /// Replaces object sets per (subject, predicate) pair
    ///
    /// For every (s, p) pair appearing in the data, the entire object set
    /// under (s, p) is replaced; other predicates of the same subjects are
    /// preserved.
    pub fn put(&mut self, data: impl IntoGraphData) -> Result<&mut Self> {
        let data = data.into_graph_data()?;
        let mut grouped: BTreeMap<(Subject, NamedNode), BTreeSet<Object>> = BTreeMap::new();
        for triple in data.triples {
            let (s, p, o) = triple.into_parts();
            grouped.entry((s, p)).or_default().insert(o);
        }
        for ((subject, predicate), objects) in grouped {
            let description = self
                .descriptions
                .entry(subject.clone())
                .or_insert_with(|| {
                    Description::new(subject).expect("subject is already a valid term")
                });
            let _ = description.put_many(predicate, objects);
        }
        Ok(self)
    }

    /// Deletes the data's triples from the graph
    ///
    /// Deleting another graph deletes its triples regardless of either
    /// graph's name.
    pub fn delete(&mut self, data: impl IntoGraphData) -> Result<&mut Self> {
        let data = data.into_graph_data()?;
        for triple in &data.triples {
            self.remove(triple);
        }
        Ok(self)
    }

    /// Removes the entire descriptions of the given subjects
    pub fn delete_subjects<I>(&mut self, subjects: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: TryIntoSubject,
    {
        let subjects = subjects
            .into_iter()
            .map(TryIntoSubject::try_into_subject)
            .collect::<Result<Vec<_>>>()?;
        for subject in &subjects {
            self.descriptions.remove(subject);
        }
        Ok(self)
    }

    /// Rewrites the description of a subject with the given function
    ///
    /// The returned description is re-anchored at `subject` even if the
    /// function produced one with a different subject; returning `None`
    /// removes the description. An absent subject leaves the graph
    /// unchanged and the function uncalled.
    pub fn update<F>(&mut self, subject: impl TryIntoSubject, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&Description) -> Option<Description>,
    {
        let subject = subject.try_into_subject()?;
        if let Some(current) = self.descriptions.get(&subject) {
            match f(current) {
                Some(replacement) if !replacement.is_empty() => {
                    let replacement = replacement.with_subject(subject.clone())?;
                    self.descriptions.insert(subject, replacement);
                }
                _ => {
                    self.descriptions.remove(&subject);
                }
            }
        }
        Ok(self)
    }

    /// Like [`update`](Self::update), but inserts `init` (re-anchored at
    /// `subject`) when the subject is absent
    ///
    /// The function is never called with the initial value.
    pub fn update_or<F>(
        &mut self,
        subject: impl TryIntoSubject,
        init: &Description,
        f: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&Description) -> Option<Description>,
    {
        let subject = subject.try_into_subject()?;
        if self.descriptions.contains_key(&subject) {
            self.update(subject, f)
        } else {
            let init = init.with_subject(subject.clone())?;
            if !init.is_empty() {
                self.descriptions.insert(subject, init);
            }
            Ok(self)
        }
    }

    /// Returns the description of a subject
    pub fn description(&self, subject: &Subject) -> Option<&Description> {
        self.descriptions.get(subject)
    }

    /// Removes and returns the description of a subject
    pub fn pop(&mut self, subject: &Subject) -> Option<Description> {
        self.descriptions.remove(subject)
    }

    /// Iterates over the descriptions in subject order
    pub fn descriptions(&self) -> impl Iterator<Item = &Description> {
        self.descriptions.values()
    }

    /// The set of subjects
    pub fn subjects(&self) -> BTreeSet<Subject> {
        self.descriptions.keys().cloned().collect()
    }

    /// The set of predicates
    pub fn predicates(&self) -> BTreeSet<NamedNode> {
        self.descriptions
            .values()
            .flat_map(|d| d.predicates())
            .collect()
    }

    /// The set of resource objects (literals are excluded)
    pub fn objects(&self) -> BTreeSet<Object> {
        self.descriptions.values().flat_map(|d| d.objects()).collect()
    }

    /// The set of objects satisfying the filter
    pub fn objects_where<F>(&self, filter: F) -> BTreeSet<Object>
    where
        F: Fn(&Object) -> bool + Copy,
    {
        self.descriptions
            .values()
            .flat_map(|d| d.objects_where(filter))
            .collect()
    }

    /// The set of all resources appearing in the graph
    pub fn resources(&self) -> BTreeSet<Term> {
        self.descriptions
            .values()
            .flat_map(|d| d.resources())
            .collect()
    }

    /// Iterates over all triples
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        self.descriptions.values().flat_map(|d| d.triples())
    }

    /// Number of triples
    pub fn triple_count(&self) -> usize {
        self.descriptions.values().map(Description::triple_count).sum()
    }

    /// Number of distinct subjects
    pub fn subject_count(&self) -> usize {
        self.descriptions.len()
    }

    /// Number of distinct predicates
    pub fn predicate_count(&self) -> usize {
        self.predicates().len()
    }

    /// Number of distinct objects, literals included
    pub fn object_count(&self) -> usize {
        self.objects_where(|_| true).len()
    }

    /// Returns true if the graph holds no triples
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Membership test for a triple
    pub fn contains(&self, triple: &Triple) -> bool {
        self.descriptions
            .get(triple.subject())
            .is_some_and(|d| d.contains(triple.predicate(), triple.object()))
    }

    /// Restricts the graph to the listed subjects and predicates
    ///
    /// `None` for either list means "all".
    pub fn take(
        &self,
        subjects: Option<&[Subject]>,
        predicates: Option<&[NamedNode]>,
    ) -> Result<Graph> {
        let mut restricted = Graph {
            name: self.name.clone(),
            descriptions: BTreeMap::new(),
            prefixes: self.prefixes.clone(),
            base_iri: self.base_iri.clone(),
        };
        for (subject, description) in &self.descriptions {
            if let Some(wanted) = subjects {
                if !wanted.contains(subject) {
                    continue;
                }
            }
            let kept = match predicates {
                Some(wanted) => description.take(wanted.iter().cloned())?,
                None => description.clone(),
            };
            if !kept.is_empty() {
                restricted.descriptions.insert(subject.clone(), kept);
            }
        }
        Ok(restricted)
    }

    /// Empties the graph but keeps name, prefixes, and base IRI
    pub fn clear(&mut self) -> &mut Self {
        self.descriptions.clear();
        self
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in self.triples() {
            writeln!(f, "{triple}")?;
        }
        Ok(())
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}
