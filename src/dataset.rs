//! Datasets: a default graph plus named graphs

use std::collections::BTreeMap;
use std::fmt;

use crate::graph::Graph;
use crate::model::coerce::{
    TryIntoGraphName, TryIntoObject, TryIntoPredicate, TryIntoSubject,
};
use crate::model::{GraphName, Quad, Triple};
use crate::Result;

/// Anything a dataset can be built from or mutated with
#[derive(Debug, Clone, Default)]
pub struct DatasetData {
    quads: Vec<Quad>,
}

/// Conversion into [`DatasetData`]
pub trait IntoDatasetData {
    fn into_dataset_data(self) -> Result<DatasetData>;
}

impl IntoDatasetData for DatasetData {
    fn into_dataset_data(self) -> Result<DatasetData> {
        Ok(self)
    }
}

impl IntoDatasetData for Quad {
    fn into_dataset_data(self) -> Result<DatasetData> {
        Ok(DatasetData { quads: vec![self] })
    }
}

impl IntoDatasetData for &Quad {
    fn into_dataset_data(self) -> Result<DatasetData> {
        self.clone().into_dataset_data()
    }
}

impl IntoDatasetData for Triple {
    fn into_dataset_data(self) -> Result<DatasetData> {
        Quad::from(self).into_dataset_data()
    }
}

impl<S, P, O, G> IntoDatasetData for (S, P, O, G)
where
    S: TryIntoSubject,
    P: TryIntoPredicate,
    O: TryIntoObject,
    G: TryIntoGraphName,
{
    fn into_dataset_data(self) -> Result<DatasetData> {
        let triple = crate::model::coerce::coerce_triple(self.0, self.1, self.2)?;
        Ok(DatasetData {
            quads: vec![triple.in_graph(self.3.try_into_graph_name()?)],
        })
    }
}

/// A graph routes to the graph named by its own name
impl IntoDatasetData for &Graph {
    fn into_dataset_data(self) -> Result<DatasetData> {
        let graph_name = match self.name() {
            Some(name) => name.clone(),
            None => GraphName::DefaultGraph,
        };
        Ok(DatasetData {
            quads: self
                .triples()
                .map(|t| t.in_graph(graph_name.clone()))
                .collect(),
        })
    }
}

impl IntoDatasetData for Graph {
    fn into_dataset_data(self) -> Result<DatasetData> {
        (&self).into_dataset_data()
    }
}

impl IntoDatasetData for &Dataset {
    fn into_dataset_data(self) -> Result<DatasetData> {
        Ok(DatasetData {
            quads: self.quads().collect(),
        })
    }
}

impl<T: IntoDatasetData> IntoDatasetData for Vec<T> {
    fn into_dataset_data(self) -> Result<DatasetData> {
        let mut combined = DatasetData::default();
        for item in self {
            combined.quads.extend(item.into_dataset_data()?.quads);
        }
        Ok(combined)
    }
}

/// An optionally named collection of named graphs plus a default graph
///
/// A quad's graph component routes each statement to the matching inner
/// graph; the default-graph sentinel (or an absent graph name) routes to
/// the unnamed default graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    name: Option<GraphName>,
    default_graph: Graph,
    named_graphs: BTreeMap<GraphName, Graph>,
}

impl Dataset {
    /// Creates an empty dataset
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Creates an empty named dataset
    pub fn named(name: impl TryIntoGraphName) -> Result<Self> {
        let mut dataset = Dataset::new();
        dataset.name = match name.try_into_graph_name()? {
            GraphName::DefaultGraph => None,
            other => Some(other),
        };
        Ok(dataset)
    }

    /// Creates a dataset seeded with the given data
    pub fn from_data(data: impl IntoDatasetData) -> Result<Self> {
        let mut dataset = Dataset::new();
        dataset.add(data)?;
        Ok(dataset)
    }

    /// Returns the dataset name, if any
    pub fn name(&self) -> Option<&GraphName> {
        self.name.as_ref()
    }

    /// Returns the default graph
    pub fn default_graph(&self) -> &Graph {
        &self.default_graph
    }

    /// Returns the graph with the given name
    ///
    /// The default-graph sentinel returns the default graph.
    pub fn graph(&self, name: &GraphName) -> Option<&Graph> {
        match name {
            GraphName::DefaultGraph => Some(&self.default_graph),
            other => self.named_graphs.get(other),
        }
    }

    /// Iterates over the named graphs in name order
    pub fn named_graphs(&self) -> impl Iterator<Item = &Graph> {
        self.named_graphs.values()
    }

    /// The names of the named graphs
    pub fn graph_names(&self) -> Vec<&GraphName> {
        self.named_graphs.keys().collect()
    }

    fn graph_entry(&mut self, name: GraphName) -> &mut Graph {
        match name {
            GraphName::DefaultGraph => &mut self.default_graph,
            other => self.named_graphs.entry(other.clone()).or_insert_with(|| {
                Graph::named(other).expect("graph name is already a valid term")
            }),
        }
    }

    /// Inserts a single quad
    pub fn insert(&mut self, quad: Quad) -> &mut Self {
        let (subject, predicate, object, graph_name) = quad.into_parts();
        self.graph_entry(graph_name)
            .insert(Triple::new(subject, predicate, object));
        self
    }

    /// Removes a single quad; an emptied named graph disappears
    pub fn remove(&mut self, quad: &Quad) -> &mut Self {
        let triple = quad.to_triple();
        match quad.graph_name() {
            GraphName::DefaultGraph => {
                self.default_graph.remove(&triple);
            }
            name => {
                if let Some(graph) = self.named_graphs.get_mut(name) {
                    graph.remove(&triple);
                    if graph.is_empty() {
                        self.named_graphs.remove(name);
                    }
                }
            }
        }
        self
    }

    /// Merges data into the dataset; duplicate quads collapse
    pub fn add(&mut self, data: impl IntoDatasetData) -> Result<&mut Self> {
        for quad in data.into_dataset_data()?.quads {
            self.insert(quad);
        }
        Ok(self)
    }

    /// Replaces object sets per (subject, predicate) pair within each
    /// addressed graph
    pub fn put(&mut self, data: impl IntoDatasetData) -> Result<&mut Self> {
        let mut per_graph: BTreeMap<GraphName, Vec<Triple>> = BTreeMap::new();
        for quad in data.into_dataset_data()?.quads {
            let (s, p, o, g) = quad.into_parts();
            per_graph.entry(g).or_default().push(Triple::new(s, p, o));
        }
        for (graph_name, triples) in per_graph {
            self.graph_entry(graph_name).put(triples)?;
        }
        Ok(self)
    }

    /// Deletes the data's quads from the dataset
    pub fn delete(&mut self, data: impl IntoDatasetData) -> Result<&mut Self> {
        for quad in data.into_dataset_data()?.quads {
            self.remove(&quad);
        }
        Ok(self)
    }

    /// Removes an entire named graph (or clears the default graph)
    pub fn delete_graph(&mut self, name: &GraphName) -> &mut Self {
        match name {
            GraphName::DefaultGraph => {
                self.default_graph.clear();
            }
            other => {
                self.named_graphs.remove(other);
            }
        }
        self
    }

    /// Membership test for a quad
    pub fn contains(&self, quad: &Quad) -> bool {
        self.graph(quad.graph_name())
            .is_some_and(|g| g.contains(&quad.to_triple()))
    }

    /// Iterates over all quads, default graph first
    pub fn quads(&self) -> impl Iterator<Item = Quad> + '_ {
        let default = self
            .default_graph
            .triples()
            .map(|t| t.in_graph(GraphName::DefaultGraph));
        let named = self.named_graphs.iter().flat_map(|(name, graph)| {
            graph.triples().map(move |t| t.in_graph(name.clone()))
        });
        default.chain(named)
    }

    /// Number of quads across all graphs
    pub fn quad_count(&self) -> usize {
        self.default_graph.triple_count()
            + self
                .named_graphs
                .values()
                .map(Graph::triple_count)
                .sum::<usize>()
    }

    /// Number of graphs, counting the default graph when non-empty
    pub fn graph_count(&self) -> usize {
        self.named_graphs.len() + usize::from(!self.default_graph.is_empty())
    }

    /// Returns true if no graph holds any statement
    pub fn is_empty(&self) -> bool {
        self.default_graph.is_empty() && self.named_graphs.values().all(Graph::is_empty)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quad in self.quads() {
            writeln!(f, "{quad}")?;
        }
        Ok(())
    }
}

impl Extend<Quad> for Dataset {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        for quad in iter {
            self.insert(quad);
        }
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        let mut dataset = Dataset::new();
        dataset.extend(iter);
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NamedNode, Subject};

    const EX_S: &str = "http://example.org/s";
    const EX_P: &str = "http://example.org/p";
    const EX_G: &str = "http://example.org/g";

    #[test]
    fn test_routing_to_graphs() {
        let mut dataset = Dataset::new();
        dataset.add((EX_S, EX_P, "default", None::<&str>)).unwrap();
        dataset.add((EX_S, EX_P, "named", Some(EX_G))).unwrap();

        assert_eq!(dataset.default_graph().triple_count(), 1);
        let name = GraphName::NamedNode(NamedNode::new(EX_G).unwrap());
        assert_eq!(dataset.graph(&name).unwrap().triple_count(), 1);
        assert_eq!(dataset.quad_count(), 2);
    }

    #[test]
    fn test_statement_without_graph_targets_default_only() {
        let mut dataset = Dataset::new();
        dataset.add((EX_S, EX_P, "x", Some(EX_G))).unwrap();
        dataset.add((EX_S, EX_P, "x", None::<&str>)).unwrap();

        dataset.delete((EX_S, EX_P, "x", None::<&str>)).unwrap();
        assert!(dataset.default_graph().is_empty());
        assert_eq!(dataset.quad_count(), 1);
    }

    #[test]
    fn test_adding_named_graph_routes_by_its_name() {
        let mut graph = Graph::named(EX_G).unwrap();
        graph.add((EX_S, EX_P, "x")).unwrap();

        let dataset = Dataset::from_data(&graph).unwrap();
        let name = GraphName::NamedNode(NamedNode::new(EX_G).unwrap());
        assert!(dataset.graph(&name).is_some());
        assert!(dataset.default_graph().is_empty());
    }

    #[test]
    fn test_emptied_named_graph_disappears() {
        let mut dataset = Dataset::new();
        dataset.add((EX_S, EX_P, "x", Some(EX_G))).unwrap();
        dataset.delete((EX_S, EX_P, "x", Some(EX_G))).unwrap();
        assert_eq!(dataset.graph_count(), 0);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_put_at_quad_level() {
        let mut dataset = Dataset::new();
        dataset.add((EX_S, EX_P, "a", Some(EX_G))).unwrap();
        dataset.add((EX_S, EX_P, "b", Some(EX_G))).unwrap();
        dataset.put((EX_S, EX_P, "c", Some(EX_G))).unwrap();

        let name = GraphName::NamedNode(NamedNode::new(EX_G).unwrap());
        let graph = dataset.graph(&name).unwrap();
        let subject = Subject::NamedNode(NamedNode::new(EX_S).unwrap());
        assert_eq!(
            graph
                .description(&subject)
                .unwrap()
                .get(&NamedNode::new(EX_P).unwrap())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_named_dataset() {
        let dataset = Dataset::named("http://example.org/ds").unwrap();
        assert!(dataset.name().is_some());
    }
}
