use std::collections::BTreeMap;
use std::iter::FromIterator;
use std::path::Path;

use fxhash::FxHashMap;
use gfa::gfa::GFA;
use gfa::parser::GFAParser;
use log::{debug, warn};

use crate::error::{Error, Result};

pub type VertexId = usize;
pub type EdgeIx = usize;

/// Identity of an undirected edge. The smaller endpoint always comes
/// first, so `EdgeKey::new(a, b) == EdgeKey::new(b, a)` and the key
/// hashes the same whichever way round the edge was given or oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
    pub fn new(a: VertexId, b: VertexId) -> EdgeKey {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }

    pub fn low(&self) -> VertexId {
        self.0
    }

    pub fn high(&self) -> VertexId {
        self.1
    }

    /// Sum of both endpoint ids; candidate edges are explored in
    /// ascending order of this value.
    pub fn weight(&self) -> u128 {
        self.0 as u128 + self.1 as u128
    }

    /// The endpoint opposite to `v`, if `v` is an endpoint at all.
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.0 == v {
            Some(self.1)
        } else if self.1 == v {
            Some(self.0)
        } else {
            None
        }
    }
}

/// Deduplicated undirected graph. Vertices are kept ordered by id,
/// edges in insertion order, and every vertex keeps the indices of
/// its incident edges in the order they were added.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    incident: BTreeMap<VertexId, Vec<EdgeIx>>,
    edges: Vec<EdgeKey>,
    index: FxHashMap<EdgeKey, EdgeIx>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Builds a graph from vertex pairs, skipping self-loops.
    pub fn from_edges<I>(edges: I) -> Graph
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut graph = Graph::new();
        for (a, b) in edges {
            if a == b {
                debug!("skipping self-loop on {}", a);
                continue;
            }
            graph.add_vertex(a);
            graph.add_vertex(b);
            graph.add_edge(a, b);
        }
        graph
    }

    /// Reads the links of a GFA file, using the numeric segment names
    /// as vertex ids. Segments linked to themselves are skipped.
    pub fn from_gfa_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
        let parser: GFAParser<usize, ()> = GFAParser::new();
        let gfa: GFA<usize, ()> = parser
            .parse_file(path.as_ref())
            .map_err(|err| Error::Gfa(format!("{:?}", err)))?;

        let mut graph = Graph::new();
        for link in gfa.links.iter() {
            let from = link.from_segment;
            let to = link.to_segment;
            if from == to {
                warn!("skipping GFA link from segment {} to itself", from);
                continue;
            }
            graph.add_vertex(from);
            graph.add_vertex(to);
            graph.add_edge(from, to);
        }

        debug!(
            "loaded {} vertices and {} edges from {} GFA links",
            graph.vertex_count(),
            graph.edge_count(),
            gfa.links.len()
        );
        Ok(graph)
    }

    pub fn add_vertex(&mut self, id: VertexId) {
        self.incident.entry(id).or_default();
    }

    /// Connects `a` and `b` unless an edge between them already exists.
    /// Returns whether a new edge was created. Both vertices are added
    /// if missing; self-loops are ignored.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        if a == b {
            return false;
        }
        let key = EdgeKey::new(a, b);
        if self.index.contains_key(&key) {
            return false;
        }

        let ix = self.edges.len();
        self.edges.push(key);
        self.index.insert(key, ix);
        self.incident.entry(a).or_default().push(ix);
        self.incident.entry(b).or_default().push(ix);
        true
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.incident.contains_key(&id)
    }

    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeIx> {
        self.index.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.incident.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.incident.keys().copied()
    }

    pub fn lowest_vertex(&self) -> Option<VertexId> {
        self.incident.keys().next().copied()
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn edge(&self, ix: EdgeIx) -> EdgeKey {
        self.edges[ix]
    }

    /// Indices of the edges touching `v`, in insertion order.
    pub fn incident(&self, v: VertexId) -> &[EdgeIx] {
        self.incident.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FromIterator<(VertexId, VertexId)> for Graph {
    fn from_iter<I: IntoIterator<Item = (VertexId, VertexId)>>(iter: I) -> Self {
        Graph::from_edges(iter)
    }
}
