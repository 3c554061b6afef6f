use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::graph::{Graph, VertexId};
use crate::state::{Role, State};

/// The finished result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub root: VertexId,
    pub order: BTreeMap<VertexId, usize>,
    pub parents: BTreeMap<VertexId, VertexId>,
    /// `(parent, child)` pairs, in edge insertion order.
    pub tree_edges: Vec<(VertexId, VertexId)>,
    /// `(descendant, ancestor)` pairs, in the order they were found.
    pub back_edges: Vec<(VertexId, VertexId)>,
    pub ratings: BTreeMap<VertexId, usize>,
    pub joints: BTreeSet<VertexId>,
    pub unreached: Vec<VertexId>,
}

impl Analysis {
    pub fn collect(
        graph: &Graph,
        state: &State,
        root: VertexId,
        joints: BTreeSet<VertexId>,
    ) -> Analysis {
        let tree_edges = state
            .roles
            .iter()
            .filter_map(|role| match *role {
                Role::Tree { tail, head } => Some((tail, head)),
                _ => None,
            })
            .collect();

        let back_edges = state
            .back_edges
            .iter()
            .filter_map(|&ix| match state.roles[ix] {
                Role::Back { tail, head } => Some((tail, head)),
                _ => None,
            })
            .collect();

        let unreached = graph
            .vertices()
            .filter(|v| !state.order.contains_key(v))
            .collect();

        Analysis {
            root,
            order: state.order.iter().map(|(&v, &o)| (v, o)).collect(),
            parents: state.parent.iter().map(|(&v, &p)| (v, p)).collect(),
            tree_edges,
            back_edges,
            ratings: state.ratings.iter().map(|(&v, &r)| (v, r)).collect(),
            joints,
            unreached,
        }
    }

    pub fn is_joint(&self, v: VertexId) -> bool {
        self.joints.contains(&v)
    }

    /// Tree children of `v`, ascending by id.
    pub fn children(&self, v: VertexId) -> Vec<VertexId> {
        self.parents
            .iter()
            .filter(|&(_, &p)| p == v)
            .map(|(&c, _)| c)
            .collect()
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root: {}", self.root)?;
        for (v, order) in self.order.iter() {
            writeln!(f, "order[{}] = {}", v, order)?;
        }
        for (tail, head) in self.back_edges.iter() {
            writeln!(f, "back: {} {}", tail, head)?;
        }
        for (v, rating) in self.ratings.iter() {
            writeln!(f, "rating[{}] = {}", v, rating)?;
        }
        if !self.unreached.is_empty() {
            write!(f, "unreached:")?;
            for v in self.unreached.iter() {
                write!(f, " {}", v)?;
            }
            writeln!(f)?;
        }
        write!(f, "joints:")?;
        for v in self.joints.iter() {
            write!(f, " {}", v)?;
        }
        writeln!(f)
    }
}
