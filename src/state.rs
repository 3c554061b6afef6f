use std::collections::VecDeque;
use std::iter;

use fxhash::{FxHashMap, FxHashSet};
use log::trace;

use crate::graph::{EdgeIx, Graph, VertexId};

/// What an edge became during orientation. Oriented edges remember
/// their direction: the tail of a tree edge is the parent, the tail of
/// a back edge is the deeper vertex and its head the ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Unoriented,
    Tree { tail: VertexId, head: VertexId },
    Back { tail: VertexId, head: VertexId },
}

impl Role {
    pub fn is_oriented(&self) -> bool {
        *self != Role::Unoriented
    }
}

/// Everything one analysis run owns: discovery order, spanning tree,
/// back edges, the finalization queue and the ratings.
#[derive(Default, Debug, Clone)]
pub struct State {
    /// Top-level roots, one per `orient` call that started a traversal.
    pub roots: Vec<VertexId>,
    pub count: usize,
    pub order: FxHashMap<VertexId, usize>,
    pub parent: FxHashMap<VertexId, VertexId>,
    pub children: FxHashMap<VertexId, Vec<VertexId>>,
    pub visited: FxHashSet<VertexId>,
    pub on_path: FxHashSet<VertexId>,
    pub roles: Vec<Role>,
    pub back_edges: Vec<EdgeIx>,
    pub back_heads: FxHashMap<VertexId, Vec<VertexId>>,
    pub finished: VecDeque<VertexId>,
    pub ratings: FxHashMap<VertexId, usize>,
}

impl State {
    pub fn initialize(graph: &Graph) -> State {
        State {
            count: 1,
            roles: vec![Role::Unoriented; graph.edge_count()],
            ..State::default()
        }
    }

    pub fn is_visited(&self, v: VertexId) -> bool {
        self.visited.contains(&v)
    }

    pub fn is_root(&self, v: VertexId) -> bool {
        self.roots.contains(&v)
    }

    /// Assigns the next discovery number to `v` and hangs it below
    /// `parent` in the spanning tree.
    pub fn enter(&mut self, v: VertexId, parent: Option<VertexId>) -> usize {
        let order = self.count;
        self.order.insert(v, order);
        self.count += 1;
        self.on_path.insert(v);

        if let Some(p) = parent {
            self.parent.insert(v, p);
            self.children.entry(p).or_default().push(v);
        }
        order
    }

    pub fn finish(&mut self, v: VertexId) {
        self.on_path.remove(&v);
        self.visited.insert(v);
        self.finished.push_back(v);
    }

    pub fn orient_tree(&mut self, ix: EdgeIx, tail: VertexId, head: VertexId) {
        self.roles[ix] = Role::Tree { tail, head };
    }

    pub fn orient_back(&mut self, ix: EdgeIx, tail: VertexId, head: VertexId) {
        self.roles[ix] = Role::Back { tail, head };
        self.back_edges.push(ix);
        self.back_heads.entry(tail).or_default().push(head);
    }

    pub fn is_oriented(&self, ix: EdgeIx) -> bool {
        self.roles[ix].is_oriented()
    }

    /// True if `head` lies on the current exploration path above the
    /// tree parent of `v`. While `v` is being explored the path is
    /// exactly its ancestor chain.
    pub fn reenters_path(&self, v: VertexId, head: VertexId) -> bool {
        match self.parent.get(&v) {
            Some(&p) => p != head && self.on_path.contains(&head),
            None => false,
        }
    }

    pub fn children_of(&self, v: VertexId) -> &[VertexId] {
        self.children.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ancestors(&self, v: VertexId) -> AncestorIter<'_> {
        AncestorIter::new(self, v)
    }

    /// Memoized low-link rating of `v`. Unrated tree children are
    /// rated first, using an explicit stack. Vertices that were never
    /// reached have no rating.
    pub fn rating(&mut self, v: VertexId) -> Option<usize> {
        if let Some(&rating) = self.ratings.get(&v) {
            return Some(rating);
        }
        if !self.order.contains_key(&v) {
            return None;
        }

        let mut stack = vec![v];
        while let Some(&top) = stack.last() {
            if self.ratings.contains_key(&top) {
                stack.pop();
                continue;
            }

            let pending: Vec<VertexId> = self
                .children_of(top)
                .iter()
                .copied()
                .filter(|c| !self.ratings.contains_key(c))
                .collect();

            if pending.is_empty() {
                let rating = self.lowest_reachable(top);
                trace!("rating[{}] = {}", top, rating);
                self.ratings.insert(top, rating);
                stack.pop();
            } else {
                stack.extend(pending);
            }
        }

        self.ratings.get(&v).copied()
    }

    // Every back edge leaving `v` ends at a strict ancestor of `v`,
    // so the heads recorded for `v` are the ancestors it reaches.
    fn lowest_reachable(&self, v: VertexId) -> usize {
        let own = self.order[&v];

        let from_children = self
            .children_of(v)
            .iter()
            .filter_map(|c| self.ratings.get(c).copied());

        let from_ancestors = self
            .back_heads
            .get(&v)
            .into_iter()
            .flatten()
            .filter_map(|a| self.order.get(a).copied());

        iter::once(own)
            .chain(from_children)
            .chain(from_ancestors)
            .min()
            .unwrap_or(own)
    }
}

// Iterator over a vertex's ancestors, nearest first
pub struct AncestorIter<'a> {
    current: Option<VertexId>,
    parent: &'a FxHashMap<VertexId, VertexId>,
}

impl<'a> AncestorIter<'a> {
    fn new(state: &'a State, v: VertexId) -> AncestorIter<'a> {
        let parent = &state.parent;
        AncestorIter {
            current: parent.get(&v).copied(),
            parent,
        }
    }
}

impl<'a> Iterator for AncestorIter<'a> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        let ancestor = self.current?;
        self.current = self.parent.get(&ancestor).copied();
        Some(ancestor)
    }
}
