use std::collections::BTreeSet;
use std::collections::VecDeque;

use log::{debug, info, trace};

use crate::config::{Config, RootRule};
use crate::error::{Error, Result};
use crate::graph::{EdgeIx, Graph, VertexId};
use crate::report::Analysis;
use crate::state::State;

#[derive(Debug)]
enum Inst {
    Enter(VertexId, Option<VertexId>),
    Explore(VertexId, EdgeIx),
    Finish(VertexId),
}

type InstStack = VecDeque<Inst>;

/// Unoriented edges touching `v`, by ascending endpoint sum. Ties keep
/// insertion order.
fn candidate_edges(graph: &Graph, state: &State, v: VertexId) -> Vec<EdgeIx> {
    let mut edges: Vec<EdgeIx> = graph
        .incident(v)
        .iter()
        .copied()
        .filter(|&ix| !state.is_oriented(ix))
        .collect();
    edges.sort_by_key(|&ix| graph.edge(ix).weight());
    edges
}

fn run_inst(
    inst: Inst,
    stack: &mut InstStack,
    state: &mut State,
    graph: &Graph,
) {
    match inst {
        Inst::Enter(v, parent) => {
            if state.is_visited(v) {
                return;
            }
            let order = state.enter(v, parent);
            trace!("point {} (order {})", v, order);

            stack.push_front(Inst::Finish(v));
            candidate_edges(graph, state, v)
                .into_iter()
                .rev()
                .for_each(|ix| stack.push_front(Inst::Explore(v, ix)));
        }
        Inst::Explore(v, ix) => {
            // oriented from the other end while a sibling was explored
            if state.is_oriented(ix) {
                return;
            }
            let head = match graph.edge(ix).other(v) {
                Some(head) => head,
                None => return,
            };

            if state.reenters_path(v, head) {
                debug!("back edge {} -> {}", v, head);
                state.orient_back(ix, v, head);
            } else {
                trace!("collapsing edge {} -> {}", v, head);
                state.orient_tree(ix, v, head);
                stack.push_front(Inst::Enter(head, Some(v)));
            }
        }
        Inst::Finish(v) => {
            state.finish(v);
        }
    }
}

/// Depth-first orientation from `root`: assigns discovery order,
/// builds the spanning tree, classifies back edges and fills the
/// finalization queue. Does nothing if `root` was already visited;
/// an unvisited vertex in another component starts a new traversal
/// with its own root.
pub fn orient(graph: &Graph, state: &mut State, root: VertexId) {
    if state.is_visited(root) {
        return;
    }
    state.roots.push(root);

    let mut stack: InstStack = VecDeque::new();
    stack.push_front(Inst::Enter(root, None));
    while let Some(inst) = stack.pop_front() {
        run_inst(inst, &mut stack, state, graph);
    }
}

/// Recursive orientation that checks each candidate edge against the
/// ancestor chain above the tree parent, one link at a time. Produces
/// the same result as [`orient`] but recursion depth grows with the
/// depth of the spanning tree.
pub fn orient_recursive(graph: &Graph, state: &mut State, root: VertexId) {
    if state.is_visited(root) {
        return;
    }
    state.roots.push(root);
    collapse(graph, state, root, None);
}

fn collapse(
    graph: &Graph,
    state: &mut State,
    v: VertexId,
    parent: Option<VertexId>,
) {
    if state.is_visited(v) {
        return;
    }
    let order = state.enter(v, parent);
    trace!("point {} (order {})", v, order);

    for ix in candidate_edges(graph, state, v) {
        if state.is_oriented(ix) {
            continue;
        }
        let head = match graph.edge(ix).other(v) {
            Some(head) => head,
            None => continue,
        };

        let misbehaving = match parent {
            Some(p) => state.ancestors(p).any(|a| a == head),
            None => false,
        };

        if misbehaving {
            debug!("back edge {} -> {}", v, head);
            state.orient_back(ix, v, head);
        } else {
            trace!("collapsing edge {} -> {}", v, head);
            state.orient_tree(ix, v, head);
            collapse(graph, state, head, Some(v));
        }
    }

    state.finish(v);
}

/// Drains the finalization queue, rating each vertex, until every one
/// of `vertex_count` vertices is rated or the queue runs dry. The
/// latter happens when the root does not reach the whole graph.
pub fn rate_all(state: &mut State, vertex_count: usize) {
    let mut queue = std::mem::take(&mut state.finished);

    while state.ratings.len() < vertex_count {
        match queue.pop_front() {
            Some(v) => {
                state.rating(v);
            }
            None => {
                debug!(
                    "finalization queue exhausted, {} of {} vertices rated",
                    state.ratings.len(),
                    vertex_count
                );
                break;
            }
        }
    }
}

/// Reports every non-root tree parent `par` with a child `v` such that
/// `rating[v] >= order[par]`. Under [`RootRule::Classic`] each traversal
/// root is added when it has at least two tree children.
pub fn find_joints(
    graph: &Graph,
    state: &State,
    root_rule: RootRule,
) -> BTreeSet<VertexId> {
    let mut joints = BTreeSet::new();

    for v in graph.vertices() {
        let par = match state.parent.get(&v) {
            Some(&par) => par,
            None => continue,
        };
        if state.is_root(par) || joints.contains(&par) {
            continue;
        }

        match (state.ratings.get(&v), state.order.get(&par)) {
            (Some(&rating), Some(&order)) if rating >= order => {
                debug!("joint {} (child {}: {} >= {})", par, v, rating, order);
                joints.insert(par);
            }
            _ => (),
        }
    }

    if root_rule == RootRule::Classic {
        for &root in state.roots.iter() {
            if state.children_of(root).len() >= 2 {
                debug!("joint {} (root with several subtrees)", root);
                joints.insert(root);
            }
        }
    }

    joints
}

fn pick_root(graph: &Graph, config: &Config) -> Result<VertexId> {
    match config.root {
        Some(root) if graph.contains_vertex(root) => Ok(root),
        Some(root) => Err(Error::UnknownRoot(root)),
        None => graph.lowest_vertex().ok_or(Error::EmptyGraph),
    }
}

/// Runs the whole analysis: orientation, ratings and joint detection.
pub fn analyze(graph: &Graph, config: &Config) -> Result<Analysis> {
    let root = pick_root(graph, config)?;
    info!(
        "analyzing {} vertices and {} edges from root {}",
        graph.vertex_count(),
        graph.edge_count(),
        root
    );

    let mut state = State::initialize(graph);
    orient(graph, &mut state, root);
    rate_all(&mut state, graph.vertex_count());
    let joints = find_joints(graph, &state, config.root_rule);

    info!(
        "{} back edges, {} joints",
        state.back_edges.len(),
        joints.len()
    );

    Ok(Analysis::collect(graph, &state, root, joints))
}
