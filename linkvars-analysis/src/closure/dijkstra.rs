//! Single-source Dijkstra carrying a path state along each shortest path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::level::{DelayCauses, LinkLevel};
use crate::links::Composition;

/// What a pass remembers about the best path(s) to a node.
pub(crate) trait PathState: Clone {
    /// Extend a path by one edge; `None` when the edge cannot follow the path.
    fn extend(&self, edge: &LinkLevel) -> Option<Self>;

    /// Combine two alternative paths of equal length.
    fn merge_alternative(&self, other: &Self) -> Self;
}

/// Low pass: only the delay causes met along the way.
impl PathState for DelayCauses {
    fn extend(&self, edge: &LinkLevel) -> Option<Self> {
        match edge {
            LinkLevel::Delayed(causes) => Some(self.merge(causes)),
            _ => Some(self.clone()),
        }
    }

    fn merge_alternative(&self, other: &Self) -> Self {
        self.merge(other)
    }
}

/// High pass: the composed level of the path.
impl PathState for LinkLevel {
    fn extend(&self, edge: &LinkLevel) -> Option<Self> {
        use LinkLevel::*;
        match (self, edge) {
            (Delayed(a), Delayed(b)) => Some(Delayed(a.merge(b))),
            (Delayed(_), _) => Some(self.clone()),
            (_, Delayed(_)) => Some(edge.clone()),
            (Independent, _) | (_, Independent) => None,
            // A path is only as strong as its weakest assignment.
            (StaticallyAssigned | Assigned, StaticallyAssigned | Assigned) => Some(self.max(edge)),
            (StaticallyAssigned | Assigned, _) => Some(edge.clone()),
            (_, StaticallyAssigned | Assigned) => Some(self.clone()),
            (Dependent(path), Dependent(next)) => compose(path, next).map(Dependent),
            (Dependent(path) | CommonHc(path), Dependent(next) | CommonHc(next)) => {
                compose(path, next).filter(|l| !l.is_empty()).map(CommonHc)
            }
        }
    }

    fn merge_alternative(&self, other: &Self) -> Self {
        self.min(other)
    }
}

fn compose(path: &crate::links::LinkMap, next: &crate::links::LinkMap) -> Option<crate::links::LinkMap> {
    match path.next(next) {
        Composition::Rejected => None,
        composition => composition.into_links(),
    }
}

/// Best distance and state per node; `None` when unreachable.
pub(crate) type Distances<S> = Vec<Option<(u64, S)>>;

/// Run Dijkstra from `start` over edges whose weight is at most `max_weight`.
///
/// Alternatives of equal length are merged until their target is settled.
/// `on_reject` sees every edge whose composition with its path was refused.
pub(crate) fn shortest_paths<S: PathState>(
    graph: &DiGraph<(), LinkLevel, u32>,
    start: usize,
    initial: S,
    weight: impl Fn(&LinkLevel) -> u64,
    max_weight: u64,
    mut on_reject: impl FnMut(usize, usize),
) -> Distances<S> {
    let n = graph.node_count();
    let mut best: Distances<S> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    best[start] = Some((0, initial));
    heap.push(DijkstraState { cost: 0, node: start });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        if settled[node] {
            continue;
        }
        let state = match &best[node] {
            Some((d, s)) if *d == cost => s.clone(),
            _ => continue,
        };
        settled[node] = true;

        for edge in graph.edges(NodeIndex::new(node)) {
            let w = weight(edge.weight());
            if w > max_weight {
                continue;
            }
            let next = edge.target().index();
            if settled[next] {
                continue;
            }
            let Some(extended) = state.extend(edge.weight()) else {
                on_reject(node, next);
                continue;
            };
            let next_cost = cost.saturating_add(w);
            match &mut best[next] {
                Some((d, s)) if next_cost == *d => *s = s.merge_alternative(&extended),
                Some((d, _)) if next_cost > *d => {}
                slot => {
                    *slot = Some((next_cost, extended));
                    heap.push(DijkstraState { cost: next_cost, node: next });
                }
            }
        }
    }

    best
}

/// State for Dijkstra's priority queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DijkstraState {
    cost: u64,
    node: usize,
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}
