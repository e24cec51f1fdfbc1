/// Shared shortest-path machinery for the grid and platform planners.
///
/// A graph type plugs in by implementing [`SearchSpace`] (neighbor generator,
/// edge costs and heuristic). [`astar`] works on any space; [`dijkstra`]
/// needs dense `usize` nodes. All per-query state lives in a search context
/// owned by a single call.
///
/// Both run until the goal is settled or the frontier is empty. Edge costs
/// are non-negative, so A* only reopens a node on a strictly lower g-score
/// and always terminates.

use bevy::prelude::*;
use fixedbitset::FixedBitSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;
use crate::game::fixed_math::FixedNum;
use super::types::OpenSetKind;

/// Floor of the expansion count above which a search gets a warning.
const HIGH_ITERATION_WARNING: usize = 2_000;

/// Neighbor buffer filled by [`SearchSpace::neighbors`]: `(node, edge cost)`.
pub type Neighbors<N> = SmallVec<[(N, FixedNum); 32]>;

/// A graph the planners can search.
pub trait SearchSpace {
    type Node: Copy + Eq + Hash + Debug;

    /// Pushes every node reachable from `node` in one move, with its cost.
    fn neighbors(&self, node: Self::Node, out: &mut Neighbors<Self::Node>);

    /// Estimated remaining cost from `node` to `goal`.
    fn heuristic(&self, node: Self::Node, goal: Self::Node) -> FixedNum;

    /// Number of nodes in the space. Dense spaces number their nodes
    /// `0..node_count()`; A* uses it only to size its warning threshold.
    fn node_count(&self) -> usize;
}

// ============================================================================
// Open Set
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HeapEntry<N> {
    f: FixedNum,
    seq: u64,
    node: N,
}

impl<N: Eq> Ord for HeapEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on (f, seq).
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<N: Eq> PartialOrd for HeapEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum OpenSet<N> {
    Scan(Vec<N>),
    Heap { heap: BinaryHeap<HeapEntry<N>>, seq: u64 },
}

impl<N: Copy + Eq + Hash> OpenSet<N> {
    fn new(kind: OpenSetKind) -> Self {
        match kind {
            OpenSetKind::Scan => OpenSet::Scan(Vec::new()),
            OpenSetKind::Heap => OpenSet::Heap { heap: BinaryHeap::new(), seq: 0 },
        }
    }

    /// Queues `node` with score `f`. For `Scan` the caller guarantees the node
    /// is not already queued; its f-score is read from the map on each pop.
    fn push(&mut self, node: N, f: FixedNum) {
        match self {
            OpenSet::Scan(list) => list.push(node),
            OpenSet::Heap { heap, seq } => {
                heap.push(HeapEntry { f, seq: *seq, node });
                *seq += 1;
            }
        }
    }

    /// Removes and returns the queued node with the lowest f-score.
    fn pop_min(&mut self, f_score: &FxHashMap<N, FixedNum>, queued: &FxHashSet<N>) -> Option<N> {
        let score = |n: &N| f_score.get(n).copied().unwrap_or(FixedNum::MAX);
        match self {
            OpenSet::Scan(list) => {
                if list.is_empty() {
                    return None;
                }
                let mut best = 0;
                let mut best_f = score(&list[0]);
                for (i, node) in list.iter().enumerate().skip(1) {
                    let f = score(node);
                    if f < best_f {
                        best = i;
                        best_f = f;
                    }
                }
                Some(list.remove(best))
            }
            OpenSet::Heap { heap, .. } => {
                while let Some(entry) = heap.pop() {
                    // Stale: the node was improved (new entry) or already expanded.
                    if queued.contains(&entry.node) && score(&entry.node) == entry.f {
                        return Some(entry.node);
                    }
                }
                None
            }
        }
    }
}

// ============================================================================
// Search Context
// ============================================================================

/// Typed per-query search state. Created and dropped by one planner call.
struct SearchContext<N> {
    came_from: FxHashMap<N, N>,
    g_score: FxHashMap<N, FixedNum>,
    f_score: FxHashMap<N, FixedNum>,
    queued: FxHashSet<N>,
    open: OpenSet<N>,
    iterations: usize,
}

impl<N: Copy + Eq + Hash> SearchContext<N> {
    fn new(kind: OpenSetKind) -> Self {
        Self {
            came_from: FxHashMap::default(),
            g_score: FxHashMap::default(),
            f_score: FxHashMap::default(),
            queued: FxHashSet::default(),
            open: OpenSet::new(kind),
            iterations: 0,
        }
    }

    fn g(&self, node: N) -> FixedNum {
        self.g_score.get(&node).copied().unwrap_or(FixedNum::MAX)
    }

    fn open(&mut self, node: N, g: FixedNum, f: FixedNum) {
        self.g_score.insert(node, g);
        self.f_score.insert(node, f);
        match self.open {
            OpenSet::Scan(_) => {
                if self.queued.insert(node) {
                    self.open.push(node, f);
                }
            }
            OpenSet::Heap { .. } => {
                self.queued.insert(node);
                self.open.push(node, f);
            }
        }
    }

    fn pop(&mut self) -> Option<N> {
        let node = self.open.pop_min(&self.f_score, &self.queued)?;
        self.queued.remove(&node);
        Some(node)
    }

    /// Walks `came_from` back from `goal`; the result starts at the search start.
    fn reconstruct(&self, goal: N) -> Vec<N> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(prev) = self.came_from.get(&current) {
            current = *prev;
            path.push(current);
        }
        path.reverse();
        path
    }
}

/// Expansion count above which a finished search is reported. Reopened
/// nodes count again, so an inconsistent heuristic shows up here.
fn warning_threshold(node_count: usize) -> usize {
    node_count.saturating_mul(4).max(HIGH_ITERATION_WARNING)
}

// ============================================================================
// A*
// ============================================================================

/// A* from `start` to `goal`. Returns the node sequence including both ends,
/// or `None` when the goal is unreachable.
///
/// Nodes are reopened when a cheaper route to them is found, so the result is
/// optimal for admissible heuristics and a close approximation otherwise.
pub fn astar<S: SearchSpace>(space: &S, start: S::Node, goal: S::Node, kind: OpenSetKind) -> Option<Vec<S::Node>> {
    let mut ctx = SearchContext::new(kind);
    let threshold = warning_threshold(space.node_count());
    let mut neighbors = Neighbors::new();

    ctx.open(start, FixedNum::ZERO, space.heuristic(start, goal));

    while let Some(current) = ctx.pop() {
        ctx.iterations += 1;
        if current == goal {
            if ctx.iterations > threshold {
                warn!("[PATHFINDING] A* used {} iterations (high!)", ctx.iterations);
            }
            return Some(ctx.reconstruct(current));
        }

        let current_g = ctx.g(current);
        neighbors.clear();
        space.neighbors(current, &mut neighbors);

        for &(neighbor, cost) in &neighbors {
            let tentative_g = current_g.saturating_add(cost);
            if tentative_g < ctx.g(neighbor) {
                ctx.came_from.insert(neighbor, current);
                let f = tentative_g.saturating_add(space.heuristic(neighbor, goal));
                ctx.open(neighbor, tentative_g, f);
            }
        }
    }

    if ctx.iterations > threshold {
        warn!(
            "[PATHFINDING] A* exhausted {} iterations between {:?} and {:?} without a route",
            ctx.iterations, start, goal
        );
    }
    None
}

// ============================================================================
// Dijkstra
// ============================================================================

/// Dijkstra over a dense space whose nodes are `0..node_count()`.
///
/// Runs at most `node_count()` rounds; each round settles the unvisited node
/// with the smallest distance (lowest index on ties) and stops as soon as the
/// goal is selected. The heuristic is ignored.
pub fn dijkstra<S: SearchSpace<Node = usize>>(space: &S, start: usize, goal: usize) -> Option<Vec<usize>> {
    let n = space.node_count();
    if start >= n || goal >= n {
        return None;
    }

    let mut dist = vec![FixedNum::MAX; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut visited = FixedBitSet::with_capacity(n);
    let mut neighbors = Neighbors::new();
    dist[start] = FixedNum::ZERO;

    for _ in 0..n {
        let mut current = None;
        let mut min_dist = FixedNum::MAX;
        for i in 0..n {
            if !visited.contains(i) && dist[i] < min_dist {
                min_dist = dist[i];
                current = Some(i);
            }
        }

        let Some(current) = current else { break };
        if current == goal {
            break;
        }
        visited.insert(current);

        neighbors.clear();
        space.neighbors(current, &mut neighbors);
        for &(next, cost) in &neighbors {
            if next >= n || visited.contains(next) {
                continue;
            }
            let candidate = dist[current].saturating_add(cost);
            if candidate < dist[next] {
                dist[next] = candidate;
                previous[next] = Some(current);
            }
        }
    }

    if dist[goal] == FixedNum::MAX {
        return None;
    }

    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = previous[current] {
        current = prev;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Weighted directed graph on `0..n` with a zero heuristic.
    struct Adjacency {
        edges: Vec<Vec<(usize, u32)>>,
    }

    impl Adjacency {
        fn new(n: usize, edges: &[(usize, usize, u32)]) -> Self {
            let mut adj = vec![Vec::new(); n];
            for &(a, b, w) in edges {
                adj[a].push((b, w));
                adj[b].push((a, w));
            }
            Self { edges: adj }
        }
    }

    impl SearchSpace for Adjacency {
        type Node = usize;

        fn neighbors(&self, node: usize, out: &mut Neighbors<usize>) {
            for &(next, w) in &self.edges[node] {
                out.push((next, FixedNum::from_num(w)));
            }
        }

        fn heuristic(&self, _node: usize, _goal: usize) -> FixedNum {
            FixedNum::ZERO
        }

        fn node_count(&self) -> usize {
            self.edges.len()
        }
    }

    fn diamond() -> Adjacency {
        // 0 -1- 1 -1- 3 is cheaper than 0 -1- 2 -5- 3.
        Adjacency::new(5, &[(0, 1, 1), (1, 3, 1), (0, 2, 1), (2, 3, 5)])
    }

    #[test]
    fn astar_finds_cheapest_route_with_both_open_sets() {
        let graph = diamond();
        for kind in [OpenSetKind::Scan, OpenSetKind::Heap] {
            assert_eq!(astar(&graph, 0, 3, kind), Some(vec![0, 1, 3]));
        }
    }

    #[test]
    fn astar_start_equals_goal() {
        assert_eq!(astar(&diamond(), 2, 2, OpenSetKind::Scan), Some(vec![2]));
    }

    #[test]
    fn astar_unreachable_returns_none() {
        // Node 4 has no edges.
        assert_eq!(astar(&diamond(), 0, 4, OpenSetKind::Scan), None);
        assert_eq!(astar(&diamond(), 0, 4, OpenSetKind::Heap), None);
    }

    #[test]
    fn astar_reopens_improved_nodes() {
        // Direct 0-2 edge is expensive; the detour through 1 is cheaper.
        let graph = Adjacency::new(4, &[(0, 2, 10), (0, 1, 1), (1, 2, 1), (2, 3, 1)]);
        for kind in [OpenSetKind::Scan, OpenSetKind::Heap] {
            assert_eq!(astar(&graph, 0, 3, kind), Some(vec![0, 1, 2, 3]));
        }
    }

    #[test]
    fn scan_breaks_ties_by_queue_order() {
        // Two equal-cost routes 0-1-3 and 0-2-3; node 1 is queued first.
        let graph = Adjacency::new(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
        assert_eq!(astar(&graph, 0, 3, OpenSetKind::Scan), Some(vec![0, 1, 3]));
    }

    #[test]
    fn dijkstra_matches_astar_on_reachability_and_cost() {
        let graph = diamond();
        assert_eq!(dijkstra(&graph, 0, 3), Some(vec![0, 1, 3]));
        assert_eq!(dijkstra(&graph, 0, 4), None);
        assert_eq!(dijkstra(&graph, 3, 3), Some(vec![3]));
    }

    #[test]
    fn dijkstra_rejects_out_of_range_nodes() {
        assert_eq!(dijkstra(&diamond(), 0, 9), None);
        assert_eq!(dijkstra(&diamond(), 9, 0), None);
    }

    /// Long corridor with an inconsistent heuristic that also under-reports
    /// its size, so expansions far exceed `node_count()`.
    struct Corridor {
        len: usize,
    }

    impl SearchSpace for Corridor {
        type Node = usize;

        fn neighbors(&self, node: usize, out: &mut Neighbors<usize>) {
            if node > 0 {
                out.push((node - 1, FixedNum::ONE));
            }
            if node + 1 < self.len {
                out.push((node + 1, FixedNum::ONE));
            }
        }

        fn heuristic(&self, node: usize, _goal: usize) -> FixedNum {
            if node % 7 == 3 { FixedNum::from_num(40) } else { FixedNum::ZERO }
        }

        fn node_count(&self) -> usize {
            1
        }
    }

    #[test]
    fn astar_runs_to_the_goal_however_many_expansions_it_takes() {
        let corridor = Corridor { len: 3_000 };
        for kind in [OpenSetKind::Scan, OpenSetKind::Heap] {
            let path = astar(&corridor, 0, 2_999, kind).expect("corridor is connected");
            assert_eq!(path.len(), 3_000);
            assert!(path.windows(2).all(|w| w[1] == w[0] + 1));
        }
    }

    #[test]
    fn astar_exhausts_frontier_before_reporting_no_route() {
        // Goal outside the corridor: every node is expanded, then None.
        let corridor = Corridor { len: 2_500 };
        assert_eq!(astar(&corridor, 0, 5_000, OpenSetKind::Heap), None);
    }
}
