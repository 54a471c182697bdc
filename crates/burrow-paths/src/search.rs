use burrow_core::{Direction, GridNode, GridShape};

use crate::costs::{CostError, EdgeCosts};
use crate::traits::Terrain;
use crate::workspace::{NO_PARENT, SearchWorkspace, VisitState};

/// Single-source, single-target shortest-path search with directional
/// step costs.
///
/// The finder itself only holds the cost table; all per-search memory lives
/// in a caller-owned [`SearchWorkspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFinder {
    costs: EdgeCosts,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self {
            costs: EdgeCosts::default(),
        }
    }
}

impl PathFinder {
    /// Create a finder with the given cost table. Every cost must be
    /// positive.
    pub fn new(costs: EdgeCosts) -> Result<Self, CostError> {
        costs.validate()?;
        Ok(Self { costs })
    }

    #[inline]
    pub fn costs(&self) -> &EdgeCosts {
        &self.costs
    }

    /// Compute the cheapest route from `start` to `end`.
    ///
    /// The result runs from `end` back towards `start`, excluding `start`
    /// itself, so popping from the back yields nodes in travel order. It is
    /// empty when no route exists, when `start == end`, or when either
    /// endpoint is not passable.
    ///
    /// # Panics
    ///
    /// Panics if `ws` was built for a different shape than `terrain`.
    pub fn find_path<T: Terrain>(
        &self,
        ws: &mut SearchWorkspace,
        terrain: &T,
        start: GridNode,
        end: GridNode,
    ) -> Vec<GridNode> {
        let mut path = Vec::new();
        self.find_path_into(ws, terrain, start, end, &mut path);
        path
    }

    /// Like [`find_path`](Self::find_path), but writes the route into `out`
    /// (cleared first) and reports whether one was found.
    pub fn find_path_into<T: Terrain>(
        &self,
        ws: &mut SearchWorkspace,
        terrain: &T,
        start: GridNode,
        end: GridNode,
        out: &mut Vec<GridNode>,
    ) -> bool {
        out.clear();
        let shape = terrain.shape();
        assert_eq!(
            ws.shape, shape,
            "search workspace built for {} used on {} grid",
            ws.shape, shape
        );
        if start == end
            || !shape.contains_node(start)
            || !shape.contains_node(end)
            || !terrain.passable(start)
            || !terrain.passable(end)
        {
            return false;
        }

        if !self.search(ws, terrain, start, end) {
            return false;
        }

        // Walk predecessors back from the destination.
        out.reserve(ws.length[end.index()] as usize);
        let mut cur = end;
        while cur != start {
            out.push(cur);
            cur = ws.parent[cur.index()];
        }
        true
    }

    /// Run the search, leaving the result in `ws`. Returns whether `end`
    /// was reached.
    fn search<T: Terrain>(
        &self,
        ws: &mut SearchWorkspace,
        terrain: &T,
        start: GridNode,
        end: GridNode,
    ) -> bool {
        ws.reset();
        let shape = ws.shape;

        let si = start.index();
        ws.cost[si] = 0;
        ws.length[si] = 0;
        ws.parent[si] = NO_PARENT;
        ws.state[si] = VisitState::Seen;
        ws.frontier.push(start);

        let mut expanded = 0usize;
        let found = loop {
            // Linear scan for the cheapest frontier entry; the first one
            // found wins ties.
            let Some((slot, min_cost)) = cheapest(&ws.frontier, &ws.cost) else {
                break false;
            };

            // Every remaining route costs at least `min_cost`, so the
            // destination's cost can no longer improve.
            let ei = end.index();
            if ws.state[ei] == VisitState::Seen && ws.cost[ei] == min_cost {
                break true;
            }

            let current = ws.frontier.swap_remove(slot);
            ws.state[current.index()] = VisitState::Visited;
            expanded += 1;
            self.relax(ws, terrain, shape, current);
        };

        log::trace!(
            "path search {start} -> {end}: {} after expanding {expanded} nodes",
            if found { "found" } else { "no route" }
        );
        found
    }

    /// Update every passable neighbour of `current`.
    fn relax<T: Terrain>(
        &self,
        ws: &mut SearchWorkspace,
        terrain: &T,
        shape: GridShape,
        current: GridNode,
    ) {
        let ci = current.index();
        let base_cost = ws.cost[ci];
        let base_length = ws.length[ci];
        for dir in Direction::ALL {
            let Some(next) = shape.neighbor(current, dir) else {
                continue;
            };
            if !terrain.passable(next) {
                continue;
            }
            let ni = next.index();
            let tentative = base_cost + self.costs.cost(dir);
            match ws.state[ni] {
                VisitState::Unvisited => {
                    ws.state[ni] = VisitState::Seen;
                    ws.frontier.push(next);
                }
                VisitState::Seen if tentative < ws.cost[ni] => {}
                _ => continue,
            }
            ws.cost[ni] = tentative;
            ws.length[ni] = base_length + 1;
            ws.parent[ni] = current;
        }
    }

    /// Total cost of walking `path` (as returned by
    /// [`find_path`](Self::find_path)) starting from `start`.
    ///
    /// # Panics
    ///
    /// Panics if two consecutive nodes are not adjacent.
    pub fn path_cost(&self, shape: GridShape, start: GridNode, path: &[GridNode]) -> u32 {
        let mut total = 0;
        let mut prev = start;
        for &next in path.iter().rev() {
            let dir = shape
                .direction(prev, next)
                .unwrap_or_else(|| panic!("path step {prev} -> {next} is not a single move"));
            total += self.costs.cost(dir);
            prev = next;
        }
        total
    }
}

/// Position and cost of the cheapest node in `frontier`.
#[inline]
fn cheapest(frontier: &[GridNode], cost: &[u32]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (slot, node) in frontier.iter().enumerate() {
        let c = cost[node.index()];
        match best {
            Some((_, b)) if c >= b => {}
            _ => best = Some((slot, c)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;
    use std::collections::{BinaryHeap, VecDeque};

    use burrow_core::{Material, MaterialGrid, Point};
    use rand::prelude::*;
    use rand::rngs::StdRng;

    use super::*;
    use crate::manhattan;

    fn node(g: &MaterialGrid, x: i32, y: i32) -> GridNode {
        g.shape().node(Point::new(x, y)).unwrap()
    }

    fn open(w: u32, h: u32) -> MaterialGrid {
        MaterialGrid::filled(w, h, Material::Passable)
    }

    fn uniform() -> PathFinder {
        PathFinder::new(EdgeCosts::uniform(1)).unwrap()
    }

    /// Heap-based Dijkstra used as the reference answer.
    fn reference_cost(
        g: &MaterialGrid,
        costs: &EdgeCosts,
        start: GridNode,
        end: GridNode,
    ) -> Option<u32> {
        let shape = g.shape();
        let mut dist = vec![u32::MAX; shape.len()];
        let mut heap = BinaryHeap::new();
        dist[start.index()] = 0;
        heap.push(Reverse((0u32, start)));
        while let Some(Reverse((d, n))) = heap.pop() {
            if n == end {
                return Some(d);
            }
            if d > dist[n.index()] {
                continue;
            }
            for dir in Direction::ALL {
                let Some(m) = shape.neighbor(n, dir) else {
                    continue;
                };
                if !g.passable(m) {
                    continue;
                }
                let nd = d + costs.cost(dir);
                if nd < dist[m.index()] {
                    dist[m.index()] = nd;
                    heap.push(Reverse((nd, m)));
                }
            }
        }
        None
    }

    fn bfs_steps(g: &MaterialGrid, start: GridNode, end: GridNode) -> Option<u32> {
        let shape = g.shape();
        let mut seen = vec![u32::MAX; shape.len()];
        let mut queue = VecDeque::from([start]);
        seen[start.index()] = 0;
        while let Some(n) = queue.pop_front() {
            if n == end {
                return Some(seen[n.index()]);
            }
            for dir in Direction::ALL {
                if let Some(m) = shape.neighbor(n, dir) {
                    if g.passable(m) && seen[m.index()] == u32::MAX {
                        seen[m.index()] = seen[n.index()] + 1;
                        queue.push_back(m);
                    }
                }
            }
        }
        None
    }

    fn assert_well_formed(shape: GridShape, start: GridNode, end: GridNode, path: &[GridNode]) {
        assert_eq!(path.first(), Some(&end));
        assert!(!path.contains(&start));
        assert!(shape.is_adjacent(start, *path.last().unwrap()));
        for pair in path.windows(2) {
            assert!(shape.is_adjacent(pair[0], pair[1]), "{:?} not adjacent", pair);
        }
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let g = open(5, 5);
        let mut ws = SearchWorkspace::new(g.shape());
        let (s, e) = (node(&g, 0, 0), node(&g, 4, 4));
        let path = uniform().find_path(&mut ws, &g, s, e);
        assert_eq!(path.len(), 8);
        assert_eq!(path[0], e);
        assert_eq!(ws.cost(e), Some(8));
        assert_eq!(ws.path_length(e), Some(8));
        assert_well_formed(g.shape(), s, e, &path);
    }

    #[test]
    fn equal_cost_ties_go_to_first_found() {
        // Neighbours are pushed up, right, down, left and the scan keeps
        // the earliest cheapest entry, so equal routes bend right first.
        let g = open(3, 3);
        let mut ws = SearchWorkspace::new(g.shape());
        let f = uniform();
        let s = node(&g, 0, 0);

        let path = f.find_path(&mut ws, &g, s, node(&g, 1, 1));
        assert_eq!(path, vec![node(&g, 1, 1), node(&g, 1, 0)]);

        let path = f.find_path(&mut ws, &g, s, node(&g, 2, 2));
        assert_eq!(
            path,
            vec![node(&g, 2, 2), node(&g, 1, 2), node(&g, 1, 1), node(&g, 1, 0)]
        );
    }

    #[test]
    fn same_start_and_end_is_empty() {
        let g = open(4, 4);
        let mut ws = SearchWorkspace::new(g.shape());
        for n in g.shape().nodes() {
            assert!(uniform().find_path(&mut ws, &g, n, n).is_empty());
        }
    }

    #[test]
    fn impassable_endpoints_are_empty() {
        let mut g = open(4, 4);
        let solid = node(&g, 2, 2);
        g.set(solid, Material::Resource);
        let mut ws = SearchWorkspace::new(g.shape());
        let f = uniform();
        assert!(f.find_path(&mut ws, &g, solid, node(&g, 0, 0)).is_empty());
        assert!(f.find_path(&mut ws, &g, node(&g, 0, 0), solid).is_empty());
    }

    #[test]
    fn enclosed_destination_is_unreachable() {
        let g = MaterialGrid::parse(
            "\
.......
...#...
..#.#..
...#...
.......",
        )
        .unwrap();
        let mut ws = SearchWorkspace::new(g.shape());
        let end = node(&g, 3, 2);
        for start in g.shape().nodes().filter(|&n| g.passable(n) && n != end) {
            assert!(uniform().find_path(&mut ws, &g, start, end).is_empty());
        }
    }

    #[test]
    fn blocked_bottleneck_is_unreachable() {
        let mut g = MaterialGrid::parse(
            "\
..#..
..#..
.....
..#..
..#..",
        )
        .unwrap();
        let (s, e) = (node(&g, 0, 0), node(&g, 4, 4));
        let mut ws = SearchWorkspace::new(g.shape());
        assert_eq!(uniform().find_path(&mut ws, &g, s, e).len(), 8);

        g.set(node(&g, 2, 2), Material::Solid);
        assert!(uniform().find_path(&mut ws, &g, s, e).is_empty());
    }

    #[test]
    fn detour_around_wall() {
        let g = MaterialGrid::parse(
            "\
.....
.###.
.....",
        )
        .unwrap();
        let (s, e) = (node(&g, 2, 0), node(&g, 2, 2));
        let mut ws = SearchWorkspace::new(g.shape());
        let path = uniform().find_path(&mut ws, &g, s, e);
        assert_eq!(path.len(), 6);
        assert_well_formed(g.shape(), s, e, &path);
    }

    #[test]
    fn uniform_cost_matches_bfs_distance() {
        let g = open(9, 6);
        let mut ws = SearchWorkspace::new(g.shape());
        let s = node(&g, 1, 4);
        for e in g.shape().nodes().filter(|&n| n != s) {
            let path = uniform().find_path(&mut ws, &g, s, e);
            let expected = manhattan(g.shape().point(s), g.shape().point(e));
            assert_eq!(path.len() as u32, expected);
            assert_eq!(Some(expected), bfs_steps(&g, s, e));
        }
    }

    #[test]
    fn falling_is_cheaper_than_climbing() {
        let g = MaterialGrid::parse(
            "\
#.#
#.#
#.#",
        )
        .unwrap();
        let costs = EdgeCosts::default();
        let f = PathFinder::new(costs).unwrap();
        let (top, bottom) = (node(&g, 1, 0), node(&g, 1, 2));
        let mut ws = SearchWorkspace::new(g.shape());

        let down = f.find_path(&mut ws, &g, top, bottom);
        let down_cost = ws.cost(bottom).unwrap();
        assert_eq!(down_cost, 2 * costs.down);
        assert_eq!(f.path_cost(g.shape(), top, &down), down_cost);

        let up = f.find_path(&mut ws, &g, bottom, top);
        let up_cost = ws.cost(top).unwrap();
        assert_eq!(up_cost, 2 * costs.up);
        assert_eq!(up.len(), down.len());
        assert!(down_cost < up_cost);
    }

    #[test]
    fn directional_costs_shape_the_route() {
        // Both routes climb two rows; the right-hand detour adds four
        // sideways steps on top.
        let g = MaterialGrid::parse(
            "\
...
.#.
...",
        )
        .unwrap();
        let f = PathFinder::new(EdgeCosts {
            horizontal: 1,
            up: 10,
            down: 1,
        })
        .unwrap();
        let (s, e) = (node(&g, 0, 2), node(&g, 0, 0));
        let mut ws = SearchWorkspace::new(g.shape());
        let path = f.find_path(&mut ws, &g, s, e);
        assert_eq!(path, vec![node(&g, 0, 0), node(&g, 0, 1)]);
        assert_eq!(ws.cost(e), Some(20));
    }

    #[test]
    fn monotone_route_cost_on_open_grid() {
        let g = open(3, 3);
        let costs = EdgeCosts {
            horizontal: 5,
            up: 9,
            down: 1,
        };
        let f = PathFinder::new(costs).unwrap();
        let (s, e) = (node(&g, 0, 0), node(&g, 2, 2));
        let mut ws = SearchWorkspace::new(g.shape());
        let path = f.find_path(&mut ws, &g, s, e);
        assert_eq!(ws.cost(e), Some(2 * 5 + 2 * 1));
        assert_eq!(f.path_cost(g.shape(), s, &path), 12);
    }

    #[test]
    fn popping_from_back_yields_travel_order() {
        let g = open(4, 1);
        let (s, e) = (node(&g, 0, 0), node(&g, 3, 0));
        let mut ws = SearchWorkspace::new(g.shape());
        let mut path = uniform().find_path(&mut ws, &g, s, e);
        let mut walked = Vec::new();
        while let Some(n) = path.pop() {
            walked.push(g.shape().point(n).x);
        }
        assert_eq!(walked, vec![1, 2, 3]);
    }

    #[test]
    fn find_path_into_reuses_buffer() {
        let g = open(6, 6);
        let mut ws = SearchWorkspace::new(g.shape());
        let mut out = Vec::with_capacity(32);
        let f = uniform();
        assert!(f.find_path_into(&mut ws, &g, node(&g, 0, 0), node(&g, 5, 5), &mut out));
        assert_eq!(out.len(), 10);
        let cap = out.capacity();
        assert!(f.find_path_into(&mut ws, &g, node(&g, 5, 5), node(&g, 4, 5), &mut out));
        assert_eq!(out, vec![node(&g, 4, 5)]);
        assert_eq!(out.capacity(), cap);
        assert!(!f.find_path_into(&mut ws, &g, node(&g, 1, 1), node(&g, 1, 1), &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn workspace_is_reusable_after_grid_edit() {
        let mut g = open(5, 1);
        let mut ws = SearchWorkspace::new(g.shape());
        let (s, e) = (node(&g, 0, 0), node(&g, 4, 0));
        assert_eq!(uniform().find_path(&mut ws, &g, s, e).len(), 4);
        g.set(node(&g, 2, 0), Material::Liquid);
        assert!(uniform().find_path(&mut ws, &g, s, e).is_empty());
        g.set(node(&g, 2, 0), Material::Passable);
        assert_eq!(uniform().find_path(&mut ws, &g, s, e).len(), 4);
    }

    #[test]
    #[should_panic(expected = "search workspace built for")]
    fn mismatched_workspace_panics() {
        let g = open(4, 4);
        let mut ws = SearchWorkspace::new(GridShape::new(3, 4));
        uniform().find_path(&mut ws, &g, node(&g, 0, 0), node(&g, 3, 3));
    }

    #[test]
    fn early_exit_leaves_destination_seen() {
        let g = open(6, 1);
        let (s, e) = (node(&g, 0, 0), node(&g, 5, 0));
        let mut ws = SearchWorkspace::new(g.shape());
        uniform().find_path(&mut ws, &g, s, e);
        assert_eq!(ws.visit_state(e), VisitState::Seen);
        assert_eq!(ws.visit_state(s), VisitState::Visited);
        assert_eq!(ws.predecessor(s), None);
    }

    #[test]
    fn zero_costs_are_rejected() {
        assert!(PathFinder::new(EdgeCosts::uniform(0)).is_err());
    }

    #[test]
    fn matches_reference_dijkstra_on_random_caves() {
        let mut rng = StdRng::seed_from_u64(7);
        let profiles = [
            EdgeCosts::default(),
            EdgeCosts::uniform(1),
            EdgeCosts {
                horizontal: 3,
                up: 11,
                down: 1,
            },
            EdgeCosts {
                horizontal: 7,
                up: 2,
                down: 5,
            },
        ];
        for round in 0..40 {
            let (w, h) = (rng.random_range(3..16u32), rng.random_range(3..16u32));
            let mut g = MaterialGrid::new(w, h);
            for n in g.shape().nodes() {
                if rng.random_range(0..100) < 68 {
                    g.set(n, Material::Passable);
                }
            }
            let costs = profiles[round % profiles.len()];
            let f = PathFinder::new(costs).unwrap();
            let mut ws = SearchWorkspace::new(g.shape());
            let passable: Vec<_> = g.shape().nodes().filter(|&n| g.passable(n)).collect();
            if passable.len() < 2 {
                continue;
            }
            for _ in 0..20 {
                let s = passable[rng.random_range(0..passable.len())];
                let e = passable[rng.random_range(0..passable.len())];
                let path = f.find_path(&mut ws, &g, s, e);
                let expected = if s == e { None } else { reference_cost(&g, &costs, s, e) };
                match expected {
                    None => assert!(path.is_empty()),
                    Some(cost) => {
                        assert_well_formed(g.shape(), s, e, &path);
                        assert_eq!(f.path_cost(g.shape(), s, &path), cost);
                        assert_eq!(ws.cost(e), Some(cost));
                        assert!(path.iter().all(|&n| g.passable(n)));
                    }
                }
            }
        }
    }
}
