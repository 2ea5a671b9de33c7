use continuous_lines::router::geom::{Direction, NodeCoordinate};
use continuous_lines::router::grid::Grid;
use continuous_lines::router::grid_builder::{build_grid, EdgeMatrix};
use continuous_lines::router::search::shortest_path;
use continuous_lines::{PathRouter, Point};

/// Small deterministic generator so the request sequences are repeatable.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn point(&mut self, extent: u64) -> Point {
        Point::new((self.next() % extent) as f64, (self.next() % extent) as f64)
    }
}

fn length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].x - pair[0].x).abs() + (pair[1].y - pair[0].y).abs())
        .sum()
}

type Segment = (Point, Point);

fn segments(points: &[Point]) -> Vec<Segment> {
    points.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

fn strictly_crosses(a: Segment, b: Segment) -> bool {
    let (horizontal, vertical) = if a.0.y == a.1.y && b.0.x == b.1.x {
        (a, b)
    } else if b.0.y == b.1.y && a.0.x == a.1.x {
        (b, a)
    } else {
        return false;
    };
    let inside = |value: f64, p: f64, q: f64| value > p.min(q) && value < p.max(q);
    inside(vertical.0.x, horizontal.0.x, horizontal.1.x)
        && inside(horizontal.0.y, vertical.0.y, vertical.1.y)
}

/// Cheapest cost from start to end on the request grid, by repeated
/// relaxation of every edge until nothing changes.
fn relaxation_cost(router: &PathRouter, start: Point, end: Point) -> Option<f64> {
    let plan = build_grid(router.coordinates(), router.edges(), start, end).ok()?;
    let grid = &plan.grid;
    let (columns, rows) = (grid.columns(), grid.rows());
    let mut cost = vec![f64::INFINITY; columns * rows];
    let at = |coord: NodeCoordinate| coord.column * rows + coord.row;
    cost[at(plan.start())] = 0.0;

    loop {
        let mut changed = false;
        for column in 0..columns {
            for row in 0..rows {
                let coord = NodeCoordinate::new(column, row);
                if cost[at(coord)].is_infinite() {
                    continue;
                }
                for dir in Direction::ALL {
                    if let Some((next, true)) = grid.neighbor(coord, dir) {
                        let candidate = cost[at(coord)] + grid.edge_cost(coord, dir);
                        if candidate < cost[at(next)] - 1e-9 {
                            cost[at(next)] = candidate;
                            changed = true;
                        }
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    let goal = cost[at(plan.end())];
    goal.is_finite().then_some(goal)
}

/// Moves out of `(column, row)` read straight off the availability
/// matrices, with their lengths.
fn moves(
    horizontal: &EdgeMatrix,
    horizontal_costs: &[f64],
    vertical: &EdgeMatrix,
    vertical_costs: &[f64],
    (column, row): (usize, usize),
) -> Vec<((usize, usize), f64)> {
    let mut out = Vec::new();
    if column < horizontal_costs.len() && horizontal.is_available(column, row) {
        out.push(((column + 1, row), horizontal_costs[column]));
    }
    if column > 0 && horizontal.is_available(column - 1, row) {
        out.push(((column - 1, row), horizontal_costs[column - 1]));
    }
    if row < vertical_costs.len() && vertical.is_available(row, column) {
        out.push(((column, row + 1), vertical_costs[row]));
    }
    if row > 0 && vertical.is_available(row - 1, column) {
        out.push(((column, row - 1), vertical_costs[row - 1]));
    }
    out
}

/// Cheapest cost over every loop-free path from `from` to `goal`.
fn cheapest_simple_path(
    matrices: (&EdgeMatrix, &[f64], &EdgeMatrix, &[f64]),
    from: (usize, usize),
    goal: (usize, usize),
    visited: &mut Vec<(usize, usize)>,
) -> Option<f64> {
    if from == goal {
        return Some(0.0);
    }
    visited.push(from);
    let (horizontal, horizontal_costs, vertical, vertical_costs) = matrices;
    let mut best: Option<f64> = None;
    for (next, cost) in moves(horizontal, horizontal_costs, vertical, vertical_costs, from) {
        if visited.contains(&next) {
            continue;
        }
        if let Some(rest) = cheapest_simple_path(matrices, next, goal, visited) {
            let total = cost + rest;
            if best.map_or(true, |current| total < current) {
                best = Some(total);
            }
        }
    }
    visited.pop();
    best
}

#[test]
fn search_matches_exhaustive_enumeration() {
    let horizontal_costs = vec![1.5, 4.0];
    let vertical_costs = vec![2.0, 0.5, 3.0];
    let (columns, rows) = (horizontal_costs.len() + 1, vertical_costs.len() + 1);

    for seed in 1..=40u64 {
        let mut rng = Lcg(seed);
        let mut horizontal = EdgeMatrix::all_available(columns - 1, rows);
        let mut vertical = EdgeMatrix::all_available(rows - 1, columns);
        for edge in 0..columns - 1 {
            for lane in 0..rows {
                if rng.next() % 3 == 0 {
                    horizontal.block(edge, lane);
                }
            }
        }
        for edge in 0..rows - 1 {
            for lane in 0..columns {
                if rng.next() % 3 == 0 {
                    vertical.block(edge, lane);
                }
            }
        }
        let start = ((rng.next() % columns as u64) as usize, (rng.next() % rows as u64) as usize);
        let goal = ((rng.next() % columns as u64) as usize, (rng.next() % rows as u64) as usize);

        let matrices = (&horizontal, &horizontal_costs[..], &vertical, &vertical_costs[..]);
        let expected = cheapest_simple_path(matrices, start, goal, &mut Vec::new());

        let mut grid = Grid::new(
            horizontal.clone(),
            horizontal_costs.clone(),
            vertical.clone(),
            vertical_costs.clone(),
        );
        let path = shortest_path(
            &mut grid,
            NodeCoordinate::new(start.0, start.1),
            NodeCoordinate::new(goal.0, goal.1),
        );

        let Some(expected) = expected else {
            assert!(path.is_empty(), "seed {seed}: {:?} should be unreachable", goal);
            continue;
        };
        assert_eq!(path.first(), Some(&NodeCoordinate::new(start.0, start.1)), "seed {seed}");
        assert_eq!(path.last(), Some(&NodeCoordinate::new(goal.0, goal.1)), "seed {seed}");

        let mut total = 0.0;
        for pair in path.windows(2) {
            let from = (pair[0].column, pair[0].row);
            let to = (pair[1].column, pair[1].row);
            let step = moves(&horizontal, &horizontal_costs, &vertical, &vertical_costs, from)
                .into_iter()
                .find(|(next, _)| *next == to);
            let Some((_, cost)) = step else {
                panic!("seed {seed}: {:?} -> {:?} is not an open edge", from, to);
            };
            total += cost;
        }
        assert!(
            (total - expected).abs() < 1e-9,
            "seed {seed}: search cost {} vs enumerated {}",
            total,
            expected
        );
    }
}

#[test]
fn worked_scenario() {
    let mut router = PathRouter::new(10.0, 10.0).unwrap();
    let path = router
        .resolve_next_path(Point::new(2.0, 2.0), Point::new(8.0, 8.0))
        .unwrap();
    assert_eq!(
        path,
        vec![
            Point::new(2.0, 2.0),
            Point::new(2.0, 8.0),
            Point::new(8.0, 8.0),
        ]
    );
    assert_eq!(router.coordinates().x_values(), vec![0.0, 2.0, 8.0, 10.0]);
    assert_eq!(router.coordinates().y_values(), vec![0.0, 2.0, 8.0, 10.0]);
}

#[test]
fn random_sessions_hold_every_property() {
    for seed in 1..=12u64 {
        let mut rng = Lcg(seed);
        let mut router = PathRouter::new(100.0, 100.0).unwrap();
        let mut committed: Vec<Segment> = Vec::new();

        for _ in 0..8 {
            let start = rng.point(100);
            let end = rng.point(100);
            if start == end {
                continue;
            }

            let sizes_before = (router.coordinates().sizes(), router.edges().sizes());
            let expected = relaxation_cost(&router, start, end);

            let mut twin = router.clone();
            let path = router.resolve_next_path(start, end).unwrap();
            assert_eq!(twin.resolve_next_path(start, end).unwrap(), path, "seed {seed}");

            match expected {
                None => {
                    assert!(path.is_empty(), "seed {seed}: expected no route");
                    assert_eq!(
                        (router.coordinates().sizes(), router.edges().sizes()),
                        sizes_before
                    );
                    continue;
                }
                Some(cost) => {
                    assert!(
                        (length(&path) - cost).abs() < 1e-6,
                        "seed {seed}: length {} vs optimum {}",
                        length(&path),
                        cost
                    );
                }
            }

            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            for pair in path.windows(2) {
                let same_x = pair[0].x == pair[1].x;
                let same_y = pair[0].y == pair[1].y;
                assert!(same_x != same_y, "seed {seed}: {} -> {}", pair[0], pair[1]);
            }

            let fresh = segments(&path);
            for new in &fresh {
                for old in &committed {
                    assert!(
                        !strictly_crosses(*new, *old),
                        "seed {seed}: {:?} crosses {:?}",
                        new,
                        old
                    );
                }
            }
            committed.extend(fresh);

            let (coords_after, edges_after) = (router.coordinates().sizes(), router.edges().sizes());
            let (coords_before, edges_before) = sizes_before;
            assert!(coords_after.0 >= coords_before.0 && coords_after.1 >= coords_before.1);
            assert!(edges_after.0 >= edges_before.0 && edges_after.1 >= edges_before.1);
        }
    }
}

#[test]
fn identical_state_gives_identical_paths() {
    let requests = [
        (Point::new(10.0, 10.0), Point::new(80.0, 70.0)),
        (Point::new(50.0, 5.0), Point::new(50.0, 95.0)),
        (Point::new(5.0, 50.0), Point::new(95.0, 40.0)),
    ];
    let mut first = PathRouter::new(100.0, 100.0).unwrap();
    let mut second = PathRouter::new(100.0, 100.0).unwrap();
    for (start, end) in requests {
        assert_eq!(
            first.resolve_next_path(start, end).unwrap(),
            second.resolve_next_path(start, end).unwrap()
        );
    }
}
