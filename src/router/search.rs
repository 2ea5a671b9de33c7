use log::trace;

use crate::router::geom::{Direction, NodeCoordinate};
use crate::router::grid::Grid;

/// Cheapest path from `start` to `goal` over the available grid edges, as
/// the ordered list of node coordinates. Empty when `goal` cannot be
/// reached.
///
/// Equal-cost frontier nodes are expanded in (column, row) order and a
/// relaxation only wins on a strictly lower cost, so the result is fully
/// determined by the grid.
pub fn shortest_path(grid: &mut Grid, start: NodeCoordinate, goal: NodeCoordinate) -> Vec<NodeCoordinate> {
    if !grid.contains(start) || !grid.contains(goal) {
        return Vec::new();
    }

    grid.node_mut(start).cost = 0.0;
    grid.mark_frontier(start);

    while let Some(current) = grid.cheapest_frontier_node() {
        if current.coordinate == goal {
            return reconstruct_path(grid, start, goal);
        }
        trace!(
            "expanding ({}, {}) at cost {}",
            current.coordinate.column,
            current.coordinate.row,
            current.cost
        );
        grid.finalize(current.coordinate);

        for dir in Direction::ALL {
            let Some((next, available)) = grid.neighbor(current.coordinate, dir) else {
                continue;
            };
            if !available {
                continue;
            }
            let cost = current.cost + grid.edge_cost(current.coordinate, dir);
            relax(grid, current.coordinate, next, cost);
        }
    }

    Vec::new()
}

fn relax(grid: &mut Grid, from: NodeCoordinate, to: NodeCoordinate, cost: f64) {
    if !grid.is_pending(to) || cost >= grid.node(to).cost {
        return;
    }
    grid.unmark_frontier(to);
    let node = grid.node_mut(to);
    node.cost = cost;
    node.predecessor = Some(from);
    grid.mark_frontier(to);
}

fn reconstruct_path(grid: &Grid, start: NodeCoordinate, goal: NodeCoordinate) -> Vec<NodeCoordinate> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match grid.node(current).predecessor {
            Some(prev) => {
                current = prev;
                path.push(current);
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
