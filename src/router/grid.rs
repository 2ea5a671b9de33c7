use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use crate::router::geom::{Direction, NodeCoordinate};
use crate::router::grid_builder::EdgeMatrix;

/// Search label of one grid node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub coordinate: NodeCoordinate,
    pub cost: f64,
    pub predecessor: Option<NodeCoordinate>,
}

impl Node {
    fn new(coordinate: NodeCoordinate) -> Node {
        Node {
            coordinate,
            cost: f64::INFINITY,
            predecessor: None,
        }
    }

    fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            cost: OrderedFloat(self.cost),
            column: self.coordinate.column,
            row: self.coordinate.row,
        }
    }
}

// Field order is the frontier order: cheapest first, then by column, then row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    cost: OrderedFloat<f64>,
    column: usize,
    row: usize,
}

/// Node array and search bookkeeping for a single request.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: usize,
    rows: usize,
    nodes: Vec<Node>,
    horizontal: EdgeMatrix,
    horizontal_costs: Vec<f64>,
    vertical: EdgeMatrix,
    vertical_costs: Vec<f64>,
    frontier: BTreeSet<FrontierKey>,
    pending: Vec<bool>,
}

impl Grid {
    /// `horizontal` is indexed by (column gap, row), `vertical` by
    /// (row gap, column). The grid has one more column than there are
    /// horizontal costs and one more row than there are vertical costs.
    pub fn new(
        horizontal: EdgeMatrix,
        horizontal_costs: Vec<f64>,
        vertical: EdgeMatrix,
        vertical_costs: Vec<f64>,
    ) -> Grid {
        let columns = horizontal_costs.len() + 1;
        let rows = vertical_costs.len() + 1;

        let mut nodes = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                nodes.push(Node::new(NodeCoordinate::new(column, row)));
            }
        }

        Grid {
            columns,
            rows,
            nodes,
            horizontal,
            horizontal_costs,
            vertical,
            vertical_costs,
            frontier: BTreeSet::new(),
            pending: vec![true; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, coord: NodeCoordinate) -> bool {
        coord.column < self.columns && coord.row < self.rows
    }

    fn index(&self, coord: NodeCoordinate) -> usize {
        coord.column * self.rows + coord.row
    }

    pub fn node(&self, coord: NodeCoordinate) -> &Node {
        &self.nodes[self.index(coord)]
    }

    pub fn node_mut(&mut self, coord: NodeCoordinate) -> &mut Node {
        let idx = self.index(coord);
        &mut self.nodes[idx]
    }

    /// The node one step towards `dir` and whether the edge to it may be
    /// used. `None` when the step leaves the grid.
    pub fn neighbor(&self, coord: NodeCoordinate, dir: Direction) -> Option<(NodeCoordinate, bool)> {
        let next = coord.step(dir).filter(|next| self.contains(*next))?;
        let available = match dir {
            Direction::Right => self.horizontal.is_available(coord.column, coord.row),
            Direction::Down => self.vertical.is_available(coord.row, coord.column),
            // the edge to the left or above is owned by the neighbor
            Direction::Left | Direction::Up => {
                return self
                    .neighbor(next, dir.opposite())
                    .map(|(_, available)| (next, available));
            }
        };
        Some((next, available))
    }

    /// Length of the edge leaving `coord` towards `dir`. The step must stay
    /// inside the grid.
    pub fn edge_cost(&self, coord: NodeCoordinate, dir: Direction) -> f64 {
        match dir {
            Direction::Left => self.horizontal_costs[coord.column - 1],
            Direction::Right => self.horizontal_costs[coord.column],
            Direction::Up => self.vertical_costs[coord.row - 1],
            Direction::Down => self.vertical_costs[coord.row],
        }
    }

    pub fn mark_frontier(&mut self, coord: NodeCoordinate) {
        let key = self.node(coord).frontier_key();
        self.frontier.insert(key);
    }

    /// Removes `coord` from the frontier under its current cost. Must run
    /// before the cost changes.
    pub fn unmark_frontier(&mut self, coord: NodeCoordinate) {
        let key = self.node(coord).frontier_key();
        self.frontier.remove(&key);
    }

    pub fn finalize(&mut self, coord: NodeCoordinate) {
        self.unmark_frontier(coord);
        let idx = self.index(coord);
        self.pending[idx] = false;
    }

    pub fn is_pending(&self, coord: NodeCoordinate) -> bool {
        self.pending[self.index(coord)]
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The cheapest frontier node, left in place. Callers remove it with
    /// [`Grid::finalize`].
    pub fn cheapest_frontier_node(&self) -> Option<Node> {
        self.frontier
            .first()
            .map(|key| *self.node(NodeCoordinate::new(key.column, key.row)))
    }
}
