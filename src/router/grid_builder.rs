use log::debug;

use crate::router::geom::{NodeCoordinate, Point, SortedInterval};
use crate::router::grid::Grid;
use crate::router::registry::{CoordinateRegistry, EdgeRegistry};

/// Candidate values for one axis of a request grid, with the positions of
/// the request's own start and end coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisCandidates {
    pub values: Vec<f64>,
    pub start: usize,
    pub end: usize,
}

/// Availability of the edges running along one axis. `edge` indexes the gap
/// between candidate `edge` and `edge + 1` on that axis, `lane` indexes the
/// candidate on the perpendicular axis the edge lies on.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMatrix {
    edges: usize,
    lanes: usize,
    cells: Vec<bool>,
}

impl EdgeMatrix {
    pub fn all_available(edges: usize, lanes: usize) -> EdgeMatrix {
        EdgeMatrix {
            edges,
            lanes,
            cells: vec![true; edges * lanes],
        }
    }

    pub fn edges(&self) -> usize {
        self.edges
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn is_available(&self, edge: usize, lane: usize) -> bool {
        edge < self.edges && lane < self.lanes && self.cells[edge * self.lanes + lane]
    }

    pub fn block(&mut self, edge: usize, lane: usize) {
        if edge < self.edges && lane < self.lanes {
            self.cells[edge * self.lanes + lane] = false;
        }
    }
}

/// Everything one request needs: the candidates on both axes and the
/// graph built from them.
#[derive(Debug)]
pub struct GridPlan {
    pub columns: AxisCandidates,
    pub rows: AxisCandidates,
    pub grid: Grid,
}

impl GridPlan {
    pub fn start(&self) -> NodeCoordinate {
        NodeCoordinate::new(self.columns.start, self.rows.start)
    }

    pub fn end(&self) -> NodeCoordinate {
        NodeCoordinate::new(self.columns.end, self.rows.end)
    }

    pub fn point(&self, coord: NodeCoordinate) -> Point {
        Point::new(self.columns.values[coord.column], self.rows.values[coord.row])
    }
}

/// Builds the grid for a request from the current registries. Fails with
/// the offending query point when it falls outside every gap of the
/// registry, checking `start` first.
pub fn build_grid(
    coordinates: &CoordinateRegistry,
    edges: &EdgeRegistry,
    start: Point,
    end: Point,
) -> Result<GridPlan, Point> {
    let (xs, ys) = (coordinates.x_values(), coordinates.y_values());
    let (Some(columns), Some(rows)) = (
        candidate_values(&xs, start.x, end.x),
        candidate_values(&ys, start.y, end.y),
    ) else {
        let covered = |point: Point| within_gaps(&xs, point.x) && within_gaps(&ys, point.y);
        return Err(if covered(start) { end } else { start });
    };

    let horizontal = availability(&columns.values, &rows.values, edges.vertical());
    let vertical = availability(&rows.values, &columns.values, edges.horizontal());

    let grid = Grid::new(
        horizontal,
        edge_costs(&columns.values),
        vertical,
        edge_costs(&rows.values),
    );
    debug!(
        "built {}x{} grid, start ({}, {}), end ({}, {})",
        columns.values.len(),
        rows.values.len(),
        columns.start,
        rows.start,
        columns.end,
        rows.end
    );

    Ok(GridPlan {
        columns,
        rows,
        grid,
    })
}

/// True when `value` lies in some half-open gap `[used[i], used[i + 1])`.
fn within_gaps(used: &[f64], value: f64) -> bool {
    match (used.first(), used.last()) {
        (Some(first), Some(last)) => value >= *first && value < *last,
        _ => false,
    }
}

/// Picks one value per gap between adjacent used values: the gap midpoint,
/// or the query coordinate(s) that fall inside the gap. Equal start and end
/// coordinates share a single candidate.
pub fn candidate_values(used: &[f64], start: f64, end: f64) -> Option<AxisCandidates> {
    let mut values = Vec::with_capacity(used.len() + 1);
    let mut start_index = None;
    let mut end_index = None;

    for gap in used.windows(2) {
        let (lo, hi) = (gap[0], gap[1]);
        let has_start = start >= lo && start < hi;
        let has_end = end >= lo && end < hi;

        match (has_start, has_end) {
            (true, true) if start == end => {
                start_index = Some(values.len());
                end_index = Some(values.len());
                values.push(start);
            }
            (true, true) => {
                let (first, second) = if start < end { (start, end) } else { (end, start) };
                values.push(first);
                values.push(second);
                let (lower, upper) = (values.len() - 2, values.len() - 1);
                if start < end {
                    start_index = Some(lower);
                    end_index = Some(upper);
                } else {
                    start_index = Some(upper);
                    end_index = Some(lower);
                }
            }
            (true, false) => {
                start_index = Some(values.len());
                values.push(start);
            }
            (false, true) => {
                end_index = Some(values.len());
                values.push(end);
            }
            (false, false) => values.push((lo + hi) / 2.0),
        }
    }

    Some(AxisCandidates {
        values,
        start: start_index?,
        end: end_index?,
    })
}

/// Length of each edge between adjacent candidates.
pub fn edge_costs(candidates: &[f64]) -> Vec<f64> {
    candidates.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Availability of the edges running along axis A. Each committed segment
/// lying on the perpendicular coordinate `c` blocks the A-edge that spans
/// `c` on every B-lane strictly inside the segment.
pub fn availability<'a>(
    candidates_a: &[f64],
    candidates_b: &[f64],
    perpendicular: impl Iterator<Item = (f64, &'a [SortedInterval])>,
) -> EdgeMatrix {
    let mut matrix =
        EdgeMatrix::all_available(candidates_a.len().saturating_sub(1), candidates_b.len());

    for (fixed, segments) in perpendicular {
        let Some(edge) = last_index_below(candidates_a, fixed) else {
            continue;
        };
        if edge >= matrix.edges() {
            continue;
        }
        for segment in segments {
            for (lane, value) in candidates_b.iter().enumerate() {
                if segment.strictly_contains(*value) {
                    matrix.block(edge, lane);
                }
            }
        }
    }

    matrix
}

/// Index of the last candidate strictly less than `value`.
fn last_index_below(candidates: &[f64], value: f64) -> Option<usize> {
    candidates
        .partition_point(|candidate| *candidate < value)
        .checked_sub(1)
}
