use std::collections::BTreeSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::router::geom::{Point, SortedInterval};

/// Coordinate values already used by committed points, one ordered set per
/// axis. Seeded with the canvas boundaries and only ever grows.
#[derive(Clone, Debug)]
pub struct CoordinateRegistry {
    x_values: BTreeSet<OrderedFloat<f64>>,
    y_values: BTreeSet<OrderedFloat<f64>>,
}

impl CoordinateRegistry {
    pub fn new(width: f64, height: f64) -> CoordinateRegistry {
        let mut registry = CoordinateRegistry {
            x_values: BTreeSet::new(),
            y_values: BTreeSet::new(),
        };
        registry.x_values.insert(OrderedFloat(0.0));
        registry.x_values.insert(OrderedFloat(width));
        registry.y_values.insert(OrderedFloat(0.0));
        registry.y_values.insert(OrderedFloat(height));
        registry
    }

    /// Sorted, duplicate-free X values.
    pub fn x_values(&self) -> Vec<f64> {
        self.x_values.iter().map(|v| v.0).collect()
    }

    /// Sorted, duplicate-free Y values.
    pub fn y_values(&self) -> Vec<f64> {
        self.y_values.iter().map(|v| v.0).collect()
    }

    pub fn sizes(&self) -> (usize, usize) {
        (self.x_values.len(), self.y_values.len())
    }

    pub fn commit(&mut self, points: &[Point]) {
        for point in points {
            // -0.0 and 0.0 must land on the same entry
            self.x_values.insert(OrderedFloat(point.x + 0.0));
            self.y_values.insert(OrderedFloat(point.y + 0.0));
        }
    }
}

/// Committed segments keyed by the coordinate they lie on. Horizontal
/// segments are keyed by Y and store their X extent; vertical segments are
/// keyed by X and store their Y extent. Intervals are appended, never merged.
#[derive(Clone, Debug, Default)]
pub struct EdgeRegistry {
    horizontal: IndexMap<OrderedFloat<f64>, Vec<SortedInterval>>,
    vertical: IndexMap<OrderedFloat<f64>, Vec<SortedInterval>>,
}

impl EdgeRegistry {
    pub fn new() -> EdgeRegistry {
        EdgeRegistry::default()
    }

    pub fn horizontal(&self) -> impl Iterator<Item = (f64, &[SortedInterval])> {
        self.horizontal.iter().map(|(y, spans)| (y.0, spans.as_slice()))
    }

    pub fn vertical(&self) -> impl Iterator<Item = (f64, &[SortedInterval])> {
        self.vertical.iter().map(|(x, spans)| (x.0, spans.as_slice()))
    }

    pub fn horizontal_at(&self, y: f64) -> &[SortedInterval] {
        self.horizontal
            .get(&OrderedFloat(y + 0.0))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn vertical_at(&self, x: f64) -> &[SortedInterval] {
        self.vertical
            .get(&OrderedFloat(x + 0.0))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of recorded intervals, horizontal then vertical.
    pub fn sizes(&self) -> (usize, usize) {
        (
            self.horizontal.values().map(Vec::len).sum(),
            self.vertical.values().map(Vec::len).sum(),
        )
    }

    /// Records every segment of an axis-aligned polyline. A pair sharing
    /// both coordinates is recorded as a degenerate vertical interval.
    pub fn commit(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from.x == to.x {
                self.vertical
                    .entry(OrderedFloat(from.x + 0.0))
                    .or_default()
                    .push(SortedInterval::new(from.y, to.y));
            } else if from.y == to.y {
                self.horizontal
                    .entry(OrderedFloat(from.y + 0.0))
                    .or_default()
                    .push(SortedInterval::new(from.x, to.x));
            }
        }
    }
}
