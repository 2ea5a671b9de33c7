//! Incremental orthogonal routing.
//!
//! Every request gets a fresh grid whose lines run through the gaps between
//! coordinates used by earlier paths, with the edges that would cross an
//! earlier path removed. The cheapest path over that grid is returned and
//! committed so later requests route around it.

pub mod geom;
pub mod grid;
pub mod grid_builder;
pub mod registry;
pub mod search;

use log::debug;

use crate::error::{Result, RouterError};
use crate::router::geom::Point;
use crate::router::grid_builder::build_grid;
use crate::router::registry::{CoordinateRegistry, EdgeRegistry};
use crate::router::search::shortest_path;

/// Routes successive non-crossing polylines on one canvas.
#[derive(Clone, Debug)]
pub struct PathRouter {
    width: f64,
    height: f64,
    coordinates: CoordinateRegistry,
    edges: EdgeRegistry,
}

impl PathRouter {
    /// Creates a router for a canvas of `area_height` by `area_width`.
    pub fn new(area_height: f64, area_width: f64) -> Result<PathRouter> {
        let valid = |extent: f64| extent.is_finite() && extent > 0.0;
        if !valid(area_width) || !valid(area_height) {
            return Err(RouterError::InvalidCanvas {
                width: area_width,
                height: area_height,
            });
        }

        Ok(PathRouter::with_extents(area_height, area_width))
    }

    /// Constructor for extents already known to be finite and positive.
    pub(crate) fn with_extents(area_height: f64, area_width: f64) -> PathRouter {
        PathRouter {
            width: area_width,
            height: area_height,
            coordinates: CoordinateRegistry::new(area_width, area_height),
            edges: EdgeRegistry::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn coordinates(&self) -> &CoordinateRegistry {
        &self.coordinates
    }

    pub fn edges(&self) -> &EdgeRegistry {
        &self.edges
    }

    /// Resolves the cheapest axis-aligned polyline from `start` to `end`
    /// that crosses no earlier polyline, and commits it.
    ///
    /// An empty result means no such polyline exists on this request's grid;
    /// nothing is committed in that case. Points outside
    /// `[0, width) x [0, height)` are rejected.
    pub fn resolve_next_path(&mut self, start: Point, end: Point) -> Result<Vec<Point>> {
        self.check_point(start, false)?;
        self.check_point(end, false)?;

        let mut plan = build_grid(&self.coordinates, &self.edges, start, end)
            .map_err(|point| self.invalid(point))?;

        let (from, to) = (plan.start(), plan.end());
        let path = shortest_path(&mut plan.grid, from, to);
        if path.is_empty() {
            debug!("no route from {} to {}", start, end);
            return Ok(Vec::new());
        }

        let points: Vec<Point> = path.into_iter().map(|coord| plan.point(coord)).collect();
        self.commit(&points);
        debug!("resolved {} -> {} through {} points", start, end, points.len());

        Ok(points)
    }

    /// Registers an existing polyline, e.g. one restored from a saved
    /// drawing, so later requests route around it. Points may lie on the
    /// canvas boundary but not beyond it.
    pub fn commit_path(&mut self, points: &[Point]) -> Result<()> {
        for point in points {
            self.check_point(*point, true)?;
        }
        if let Some(pair) = points
            .windows(2)
            .find(|pair| pair[0].x != pair[1].x && pair[0].y != pair[1].y)
        {
            return Err(RouterError::MisalignedSegment {
                from: pair[0],
                to: pair[1],
            });
        }
        self.commit(points);
        Ok(())
    }

    fn commit(&mut self, points: &[Point]) {
        self.coordinates.commit(points);
        self.edges.commit(points);
    }

    // `closed` admits the far boundary itself.
    fn check_point(&self, point: Point, closed: bool) -> Result<()> {
        let in_range = |value: f64, extent: f64| {
            value.is_finite() && value >= 0.0 && (value < extent || (closed && value == extent))
        };
        if in_range(point.x, self.width) && in_range(point.y, self.height) {
            Ok(())
        } else {
            Err(self.invalid(point))
        }
    }

    fn invalid(&self, point: Point) -> RouterError {
        RouterError::InvalidArgument {
            point,
            width: self.width,
            height: self.height,
        }
    }
}
