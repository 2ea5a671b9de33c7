use log::{info, warn};

use crate::error::Result;
use crate::router::geom::Point;
use crate::router::PathRouter;

pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// One drawing: a router plus every polyline it has produced so far.
#[derive(Clone, Debug)]
pub struct Session {
    router: PathRouter,
    polylines: Vec<Vec<Point>>,
    pending: Option<Point>,
}

impl Session {
    pub fn new(width: f64, height: f64) -> Result<Session> {
        Ok(Session {
            router: PathRouter::new(height, width)?,
            polylines: Vec::new(),
            pending: None,
        })
    }

    pub fn width(&self) -> f64 {
        self.router.width()
    }

    pub fn height(&self) -> f64 {
        self.router.height()
    }

    pub fn router(&self) -> &PathRouter {
        &self.router
    }

    pub fn polylines(&self) -> &[Vec<Point>] {
        &self.polylines
    }

    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// Routes `start` to `end` and keeps the result. Returns the polyline,
    /// empty when there is no route.
    pub fn connect(&mut self, start: Point, end: Point) -> Result<Vec<Point>> {
        let points = self.router.resolve_next_path(start, end)?;
        if points.is_empty() {
            warn!("no route from {} to {}", start, end);
        } else {
            info!("connected {} to {} with {} points", start, end, points.len());
            self.polylines.push(points.clone());
        }
        Ok(points)
    }

    /// Adds a polyline that was drawn elsewhere; later routes avoid it.
    pub fn add_polyline(&mut self, points: Vec<Point>) -> Result<()> {
        self.router.commit_path(&points)?;
        if !points.is_empty() {
            self.polylines.push(points);
        }
        Ok(())
    }

    /// First click remembers the point, second click connects the two.
    pub fn click(&mut self, point: Point) -> Result<Option<Vec<Point>>> {
        match self.pending.take() {
            Some(start) => self.connect(start, point).map(Some),
            None => {
                self.pending = Some(point);
                Ok(None)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session {
            router: PathRouter::with_extents(DEFAULT_HEIGHT, DEFAULT_WIDTH),
            polylines: Vec::new(),
            pending: None,
        }
    }
}
