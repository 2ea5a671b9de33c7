use thiserror::Error;

use crate::router::geom::Point;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, Error, PartialEq)]
pub enum RouterError {
    #[error("canvas extents must be finite and positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("point {point} lies outside the {width}x{height} canvas")]
    InvalidArgument {
        point: Point,
        width: f64,
        height: f64,
    },

    #[error("segment from {from} to {to} is not axis-aligned")]
    MisalignedSegment { from: Point, to: Point },
}
