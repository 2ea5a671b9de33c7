//! Routes non-crossing orthogonal polylines on a 2D canvas, one request at
//! a time.

pub mod error;
pub mod parser;
pub mod render;
pub mod router;
pub mod session;

pub use error::RouterError;
pub use router::geom::Point;
pub use router::PathRouter;
pub use session::Session;
