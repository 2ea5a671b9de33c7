mod drawing;

pub use drawing::Drawing;

use crate::router::geom::Point;
use crate::session::Session;

pub const DEFAULT_COLUMNS: usize = 60;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub columns: usize,
    pub use_ascii: bool,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            columns: DEFAULT_COLUMNS,
            use_ascii: false,
        }
    }
}

/// Rasterises every polyline of the session onto one character canvas.
pub fn render_session(session: &Session, options: &RenderOptions) -> String {
    let mut drawing = Drawing::new(session.width(), session.height(), options.columns);
    for polyline in session.polylines() {
        drawing.draw_polyline(polyline);
    }
    drawing.to_text(options.use_ascii)
}

/// `(x1, y1) (x2, y2) ...`, or `unreachable` for an empty polyline.
pub fn format_points(points: &[Point]) -> String {
    if points.is_empty() {
        return "unreachable".to_string();
    }
    points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
