use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::router::geom::Point;

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)";

static NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n|\\n").unwrap());
static CANVAS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^canvas\s+({NUMBER})\s*x\s*({NUMBER})$")).unwrap()
});
static REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({NUMBER})\s*,\s*({NUMBER})\s*->\s*({NUMBER})\s*,\s*({NUMBER})$"
    ))
    .unwrap()
});
static CLICK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^({NUMBER})\s*,\s*({NUMBER})$")).unwrap());
static WALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^wall\s+(.+)$").unwrap());
static WALL_POINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"({NUMBER})\s*,\s*({NUMBER})")).unwrap());

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Connect { start: Point, end: Point },
    Click(Point),
    /// A polyline drawn up front that routes must avoid.
    Wall(Vec<Point>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub line: usize,
    pub action: Action,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub steps: Vec<Step>,
}

/// Parses a drawing script: an optional `canvas WxH` header followed by
/// `x1,y1 -> x2,y2` requests, single `x,y` clicks and `wall x,y x,y ...`
/// polylines. `%%` starts a comment.
pub fn parse_script(input: &str) -> Result<Script> {
    let mut script = Script::default();

    for (idx, raw) in NEWLINE.split(input).enumerate() {
        let line_no = idx + 1;
        let mut line = raw.to_string();
        if let Some(pos) = line.find("%%") {
            line.truncate(pos);
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = CANVAS.captures(line) {
            if !script.steps.is_empty() {
                return Err(anyhow!(
                    "line {}: canvas must be declared before any request",
                    line_no
                ));
            }
            script.width = Some(caps[1].parse()?);
            script.height = Some(caps[2].parse()?);
            continue;
        }

        let action = if let Some(caps) = REQUEST.captures(line) {
            Action::Connect {
                start: Point::new(caps[1].parse()?, caps[2].parse()?),
                end: Point::new(caps[3].parse()?, caps[4].parse()?),
            }
        } else if let Some(caps) = CLICK.captures(line) {
            Action::Click(Point::new(caps[1].parse()?, caps[2].parse()?))
        } else if let Some(caps) = WALL.captures(line) {
            Action::Wall(parse_wall(&caps[1]).ok_or_else(|| {
                anyhow!("line {}: wall needs two or more 'x,y' points", line_no)
            })?)
        } else {
            return Err(anyhow!("line {}: could not parse '{}'", line_no, line));
        };
        script.steps.push(Step {
            line: line_no,
            action,
        });
    }

    Ok(script)
}

fn parse_wall(body: &str) -> Option<Vec<Point>> {
    let mut points = Vec::new();
    for token in body.split_whitespace() {
        let caps = WALL_POINT.captures(token)?;
        if caps[0].len() != token.len() {
            return None;
        }
        points.push(Point::new(caps[1].parse().ok()?, caps[2].parse().ok()?));
    }
    (points.len() >= 2).then_some(points)
}
