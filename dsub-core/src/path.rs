//! Closed polygons with circular-arc fillets at every corner.

use std::fmt::Write as _;

use crate::error::GeometryError;
use crate::model::Point;
use crate::svg::fmt_mm;

/// Fillets never consume more than this share of an adjacent edge, so the
/// fillets of neighbouring corners cannot overlap.
pub const MAX_EDGE_SHARE: f64 = 0.49;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo { radius: f64, sweep: bool, to: Point },
    Close,
}

/// The rounded replacement for one polygon corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerFillet {
    pub vertex: Point,
    pub tangent_len: f64,
    pub start: Point,
    pub end: Point,
    pub sweep: bool,
    /// Lengths of the edges toward the previous and the next vertex.
    pub edge_prev: f64,
    pub edge_next: f64,
}

fn normalize(p: Point) -> Point {
    let len = (p.x * p.x + p.y * p.y).sqrt();
    if len == 0.0 {
        Point { x: 0.0, y: 0.0 }
    } else {
        Point {
            x: p.x / len,
            y: p.y / len,
        }
    }
}

/// Fillet every corner of `points` with `radius`. Corners with a zero
/// interior angle are skipped.
pub fn corner_fillets(points: &[Point], radius: f64) -> Result<Vec<CornerFillet>, GeometryError> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices { count: n });
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let u1 = normalize(Point::new(prev.x - curr.x, prev.y - curr.y));
        let u2 = normalize(Point::new(next.x - curr.x, next.y - curr.y));
        let dot = (u1.x * u2.x + u1.y * u2.y).clamp(-1.0, 1.0);
        let angle = dot.acos();
        if angle == 0.0 {
            continue;
        }

        let edge_prev = curr.distance(prev);
        let edge_next = curr.distance(next);
        let t = (radius / (angle / 2.0).tan())
            .min(edge_prev * MAX_EDGE_SHARE)
            .min(edge_next * MAX_EDGE_SHARE);

        let cross = u1.x * u2.y - u1.y * u2.x;
        out.push(CornerFillet {
            vertex: curr,
            tangent_len: t,
            start: Point::new(curr.x + u1.x * t, curr.y + u1.y * t),
            end: Point::new(curr.x + u2.x * t, curr.y + u2.y * t),
            sweep: cross < 0.0,
            edge_prev,
            edge_next,
        });
    }
    Ok(out)
}

/// Path description of a filleted closed polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundedPath {
    pub commands: Vec<PathCommand>,
}

impl RoundedPath {
    /// SVG path data (`d` attribute).
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(d, "M {} {}", fmt_mm(p.x), fmt_mm(p.y)),
                PathCommand::LineTo(p) => write!(d, "L {} {}", fmt_mm(p.x), fmt_mm(p.y)),
                PathCommand::ArcTo { radius, sweep, to } => write!(
                    d,
                    "A {r} {r} 0 0 {} {} {}",
                    u8::from(*sweep),
                    fmt_mm(to.x),
                    fmt_mm(to.y),
                    r = fmt_mm(*radius)
                ),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }
}

pub fn rounded_polygon_path(points: &[Point], radius: f64) -> Result<RoundedPath, GeometryError> {
    let fillets = corner_fillets(points, radius)?;
    let mut commands = Vec::with_capacity(fillets.len() * 2 + 1);
    for (i, f) in fillets.iter().enumerate() {
        if i == 0 {
            commands.push(PathCommand::MoveTo(f.start));
        } else {
            commands.push(PathCommand::LineTo(f.start));
        }
        commands.push(PathCommand::ArcTo {
            radius,
            sweep: f.sweep,
            to: f.end,
        });
    }
    commands.push(PathCommand::Close);
    Ok(RoundedPath { commands })
}
