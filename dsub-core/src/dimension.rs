//! Dimension figures: extension lines, a dimension line, two inward arrows
//! and a centered label.

use crate::svg::{Anchor, Baseline, Direction, SvgLayer, TextStyle};

pub const DIM_STROKE: f64 = 0.18;
pub const LEADER_DASH: &str = "2 1";

const ARROW: f64 = 0.8;
const LEADER_ARROW: f64 = 0.75;
const LABEL: TextStyle = TextStyle::new(2.0, Anchor::Middle, Baseline::Alphabetic);
const LEADER_LABEL: TextStyle = TextStyle::new(1.8, Anchor::Middle, Baseline::Alphabetic);

/// Horizontal dimension between `x1` and `x2`, drawn at `y_dim` with
/// extension lines back to `y_ref`.
pub fn horizontal(layer: &mut SvgLayer, x1: f64, x2: f64, y_dim: f64, y_ref: f64, text: &str) {
    layer.line(x1, y_ref, x1, y_dim, DIM_STROKE, None);
    layer.line(x2, y_ref, x2, y_dim, DIM_STROKE, None);
    layer.line(x1, y_dim, x2, y_dim, DIM_STROKE, None);
    layer.arrow(x1, y_dim, Direction::Right, ARROW);
    layer.arrow(x2, y_dim, Direction::Left, ARROW);
    layer.text((x1 + x2) / 2.0, y_dim - 1.2, text, LABEL);
}

/// Vertical dimension between `y1` and `y2` at `x_dim`, extension lines back
/// to `x_ref`. The label sits to the right.
pub fn vertical(layer: &mut SvgLayer, y1: f64, y2: f64, x_dim: f64, x_ref: f64, text: &str) {
    layer.line(x_ref, y1, x_dim, y1, DIM_STROKE, None);
    layer.line(x_ref, y2, x_dim, y2, DIM_STROKE, None);
    layer.line(x_dim, y1, x_dim, y2, DIM_STROKE, None);
    layer.arrow(x_dim, y1, Direction::Down, ARROW);
    layer.arrow(x_dim, y2, Direction::Up, ARROW);
    layer.text(
        x_dim + 1.2,
        (y1 + y2) / 2.0,
        text,
        TextStyle::new(2.0, Anchor::Start, Baseline::Middle),
    );
}

/// Dashed horizontal leader without extension lines.
pub fn horizontal_leader(layer: &mut SvgLayer, x1: f64, x2: f64, y: f64, text: &str) {
    layer.line(x1, y, x2, y, DIM_STROKE, Some(LEADER_DASH));
    layer.arrow(x1, y, Direction::Right, LEADER_ARROW);
    layer.arrow(x2, y, Direction::Left, LEADER_ARROW);
    layer.text((x1 + x2) / 2.0, y - 1.0, text, LEADER_LABEL);
}

/// Dashed vertical leader with the label on its left.
pub fn vertical_leader(layer: &mut SvgLayer, y1: f64, y2: f64, x: f64, text: &str) {
    layer.line(x, y1, x, y2, DIM_STROKE, Some(LEADER_DASH));
    layer.arrow(x, y1, Direction::Down, LEADER_ARROW);
    layer.arrow(x, y2, Direction::Up, LEADER_ARROW);
    layer.text(
        x - 1.0,
        (y1 + y2) / 2.0,
        text,
        TextStyle::new(1.8, Anchor::End, Baseline::Middle),
    );
}
