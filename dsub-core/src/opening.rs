//! Keystone (trapezoidal) mating-face opening, grown to fit the pin field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GeometryError;
use crate::model::Point;
use crate::path::{RoundedPath, rounded_polygon_path};
use crate::shell::ShellGeometry;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningParams {
    pub clearance_x_mm: f64,
    pub clearance_y_mm: f64,
    pub side_angle_deg: f64,
    /// Material kept between the opening and the flange edge.
    pub flange_margin_mm: f64,
    pub max_fillet_mm: f64,
    pub fillet_height_ratio: f64,
    pub fillet_width_ratio: f64,
}

impl Default for OpeningParams {
    fn default() -> Self {
        OpeningParams {
            clearance_x_mm: 3.0,
            clearance_y_mm: 2.8,
            side_angle_deg: 10.0,
            flange_margin_mm: 6.0,
            max_fillet_mm: 2.2,
            fillet_height_ratio: 0.22,
            fillet_width_ratio: 0.18,
        }
    }
}

/// Opening outline in drawing coordinates. Vertices run top-left,
/// top-right, bottom-right, bottom-left.
#[derive(Clone, Debug, PartialEq)]
pub struct OpeningOutline {
    pub vertices: [Point; 4],
    pub top_width: f64,
    pub bottom_width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

impl OpeningOutline {
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn top_y(&self) -> f64 {
        self.vertices[0].y
    }

    pub fn bottom_y(&self) -> f64 {
        self.vertices[2].y
    }

    pub fn rounded_path(&self) -> Result<RoundedPath, GeometryError> {
        rounded_polygon_path(&self.vertices, self.corner_radius)
    }
}

pub fn build_opening(
    center: Point,
    nominal: &ShellGeometry,
    outer_width: f64,
    pin_w: f64,
    pin_h: f64,
    params: &OpeningParams,
) -> Result<OpeningOutline, GeometryError> {
    let available = outer_width - params.flange_margin_mm;
    if !(available.is_finite() && available > 0.0) {
        return Err(GeometryError::OpeningTooNarrow {
            outer_width,
            margin: params.flange_margin_mm,
        });
    }

    let height = nominal.opening_h.max(pin_h + 2.0 * params.clearance_y_mm);
    let top_w_eff = nominal
        .opening_top_w
        .max(pin_w + 2.0 * params.clearance_x_mm);
    if height > nominal.opening_h || top_w_eff > nominal.opening_top_w {
        debug!(
            nominal_w = nominal.opening_top_w,
            nominal_h = nominal.opening_h,
            width = top_w_eff,
            height,
            "opening grown beyond nominal size to clear pins"
        );
    }

    let top_w = top_w_eff.min(available);
    let bottom_w = (top_w - 2.0 * params.side_angle_deg.to_radians().tan() * height)
        .max(pin_w + params.clearance_x_mm);

    let top_y = center.y - height / 2.0;
    let bot_y = center.y + height / 2.0;
    let top_half = top_w / 2.0;
    let bot_half = bottom_w / 2.0;

    let corner_radius = params
        .max_fillet_mm
        .min(height * params.fillet_height_ratio)
        .min(top_w * params.fillet_width_ratio);

    Ok(OpeningOutline {
        vertices: [
            Point::new(center.x - top_half, top_y),
            Point::new(center.x + top_half, top_y),
            Point::new(center.x + bot_half, bot_y),
            Point::new(center.x - bot_half, bot_y),
        ],
        top_width: top_w,
        bottom_width: bottom_w,
        height,
        corner_radius,
    })
}
