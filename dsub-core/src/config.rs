//! Drawing layout constants. Every field has a default, so a JSON override
//! only needs the keys it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::opening::OpeningParams;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        // Wide right margin holds the info column.
        Margins {
            left: 38.0,
            right: 148.0,
            top: 30.0,
            bottom: 48.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strokes {
    pub shell: f64,
    pub shell_corner_radius: f64,
    pub hole: f64,
    pub opening: f64,
    pub pin: f64,
}

impl Default for Strokes {
    fn default() -> Self {
        Strokes {
            shell: 0.30,
            shell_corner_radius: 1.2,
            hole: 0.25,
            opening: 0.25,
            pin: 0.18,
        }
    }
}

/// Pin circle radius by row count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinRadii {
    pub two_rows: f64,
    pub three_rows: f64,
    pub four_or_more_rows: f64,
}

impl Default for PinRadii {
    fn default() -> Self {
        PinRadii {
            two_rows: 0.55,
            three_rows: 0.45,
            four_or_more_rows: 0.40,
        }
    }
}

impl PinRadii {
    pub fn for_rows(&self, rows: usize) -> f64 {
        match rows {
            2 => self.two_rows,
            3 => self.three_rows,
            _ => self.four_or_more_rows,
        }
    }
}

/// Distances of the dimension figures from the geometry they measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionOffsets {
    pub flange_width_above: f64,
    pub hole_pitch_below: f64,
    pub flange_height_right: f64,
    pub h_pitch_above_opening: f64,
    pub v_pitch_left_of_shell: f64,
    pub row_offset_below_opening: f64,
}

impl Default for DimensionOffsets {
    fn default() -> Self {
        DimensionOffsets {
            flange_width_above: 16.0,
            hole_pitch_below: 16.0,
            flange_height_right: 12.0,
            h_pitch_above_opening: 3.5,
            v_pitch_left_of_shell: 18.0,
            row_offset_below_opening: 7.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoColumn {
    /// Gap between the shell's right edge and the column.
    pub offset_x: f64,
    pub start_y: f64,
    pub title_size: f64,
    pub title_advance: f64,
    pub line_size: f64,
    pub line_advance: f64,
    pub block_gap: f64,
    pub wrap_width: usize,
    /// Wrapped numbering lines kept in the insert block.
    pub numbering_lines: usize,
}

impl Default for InfoColumn {
    fn default() -> Self {
        InfoColumn {
            offset_x: 26.0,
            start_y: 0.8,
            title_size: 2.05,
            title_advance: 2.9,
            line_size: 1.8,
            line_advance: 2.4,
            block_gap: 1.4,
            wrap_width: 34,
            numbering_lines: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub margins: Margins,
    pub opening: OpeningParams,
    pub strokes: Strokes,
    pub pin_radii: PinRadii,
    pub default_hole_diameter_mm: f64,
    pub pin_label_pad: f64,
    pub pin_label_size: f64,
    pub dimensions: DimensionOffsets,
    pub info: InfoColumn,
    pub caption_size: f64,
    /// Caption baseline distance above the canvas bottom.
    pub caption_from_bottom: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        DrawingConfig {
            margins: Margins::default(),
            opening: OpeningParams::default(),
            strokes: Strokes::default(),
            pin_radii: PinRadii::default(),
            default_hole_diameter_mm: 4.0,
            pin_label_pad: 4.0,
            pin_label_size: 2.2,
            dimensions: DimensionOffsets::default(),
            info: InfoColumn::default(),
            caption_size: 2.2,
            caption_from_bottom: 8.0,
        }
    }
}

impl DrawingConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(Error::Config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt)
    }
}
