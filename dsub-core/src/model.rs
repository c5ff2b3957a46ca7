use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Plug; pin 1 top-left on the mating face.
    Male,
    /// Receptacle; pin 1 top-right on the mating face.
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Gender::Male => "Male (plug)",
            Gender::Female => "Female (receptacle)",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Mating face, seen from the front.
    Outside,
    /// Rear, where the wires are soldered.
    Solder,
}

impl View {
    pub const ALL: [View; 2] = [View::Outside, View::Solder];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Outside => "outside",
            View::Solder => "solder",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            View::Outside => "Outside (mating face)",
            View::Solder => "Solder side (rear view)",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shell size class, historically identified by a letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellSize {
    E,
    A,
    B,
    C,
    D,
}

impl FromStr for ShellSize {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E" => Ok(ShellSize::E),
            "A" => Ok(ShellSize::A),
            "B" => Ok(ShellSize::B),
            "C" => Ok(ShellSize::C),
            "D" => Ok(ShellSize::D),
            _ => Err(SpecError::UnknownShell {
                letter: s.to_string(),
            }),
        }
    }
}

/// One placed contact. Coordinates are millimeters relative to the pin-set centroid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PinRecord {
    pub number: usize,
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

/// Panel cutout trapezoid, annotation only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelCutout {
    pub top_width: f64,
    pub bottom_width: f64,
    pub height: f64,
    pub side_angle_deg: f64,
    pub corner_radius: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactInfo {
    pub male_min_mm: Option<f64>,
    pub male_max_mm: Option<f64>,
    pub female_entry_min_mm: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ElectricalInfo {
    pub max_current_a: Option<f64>,
    pub dwv_v: Option<f64>,
}

/// Unchecked field set for a connector; turned into a [`ConnectorSpec`] by
/// [`ConnectorSpec::new`].
#[derive(Clone, Debug)]
pub struct ConnectorParams {
    pub id: String,
    pub label: String,
    pub designation: String,
    pub density: String,
    pub file_tag: String,
    pub pin_count: usize,
    pub rows: usize,
    pub row_counts: Option<Vec<usize>>,
    pub row_offsets: Option<Vec<f64>>,
    pub row_offset_mm: Option<f64>,
    pub shell_size: ShellSize,
    pub mounting_hole_pitch_mm: f64,
    pub flange_outer_width_mm: f64,
    pub shell_height_mm: Option<f64>,
    pub screw_hole_dia_mm: Option<f64>,
    pub h_pitch_mm: f64,
    pub v_pitch_mm: f64,
    pub contact_size: String,
    pub numbering_front: String,
    pub numbering_solder: String,
    pub panel_cutout: Option<PanelCutout>,
    pub contacts: ContactInfo,
    pub electrical: ElectricalInfo,
    pub standards: Vec<String>,
}

impl ConnectorParams {
    /// Minimal parameter set; everything optional is left unset.
    pub fn new(id: &str, pin_count: usize, rows: usize, shell_size: ShellSize) -> Self {
        ConnectorParams {
            id: id.to_string(),
            label: id.to_string(),
            designation: id.to_string(),
            density: "standard".to_string(),
            file_tag: id.to_string(),
            pin_count,
            rows,
            row_counts: None,
            row_offsets: None,
            row_offset_mm: None,
            shell_size,
            mounting_hole_pitch_mm: 24.99,
            flange_outer_width_mm: 30.81,
            shell_height_mm: None,
            screw_hole_dia_mm: None,
            h_pitch_mm: 2.77,
            v_pitch_mm: 2.84,
            contact_size: "20".to_string(),
            numbering_front: String::new(),
            numbering_solder: String::new(),
            panel_cutout: None,
            contacts: ContactInfo::default(),
            electrical: ElectricalInfo::default(),
            standards: Vec::new(),
        }
    }
}

/// A validated connector variant. Row-count and offset invariants hold for
/// every value of this type.
#[derive(Clone, Debug)]
pub struct ConnectorSpec {
    params: ConnectorParams,
}

impl ConnectorSpec {
    pub fn new(params: ConnectorParams) -> Result<Self, SpecError> {
        let id = params.id.clone();
        if params.pin_count == 0 {
            return Err(SpecError::NoContacts { id });
        }
        if params.rows == 0 {
            return Err(SpecError::NoRows { id });
        }
        if let Some(counts) = &params.row_counts {
            if counts.len() != params.rows {
                return Err(SpecError::RowCountLength {
                    id,
                    rows: params.rows,
                    len: counts.len(),
                });
            }
            let sum: usize = counts.iter().sum();
            if sum != params.pin_count {
                return Err(SpecError::RowCountSum {
                    id,
                    sum,
                    total: params.pin_count,
                });
            }
            if let Some(row) = counts.iter().position(|&c| c == 0) {
                return Err(SpecError::EmptyRow { id, row });
            }
        }
        if let Some(offsets) = &params.row_offsets
            && offsets.len() != params.rows
        {
            return Err(SpecError::RowOffsetLength {
                id,
                rows: params.rows,
                len: offsets.len(),
            });
        }
        for (field, value) in [
            ("pitch_mm.x", params.h_pitch_mm),
            ("pitch_mm.y", params.v_pitch_mm),
            ("outer_width_mm", params.flange_outer_width_mm),
            ("mounting_hole_spacing_mm", params.mounting_hole_pitch_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SpecError::InvalidLength { id, field, value });
            }
        }
        Ok(ConnectorSpec { params })
    }

    pub fn params(&self) -> &ConnectorParams {
        &self.params
    }

    pub fn id(&self) -> &str {
        &self.params.id
    }

    pub fn label(&self) -> &str {
        &self.params.label
    }

    pub fn designation(&self) -> &str {
        &self.params.designation
    }

    pub fn file_tag(&self) -> &str {
        &self.params.file_tag
    }

    pub fn pin_count(&self) -> usize {
        self.params.pin_count
    }

    pub fn rows(&self) -> usize {
        self.params.rows
    }

    pub fn row_counts(&self) -> Option<&[usize]> {
        self.params.row_counts.as_deref()
    }

    pub fn row_offsets(&self) -> Option<&[f64]> {
        self.params.row_offsets.as_deref()
    }

    pub fn row_offset_mm(&self) -> Option<f64> {
        self.params.row_offset_mm
    }

    pub fn shell_size(&self) -> ShellSize {
        self.params.shell_size
    }

    pub fn h_pitch_mm(&self) -> f64 {
        self.params.h_pitch_mm
    }

    pub fn v_pitch_mm(&self) -> f64 {
        self.params.v_pitch_mm
    }
}
