//! Normalized connector catalog: serde model, batch validation and
//! conversion into [`ConnectorSpec`]s.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{CatalogError, Error, SpecError};
use crate::model::{
    ConnectorParams, ConnectorSpec, ContactInfo, ElectricalInfo, PanelCutout, ShellSize,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub connectors: Vec<ConnectorRecord>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorRecord {
    pub id: Option<String>,
    pub asset_tag: Option<String>,
    pub name: Option<String>,
    pub designation: Option<String>,
    pub density: Option<String>,
    pub usage: Option<String>,
    pub shell: ShellRecord,
    pub insert: InsertRecord,
    pub contacts: ContactsRecord,
    pub electrical: ElectricalRecord,
    pub standards: Vec<String>,
    pub row_offsets: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellRecord {
    pub letter: Option<String>,
    pub mil_shell_size: Option<u32>,
    pub flange: FlangeRecord,
    pub panel_cutout_trapezoid_mm: Option<PanelCutout>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlangeRecord {
    pub outer_width_mm: Option<f64>,
    pub outer_height_mm: Option<f64>,
    pub mounting_hole_spacing_mm: Option<f64>,
    pub mounting_hole_diameter_mm: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertRecord {
    pub total_contacts: Option<usize>,
    pub contact_size: Option<String>,
    pub rows: Option<usize>,
    pub contacts_per_row: Vec<usize>,
    pub pitch_mm: PitchRecord,
    pub row_offset_mm: Option<f64>,
    pub numbering: Option<Numbering>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchRecord {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Pin numbering description: either per-view text or a single front-view
/// string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numbering {
    Text(String),
    Views {
        #[serde(default)]
        front_view: Option<String>,
        #[serde(default)]
        solder_side_view: Option<String>,
    },
}

impl Numbering {
    pub fn front(&self) -> &str {
        match self {
            Numbering::Text(s) => s,
            Numbering::Views { front_view, .. } => front_view.as_deref().unwrap_or(""),
        }
    }

    pub fn solder(&self) -> &str {
        match self {
            Numbering::Text(_) => "",
            Numbering::Views {
                solder_side_view, ..
            } => solder_side_view.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsRecord {
    pub male_pin_diameter_mm: DiameterRange,
    pub female_entry_diameter_mm: DiameterRange,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiameterRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalRecord {
    pub max_current_a_per_contact: Option<f64>,
    pub dielectric_withstand_v_rms_60hz_sea_level: Option<f64>,
}

impl ConnectorRecord {
    pub fn id_or_unknown(&self) -> &str {
        self.id.as_deref().unwrap_or("unknown")
    }

    /// Declared row count, else the length of `contacts_per_row`.
    pub fn rows(&self) -> usize {
        self.insert
            .rows
            .unwrap_or(self.insert.contacts_per_row.len())
    }

    /// Row-count consistency checks that must pass for every connector
    /// before anything is rendered. Only applies when per-row counts are
    /// listed.
    pub fn validate(&self) -> Vec<SpecError> {
        let mut errors = Vec::new();
        let counts = &self.insert.contacts_per_row;
        if counts.is_empty() {
            return errors;
        }
        let id = self.id_or_unknown().to_string();
        let total = self.insert.total_contacts.unwrap_or(0);
        let sum: usize = counts.iter().sum();
        if sum != total {
            errors.push(SpecError::RowCountSum {
                id: id.clone(),
                sum,
                total,
            });
        }
        let rows = self.rows();
        if rows != counts.len() {
            errors.push(SpecError::RowCountLength {
                id,
                rows,
                len: counts.len(),
            });
        }
        errors
    }

    pub fn to_params(&self) -> Result<ConnectorParams, SpecError> {
        let id = self.id_or_unknown().to_string();
        let missing = |field: &'static str| SpecError::MissingField {
            id: id.clone(),
            field,
        };

        let letter = self.shell.letter.as_deref().ok_or_else(|| missing("shell.letter"))?;
        let shell_size: ShellSize = letter.parse()?;
        let pin_count = self
            .insert
            .total_contacts
            .ok_or_else(|| missing("insert.total_contacts"))?;
        let flange = &self.shell.flange;
        let h_pitch = self.insert.pitch_mm.x.ok_or_else(|| missing("pitch_mm.x"))?;
        let v_pitch = self.insert.pitch_mm.y.ok_or_else(|| missing("pitch_mm.y"))?;
        let outer_w = flange
            .outer_width_mm
            .ok_or_else(|| missing("flange.outer_width_mm"))?;
        let hole_pitch = flange
            .mounting_hole_spacing_mm
            .ok_or_else(|| missing("flange.mounting_hole_spacing_mm"))?;

        let mut p = ConnectorParams::new(&id, pin_count, self.rows(), shell_size);
        p.label = self
            .name
            .clone()
            .or_else(|| self.designation.clone())
            .unwrap_or_else(|| id.clone());
        p.designation = self.designation.clone().unwrap_or_else(|| id.clone());
        p.density = self
            .density
            .clone()
            .unwrap_or_else(|| "standard".to_string());
        p.file_tag = self.asset_tag.clone().unwrap_or_else(|| id.clone());
        p.row_counts = if self.insert.contacts_per_row.is_empty() {
            None
        } else {
            Some(self.insert.contacts_per_row.clone())
        };
        p.row_offsets = self.row_offsets.clone();
        p.row_offset_mm = self.insert.row_offset_mm;
        p.mounting_hole_pitch_mm = hole_pitch;
        p.flange_outer_width_mm = outer_w;
        p.shell_height_mm = flange.outer_height_mm;
        p.screw_hole_dia_mm = flange.mounting_hole_diameter_mm;
        p.h_pitch_mm = h_pitch;
        p.v_pitch_mm = v_pitch;
        p.contact_size = self
            .insert
            .contact_size
            .clone()
            .unwrap_or_else(|| "20".to_string());
        if let Some(n) = &self.insert.numbering {
            p.numbering_front = n.front().to_string();
            p.numbering_solder = n.solder().to_string();
        }
        p.panel_cutout = self.shell.panel_cutout_trapezoid_mm.clone();
        p.contacts = ContactInfo {
            male_min_mm: self.contacts.male_pin_diameter_mm.min,
            male_max_mm: self.contacts.male_pin_diameter_mm.max,
            female_entry_min_mm: self.contacts.female_entry_diameter_mm.min,
        };
        p.electrical = ElectricalInfo {
            max_current_a: self.electrical.max_current_a_per_contact,
            dwv_v: self.electrical.dielectric_withstand_v_rms_60hz_sea_level,
        };
        p.standards = self.standards.clone();
        Ok(p)
    }
}

impl Catalog {
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt)
    }
}

/// Check every connector and collect all violations; fails if any were found.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), CatalogError> {
    let errors: Vec<SpecError> = catalog
        .connectors
        .iter()
        .flat_map(ConnectorRecord::validate)
        .collect();
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        error!("catalog validation: {e}");
    }
    Err(CatalogError::Invalid(errors))
}

/// Validate the whole catalog, then build a [`ConnectorSpec`] per record.
pub fn load_specs(catalog: &Catalog) -> Result<Vec<ConnectorSpec>, Error> {
    validate_catalog(catalog)?;
    let mut specs = Vec::with_capacity(catalog.connectors.len());
    for record in &catalog.connectors {
        specs.push(ConnectorSpec::new(record.to_params()?)?);
    }
    Ok(specs)
}
