//! Batch rendering of a whole catalog.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, load_specs};
use crate::compose::compose_drawing;
use crate::config::DrawingConfig;
use crate::error::{Error, Result};
use crate::model::{ConnectorSpec, Gender, View};
use crate::svg::Layer;

/// Lower-case, collapse every run of characters outside `[a-z0-9]` into a
/// single underscore, and strip leading and trailing underscores.
pub fn sanitize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut pending_sep = false;
    for c in stem.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

pub fn file_name(file_tag: &str, gender: Gender, view: View) -> String {
    format!("{}.svg", sanitize_stem(&format!("{file_tag}_{gender}_{view}")))
}

#[derive(Clone, Debug)]
pub struct RenderedDrawing {
    pub connector_id: String,
    pub gender: Gender,
    pub view: View,
    pub file_name: String,
    pub svg: String,
}

fn render_spec(
    spec: &ConnectorSpec,
    include_caption: bool,
    config: &DrawingConfig,
    out: &mut Vec<RenderedDrawing>,
) -> Result<()> {
    for gender in Gender::ALL {
        for view in View::ALL {
            let drawing = compose_drawing(spec, gender, view, include_caption, config)?;
            out.push(RenderedDrawing {
                connector_id: spec.id().to_string(),
                gender,
                view,
                file_name: file_name(spec.file_tag(), gender, view),
                svg: drawing.to_svg_string(),
            });
        }
    }
    Ok(())
}

/// Render every connector × gender × view. Validation runs over the whole
/// catalog first, so nothing is rendered when any record is inconsistent.
pub fn render_catalog(
    catalog: &Catalog,
    include_caption: bool,
    config: &DrawingConfig,
) -> Result<Vec<RenderedDrawing>> {
    let specs = load_specs(catalog)?;
    render_specs(&specs, include_caption, config)
}

/// Render already validated specs.
pub fn render_specs(
    specs: &[ConnectorSpec],
    include_caption: bool,
    config: &DrawingConfig,
) -> Result<Vec<RenderedDrawing>> {
    let mut out = Vec::with_capacity(specs.len() * 4);
    for spec in specs {
        render_spec(spec, include_caption, config, &mut out)?;
    }
    Ok(out)
}

/// Write the rendered set into `out_dir`, creating it if needed.
pub fn write_drawings(out_dir: &Path, drawings: &[RenderedDrawing]) -> Result<usize> {
    fs::create_dir_all(out_dir).map_err(|source| Error::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for d in drawings {
        let path = out_dir.join(&d.file_name);
        fs::write(&path, &d.svg).map_err(|source| Error::Write { path, source })?;
        debug!(file = %d.file_name, "wrote drawing");
    }
    Ok(drawings.len())
}

pub fn generate_all_with_config(
    out_dir: &Path,
    catalog: &Catalog,
    include_caption: bool,
    config: &DrawingConfig,
) -> Result<usize> {
    let drawings = render_catalog(catalog, include_caption, config)?;
    let written = write_drawings(out_dir, &drawings)?;
    info!(
        connectors = catalog.connectors.len(),
        written,
        out_dir = %out_dir.display(),
        "generated drawings"
    );
    Ok(written)
}

/// Render and write the whole catalog with the default layout. Returns the
/// number of files written.
pub fn generate_all(out_dir: &Path, catalog: &Catalog, include_caption: bool) -> Result<usize> {
    generate_all_with_config(out_dir, catalog, include_caption, &DrawingConfig::default())
}

#[derive(Clone, Debug, Serialize)]
pub struct ManifestLayer {
    pub id: &'static str,
    pub name: &'static str,
    pub default_enabled: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ManifestOption {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ManifestFile {
    pub gender: Gender,
    pub view: View,
    pub file: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ManifestConnector {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub files: Vec<ManifestFile>,
}

/// Everything a viewer needs to offer layer, gender and view toggles for the
/// generated set.
#[derive(Clone, Debug, Serialize)]
pub struct Manifest {
    pub layers: Vec<ManifestLayer>,
    pub genders: Vec<ManifestOption>,
    pub views: Vec<ManifestOption>,
    pub connectors: Vec<ManifestConnector>,
}

impl Manifest {
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Manifest)
    }
}

pub fn build_manifest(specs: &[ConnectorSpec]) -> Manifest {
    Manifest {
        layers: Layer::ALL
            .iter()
            .map(|&l| ManifestLayer {
                id: l.id(),
                name: l.display_name(),
                default_enabled: l.default_enabled(),
            })
            .collect(),
        genders: Gender::ALL
            .iter()
            .map(|&g| ManifestOption {
                id: g.as_str(),
                name: g.display_name(),
            })
            .collect(),
        views: View::ALL
            .iter()
            .map(|&v| ManifestOption {
                id: v.as_str(),
                name: v.display_name(),
            })
            .collect(),
        connectors: specs
            .iter()
            .map(|spec| ManifestConnector {
                id: spec.id().to_string(),
                name: spec.label().to_string(),
                designation: spec.designation().to_string(),
                files: Gender::ALL
                    .into_iter()
                    .flat_map(|gender| {
                        View::ALL.into_iter().map(move |view| ManifestFile {
                            gender,
                            view,
                            file: file_name(spec.file_tag(), gender, view),
                        })
                    })
                    .collect(),
            })
            .collect(),
    }
}
