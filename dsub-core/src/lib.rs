//! Geometry and drawing composition for D-subminiature connector sheets.
//!
//! A normalized catalog is validated, turned into [`ConnectorSpec`]s and
//! rendered as one layered SVG per connector, gender and view. All
//! coordinates are millimeters.

pub mod batch;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod dimension;
pub mod error;
pub mod layout;
pub mod model;
pub mod opening;
pub mod path;
pub mod shell;
pub mod svg;

pub use batch::{
    Manifest, RenderedDrawing, build_manifest, file_name, generate_all, generate_all_with_config,
    render_catalog, render_specs, sanitize_stem, write_drawings,
};
pub use catalog::{Catalog, load_specs, validate_catalog};
pub use compose::{Drawing, compose_drawing, generate_svg, wrap_text};
pub use config::DrawingConfig;
pub use error::{CatalogError, Error, GeometryError, Result, SpecError};
pub use layout::{LayoutParams, distribute, generate_pin_positions, pin_bounds};
pub use model::{ConnectorParams, ConnectorSpec, Gender, PinRecord, Point, ShellSize, View};
pub use opening::{OpeningOutline, OpeningParams, build_opening};
pub use path::{RoundedPath, rounded_polygon_path};
pub use shell::{ShellGeometry, lookup_shell, shell_geometry};
pub use svg::Layer;
