//! Drawing composer: one layered SVG sheet per connector, gender and view.

use tracing::debug;

use crate::config::{DrawingConfig, InfoColumn};
use crate::dimension;
use crate::error::{GeometryError, Result};
use crate::layout::{pin_bounds, row_extremes, sorted_row};
use crate::model::{ConnectorSpec, Gender, Point, View};
use crate::opening::build_opening;
use crate::shell::shell_geometry;
use crate::svg::{Anchor, Baseline, Layer, SvgDocument, SvgLayer, TextStyle};

/// A composed drawing, sized in millimeters.
#[derive(Clone, Debug)]
pub struct Drawing {
    pub document: SvgDocument,
}

impl Drawing {
    pub fn width_mm(&self) -> f64 {
        self.document.width
    }

    pub fn height_mm(&self) -> f64 {
        self.document.height
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_svg_string()
    }
}

/// Greedy word wrap on whitespace. An overlong word keeps a line to itself.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Titled block of info lines starting at `y`. Returns the y for the next
/// block; an empty block draws nothing and does not advance.
fn info_block(
    layer: &mut SvgLayer,
    x: f64,
    mut y: f64,
    title: &str,
    lines: &[String],
    style: &InfoColumn,
) -> f64 {
    if lines.is_empty() {
        return y;
    }
    let title_style = TextStyle::new(style.title_size, Anchor::Start, Baseline::Hanging).bold();
    let line_style = TextStyle::new(style.line_size, Anchor::Start, Baseline::Hanging);
    layer.text(x, y, title, title_style);
    y += style.title_advance;
    for line in lines {
        layer.text(x, y, line, line_style);
        y += style.line_advance;
    }
    y + style.block_gap
}

fn insert_lines(spec: &ConnectorSpec, view: View, counts: &[usize], info: &InfoColumn) -> Vec<String> {
    let p = spec.params();
    let counts_txt = counts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("-");
    let mut lines = vec![
        format!("Density: {}", p.density),
        format!("Rows: {} ({})", p.rows, counts_txt),
        format!("Contact size: {}", p.contact_size),
        format!("Pitch X/Y: {:.3}/{:.3} mm", p.h_pitch_mm, p.v_pitch_mm),
    ];
    if let Some(offset) = p.row_offset_mm {
        lines.push(format!("Offset: {:.3} mm", offset));
    }
    let numbering = match view {
        View::Outside => Some(("Front", p.numbering_front.as_str())),
        View::Solder if !p.numbering_solder.is_empty() => {
            Some(("Solder", p.numbering_solder.as_str()))
        }
        View::Solder => Some(("Solder", p.numbering_front.as_str())),
    };
    if let Some((prefix, text)) = numbering
        && !text.is_empty()
    {
        lines.extend(
            wrap_text(&format!("{prefix}: {text}"), info.wrap_width)
                .into_iter()
                .take(info.numbering_lines),
        );
    }
    lines
}

fn contact_lines(spec: &ConnectorSpec) -> Vec<String> {
    let c = &spec.params().contacts;
    let mut lines = Vec::new();
    if let (Some(min), Some(max)) = (c.male_min_mm, c.male_max_mm) {
        lines.push(format!("Male pin: {:.3}-{:.3} mm", min, max));
    }
    if let Some(min) = c.female_entry_min_mm {
        lines.push(format!("Female entry >= {:.3} mm", min));
    }
    lines
}

fn electrical_lines(spec: &ConnectorSpec) -> Vec<String> {
    let e = &spec.params().electrical;
    let mut lines = Vec::new();
    if let Some(a) = e.max_current_a {
        lines.push(format!("Current: {:.1} A/contact", a));
    }
    if let Some(v) = e.dwv_v {
        lines.push(format!("DWV: {:.0} V RMS", v));
    }
    lines
}

pub fn compose_drawing(
    spec: &ConnectorSpec,
    gender: Gender,
    view: View,
    include_caption: bool,
    config: &DrawingConfig,
) -> Result<Drawing> {
    let p = spec.params();
    let nominal = shell_geometry(p.shell_size, gender);
    let m = &config.margins;

    let outer_w = p.flange_outer_width_mm;
    let outer_h = p.shell_height_mm.unwrap_or(nominal.flange_h);
    let hole_pitch = p.mounting_hole_pitch_mm;

    let mut doc = SvgDocument::new(m.left + outer_w + m.right, m.top + outer_h + m.bottom);

    let (ox, oy) = (m.left, m.top);
    let (cx, cy) = (ox + outer_w / 2.0, oy + outer_h / 2.0);

    let pins = spec.pin_positions(gender, view)?;
    let bounds = pin_bounds(&pins).ok_or(GeometryError::EmptyPinSet)?;
    let opening = build_opening(
        Point::new(cx, cy),
        &nominal,
        outer_w,
        bounds.width(),
        bounds.height(),
        &config.opening,
    )?;
    let opening_path = opening.rounded_path()?;

    // Shell, mounting holes, opening and pins.
    let strokes = &config.strokes;
    let hole_r = p.screw_hole_dia_mm.unwrap_or(config.default_hole_diameter_mm) / 2.0;
    let (hcx1, hcx2) = (cx - hole_pitch / 2.0, cx + hole_pitch / 2.0);
    {
        let base = doc.layer_mut(Layer::Base);
        base.rounded_rect(ox, oy, outer_w, outer_h, strokes.shell_corner_radius, strokes.shell);
        base.circle(hcx1, cy, hole_r, strokes.hole, "none");
        base.circle(hcx2, cy, hole_r, strokes.hole, "none");
        base.path(&opening_path.to_svg_data(), strokes.opening);
        let pin_r = config.pin_radii.for_rows(p.rows);
        let fill = match gender {
            Gender::Male => "black",
            Gender::Female => "white",
        };
        for pin in &pins {
            base.circle(cx + pin.x, cy + pin.y, pin_r, strokes.pin, fill);
        }
    }

    {
        let labels = doc.layer_mut(Layer::PinLabels);
        let size = config.pin_label_size;
        for row in 0..p.rows {
            if let Some((left, right)) = row_extremes(&pins, row) {
                let y = cy + left.y;
                labels.text(
                    ox - config.pin_label_pad,
                    y,
                    &left.number.to_string(),
                    TextStyle::new(size, Anchor::End, Baseline::Middle).bold(),
                );
                labels.text(
                    ox + outer_w + config.pin_label_pad,
                    y,
                    &right.number.to_string(),
                    TextStyle::new(size, Anchor::Start, Baseline::Middle).bold(),
                );
            }
        }
    }

    let dims = &config.dimensions;
    {
        let flange = doc.layer_mut(Layer::FlangeDimensions);
        dimension::horizontal(
            flange,
            ox,
            ox + outer_w,
            oy - dims.flange_width_above,
            oy,
            &format!("{:.2} mm", outer_w),
        );
        dimension::horizontal(
            flange,
            hcx1,
            hcx2,
            oy + outer_h + dims.hole_pitch_below,
            cy,
            &format!("{:.2} mm", hole_pitch),
        );
        dimension::vertical(
            flange,
            oy,
            oy + outer_h,
            ox + outer_w + dims.flange_height_right,
            ox + outer_w,
            &format!("{:.2} mm", outer_h),
        );
    }

    {
        let pitch = doc.layer_mut(Layer::PitchDimensions);
        let top_row = sorted_row(&pins, 0);
        if let [first, second, ..] = top_row.as_slice() {
            dimension::horizontal_leader(
                pitch,
                cx + first.x,
                cx + second.x,
                opening.top_y() - dims.h_pitch_above_opening,
                &format!("H pitch={:.3} mm", p.h_pitch_mm),
            );
        }
        if p.rows >= 2
            && let (Some(r0), Some(r1)) = (top_row.first(), sorted_row(&pins, 1).first().copied())
        {
            dimension::vertical_leader(
                pitch,
                cy + r0.y,
                cy + r1.y,
                ox - dims.v_pitch_left_of_shell,
                &format!("V pitch={:.3} mm", p.v_pitch_mm),
            );
            let offset = p.row_offset_mm.unwrap_or((r1.x - r0.x).abs());
            dimension::horizontal_leader(
                pitch,
                cx + r0.x,
                cx + r1.x,
                cy + opening.height / 2.0 + dims.row_offset_below_opening,
                &format!("Row offset={:.3} mm", offset),
            );
        }
    }

    let info = &config.info;
    let info_x = ox + outer_w + info.offset_x;
    let counts = spec.resolved_row_counts()?;
    let mut cursor = oy + info.start_y;
    cursor = info_block(
        doc.layer_mut(Layer::InsertInfo),
        info_x,
        cursor,
        "Insert",
        &insert_lines(spec, view, &counts, info),
        info,
    );
    cursor = info_block(
        doc.layer_mut(Layer::ContactsInfo),
        info_x,
        cursor,
        "Contacts",
        &contact_lines(spec),
        info,
    );
    cursor = info_block(
        doc.layer_mut(Layer::ElectricalInfo),
        info_x,
        cursor,
        "Electrical",
        &electrical_lines(spec),
        info,
    );
    let standards: Vec<String> = p
        .standards
        .iter()
        .flat_map(|s| wrap_text(s, info.wrap_width))
        .collect();
    cursor = info_block(
        doc.layer_mut(Layer::StandardsInfo),
        info_x,
        cursor,
        "Standards",
        &standards,
        info,
    );
    if let Some(panel) = &p.panel_cutout {
        let mut lines = vec![format!(
            "T/B/H: {:.2}/{:.2}/{:.2} mm",
            panel.top_width, panel.bottom_width, panel.height
        )];
        if let Some(r) = panel.corner_radius {
            lines.push(format!("Angle {:.1} deg, R {:.2} mm", panel.side_angle_deg, r));
        }
        info_block(
            doc.layer_mut(Layer::PanelCutout),
            info_x,
            cursor,
            "Panel cutout",
            &lines,
            info,
        );
    }

    if include_caption {
        let y = oy + outer_h + m.bottom - config.caption_from_bottom;
        doc.layer_mut(Layer::Caption).text(
            cx,
            y,
            &format!("{} - {} - {}", p.designation, gender, view),
            TextStyle::new(config.caption_size, Anchor::Middle, Baseline::Middle),
        );
    }

    debug!(
        id = %p.id,
        %gender,
        %view,
        pins = pins.len(),
        opening_w = opening.top_width,
        opening_h = opening.height,
        "composed drawing"
    );
    Ok(Drawing { document: doc })
}

/// SVG text for one drawing with the default layout.
pub fn generate_svg(
    spec: &ConnectorSpec,
    gender: Gender,
    view: View,
    include_caption: bool,
) -> Result<String> {
    compose_drawing(spec, gender, view, include_caption, &DrawingConfig::default())
        .map(|d| d.to_svg_string())
}
