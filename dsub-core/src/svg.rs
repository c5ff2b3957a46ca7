//! Minimal SVG writer: formatted primitives collected into named layer groups.

use std::fmt::Write as _;

use serde::Serialize;

/// Format millimeters with at most two decimals, trailing zeros trimmed.
pub fn fmt_mm(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Output layers. The id is part of the output contract: consumers toggle
/// layers by matching `data-layer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Base,
    PinLabels,
    FlangeDimensions,
    PitchDimensions,
    PanelCutout,
    InsertInfo,
    ContactsInfo,
    ElectricalInfo,
    StandardsInfo,
    Caption,
}

impl Layer {
    /// Document order.
    pub const ALL: [Layer; 10] = [
        Layer::Base,
        Layer::PinLabels,
        Layer::FlangeDimensions,
        Layer::PitchDimensions,
        Layer::PanelCutout,
        Layer::InsertInfo,
        Layer::ContactsInfo,
        Layer::ElectricalInfo,
        Layer::StandardsInfo,
        Layer::Caption,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::PinLabels => "pin_labels",
            Layer::FlangeDimensions => "flange_dimensions",
            Layer::PitchDimensions => "pitch_dimensions",
            Layer::PanelCutout => "panel_cutout",
            Layer::InsertInfo => "insert_info",
            Layer::ContactsInfo => "contacts_info",
            Layer::ElectricalInfo => "electrical_info",
            Layer::StandardsInfo => "standards_info",
            Layer::Caption => "caption",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Layer::Base => "Shell and pins",
            Layer::PinLabels => "Pin labels",
            Layer::FlangeDimensions => "Flange dimensions",
            Layer::PitchDimensions => "Pitch dimensions",
            Layer::PanelCutout => "Panel cutout",
            Layer::InsertInfo => "Insert data",
            Layer::ContactsInfo => "Contact data",
            Layer::ElectricalInfo => "Electrical data",
            Layer::StandardsInfo => "Standards",
            Layer::Caption => "Caption",
        }
    }

    pub fn default_enabled(self) -> bool {
        !matches!(
            self,
            Layer::PanelCutout | Layer::ContactsInfo | Layer::ElectricalInfo | Layer::StandardsInfo
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Middle,
    Alphabetic,
    Hanging,
}

impl Baseline {
    fn as_str(self) -> &'static str {
        match self {
            Baseline::Middle => "middle",
            Baseline::Alphabetic => "alphabetic",
            Baseline::Hanging => "hanging",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: Anchor,
    pub baseline: Baseline,
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(size: f64, anchor: Anchor, baseline: Baseline) -> Self {
        TextStyle {
            size,
            anchor,
            baseline,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Arrowhead direction: the tip points this way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// One `<g data-layer="…">` group.
#[derive(Clone, Debug)]
pub struct SvgLayer {
    layer: Layer,
    body: String,
}

impl SvgLayer {
    pub fn new(layer: Layer) -> Self {
        SvgLayer {
            layer,
            body: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, dash: Option<&str>) {
        let _ = write!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\" stroke-width=\"{}\" fill=\"none\"",
            fmt_mm(x1),
            fmt_mm(y1),
            fmt_mm(x2),
            fmt_mm(y2),
            fmt_mm(stroke_width)
        );
        if let Some(dash) = dash {
            let _ = write!(self.body, " stroke-dasharray=\"{}\"", dash);
        }
        self.body.push_str("/>\n");
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, stroke_width: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" stroke=\"black\" stroke-width=\"{}\" fill=\"{}\"/>",
            fmt_mm(cx),
            fmt_mm(cy),
            fmt_mm(r),
            fmt_mm(stroke_width),
            fill
        );
    }

    pub fn rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, r: f64, stroke_width: f64) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"none\" stroke=\"black\" stroke-width=\"{}\"/>",
            fmt_mm(x),
            fmt_mm(y),
            fmt_mm(w),
            fmt_mm(h),
            fmt_mm(stroke_width),
            r = fmt_mm(r)
        );
    }

    pub fn path(&mut self, d: &str, stroke_width: f64) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"black\" stroke-width=\"{}\"/>",
            d,
            fmt_mm(stroke_width)
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" fill=\"black\" font-size=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\" font-family=\"{}\"",
            fmt_mm(x),
            fmt_mm(y),
            fmt_mm(style.size),
            style.anchor.as_str(),
            style.baseline.as_str(),
            FONT_FAMILY
        );
        if style.bold {
            self.body.push_str(" font-weight=\"bold\"");
        }
        let _ = writeln!(self.body, ">{}</text>", svg_escape(content));
    }

    /// Filled triangular arrowhead with its tip at (x, y).
    pub fn arrow(&mut self, x: f64, y: f64, dir: Direction, size: f64) {
        let half = size / 2.0;
        let pts = match dir {
            Direction::Left => [(x, y), (x + size, y - half), (x + size, y + half)],
            Direction::Right => [(x, y), (x - size, y - half), (x - size, y + half)],
            Direction::Up => [(x, y), (x - half, y + size), (x + half, y + size)],
            Direction::Down => [(x, y), (x - half, y - size), (x + half, y - size)],
        };
        let points = pts
            .iter()
            .map(|(px, py)| format!("{},{}", fmt_mm(*px), fmt_mm(*py)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            self.body,
            "<polygon points=\"{}\" fill=\"black\" stroke=\"black\" stroke-width=\"0\"/>",
            points
        );
    }
}

/// A complete drawing: canvas size in millimeters plus every layer in
/// [`Layer::ALL`] order.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    pub width: f64,
    pub height: f64,
    layers: Vec<SvgLayer>,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        SvgDocument {
            width,
            height,
            layers: Layer::ALL.iter().map(|&l| SvgLayer::new(l)).collect(),
        }
    }

    // `layers` is built from `Layer::ALL`, which follows declaration order.
    pub fn layer_mut(&mut self, layer: Layer) -> &mut SvgLayer {
        &mut self.layers[layer as usize]
    }

    pub fn layer(&self, layer: Layer) -> &SvgLayer {
        &self.layers[layer as usize]
    }

    pub fn to_svg_string(&self) -> String {
        let w = fmt_mm(self.width);
        let h = fmt_mm(self.height);
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            s,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">"
        );
        let _ = writeln!(
            s,
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"white\"/>"
        );
        s.push_str("<g>\n");
        for layer in &self.layers {
            let _ = writeln!(s, "<g data-layer=\"{}\">", layer.layer.id());
            s.push_str(&layer.body);
            s.push_str("</g>\n");
        }
        s.push_str("</g>\n</svg>\n");
        s
    }
}
