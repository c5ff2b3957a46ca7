use anyhow::{Context, Result, anyhow, bail};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use dsub_core::{
    Catalog, DrawingConfig, RenderedDrawing, build_manifest, load_specs, render_specs,
    write_drawings,
};

const USAGE: &str = "Usage: dsub-drawings <catalog.json> [--out DIR] [--no-caption] [--config FILE] [--png PX_PER_MM]";

// usvg resolves `mm` at 96 dpi.
const USER_UNITS_PER_MM: f32 = 96.0 / 25.4;

struct Args {
    catalog: PathBuf,
    out_dir: PathBuf,
    include_caption: bool,
    config: Option<PathBuf>,
    png_px_per_mm: Option<f32>,
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut catalog = None;
    let mut out_dir = PathBuf::from("dist/assets/svg");
    let mut include_caption = true;
    let mut config = None;
    let mut png_px_per_mm = None;
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" => out_dir = it.next().context("--out needs a directory")?.into(),
            "--no-caption" => include_caption = false,
            "--config" => config = Some(it.next().context("--config needs a file")?.into()),
            "--png" => {
                let v = it.next().context("--png needs a scale")?;
                let scale: f32 = v.parse().with_context(|| format!("bad --png scale: {v}"))?;
                if !(scale.is_finite() && scale > 0.0) {
                    bail!("--png scale must be positive, got {v}");
                }
                png_px_per_mm = Some(scale);
            }
            s if s.starts_with("--") => bail!("unknown option: {s}"),
            _ if catalog.is_none() => catalog = Some(PathBuf::from(arg.as_str())),
            _ => bail!("unexpected argument: {arg}"),
        }
    }
    Ok(Args {
        catalog: catalog.context("missing catalog path")?,
        out_dir,
        include_caption,
        config,
        png_px_per_mm,
    })
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();
    let args = match parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let catalog = Catalog::from_path(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;
    let config = match &args.config {
        Some(path) => DrawingConfig::from_path(path)
            .with_context(|| format!("loading drawing config {}", path.display()))?,
        None => DrawingConfig::default(),
    };

    let specs = load_specs(&catalog)?;
    let drawings = render_specs(&specs, args.include_caption, &config)?;
    let written = write_drawings(&args.out_dir, &drawings)?;

    let manifest_path = args.out_dir.join("manifest.json");
    let manifest = build_manifest(&specs).to_json_pretty()?;
    fs::write(&manifest_path, manifest)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    if let Some(px_per_mm) = args.png_px_per_mm {
        let fontdb = system_fonts();
        for d in &drawings {
            render_png(d, &args.out_dir, px_per_mm, &fontdb)?;
        }
        info!(count = drawings.len(), px_per_mm, "rendered PNG previews");
    }

    let shown = fs::canonicalize(&args.out_dir).unwrap_or_else(|_| args.out_dir.clone());
    println!("Wrote {} SVG files to: {}", written, shown.display());
    Ok(())
}

fn system_fonts() -> Arc<usvg::fontdb::Database> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    debug!(faces = fontdb.len(), "loaded system fonts");
    Arc::new(fontdb)
}

fn render_png(
    drawing: &RenderedDrawing,
    out_dir: &Path,
    px_per_mm: f32,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> Result<()> {
    let opt = usvg::Options {
        fontdb: fontdb.clone(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(&drawing.svg, &opt)
        .map_err(|e| anyhow!("SVG parse error in {}: {e:?}", drawing.file_name))?;
    let scale = px_per_mm / USER_UNITS_PER_MM;
    let size = tree.size();
    let w_px = (size.width() * scale).ceil() as u32;
    let h_px = (size.height() * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(w_px, h_px).context("pixmap alloc failed")?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pm);

    let path = out_dir.join(Path::new(&drawing.file_name).with_extension("png"));
    encode_png_deterministic(&pixmap, &path)
        .with_context(|| format!("writing {}", path.display()))
}

fn encode_png_deterministic(pixmap: &tiny_skia::Pixmap, path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    let w = pixmap.width();
    let h = pixmap.height();
    let mut enc = Encoder::new(file, w, h);
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    let mut writer = enc.write_header()?;
    writer.write_image_data(pixmap.data())?;
    Ok(())
}
