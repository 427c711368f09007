// main.rs
//
// Command line front end: generate a trap layout, cut a ground plane out of
// an existing drawing, summarize a drawing, or write an example parameter
// file.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use geo::Area;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trapgen::aabb::BoardOutline;
use trapgen::float_types::{Real, set_tolerance};
use trapgen::ground::{GroundPlane, to_geo_polygon};
use trapgen::io::dxf::{Orientation, faces_from_dxf, read_dxf, write_dxf};
use trapgen::layout::Contour;
use trapgen::params::{ParameterSet, example_document};

const EXAMPLE_LAYOUT: &str = "example_layout.toml";

#[derive(Parser)]
#[command(name = "trapgen")]
#[command(about = "Electrode layout and ground plane generator for planar ion traps")]
struct Cmd {
    /// Override the geometric tolerance
    #[arg(long, global = true)]
    tolerance: Option<Real>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a complete trap layout as DXF
    Generate {
        /// TOML parameter file, defaults are used when omitted
        #[arg(long)]
        params: Option<PathBuf>,
        /// Output file, defaults to newtrap_<timestamp>.dxf
        #[arg(long)]
        output: Option<PathBuf>,
        /// Swap x and y in the drawing
        #[arg(long)]
        transpose: bool,
    },
    /// Cut out the ground plane for an existing electrode layout
    Cutout {
        /// DXF file containing just the electrode layout
        layout: PathBuf,
        /// Output DXF file
        output: PathBuf,
        /// Width of the ground plane to cut out
        #[arg(long)]
        width: Real,
        /// Height of the ground plane to cut out
        #[arg(long)]
        height: Real,
        /// Spacing between electrodes and ground plane
        #[arg(long)]
        gap: Real,
        /// Swap x and y when reading and writing
        #[arg(long)]
        transpose: bool,
    },
    /// List the layers of a drawing with their face count and covered area
    Inspect {
        /// DXF file to summarize
        drawing: PathBuf,
    },
    /// Write an example parameter file holding the defaults
    Example {
        #[arg(long, default_value = EXAMPLE_LAYOUT)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cmd = Cmd::parse();
    if let Some(tolerance) = cmd.tolerance {
        set_tolerance(tolerance);
    }

    match cmd.action {
        Action::Generate {
            params,
            output,
            transpose,
        } => generate(params.as_deref(), output, orientation(transpose)),
        Action::Cutout {
            layout,
            output,
            width,
            height,
            gap,
            transpose,
        } => cutout(&layout, &output, width, height, gap, orientation(transpose)),
        Action::Inspect { drawing } => inspect(&drawing),
        Action::Example { output } => example(&output),
    }
}

fn orientation(transpose: bool) -> Orientation {
    if transpose {
        Orientation::Transposed
    } else {
        Orientation::AsIs
    }
}

fn generate(
    params: Option<&Path>,
    output: Option<PathBuf>,
    orientation: Orientation,
) -> Result<()> {
    let params = match params {
        Some(path) => ParameterSet::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => ParameterSet::default(),
    };
    let output = output.unwrap_or_else(|| {
        PathBuf::from(chrono::Local::now().format("newtrap_%Y%m%d_%H%M%S.dxf").to_string())
    });

    tracing::info!(dc_count = params.dc_count, output = %output.display(), "generate");
    let layers = trapgen::layers::build_layout(&params)?;
    write_dxf(&layers, &output, orientation)?;
    println!("Wrote to '{}'", output.display());
    Ok(())
}

fn cutout(
    layout: &Path,
    output: &Path,
    width: Real,
    height: Real,
    gap: Real,
    orientation: Orientation,
) -> Result<()> {
    if !(width > 0.0 && height > 0.0 && gap >= 0.0) {
        bail!("width and height must be positive and gap must not be negative");
    }

    tracing::info!(layout = %layout.display(), width, height, gap, "cutout");
    let assembler = read_dxf(layout, orientation)
        .with_context(|| format!("reading layout {}", layout.display()))?;
    // offset whole outlines, not the individual faces of the drawing
    let electrodes: Vec<Contour> = assembler.outlines()?;
    if electrodes.is_empty() {
        bail!("{} holds no closed outlines", layout.display());
    }

    let board = BoardOutline::centered(width, height);
    let ground = GroundPlane::from_electrodes(&board, &electrodes, gap)?;
    let layers = assembler.assemble(Some(&ground))?;
    write_dxf(&layers, output, orientation)?;
    println!("Wrote to '{}'", output.display());
    Ok(())
}

fn inspect(drawing: &Path) -> Result<()> {
    let bytes =
        std::fs::read(drawing).with_context(|| format!("reading {}", drawing.display()))?;
    let faces = faces_from_dxf(&bytes, Orientation::AsIs)?;

    let mut summary: BTreeMap<String, (usize, Real)> = BTreeMap::new();
    for (layer, quad) in &faces {
        let entry = summary.entry(layer.clone()).or_default();
        entry.0 += 1;
        entry.1 += to_geo_polygon(quad).unsigned_area();
    }

    println!("{:<12} {:>8} {:>16}", "layer", "faces", "area");
    for (layer, (count, area)) in &summary {
        println!("{layer:<12} {count:>8} {area:>16.1}");
    }
    tracing::info!(layers = summary.len(), faces = faces.len(), "inspected drawing");
    Ok(())
}

fn example(output: &Path) -> Result<()> {
    if output.exists() {
        tracing::warn!(path = %output.display(), "example file exists, left untouched");
        return Ok(());
    }
    std::fs::write(output, example_document())
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote to '{}'", output.display());
    Ok(())
}
