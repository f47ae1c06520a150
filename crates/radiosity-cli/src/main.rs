//! `radiosity` CLI front end: load a scene file, run whichever pipeline
//! stages it still needs, and report a summary of the resulting per-vertex
//! colors.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use radiosity_core::{Color, PatchSet, RadiosityConfig, Scene};

/// Progressive radiosity solver.
///
/// Loads a scene from `inputFile`, subdivides/visibility-links/form-factors
/// it if its format doesn't already carry that data, then runs
/// `numIterations` Jacobi gather/scatter passes and reports a summary of
/// the resulting per-vertex colors.
#[derive(Parser, Debug)]
#[command(name = "radiosity")]
struct Args {
    /// Maximum edge length a subdivided patch may have.
    patch_size: f32,

    /// Scene file to load: `.obj`, `.pat`, `.los`, or `.for`.
    input_file: PathBuf,

    /// Number of progressive Jacobi gather/scatter passes to run.
    num_iterations: u32,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if args.patch_size <= 0.0 {
        bail!("patchSize must be positive, got {}", args.patch_size);
    }
    if args.num_iterations == 0 {
        bail!("numIterations must be positive, got {}", args.num_iterations);
    }

    let config = RadiosityConfig {
        patch_size: args.patch_size,
        iterations: args.num_iterations,
        ..RadiosityConfig::default()
    };

    let extension = args
        .input_file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .with_context(|| format!("{} has no file extension", args.input_file.display()))?;

    let mut scene = match extension.as_str() {
        "obj" => {
            let quads = radiosity_formats::read_obj(&args.input_file)
                .with_context(|| format!("reading {}", args.input_file.display()))?;
            Scene::build(quads, &config).context("building scene from quads")?
        }
        "pat" => {
            let patches = radiosity_formats::read_pat(&args.input_file)
                .with_context(|| format!("reading {}", args.input_file.display()))?;
            let mut set = PatchSet::new();
            for patch in patches {
                set.push(patch);
            }
            radiosity_core::compute_visibility(&mut set);
            radiosity_core::compute_form_factors(&[], &mut set, config.hemicube_subdivision)
                .context("computing form factors")?;
            Scene::from_patches(Vec::new(), set)
        }
        "los" => {
            let mut set = radiosity_formats::read_los(&args.input_file)
                .with_context(|| format!("reading {}", args.input_file.display()))?;
            radiosity_core::compute_form_factors(&[], &mut set, config.hemicube_subdivision)
                .context("computing form factors")?;
            Scene::from_patches(Vec::new(), set)
        }
        "for" => {
            let set = radiosity_formats::read_for(&args.input_file)
                .with_context(|| format!("reading {}", args.input_file.display()))?;
            Scene::from_patches(Vec::new(), set)
        }
        other => bail!("unrecognized scene file extension {other:?}"),
    };

    scene.solve(&config).context("solving radiosity")?;

    print_summary(&scene.patches);
    Ok(())
}

/// Print patch count plus min/max/mean of every distinct vertex color the
/// solve wrote into the scene's corner points. Corners are shared between
/// adjacent patches, so points are deduplicated by pointer identity before
/// being folded into the summary.
fn print_summary(patches: &PatchSet) {
    println!("patches: {}", patches.len());

    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    for patch in patches.iter() {
        for corner in [&patch.a, &patch.b, &patch.c, &patch.d] {
            if seen.insert(Rc::as_ptr(corner) as usize) {
                colors.push(corner.borrow().color());
            }
        }
    }

    if colors.is_empty() {
        println!("vertices: 0");
        return;
    }

    let min = colors.iter().fold(colors[0], |acc, &c| {
        Color::new(acc.r.min(c.r), acc.g.min(c.g), acc.b.min(c.b))
    });
    let max = colors.iter().fold(colors[0], |acc, &c| {
        Color::new(acc.r.max(c.r), acc.g.max(c.g), acc.b.max(c.b))
    });
    let sum = colors
        .iter()
        .fold(Color::BLACK, |acc, &c| acc + c);
    let mean = sum * (1.0 / colors.len() as f32);

    println!("vertices: {}", colors.len());
    println!("color min: ({:.4}, {:.4}, {:.4})", min.r, min.g, min.b);
    println!("color max: ({:.4}, {:.4}, {:.4})", max.r, max.g, max.b);
    println!("color mean: ({:.4}, {:.4}, {:.4})", mean.r, mean.g, mean.b);
}
