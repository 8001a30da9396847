//! Scene generator binary: places objects and writes scene annotations.
//!
//! Usage: cargo run --release --bin generate_scenes -- [OPTIONS]
//!
//! Output structure:
//!   <output-dir>/
//!     scenes/
//!       00000.json            # One annotation record per image
//!       ...
//!     scenes.json             # All records plus run info
//!
//! Rendering is delegated to the host application; this binary runs the
//! placement against an in-process recording host.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use shapegen::catalog::Catalog;
use shapegen::core::error::AssetKind;
use shapegen::core::logging;
use shapegen::core::types::Result;
use shapegen::generation::{GenerationConfig, PlacementContext, RestartPolicy, SceneGenerator};
use shapegen::host::{AssetLibrary, RecordingHost};
use shapegen::scene::{Scene, SceneCollection, SceneSetup};

/// Procedural scene generator for visual reasoning datasets
#[derive(Parser, Debug)]
#[command(name = "generate_scenes")]
#[command(about = "Place random objects on a ground plane and write scene annotations")]
struct Args {
    /// Properties JSON with shapes, colors, materials and sizes (built-in catalog if omitted)
    #[arg(long)]
    properties: Option<PathBuf>,

    /// Scene setup JSON (render, camera, ground, lights); defaults if omitted
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Number of scenes to generate
    #[arg(long, default_value_t = 5)]
    num_images: usize,

    /// Objects per scene
    #[arg(long, default_value_t = 3)]
    num_objects: usize,

    /// Split name stored in every record
    #[arg(long, default_value = "new")]
    split: String,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Index of the first generated scene
    #[arg(long, default_value_t = 0)]
    start_index: usize,

    /// Directory of `<name>.blend` shape assets; names come from the catalog if omitted
    #[arg(long)]
    shape_dir: Option<PathBuf>,

    /// Directory of `<name>.blend` material node groups
    #[arg(long)]
    material_dir: Option<PathBuf>,

    /// Give up on a scene after this many batch restarts
    #[arg(long)]
    max_restarts: Option<u32>,

    /// Give up on a scene after this many seconds of restarting
    #[arg(long)]
    time_limit_secs: Option<f64>,
}

fn main() {
    logging::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("Scene generation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let catalog = match &args.properties {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let setup = match &args.setup {
        Some(path) => SceneSetup::load(path)?,
        None => SceneSetup::default(),
    };

    let mut host = build_host(args, &catalog)?;

    let mut restart = RestartPolicy::unbounded();
    if let Some(max) = args.max_restarts {
        restart = restart.with_max_restarts(max);
    }
    if let Some(secs) = args.time_limit_secs {
        restart = restart.with_time_limit_secs(secs)?;
    }

    let config = GenerationConfig {
        seed: args.seed,
        num_objects: args.num_objects,
        restart,
        ..Default::default()
    };

    let scenes_dir = args.output_dir.join("scenes");
    std::fs::create_dir_all(&scenes_dir)?;

    println!("=== Scene Generator ===");
    println!("Split:   {}", args.split);
    println!("Images:  {} starting at {}", args.num_images, args.start_index);
    println!("Objects: {} per scene", args.num_objects);
    println!("Seed:    {}", args.seed);
    println!("Output:  {}", args.output_dir.display());
    println!();

    let camera = setup.camera();
    let ctx = PlacementContext {
        catalog: &catalog,
        camera: &camera,
        resolution: setup.resolution(),
    };
    let mut scene = Scene::new(setup.direction_frame()?, args.split.clone());
    let mut generator = SceneGenerator::new(config);
    let mut collection = SceneCollection::new(args.split.clone(), args.seed, setup.clone());

    let start = Instant::now();
    for i in 0..args.num_images {
        let index = args.start_index + i;
        let record = generator.generate_image(&mut scene, index, &ctx, &mut host, None)?;

        record.save(&scenes_dir.join(format!("{:05}.json", index)))?;
        collection.push(record);
    }

    let collection_path = args.output_dir.join("scenes.json");
    collection.save(&collection_path)?;

    println!();
    println!("Generated {} scenes in {:.2}s", collection.scenes.len(), start.elapsed().as_secs_f64());
    println!("Annotations: {}", collection_path.display());
    log::debug!("{} objects discarded by batch restarts", host.deleted_count());
    Ok(())
}

/// Recording host validating against asset directories when given.
fn build_host(args: &Args, catalog: &Catalog) -> Result<RecordingHost> {
    match (&args.shape_dir, &args.material_dir) {
        (None, None) => Ok(RecordingHost::for_catalog(catalog)),
        (shape_dir, material_dir) => {
            let shapes = library_or_catalog(AssetKind::Shape, shape_dir.as_deref(), catalog)?;
            let materials = library_or_catalog(AssetKind::Material, material_dir.as_deref(), catalog)?;
            Ok(RecordingHost::new(shapes, materials))
        }
    }
}

fn library_or_catalog(kind: AssetKind, dir: Option<&Path>, catalog: &Catalog) -> Result<AssetLibrary> {
    let Some(dir) = dir else {
        let names: Vec<String> = match kind {
            AssetKind::Shape => catalog.shapes().iter().map(|s| s.asset.clone()).collect(),
            AssetKind::Material => catalog.materials().iter().map(|m| m.asset.clone()).collect(),
        };
        return Ok(AssetLibrary::from_names(kind, names));
    };

    let library = AssetLibrary::open(kind, dir)?;
    log::info!("Found {} {} assets in {}", library.len(), kind, dir.display());
    Ok(library)
}
