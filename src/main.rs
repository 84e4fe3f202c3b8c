//! Starfield probe - builds an index over a synthetic catalog and reports
//! what a camera would see.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>     JSON session config (default: built-in defaults)
//!   --stars <N>         Synthetic catalog size (default: 50000)
//!   --camera <X,Y,Z>    Camera position (default: 0,0,4000)
//!   --radius <R>        Visibility radius override
//!   --target <N>        Load cap override
//!   --find <SOURCE>     Move the camera to the star with this source id

use std::path::Path;
use std::time::Instant;

use starfield::catalog::{StarCatalog, StarId, StarRecord};
use starfield::core::{logging, DVec3, Result, StarfieldConfig};
use starfield::spatial::PointOctree;
use starfield::visibility::{ViewChange, VisibilityManager};

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = match parse_str_arg(args, "--config") {
        Some(path) => StarfieldConfig::load(Path::new(&path))?,
        None => StarfieldConfig::default(),
    };
    let stars = parse_usize_arg(args, "--stars").unwrap_or(50_000);
    let camera = parse_vec3_arg(args, "--camera").unwrap_or(DVec3::new(0.0, 0.0, 4000.0));

    let start = Instant::now();
    let catalog = StarCatalog::from_records(synthetic_records(stars), &config.catalog)?;
    let mut index: PointOctree<StarId> = PointOctree::new(&config.octree)?;
    let mut manager = VisibilityManager::new(&config.visibility)?.with_camera(camera)?;

    let mut visible = manager.update_visible_stars(&mut index, &catalog).len();

    if let Some(radius) = parse_f64_arg(args, "--radius") {
        visible = manager.apply(ViewChange::MaxDistance(radius), &mut index, &catalog)?.len();
    }
    if let Some(target) = parse_usize_arg(args, "--target") {
        visible = manager.apply(ViewChange::TargetCount(target), &mut index, &catalog)?.len();
    }
    if let Some(source) = parse_str_arg(args, "--find") {
        match catalog.find_source(&source).and_then(|(id, _)| catalog.position(id)) {
            Some(position) => {
                log::info!("Star {} found at {:?}", source, position);
                visible = manager.apply(ViewChange::CameraMoved(position), &mut index, &catalog)?.len();
            }
            None => log::warn!("Star {} not found", source),
        }
    }

    let stats = index.stats();
    println!("=== Starfield Probe ===");
    println!("Catalog:  {} stars", catalog.len());
    println!("Loaded:   {} ({:?})", manager.loaded_count(), manager.load_state(&catalog));
    println!("Rejected: {}", manager.rejected_count());
    println!("Index:    {} points, {} nodes, depth {}, {} overflowing",
        stats.points, stats.nodes, stats.depth, stats.overflowing_nodes);
    println!("Camera:   {:?}, radius {}", manager.camera(), manager.max_distance());
    println!("Visible:  {}", visible);
    println!("Elapsed:  {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}

/// Deterministic catalog spread over the whole sky
fn synthetic_records(count: usize) -> Vec<StarRecord> {
    let golden = 0.618_033_988_75;
    (0..count)
        .map(|i| {
            let t = i as f64;
            let ra_hours = (t * golden).fract() * 24.0;
            let dec_deg = (1.0 - 2.0 * (t + 0.5) / count as f64).asin().to_degrees();
            // Every 97th star has no usable parallax
            let parallax_mas = if i % 97 == 0 { 0.0 } else { 0.5 + (t * 0.37).fract() * 20.0 };
            let mut record = StarRecord::new(format!("{}", 4_295_806_720u64 + i as u64), ra_hours, dec_deg, parallax_mas);
            record.bp_rp = (t * 0.13).fract() * 2.4 - 0.4;
            record
        })
        .collect()
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_vec3_arg(args: &[String], flag: &str) -> Option<DVec3> {
    let raw = parse_str_arg(args, flag)?;
    let parts: Vec<f64> = raw.split(',').map(|s| s.trim().parse().ok()).collect::<Option<_>>()?;
    match parts.as_slice() {
        [x, y, z] => Some(DVec3::new(*x, *y, *z)),
        _ => None,
    }
}
