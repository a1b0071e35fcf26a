//! Carve demo: generates a clump, runs a sequence of brush strokes and
//! reports what the lifecycle cascade produced.
//!
//! Usage: cargo run --release --bin carve_demo -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   JSON ClumpConfig (default: built-in defaults)
//!   --seed <SEED>     Noise seed (overrides config)
//!   --strokes <N>     Number of cut strokes across the clump (default: 12)
//!   --radius <R>      Brush radius in cells (default: 4.0)
//!   --rate <RATE>     Brush rate (default: 0.125)
//!   --export <PATH>   Write meshes and colliders of survivors as JSON

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use glam::Vec2;
use serde_json::json;

use clump::clump::{ClumpWorld, LifecycleEvent};
use clump::core::ClumpConfig;
use clump::math::Transform2D;

fn main() {
    if let Err(e) = clump::core::logging::init() {
        eprintln!("Logging disabled: {}", e);
    }

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> clump::core::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_arg::<String>(&args, "--config") {
        Some(path) => ClumpConfig::load(path)?,
        None => ClumpConfig::default(),
    };
    if let Some(seed) = parse_arg::<u32>(&args, "--seed") {
        config.noise.seed = seed;
    }
    let strokes = parse_arg::<usize>(&args, "--strokes").unwrap_or(12);
    let radius = parse_arg::<f32>(&args, "--radius").unwrap_or(4.0);
    let rate = parse_arg::<f32>(&args, "--rate").unwrap_or(0.125);
    let export = parse_arg::<PathBuf>(&args, "--export");

    println!("=== Clump Carve Demo ===");
    println!("Grid:    {}x{} cells of {}", config.grid_size, config.grid_size, config.cell_size);
    println!("Seed:    {}", config.noise.seed);
    println!("Strokes: {} (radius {}, rate {})", strokes, radius, rate);
    println!();

    let mut world = ClumpWorld::new(config)?;
    let (root, report) = world.spawn_generated(Transform2D::identity());
    println!(
        "Generated clump {:?}: {} regions, {} clumps alive",
        root, report.regions_found, world.len()
    );

    // Sweep a horizontal line of cuts through the middle of the grid.
    let extent = world.config().grid_size as f32 * world.config().cell_size;
    let start = Instant::now();
    for i in 0..strokes {
        let Some(target) = world.ids().into_iter().next() else {
            println!("Everything was carved away after {} strokes", i);
            break;
        };
        let t = (i as f32 + 0.5) / strokes as f32;
        let position = Vec2::new(extent * t, extent * 0.5);
        let outcome = world.edit(target, position, -radius, rate)?;
        log::debug!(
            "Stroke {} on {:?}: {} cells changed, {} created, {} destroyed",
            i, target, outcome.edit.cells_changed,
            outcome.process.created.len(), outcome.process.destroyed.len()
        );
    }
    let elapsed = start.elapsed();

    let mut created = 0;
    let mut destroyed = 0;
    for event in world.drain_events() {
        match event {
            LifecycleEvent::Created { .. } => created += 1,
            LifecycleEvent::Destroyed { .. } => destroyed += 1,
        }
    }

    println!();
    println!("Done in {:.1}ms: {} created, {} destroyed, {} alive",
        elapsed.as_secs_f64() * 1000.0, created, destroyed, world.len());
    for id in world.ids() {
        let Some(clump) = world.get(id) else { continue };
        let mass = clump.mass().map_or(0.0, |m| m.mass);
        println!(
            "  {:?}: mass {:.1}, {} triangles, {} colliders, at {:?}",
            id, mass, clump.mesh().triangle_count(), clump.colliders().len(),
            clump.transform().position
        );
    }

    if let Some(path) = export {
        let clumps: Vec<_> = world
            .ids()
            .into_iter()
            .filter_map(|id| world.get(id))
            .map(|clump| json!({
                "id": clump.id().0,
                "transform": clump.transform(),
                "mass": clump.mass().map(|m| m.mass),
                "mesh": clump.mesh(),
                "colliders": clump.colliders(),
            }))
            .collect();
        std::fs::write(&path, serde_json::to_string_pretty(&clumps)?)?;
        println!("Exported {} clumps to {}", clumps.len(), path.display());
    }

    Ok(())
}

/// Value following `flag`, parsed as `T`.
fn parse_arg<T: FromStr>(args: &[String], flag: &str) -> Option<T> {
    let i = args.iter().position(|a| a == flag)?;
    args.get(i + 1)?.parse().ok()
}
