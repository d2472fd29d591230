//! Disk Sim entry point
//!
//! Headless driver: builds a population and steps it on a synthetic clock,
//! standing in for a render loop. Usage: `disk-sim [settings.json]`

use std::path::PathBuf;

use disk_sim::Settings;
use disk_sim::render;
use disk_sim::sim::{PopulationStats, create_population_with, step};

fn main() {
    env_logger::init();
    log::info!("Disk Sim starting...");

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());

    let params = settings.population();
    let mut bodies = match create_population_with(&params, settings.seed, settings.count) {
        Ok(bodies) => bodies,
        Err(e) => {
            log::error!("Failed to create population: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Created {} bodies with seed: {}", bodies.len(), settings.seed);

    for frame in 1..=settings.frames {
        step(&mut bodies, settings.frame_time(frame));

        if settings.report_every > 0 && frame % settings.report_every == 0 {
            report(frame, &PopulationStats::measure(&bodies));
        }
    }

    let stats = PopulationStats::measure(&bodies);
    report(settings.frames, &stats);

    let instances = render::instances(&bodies);
    log::info!(
        "Done: {} draw instances ({} bytes)",
        instances.len(),
        render::as_bytes(&instances).len()
    );
}

fn report(frame: u32, stats: &PopulationStats) {
    log::info!(
        "frame {:>5}: momentum=({:+.6}, {:+.6}) energy={:.3e} overlaps={} at_walls={}",
        frame,
        stats.momentum.x,
        stats.momentum.y,
        stats.kinetic_energy,
        stats.overlapping_pairs,
        stats.touching_walls
    );
}
