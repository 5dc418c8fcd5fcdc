//! Headless scanner session.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Load a JSON simulation config
//!   --seed <SEED>     RNG seed (overrides config)
//!   --size <N>        Maze size, odd and >= 3 (overrides config)
//!   --ticks <N>       Ticks to simulate at 60 Hz (default: 1200)
//!   --field           Use the open field scene instead of a maze
//!
//! Walks forward with the trigger held, turning now and then and cycling
//! through the scan patterns, then logs what the buffer collected.

use std::path::PathBuf;
use std::time::Duration;

use winit::keyboard::KeyCode;

use lidarwalk::core::config::{SceneKind, SimulationConfig};
use lidarwalk::core::logging;
use lidarwalk::core::time::FrameTimer;
use lidarwalk::core::Result;
use lidarwalk::Simulation;

/// Ticks between pattern switches
const PATTERN_PERIOD: u64 = 150;
/// Ticks between turns, and how long each turn lasts
const TURN_PERIOD: u64 = 90;
const TURN_TICKS: u64 = 20;

const DIGITS: [KeyCode; 8] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit0,
];

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let mut config = match parse_arg::<PathBuf>(args, "--config") {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            SimulationConfig::load(&path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(seed) = parse_arg(args, "--seed") {
        config.seed = Some(seed);
    }
    if let Some(size) = parse_arg(args, "--size") {
        config.maze.size = size;
    }
    if args.iter().any(|a| a == "--field") {
        config.scene = SceneKind::Field;
    }
    let ticks: u64 = parse_arg(args, "--ticks").unwrap_or(1200);

    let mut sim = Simulation::new(config)?;
    let mut timer = FrameTimer::fixed(Duration::from_secs_f64(1.0 / 60.0));

    sim.key_down(KeyCode::KeyW)?;
    sim.key_down(KeyCode::Space)?;

    let mut changed_ticks = 0u64;
    let mut rays = 0usize;
    let mut hits = 0usize;
    let mut uploads = 0u64;

    for tick in 0..ticks {
        if tick % PATTERN_PERIOD == 0 {
            let key = DIGITS[(tick / PATTERN_PERIOD) as usize % DIGITS.len()];
            sim.key_down(key)?;
            sim.key_up(key)?;
            log::info!("tick {tick}: pattern {:?}", sim.scanner().pattern());
        }
        if tick % TURN_PERIOD < TURN_TICKS {
            sim.key_down(KeyCode::ArrowLeft)?;
        } else if tick % TURN_PERIOD == TURN_TICKS {
            sim.key_up(KeyCode::ArrowLeft)?;
        }

        timer.tick();
        let report = sim.tick(timer.delta_secs())?;
        if report.pose_changed {
            changed_ticks += 1;
        }
        if let Some(stats) = report.scan {
            rays += stats.rays;
            hits += stats.hits;
        }
        // Stand-in for a render upload
        if sim.buffer_mut().take_dirty() {
            uploads += 1;
        }
    }

    let pose = sim.pose();
    let buffer = sim.buffer();
    log::info!(
        "Simulated {} ticks ({:.1}s): pose changed on {} ticks, final position {:?} yaw {:.2}",
        timer.frame_count(),
        timer.elapsed().as_secs_f32(),
        changed_ticks,
        pose.position,
        pose.yaw
    );
    log::info!(
        "Scanner: {} rays, {} hits, {} points held of {} ({} written), {} uploads",
        rays,
        hits,
        buffer.len(),
        buffer.capacity(),
        buffer.total_written(),
        uploads
    );
    Ok(())
}

/// Parse the value following `flag`
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}
