//! Headless Axe Toss
//!
//! Runs the simulation without a window: a scripted thrower picks the
//! nearest standing target, charges, releases, and repeats. Progress is
//! logged once per simulated second.
//!
//! Run with: cargo run --bin axe_toss_headless -- --seconds 30 --seed 7
//! Verbose:  RUST_LOG=axe_toss_engine=trace cargo run --bin axe_toss_headless

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use axe_toss_engine::{FrameTransforms, SimConfig, Simulation, Viewport};

#[derive(Parser)]
#[command(name = "axe_toss_headless")]
#[command(version = "0.1.0")]
#[command(about = "Run a scripted axe throwing session without rendering", long_about = None)]
struct Cli {
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to this path and continue
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated session length in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Host frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// How long the bot holds each throw (seconds)
    #[arg(long, default_value_t = 0.9)]
    hold: f64,
}

/// Scripted pointer: aim at a target, hold, release, pause.
#[derive(Clone, Copy)]
enum Bot {
    Waiting { until: f64 },
    Charging { release_at: f64 },
}

const PAUSE_BETWEEN_THROWS: f64 = 0.25;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimConfig::load(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "config rejected, using defaults");
            SimConfig::default()
        }),
        None => SimConfig::default(),
    };

    if let Some(path) = &cli.write_config {
        match config.save(path) {
            Ok(()) => info!(path = %path.display(), "config written"),
            Err(err) => warn!(path = %path.display(), %err, "could not write config"),
        }
    }

    let viewport = Viewport::new(1280.0, 720.0);
    let mut sim = Simulation::new(config, cli.seed);
    sim.set_viewport(viewport);

    let step = 1.0 / cli.fps.max(1) as f64;
    let frames = (cli.seconds.max(0.0) as f64 / step).ceil() as u64;

    let mut frame = FrameTransforms::new();
    let mut bot = Bot::Waiting { until: 0.0 };
    let mut throws = 0u32;
    let mut hits = 0usize;
    let mut ground_hits = 0usize;
    let mut next_report = 1.0;

    for i in 0..=frames {
        let now = i as f64 * step;

        bot = match bot {
            Bot::Waiting { until } if now >= until => match aim_target(&sim, viewport) {
                Some((x, y)) => {
                    sim.pointer_down(x, y, now);
                    Bot::Charging {
                        release_at: now + cli.hold,
                    }
                }
                None => Bot::Waiting {
                    until: now + PAUSE_BETWEEN_THROWS,
                },
            },
            Bot::Charging { release_at } if now >= release_at => {
                let center = (viewport.width * 0.5, viewport.height * 0.5);
                let (x, y) = aim_target(&sim, viewport).unwrap_or(center);
                sim.pointer_up(x, y, now);
                throws += 1;
                Bot::Waiting {
                    until: now + PAUSE_BETWEEN_THROWS,
                }
            }
            Bot::Charging { .. } => {
                if let Some((x, y)) = aim_target(&sim, viewport) {
                    sim.pointer_move(x, y);
                }
                bot
            }
            waiting => waiting,
        };

        let report = sim.frame(now, &mut frame);
        hits += report.hits();
        ground_hits += report.events.len() - report.hits();

        if report.elapsed >= next_report {
            info!(
                elapsed = report.elapsed,
                score = report.score,
                throws,
                hits,
                ground_hits,
                in_flight = sim.projectiles().active_count(),
                targets_up = sim.targets().alive_count(),
                visible = frame.visible_count(),
                "session"
            );
            next_report += 1.0;
        }
    }

    info!(
        score = sim.score(),
        throws,
        hits,
        frames = sim.frame_count(),
        "session finished"
    );
}

/// Screen position of the nearest standing target, if any is in view.
fn aim_target(sim: &Simulation, viewport: Viewport) -> Option<(f32, f32)> {
    let camera = sim.camera();
    sim.targets()
        .alive()
        .filter_map(|target| {
            let screen = camera.world_to_screen(target.position, viewport)?;
            let distance = target.position.distance(camera.position);
            Some((distance, screen))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, screen)| (screen.x, screen.y))
}
