//! Headless disc flight demo.
//!
//! Throws a disc from a preset or a JSON state file, flies it either in one
//! batch call or one step per app update, and writes the trajectory as JSON.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use bevy::log::{LogPlugin, info};
use bevy::prelude::{App, MinimalPlugins};
use clap::{Parser, ValueEnum};
use disc_physics::{
    Flight, FlightIntegrator, FlightPlugin, FlightStatus, PhysicalState, ThrowPreset, Trajectory,
};

/// Simulated seconds between progress messages.
const REPORT_INTERVAL: f64 = 0.5;

#[derive(Parser, Debug)]
#[command(name = "discsim")]
#[command(about = "Simulate the flight of a thrown disc", long_about = None)]
struct Cli {
    /// Named throw to simulate
    #[arg(short, long, value_enum, default_value = "normal")]
    preset: Preset,

    /// JSON file holding the initial state, overrides the preset
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Where to write the trajectory JSON (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How to drive the integrator
    #[arg(short, long, value_enum, default_value = "tick")]
    mode: Mode,

    /// Give up after this many simulated seconds
    #[arg(long, default_value = "60.0")]
    time_limit: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Normal,
    Hammer,
    Knife,
    UpsideDown,
    Toss,
}

impl From<Preset> for ThrowPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Normal => ThrowPreset::Normal,
            Preset::Hammer => ThrowPreset::Hammer,
            Preset::Knife => ThrowPreset::Knife,
            Preset::UpsideDown => ThrowPreset::UpsideDown,
            Preset::Toss => ThrowPreset::Toss,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Run to the ground in a single call
    Batch,
    /// Advance one recorded step per app update
    Tick,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default(), FlightPlugin));
    app.finish();
    app.cleanup();

    let initial = initial_state(&cli)?;
    info!(
        "throw from {:.2} m at {:.2} m/s, spin {:.1} rad/s",
        initial.height(),
        initial.speed(),
        initial.spin()
    );

    let integrator = FlightIntegrator::new(initial)
        .context("invalid initial state")?
        .with_time_limit(cli.time_limit);

    let trajectory = match cli.mode {
        Mode::Batch => fly_batch(integrator)?,
        Mode::Tick => fly_ticks(&mut app, integrator)?,
    };

    if let Some(landing) = trajectory.last() {
        info!(
            "landed after {:.2} s at x {:.2} m, z {:.2} m ({} entries)",
            landing.time,
            landing.position.x,
            landing.position.z,
            trajectory.len()
        );
    }

    write_trajectory(cli.output.as_ref(), &trajectory)
}

fn initial_state(cli: &Cli) -> Result<PhysicalState> {
    let Some(path) = &cli.state else {
        return Ok(ThrowPreset::from(cli.preset).state());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn fly_batch(integrator: FlightIntegrator) -> Result<Trajectory> {
    let mut next_report = REPORT_INTERVAL;
    integrator
        .run_with_progress(|time| {
            if time >= next_report {
                info!("t = {time:.2} s");
                next_report += REPORT_INTERVAL;
            }
        })
        .context("flight failed")
}

fn fly_ticks(app: &mut App, integrator: FlightIntegrator) -> Result<Trajectory> {
    let entity = app
        .world_mut()
        .spawn((Flight::new(integrator), PhysicalState::default()))
        .id();

    let mut next_report = REPORT_INTERVAL;
    loop {
        app.update();

        let world = app.world();
        let Some(flight) = world.get::<Flight>(entity) else {
            bail!("flight entity {entity:?} vanished");
        };
        match flight.status() {
            FlightStatus::InFlight { elapsed } => {
                if *elapsed < next_report {
                    continue;
                }
                next_report += REPORT_INTERVAL;
                if let Some(disc) = world.get::<PhysicalState>(entity) {
                    info!(
                        "t = {elapsed:.2} s, height {:.2} m, speed {:.2} m/s",
                        disc.height(),
                        disc.speed()
                    );
                }
            }
            FlightStatus::Landed { .. } => {
                return flight.trajectory().context("landed flight has no trajectory");
            }
            FlightStatus::Failed(err) => {
                return Err(err.clone()).context("flight failed");
            }
        }
    }
}

fn write_trajectory(output: Option<&PathBuf>, trajectory: &Trajectory) -> Result<()> {
    let json = serde_json::to_string_pretty(trajectory).context("serializing trajectory")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
