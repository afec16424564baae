mod demo;
mod load;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skyraid_input::InputState;
use skyraid_kernel::{SimEvent, Simulation, WaveDirector};
use skyraid_tools::{Autopilot, SimInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skyraid-cli", about = "Headless runner for the skyraid simulation core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Fly the autopilot through a headless game
    Run {
        /// Maximum number of ticks to simulate
        #[arg(short, long, default_value = "3600")]
        ticks: u64,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML config overriding the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Geometry JSON; the demo city when omitted
        #[arg(short, long)]
        geometry: Option<PathBuf>,
        /// Start straight with procedural waves
        #[arg(long)]
        skip_formation: bool,
        /// Print a HUD line every N ticks (0 disables)
        #[arg(long, default_value = "600")]
        report_every: u64,
        /// Print every simulation event as JSON
        #[arg(long)]
        events: bool,
    },
    /// Print the effective configuration as YAML
    Config {
        /// YAML config overriding the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("skyraid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", skyraid_common::crate_info());
            println!("input: {}", skyraid_input::crate_info());
            println!("kernel: {}", skyraid_kernel::crate_info());
            println!("tools: {}", skyraid_tools::crate_info());
        }
        Commands::Run {
            ticks,
            seed,
            config,
            geometry,
            skip_formation,
            report_every,
            events,
        } => {
            let config = load::config(config.as_deref())?;
            let geometry = load::geometry(geometry.as_deref())?;
            println!(
                "Headless run: seed={seed}, ticks={ticks}, buildings={}",
                geometry.buildings().len()
            );

            let mut sim = Simulation::with_seed(config, geometry, seed)?;
            if skip_formation {
                sim = sim.with_director(WaveDirector::without_formation());
            }
            let pilot = Autopilot::new();
            let mut input = InputState::new();

            for _ in 0..ticks {
                let control = input.snapshot(&pilot.actions(&sim));
                sim.step(&control);

                for event in sim.drain_events() {
                    if events {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                    if let SimEvent::WaveScheduled { wave, size } = event {
                        println!("Wave {wave}: {size} enemies incoming");
                    }
                }
                if report_every > 0 && sim.tick() % report_every == 0 {
                    println!("{}", sim.hud());
                }
                if sim.is_over() {
                    break;
                }
            }

            println!("{}", SimInspector::summary(&sim));
            match sim.final_result() {
                Some(result) => {
                    let cause = sim
                        .state()
                        .cause()
                        .map(|c| c.to_string())
                        .unwrap_or_default();
                    println!("Game over ({cause}) at tick {}", sim.tick());
                    println!("{}", result.to_json()?);
                }
                None => println!("Still flying after {} ticks", sim.tick()),
            }
        }
        Commands::Config { config } => {
            let config = load::config(config.as_deref())?;
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}
