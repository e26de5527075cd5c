//! rc-route — minimal driver for the rc routing engine.
//!
//! ```text
//! rc-route synth monaco.osrm
//! rc-route route monaco.osrm --from 7.419758,43.731142 --to 7.419505,43.736825
//! rc-route table monaco.osrm --count 6 --seed 42
//! ```
//!
//! Set `RUST_LOG=debug` to see engine load and query logs on stderr.

mod network;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use rc_core::{Coordinate, SeededRng};
use rc_engine::{Algorithm, Engine, EngineConfig, EngineResult, RouteQuery, RouteResult, TableQuery};

use network::{build_network, monaco_bbox};

#[derive(Parser)]
#[command(name = "rc-route")]
#[command(about = "Route and duration-table queries against a prepared road dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route through two or more waypoints in order
    Route {
        /// Dataset base path (manifest file)
        dataset: String,
        /// Start coordinate (lon,lat)
        #[arg(long, value_parser = parse_coord)]
        from: Coordinate,
        /// Intermediate waypoints (lon,lat), visited in the order given
        #[arg(long, value_parser = parse_coord)]
        via: Vec<Coordinate>,
        /// End coordinate (lon,lat)
        #[arg(long, value_parser = parse_coord)]
        to: Coordinate,
        #[arg(long, default_value = "dijkstra")]
        algorithm: Algorithm,
    },
    /// Duration table over random points inside Monaco
    Table {
        dataset: String,
        #[arg(short, long, default_value_t = 5)]
        count: usize,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value = "dijkstra")]
        algorithm: Algorithm,
    },
    /// Write the built-in synthetic Monaco dataset
    Synth {
        /// Output dataset base path
        output: PathBuf,
    },
    /// Build a dataset from an OSM PBF extract
    #[cfg(feature = "osm")]
    Prepare {
        input: PathBuf,
        output: PathBuf,
    },
}

fn parse_coord(s: &str) -> Result<Coordinate> {
    let (lon, lat) = s
        .split_once(',')
        .context("coordinate must be in format 'lon,lat'")?;
    Ok(Coordinate::new(lon.trim().parse()?, lat.trim().parse()?))
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

fn load(dataset: &Path, algorithm: Algorithm) -> EngineResult<Engine> {
    let config = EngineConfig::builder(dataset).algorithm(algorithm).build()?;
    Ok(Engine::new(&config)?)
}

fn compute_route(dataset: &Path, algorithm: Algorithm, waypoints: &[Coordinate]) -> EngineResult<RouteResult> {
    let engine = load(dataset, algorithm)?;
    let mut query = RouteQuery::with_capacity(waypoints.len())?;
    for c in waypoints {
        query.add_coordinate(c.lon, c.lat);
    }
    Ok(engine.route(&query)?)
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Route { dataset, from, via, to, algorithm } => {
            let mut waypoints = Vec::with_capacity(via.len() + 2);
            waypoints.push(from);
            waypoints.extend(via);
            waypoints.push(to);

            let t0 = Instant::now();
            let route = compute_route(Path::new(&dataset), algorithm, &waypoints)?;
            info!("route computed in {:.3} s", t0.elapsed().as_secs_f64());

            println!("Distance: {:.0} meters", route.distance());
            println!("Duration: {:.0} seconds", route.duration());
            if route.legs().len() > 1 {
                for (i, leg) in route.legs().iter().enumerate() {
                    println!("  leg {i}: {:.0} m, {:.0} s", leg.distance, leg.duration);
                }
            }
        }

        Commands::Table { dataset, count, seed, algorithm } => {
            let engine = load(Path::new(&dataset), algorithm)?;
            let mut rng = SeededRng::new(seed);
            let query: TableQuery = rng.coordinates_in(&monaco_bbox(), count).into_iter().collect();

            let t0 = Instant::now();
            let table = engine.table(&query).map_err(rc_engine::Error::from)?;
            info!("{count}x{count} table computed in {:.3} s", t0.elapsed().as_secs_f64());

            for (i, c) in query.coordinates().iter().enumerate() {
                println!("{i:>3}  {c}");
            }
            println!();
            print!("{:>6}", "");
            for j in 0..table.size() {
                print!("{j:>8}");
            }
            println!();
            for (i, row) in table.rows().enumerate() {
                print!("{i:>6}");
                for cell in row {
                    match cell {
                        Some(secs) => print!("{secs:>8.0}"),
                        None => print!("{:>8}", "-"),
                    }
                }
                println!();
            }
        }

        Commands::Synth { output } => {
            let network = build_network();
            rc_graph::write_dataset(&network, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "Wrote {} ({} nodes, {} edges)",
                output.display(),
                network.node_count(),
                network.edge_count()
            );
        }

        #[cfg(feature = "osm")]
        Commands::Prepare { input, output } => {
            let network = rc_graph::osm::load_from_pbf(&input)
                .with_context(|| format!("importing {}", input.display()))?;
            rc_graph::write_dataset(&network, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "Wrote {} ({} nodes, {} edges)",
                output.display(),
                network.node_count(),
                network.edge_count()
            );
        }
    }
    Ok(())
}

/// One-line failure report, prefixed with the engine error kind when there is one.
fn describe(e: &anyhow::Error) -> String {
    match e.downcast_ref::<rc_engine::Error>() {
        Some(engine_err) => format!("{}: {engine_err}", engine_err.kind()),
        None => format!("error: {e:#}"),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", describe(&e));
            ExitCode::FAILURE
        }
    }
}
