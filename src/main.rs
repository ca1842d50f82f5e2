// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::Result;
use std::env;
use std::path::Path;
use tracing::info;

use stimuli::plan::{generate_named, TRACK_NAMES};
use stimuli::{ClipLibrary, DatasetBuilder, DatasetConfig};

fn print_usage() {
    println!("STIMULI - Layered loop stimulus generator");
    println!();
    println!("Usage: stimuli [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --plan <POLICY> [LOOPS] [TRACKS] [SEED]  Print a plan (defaults: 15 4 0)");
    println!("                                           Policies: random, lopez_serrano,");
    println!("                                           factorial, factorial_random");
    println!("  --library <DIR>                          List grouping keys and tracks in DIR");
    println!("  --build <CONFIG>                         Render the dataset described by CONFIG");
    println!("  --help                                   Show this help message");
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str, default: T) -> Result<T> {
    match args.get(index) {
        Some(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid {}: {}", name, value)),
        None => Ok(default),
    }
}

fn print_plan(args: &[String]) -> Result<()> {
    let policy = &args[2];
    let loops: usize = parse_arg(args, 3, "loops", 15)?;
    let tracks: usize = parse_arg(args, 4, "tracks", 4)?;
    let seed: u32 = parse_arg(args, 5, "seed", 0)?;

    let plan = generate_named(loops, tracks, policy, seed)?;

    println!("{} plan: {} tracks x {} loops (seed {})", policy, plan.tracks(), plan.loops(), seed);
    for track in 0..plan.tracks() {
        let label = TRACK_NAMES.get(track).copied().unwrap_or("track");
        let cells: String = plan
            .row(track)
            .unwrap_or_default()
            .iter()
            .map(|&v| if v == 1 { 'X' } else { '.' })
            .collect();
        println!("  {:>2} {:<7} {}", track, label, cells);
    }
    Ok(())
}

fn list_library(dir: &Path) -> Result<()> {
    let library = ClipLibrary::scan(dir)?;
    if library.is_empty() {
        println!("No clips found in {:?}", dir);
        return Ok(());
    }

    for key in library.keys() {
        let tracks = library.tracks(key).unwrap_or_default();
        println!("{:<24} {}", key, tracks.join(", "));
    }
    Ok(())
}

fn build_dataset(config_path: &Path) -> Result<()> {
    let config = DatasetConfig::load(config_path)?;
    config.validate()?;

    let library = ClipLibrary::scan(&config.dataset.source_dir)?;
    info!(groups = library.len(), source = ?config.dataset.source_dir, "loaded clip library");

    let report = DatasetBuilder::new(config, library).build()?;
    println!("Rendered {} groups, wrote {} files", report.groups, report.files.len());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("STIMULI - Layered loop stimulus generator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--plan" => {
            if args.len() < 3 {
                eprintln!("Error: --plan requires a policy name");
                print_usage();
                std::process::exit(1);
            }
            print_plan(&args)?;
        }
        "--library" => {
            if args.len() < 3 {
                eprintln!("Error: --library requires a directory");
                std::process::exit(1);
            }
            list_library(Path::new(&args[2]))?;
        }
        "--build" => {
            if args.len() < 3 {
                eprintln!("Error: --build requires a config file");
                std::process::exit(1);
            }
            build_dataset(Path::new(&args[2]))?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
