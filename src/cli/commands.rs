use std::fs;

use tracing_subscriber::EnvFilter;

use crate::analyzers::{aggregate_by_city, classify, histogram, profile, GeoBounds, Sampler};
use crate::cache::DatasetCache;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let cache = DatasetCache::new(&cli.source, &cli.snapshot).with_mmap(cli.mmap);

    let progress = ProgressReporter::new_spinner("Loading dataset...");
    let mut dataset = cache.load()?;
    progress.finish_with_message(&format!("Loaded {} records", dataset.len()));

    match cli.command {
        Commands::Info => {
            println!("{}", dataset.summary().report());
        }

        Commands::Profile { min_percent, json } => {
            let report = profile(&dataset, min_percent)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_empty() {
                println!("No column is missing more than {:.1}% of values", min_percent);
            } else {
                println!("Columns missing more than {:.1}% of values:\n", min_percent);
                for entry in report.entries() {
                    println!("{:>24}  {:>6.2}%", entry.column, entry.percent_missing);
                }
            }
        }

        Commands::Cities { top, threshold, json } => {
            let counts = aggregate_by_city(&dataset);

            if json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
                return Ok(());
            }

            println!("Cities in the dataset: {}", counts.unique_cities());
            println!("\nTop {} cities by accident count:\n", top);
            for entry in counts.top(top) {
                println!("{:>24}  {:>8}", entry.city, entry.accidents);
            }

            let (high, low) = counts.partition(threshold);
            println!(
                "\nCities with >= {} accidents: {}\nCities with <  {} accidents: {}",
                threshold,
                high.len(),
                threshold,
                low.len()
            );
        }

        Commands::Hours { day, json } => {
            let split = classify(&dataset);
            let subset = if day.is_weekend() {
                &split.weekend
            } else {
                &split.weekday
            };

            let hist = histogram(subset, day.selector());

            if json {
                println!("{}", serde_json::to_string_pretty(&hist)?);
                return Ok(());
            }

            println!("Accidents by hour for {}:\n", day.label());
            for (hour, count) in hist.bins().iter().enumerate() {
                println!("{:02}:00  {:>8}", hour, count);
            }
            println!(
                "\nTotal: {} (peak hour {:02}:00)",
                hist.total(),
                hist.peak_hour()
            );
        }

        Commands::Sample {
            count,
            seed,
            bounded,
            output,
        } => {
            let filled = dataset.fill_missing_numeric();
            if filled > 0 {
                println!("Filled {} absent numeric values with column means", filled);
            }

            let mut sampler = Sampler::new();
            if let Some(seed) = seed {
                sampler = sampler.with_seed(seed);
            }
            if bounded {
                sampler = sampler.with_bounds(GeoBounds::continental_us());
            }

            let sample = sampler.sample(&dataset, count)?;

            match output {
                Some(path) => {
                    fs::write(&path, serde_json::to_string(&sample)?)?;
                    println!(
                        "Wrote {} sampled coordinates to {}",
                        sample.len(),
                        path.display()
                    );
                }
                None => {
                    println!("{}", serde_json::to_string_pretty(&sample)?);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
