//! Batch simulation CLI.
//!
//! Plays many games and writes one JSON summary per game to stdout.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 100)
//!   --turns N       Turn limit per game (default: 5)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --quiet         Suppress summary output

use std::env;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use log::error;

use skirmish::simulate::{self, SimulateConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = SimulateConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_value(&args, i, "--games");
            }
            "--turns" => {
                i += 1;
                config.max_turns = parse_value(&args, i, "--turns");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Simulating {} games, {} turns each, {} threads",
            config.num_games, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let games = match simulate::run_batch(&config) {
        Ok(g) => g,
        Err(e) => {
            error!("simulation failed: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            start.elapsed().as_secs_f64()
        );
        eprint!("{}", simulate::format_summary(&games));
    }

    let stdout = io::stdout();
    if let Err(e) = simulate::write_jsonl(&games, &mut BufWriter::new(stdout.lock())) {
        error!("{}", e);
        process::exit(1);
    }
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => usage_error(&format!("invalid {} value", flag)),
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 100)");
    eprintln!("  --turns N        Turn limit per game (default: 5)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
