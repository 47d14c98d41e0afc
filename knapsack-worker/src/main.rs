use anyhow::{anyhow, Result};
use clap::{arg, ArgMatches, Command};
use knapsack_challenges::Track;
use knapsack_utils::{jsonify, random_seed, seed_from_u64};
use knapsack_worker::{run_trials, time_solver, Solver, TrialConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("knapsack-worker")
        .about("Solves random 0/1 knapsack instances by exhaustive and depth-first search")
        .arg_required_else_help(true)
        .arg(arg!(-v --verbose ... "Increase logging verbosity").global(true))
        .subcommand(
            Command::new("test")
                .about("Compares brute force against every DFS variant on random instances")
                .arg(
                    arg!(--trials [TRIALS] "Number of random instances")
                        .default_value("1000")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--items [ITEMS] "Items per instance")
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                )
                .args(instance_args()),
        )
        .subcommand(
            Command::new("time")
                .about("Times a single solver on one random instance")
                .arg(
                    arg!(<SOLVER> "One of bf, dfs, dfs-hfast, dfs-haccurate")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--items [ITEMS] "Items in the instance, defaults to a size suited to SOLVER")
                        .value_parser(clap::value_parser!(usize)),
                )
                .args(instance_args()),
        )
}

fn instance_args() -> [clap::Arg; 3] {
    [
        arg!(--"max-value" [MAX_VALUE] "Largest item weight or value")
            .default_value("100")
            .value_parser(clap::value_parser!(u32)),
        arg!(--capacity [CAPACITY] "Knapsack capacity, defaults to ceil(max_value * items / 4)")
            .value_parser(clap::value_parser!(u32)),
        arg!(--seed [SEED] "Seed for instance generation, random if omitted")
            .value_parser(clap::value_parser!(u64)),
    ]
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    if let Err(e) = match matches.subcommand() {
        Some(("test", sub_m)) => test(sub_m),
        Some(("time", sub_m)) => time(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn,knapsack_worker=info",
        1 => "info,knapsack_worker=debug,knapsack_algorithms=debug",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("Missing argument: {}", id))
}

fn load_track(matches: &ArgMatches, num_items: usize) -> Result<Track> {
    Ok(Track {
        num_items,
        max_value: required(matches, "max-value")?,
        capacity: matches.get_one::<u32>("capacity").copied(),
    })
}

fn load_seed(matches: &ArgMatches) -> u64 {
    let seed = matches
        .get_one::<u64>("seed")
        .copied()
        .unwrap_or_else(random_seed);
    info!(seed, "instance seed");
    seed
}

fn test(matches: &ArgMatches) -> Result<()> {
    let config = TrialConfig {
        trials: required(matches, "trials")?,
        track: load_track(matches, required(matches, "items")?)?,
        seed: load_seed(matches),
    };

    let report = run_trials(&config)?;
    for mismatch in &report.mismatches {
        println!("{}", mismatch.report_line()?);
    }
    Ok(())
}

fn time(matches: &ArgMatches) -> Result<()> {
    let solver: Solver = required::<String>(matches, "SOLVER")?.parse()?;
    let num_items = matches
        .get_one::<usize>("items")
        .copied()
        .unwrap_or_else(|| solver.default_num_items());
    let track = load_track(matches, num_items)?;
    let seed = seed_from_u64(load_seed(matches));

    let report = time_solver(solver, &track, &seed)?;
    println!("{}", jsonify(&report)?);
    Ok(())
}
