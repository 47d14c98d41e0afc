use anyhow::{anyhow, Result};
use knapsack_algorithms::knapsack::{
    brute_force,
    dfs::{self, Search, SearchStats},
    Heuristic,
};
use knapsack_challenges::{Challenge, Solution, Track};
use knapsack_utils::jsonify;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::{fmt, str::FromStr, time::Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_TRIALS: usize = 1000;
pub const DEFAULT_TRIAL_ITEMS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    BruteForce,
    Dfs(Heuristic),
}

impl Solver {
    /// Instance size used by `time` when none is given, chosen so each solver
    /// takes a comparable amount of time.
    pub fn default_num_items(&self) -> usize {
        match self {
            Solver::BruteForce => 18,
            Solver::Dfs(Heuristic::None) => 20,
            Solver::Dfs(Heuristic::Fast) => 45,
            Solver::Dfs(Heuristic::Accurate) => 3000,
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::BruteForce => write!(f, "bf"),
            Solver::Dfs(Heuristic::None) => write!(f, "dfs"),
            Solver::Dfs(heuristic) => write!(f, "dfs-h{}", heuristic),
        }
    }
}

impl FromStr for Solver {
    type Err = anyhow::Error;

    /// `bf`, `dfs`, or `dfs-h<heuristic>`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('-') {
            None if s == "bf" => Ok(Solver::BruteForce),
            None if s == "dfs" => Ok(Solver::Dfs(Heuristic::None)),
            Some(("dfs", heuristic)) => {
                let heuristic = heuristic.strip_prefix('h').unwrap_or(heuristic);
                Ok(Solver::Dfs(heuristic.parse()?))
            }
            _ => Err(anyhow!("unknown solver: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrialConfig {
    pub trials: usize,
    pub track: Track,
    pub seed: u64,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            track: Track::new(DEFAULT_TRIAL_ITEMS),
            seed: 0,
        }
    }
}

/// A DFS variant that disagreed with brute force on an instance.
#[derive(Serialize, Debug, Clone)]
pub struct Mismatch {
    pub trial: usize,
    pub seed: [u8; 32],
    pub heuristic: Heuristic,
    pub brute_force_value: u32,
    pub dfs_value: u32,
    pub challenge: Challenge,
}

impl Mismatch {
    /// `<brute force value> <heuristic> <dfs value> <instance json>`; the
    /// instance json includes the capacity, so the line reproduces the run.
    pub fn report_line(&self) -> serde_json::Result<String> {
        Ok(format!(
            "{} {} {} {}",
            self.brute_force_value,
            self.heuristic,
            self.dfs_value,
            jsonify(&self.challenge)?
        ))
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TrialReport {
    pub trials: usize,
    pub mismatches: Vec<Mismatch>,
}

pub fn run_trials(config: &TrialConfig) -> Result<TrialReport> {
    run_trials_with(config, dfs::solve)
}

/// Compares brute force against `solve_dfs` under every heuristic on
/// `config.trials` random instances. Disagreements are collected, not raised.
pub fn run_trials_with<F>(config: &TrialConfig, solve_dfs: F) -> Result<TrialReport>
where
    F: Fn(&Challenge, Heuristic) -> Result<(Solution, u32)>,
{
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut mismatches = Vec::new();

    for trial in 0..config.trials {
        let seed: [u8; 32] = rng.gen();
        let challenge = Challenge::generate_instance(&seed, &config.track)?;
        let (_, brute_force_value) = brute_force::solve(&challenge)?;

        for heuristic in Heuristic::ALL {
            let (_, dfs_value) = solve_dfs(&challenge, heuristic)?;
            if dfs_value != brute_force_value {
                warn!(
                    trial,
                    %heuristic,
                    brute_force_value,
                    dfs_value,
                    "solvers disagree"
                );
                mismatches.push(Mismatch {
                    trial,
                    seed,
                    heuristic,
                    brute_force_value,
                    dfs_value,
                    challenge: challenge.clone(),
                });
            }
        }
        debug!(trial, value = brute_force_value, "trial done");
    }

    info!(
        trials = config.trials,
        mismatches = mismatches.len(),
        "trials finished"
    );
    Ok(TrialReport {
        trials: config.trials,
        mismatches,
    })
}

#[derive(Serialize, Debug, Clone)]
pub struct TimingReport {
    pub solver: String,
    pub num_items: usize,
    pub items: Vec<usize>,
    pub value: u32,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
}

/// Generates one instance and times a single solver on it.
pub fn time_solver(solver: Solver, track: &Track, seed: &[u8; 32]) -> Result<TimingReport> {
    let challenge = Challenge::generate_instance(seed, track)?;

    let start = Instant::now();
    let (solution, value, stats) = match solver {
        Solver::BruteForce => {
            let (solution, value) = brute_force::solve(&challenge)?;
            (solution, value, None)
        }
        Solver::Dfs(heuristic) => {
            let outcome = Search::new(&challenge, heuristic).run(&|_| Ok(()))?;
            (outcome.solution, outcome.value, Some(outcome.stats))
        }
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(%solver, num_items = challenge.num_items(), value, elapsed_ms, "timed solver");

    Ok(TimingReport {
        solver: solver.to_string(),
        num_items: challenge.num_items(),
        items: solution.items,
        value,
        elapsed_ms,
        stats,
    })
}
