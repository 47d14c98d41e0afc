//! Depth-first search over include/exclude decisions, items taken in
//! descending value density, with optional branch-and-bound pruning.
//!
//! The search tree is walked with an explicit work list instead of the call
//! stack, so instances with thousands of items need no extra stack space.

use crate::knapsack::{heuristics::UpperBound, order::ItemOrder, Heuristic, SolverError};
use anyhow::Result;
use knapsack_challenges::{Challenge, Solution};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub nodes_pruned: u64,
    pub improvements: u64,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub solution: Solution,
    pub value: u32,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    depth: usize,
    value: u32,
    weight: u32,
    // item added to the selection on entering this node
    take: Option<usize>,
}

enum Step {
    Visit(Node),
    Release,
}

/// A single search over one instance. Owns the best packing found so far.
pub struct Search<'a> {
    challenge: &'a Challenge,
    order: ItemOrder,
    bound: Option<Box<dyn UpperBound>>,
    selected: Vec<usize>,
    best_items: Vec<usize>,
    best_value: u32,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(challenge: &'a Challenge, heuristic: Heuristic) -> Self {
        Self::with_bound(challenge, heuristic.bound())
    }

    pub fn with_bound(challenge: &'a Challenge, bound: Option<Box<dyn UpperBound>>) -> Self {
        Search {
            challenge,
            order: ItemOrder::by_density(challenge),
            bound,
            selected: Vec::with_capacity(challenge.num_items()),
            best_items: Vec::new(),
            best_value: 0,
            stats: SearchStats::default(),
        }
    }

    pub fn order(&self) -> &ItemOrder {
        &self.order
    }

    /// Runs the search to completion. `save_solution` receives every new best
    /// packing, each of which is feasible.
    pub fn run(mut self, save_solution: &dyn Fn(&Solution) -> Result<()>) -> Result<Outcome> {
        let mut stack = vec![Step::Visit(Node {
            depth: 0,
            value: 0,
            weight: 0,
            take: None,
        })];

        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Visit(node) => node,
                Step::Release => {
                    self.selected.pop();
                    continue;
                }
            };
            if let Some(item) = node.take {
                self.selected.push(item);
            }
            self.stats.nodes_visited += 1;

            // Every node is a feasible packing, not only the leaves.
            if node.value > self.best_value {
                self.best_value = node.value;
                self.best_items.clone_from(&self.selected);
                self.stats.improvements += 1;
                trace!(value = node.value, depth = node.depth, "new best");
                save_solution(&Solution::from(self.best_items.clone()))?;
            }

            if node.depth >= self.order.len() {
                continue;
            }
            let (item, weight, value) = self.order[node.depth];
            let remaining_capacity = self.challenge.max_weight() - node.weight;

            if let Some(bound) = &self.bound {
                let optimum_rest = bound.estimate(&self.order[node.depth..], remaining_capacity);
                if node.value as u64 + optimum_rest <= self.best_value as u64 {
                    self.stats.nodes_pruned += 1;
                    continue;
                }
            }

            // Pushed in reverse: the include branch is explored first, then
            // its item is released before the exclude branch runs.
            stack.push(Step::Visit(Node {
                depth: node.depth + 1,
                take: None,
                ..node
            }));
            if weight <= remaining_capacity {
                stack.push(Step::Release);
                stack.push(Step::Visit(Node {
                    depth: node.depth + 1,
                    value: node.value + value,
                    weight: node.weight + weight,
                    take: Some(item),
                }));
            }
        }

        debug!(
            num_items = self.challenge.num_items(),
            value = self.best_value,
            nodes_visited = self.stats.nodes_visited,
            nodes_pruned = self.stats.nodes_pruned,
            improvements = self.stats.improvements,
            "dfs finished"
        );

        Ok(Outcome {
            solution: Solution::from(self.best_items),
            value: self.best_value,
            stats: self.stats,
        })
    }
}

pub fn solve(challenge: &Challenge, heuristic: Heuristic) -> Result<(Solution, u32)> {
    let outcome = Search::new(challenge, heuristic).run(&|_| Ok(()))?;
    Ok((outcome.solution, outcome.value))
}

/// Reads `{"heuristic": "none" | "fast" | "accurate"}`, defaulting to no pruning.
pub fn heuristic_from_hyperparameters(
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Heuristic, SolverError> {
    match hyperparameters.as_ref().and_then(|hp| hp.get("heuristic")) {
        None => Ok(Heuristic::default()),
        Some(Value::String(name)) => name.parse(),
        Some(other) => Err(SolverError::UnknownHeuristic(other.to_string())),
    }
}

pub fn solve_challenge(
    challenge: &Challenge,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<()> {
    let heuristic = heuristic_from_hyperparameters(hyperparameters)?;
    Search::new(challenge, heuristic).run(save_solution)?;
    Ok(())
}
