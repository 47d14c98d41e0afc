use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_MAX_VALUE: u32 = 100;

/// Parameters for generating a random instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_items: usize,
    pub max_value: u32,
    pub capacity: Option<u32>,
}

impl Track {
    pub fn new(num_items: usize) -> Self {
        Self {
            num_items,
            max_value: DEFAULT_MAX_VALUE,
            capacity: None,
        }
    }

    /// `ceil(max_value * num_items / 4)` unless a capacity was given.
    pub fn capacity(&self) -> Result<u32> {
        if let Some(capacity) = self.capacity {
            return Ok(capacity);
        }
        let scaled = (self.max_value as u64 * self.num_items as u64 + 3) / 4;
        u32::try_from(scaled).map_err(|_| anyhow!("Default capacity ({}) overflows u32", scaled))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    pub items: Vec<usize>,
}

impl From<Vec<usize>> for Solution {
    fn from(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        Self { items }
    }
}

/// A validated instance. Only constructed through [`Challenge::new`], which
/// deserialization also goes through.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "RawChallenge")]
pub struct Challenge {
    weights: Vec<u32>,
    values: Vec<u32>,
    max_weight: u32,
}

#[derive(Deserialize)]
struct RawChallenge {
    weights: Vec<u32>,
    values: Vec<u32>,
    max_weight: u32,
}

impl TryFrom<RawChallenge> for Challenge {
    type Error = anyhow::Error;

    fn try_from(raw: RawChallenge) -> Result<Self> {
        Challenge::new(raw.weights, raw.values, raw.max_weight)
    }
}

impl Challenge {
    /// Builds an instance from explicit item arrays.
    ///
    /// Every weight and value must be positive, and the totals over all items
    /// must fit in a `u32` so that any subset sum is exact.
    pub fn new(weights: Vec<u32>, values: Vec<u32>, max_weight: u32) -> Result<Self> {
        if weights.len() != values.len() {
            return Err(anyhow!(
                "Number of weights ({}) does not match number of values ({})",
                weights.len(),
                values.len()
            ));
        }
        if let Some(item) = weights.iter().position(|&w| w == 0) {
            return Err(anyhow!("Item ({}) has zero weight", item));
        }
        if let Some(item) = values.iter().position(|&v| v == 0) {
            return Err(anyhow!("Item ({}) has zero value", item));
        }
        checked_total(&weights).ok_or_else(|| anyhow!("Total weight overflows u32"))?;
        checked_total(&values).ok_or_else(|| anyhow!("Total value overflows u32"))?;

        Ok(Challenge {
            weights,
            values,
            max_weight,
        })
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.max_value == 0 {
            return Err(anyhow!("max_value must be at least 1"));
        }
        let mut rng = SmallRng::from_seed(seed.clone());
        let max_weight = track.capacity()?;

        let values: Vec<u32> = (0..track.num_items)
            .map(|_| rng.gen_range(1..=track.max_value))
            .collect();
        let weights: Vec<u32> = (0..track.num_items)
            .map(|_| rng.gen_range(1..=track.max_value))
            .collect();

        Self::new(weights, values, max_weight)
    }

    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// `(index, weight, value)` for every item, in index order.
    pub fn items(&self) -> impl Iterator<Item = (usize, u32, u32)> + '_ {
        self.weights
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (&weight, &value))| (i, weight, value))
    }

    pub fn total_weight(&self, solution: &Solution) -> u32 {
        solution
            .items
            .iter()
            .filter_map(|&item| self.weights.get(item))
            .sum()
    }

    pub fn evaluate_total_value(&self, solution: &Solution) -> Result<u32> {
        let selected_items: HashSet<usize> = solution.items.iter().cloned().collect();
        if selected_items.len() != solution.items.len() {
            return Err(anyhow!("Duplicate items selected."));
        }

        let total_weight = selected_items
            .iter()
            .map(|&item| {
                if item >= self.weights.len() {
                    return Err(anyhow!("Item ({}) is out of bounds", item));
                }
                Ok(self.weights[item])
            })
            .collect::<Result<Vec<_>, _>>()?
            .iter()
            .sum::<u32>();

        if total_weight > self.max_weight {
            return Err(anyhow!(
                "Total weight ({}) exceeded max weight ({})",
                total_weight,
                self.max_weight
            ));
        }

        Ok(selected_items.iter().map(|&item| self.values[item]).sum())
    }
}

fn checked_total(attrs: &[u32]) -> Option<u32> {
    attrs.iter().try_fold(0u32, |acc, &x| acc.checked_add(x))
}
