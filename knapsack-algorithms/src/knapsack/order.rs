use knapsack_challenges::Challenge;
use std::ops::Deref;

/// Items as `(index, weight, value)`, sorted by descending value density.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOrder(Vec<(usize, u32, u32)>);

impl ItemOrder {
    pub fn by_density(challenge: &Challenge) -> Self {
        let mut items: Vec<(usize, u32, u32)> = challenge.items().collect();
        // v_a / w_a > v_b / w_b  <=>  v_a * w_b > v_b * w_a
        items.sort_by(|a, b| (b.2 as u64 * a.1 as u64).cmp(&(a.2 as u64 * b.1 as u64)));
        ItemOrder(items)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|&(i, _, _)| i)
    }
}

impl Deref for ItemOrder {
    type Target = [(usize, u32, u32)];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
