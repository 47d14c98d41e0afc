use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),

    #[error("brute force supports at most {max} items, instance has {num_items}")]
    TooManyItems { num_items: usize, max: usize },
}
