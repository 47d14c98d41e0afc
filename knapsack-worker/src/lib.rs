mod harness;
pub use harness::*;
