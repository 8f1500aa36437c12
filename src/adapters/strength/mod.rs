//! Strength Adapters - Password strength scorers.

mod entropy_scorer;

pub use entropy_scorer::EntropyStrengthScorer;
