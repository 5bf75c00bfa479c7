pub mod kelly;
pub mod runner;
pub mod strategy;

pub use runner::{LolyRunner, RunSummary};
pub use strategy::BetParams;
