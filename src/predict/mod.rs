pub mod engine;
pub mod league;
pub mod progol;
pub mod rules;
pub mod tables;

pub use engine::{apply_real_algorithm, FallbackChain};
pub use league::League;
pub use progol::{ProgolPredictor, ProgolTicket};
