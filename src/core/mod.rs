pub mod calendar;
mod engine;
mod format;
mod types;

pub use engine::{compound_anchor, compute_end_date, round_cents, simulate, simulate_from};
pub use format::DisplayFormat;
pub use types::{CompoundFrequency, EventFrequency, SimulationInput, SimulationResult, TimeUnit};
