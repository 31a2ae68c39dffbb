//! Tail assignment engine.
//!
//! A run walks a fixed number of epochs. Each epoch decides every flight in
//! input order: the policy proposes a tail, the oracle and the fleet data
//! decide whether the pairing is legal, the cost model shapes the reward and
//! the policy learns from it. Designated epochs commit the working set and
//! emit a [`ResultSnapshot`].

pub mod assignment;
pub mod config;
pub mod cost;
pub mod oracle;
pub mod policy;
pub mod run;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod tests;

pub use assignment::Assignment;
pub use config::{EngineConfig, RunParams};
pub use policy::{AssignmentPolicy, ValueTable};
pub use run::{AssignmentEngine, RunOutcome};
pub use snapshot::{Event, Mode, ResultSnapshot};
