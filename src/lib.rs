pub mod aircraft;
pub mod engine;
pub mod error;
pub mod filter;
pub mod flight;
pub mod recorder;
pub mod roster;
pub mod stats;
pub mod time;

pub use error::EngineError;
