use crate::aircraft::AircraftId;
use crate::flight::FlightId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No flights available")]
    NoFlights,

    #[error("No aircraft available")]
    NoAircraft,

    #[error("Flight '{0}' is referenced but not in the roster")]
    UnknownFlight(FlightId),

    #[error("Aircraft '{0}' is referenced but not in the roster")]
    UnknownAircraft(AircraftId),

    #[error("Flight '{0}' appears more than once in the roster")]
    DuplicateFlight(FlightId),

    #[error("Aircraft '{0}' appears more than once in the roster")]
    DuplicateAircraft(AircraftId),

    #[error("Flight '{0}' cannot be buffered by {1} minutes")]
    GroundTimeOutOfRange(FlightId, u64),

    #[error("Aircraft '{0}' has zero efficiency")]
    ZeroEfficiency(AircraftId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Empty input. The run is rejected before any epoch executes and the
    /// caller may retry with a different filter.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EngineError::NoFlights | EngineError::NoAircraft)
    }
}
