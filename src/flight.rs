use crate::error::EngineError;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type FlightId = Arc<str>;

/// One leg of the day's schedule. Immutable for the length of an engine run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(rename = "flight_id")]
    pub id: FlightId,
    pub origin: Arc<str>,
    pub dest: Arc<str>,
    pub dep_time: Time,
    pub arr_time: Time,
    /// Turnaround buffer in minutes.
    pub ground_time: u64,
    pub subtype: Arc<str>,
    pub min_seating_capacity: u32,
    pub passengers: u32,
    pub distance: f64,
    #[serde(default)]
    pub onward_flight: Option<FlightId>,
}

impl Flight {
    pub fn window(&self) -> (Time, Time) {
        (self.dep_time, self.arr_time)
    }

    /// Time at which the tail is free again after this leg, given a
    /// turnaround of `buffer` minutes.
    pub fn ready_at(&self, buffer: u64) -> Result<Time, EngineError> {
        self.arr_time
            .checked_add_minutes(buffer)
            .ok_or_else(|| EngineError::GroundTimeOutOfRange(self.id.clone(), buffer))
    }
}
