use crate::aircraft::AircraftId;
use crate::engine::assignment::Assignment;
use crate::engine::cost;
use crate::error::EngineError;
use crate::flight::FlightId;
use crate::roster::Roster;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    Chaos,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Chaos => write!(f, "chaos"),
        }
    }
}

/// A committed flight with its tail and the cost computed at commit time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub flight_id: FlightId,
    pub tail_num: AircraftId,
    pub origin: Arc<str>,
    pub dest: Arc<str>,
    pub dep_time: Time,
    pub arr_time: Time,
    pub min_seating_capacity: u32,
    pub ground_time: u64,
    pub onward_flight: Option<FlightId>,
    pub passengers: u32,
    pub carbon: f64,
}

/// The only artifact a run hands to the outside world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub timestamp: Time,
    pub mode: Mode,
    pub assignments: Assignment,
    pub events: Vec<Event>,
    pub chaos_recovered: usize,
}

impl ResultSnapshot {
    /// Expands `assignments` into events, recomputing each cost with
    /// `multiplier` applied.
    pub fn commit(
        roster: &Roster,
        assignments: Assignment,
        mode: Mode,
        multiplier: f64,
        recovery_threshold: f64,
    ) -> Result<ResultSnapshot, EngineError> {
        let events = assignments
            .iter()
            .map(|(flight_id, tail)| -> Result<Event, EngineError> {
                let flight = roster.flight(flight_id)?;
                let aircraft = roster.require_tail(tail)?;
                Ok(Event {
                    flight_id: flight.id.clone(),
                    tail_num: aircraft.id.clone(),
                    origin: flight.origin.clone(),
                    dest: flight.dest.clone(),
                    dep_time: flight.dep_time,
                    arr_time: flight.arr_time,
                    min_seating_capacity: flight.min_seating_capacity,
                    ground_time: flight.ground_time,
                    onward_flight: flight.onward_flight.clone(),
                    passengers: flight.passengers,
                    carbon: cost::carbon(flight, aircraft)? * multiplier,
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        let chaos_recovered = match mode {
            Mode::Chaos => {
                let over = events
                    .iter()
                    .filter(|e| e.carbon > recovery_threshold)
                    .count();
                assignments.len() - over
            }
            Mode::Normal => 0,
        };

        Ok(ResultSnapshot {
            timestamp: Time::now(),
            mode,
            assignments,
            events,
            chaos_recovered,
        })
    }

    pub fn total_carbon(&self) -> f64 {
        self.events.iter().map(|e| e.carbon).sum()
    }
}
