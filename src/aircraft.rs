use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maintenance or owner blackout window. No flight may touch it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreAssignment {
    pub start: Time,
    pub end: Time,
}

pub type AircraftId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    #[serde(rename = "tail_num")]
    pub id: AircraftId,
    pub subtype: Arc<str>,
    pub capacity: u32,
    pub base_fuel: f64,
    pub efficiency: f64,
    #[serde(default)]
    pub pre_assignments: Vec<PreAssignment>,
}

impl Aircraft {
    /// Subtype match and enough seats for the leg.
    pub fn fits(&self, subtype: &str, min_seating_capacity: u32) -> bool {
        *self.subtype == *subtype && self.capacity >= min_seating_capacity
    }

    pub fn is_blacked_out(&self, window: &(Time, Time)) -> bool {
        self.pre_assignments
            .iter()
            .any(|p| Time::is_overlapping(window, &(p.start, p.end)))
    }
}
