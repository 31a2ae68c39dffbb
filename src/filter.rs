use crate::aircraft::AircraftId;
use crate::error::EngineError;
use crate::roster::Roster;
use crate::time::Time;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// Query-style narrowing of a roster before it is handed to the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterFilter {
    pub subtype: Option<Arc<str>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub exclude_tails: Vec<AircraftId>,
}

impl RosterFilter {
    /// Builds a filtered copy; the source roster is left untouched.
    ///
    /// Onward links keep pointing at flights the filter dropped. Those legs
    /// are never in a run's working set, so they cannot bind a tail.
    pub fn apply(&self, roster: &Roster) -> Result<Roster, EngineError> {
        let from = self.start_date.map(Time::start_of);
        let to = self.end_date.map(Time::end_of);

        let flights = roster
            .flights()
            .iter()
            .filter(|f| self.subtype.as_ref().map_or(true, |s| *s == f.subtype))
            .filter(|f| from.map_or(true, |t| f.dep_time >= t))
            .filter(|f| to.map_or(true, |t| f.arr_time <= t))
            .cloned()
            .collect::<Vec<_>>();

        let aircraft = roster
            .aircraft()
            .iter()
            .filter(|a| !a.id.is_empty() && !self.exclude_tails.contains(&a.id))
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            flights = flights.len(),
            aircraft = aircraft.len(),
            "filtered roster"
        );
        Roster::subset_of(roster, flights, aircraft)
    }
}
