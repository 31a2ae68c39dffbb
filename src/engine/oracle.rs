use crate::aircraft::AircraftId;
use crate::engine::assignment::Assignment;
use crate::error::EngineError;
use crate::flight::Flight;
use crate::roster::Roster;

/// Can `tail` fly `flight` given what it already flies in `assignments`?
///
/// The turnaround buffer is the candidate's own ground time, applied on both
/// sides of every comparison. Blackout windows get no buffer. A tail missing
/// from the roster is never available when blackouts are respected.
///
/// Fails when `assignments` names a flight the roster does not know, or when
/// the buffer pushes an arrival past the representable calendar.
pub fn is_available(
    tail: &AircraftId,
    flight: &Flight,
    assignments: &Assignment,
    roster: &Roster,
    respect_pre_assignments: bool,
) -> Result<bool, EngineError> {
    let buffer = flight.ground_time;
    for other_id in assignments.flights_on(tail) {
        let other = roster.flight(other_id)?;
        let clear = flight.ready_at(buffer)? <= other.dep_time
            || other.ready_at(buffer)? <= flight.dep_time;
        if !clear {
            return Ok(false);
        }
    }

    if respect_pre_assignments {
        match roster.tail(tail) {
            Some(aircraft) if !aircraft.is_blacked_out(&flight.window()) => {}
            _ => return Ok(false),
        }
    }

    Ok(true)
}
