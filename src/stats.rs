use crate::engine::snapshot::ResultSnapshot;
use serde::Serialize;

/// Headline numbers of one snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub total_flights: usize,
    pub avg_passengers: f64,
    pub total_co2: f64,
    pub chaos_recovered: usize,
}

impl Statistics {
    pub fn from_snapshot(snapshot: &ResultSnapshot) -> Statistics {
        let total_flights = snapshot.events.len();
        let passengers: u64 = snapshot.events.iter().map(|e| e.passengers as u64).sum();
        let avg_passengers = if total_flights == 0 {
            0.0
        } else {
            passengers as f64 / total_flights as f64
        };
        Statistics {
            total_flights,
            avg_passengers,
            total_co2: snapshot.total_carbon(),
            chaos_recovered: snapshot.chaos_recovered,
        }
    }

    /// Statistics of the most recent snapshot, if any was recorded.
    pub fn latest(history: &[ResultSnapshot]) -> Option<Statistics> {
        history.last().map(Statistics::from_snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assignment::Assignment;
    use crate::engine::snapshot::{Event, Mode};
    use crate::time::Time;

    fn event(flight_id: &str, passengers: u32, carbon: f64) -> Event {
        Event {
            flight_id: flight_id.into(),
            tail_num: "N123".into(),
            origin: "JFK".into(),
            dest: "LAX".into(),
            dep_time: "2025-03-07 08:00".parse().unwrap(),
            arr_time: "2025-03-07 10:00".parse().unwrap(),
            min_seating_capacity: 100,
            ground_time: 60,
            onward_flight: None,
            passengers,
            carbon,
        }
    }

    fn snapshot(events: Vec<Event>, chaos_recovered: usize) -> ResultSnapshot {
        ResultSnapshot {
            timestamp: "2025-03-08 14:40".parse::<Time>().unwrap(),
            mode: Mode::Chaos,
            assignments: Assignment::new(),
            events,
            chaos_recovered,
        }
    }

    #[test]
    fn test_summary() {
        let s = snapshot(vec![event("F1", 160, 510.25), event("F2", 125, 63.75)], 1);
        let stats = Statistics::from_snapshot(&s);
        assert_eq!(2, stats.total_flights);
        assert_eq!(142.5, stats.avg_passengers);
        assert_eq!(574.0, stats.total_co2);
        assert_eq!(1, stats.chaos_recovered);
    }

    #[test]
    fn test_empty_snapshot_and_history() {
        let stats = Statistics::from_snapshot(&snapshot(vec![], 0));
        assert_eq!(0.0, stats.avg_passengers);
        assert_eq!(None, Statistics::latest(&[]));
    }
}
