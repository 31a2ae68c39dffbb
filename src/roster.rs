use crate::aircraft::{Aircraft, AircraftId};
use crate::error::EngineError;
use crate::flight::{Flight, FlightId};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Validated, read-only input for one engine run.
///
/// Input order is significant: a flight's position fixes both its row in the
/// value table and the order in which it is decided every epoch. Aircraft
/// positions likewise fix the action index of each tail.
#[derive(Clone, Debug)]
pub struct Roster {
    flights: Vec<Flight>,
    aircraft: Vec<Aircraft>,
    flights_index: HashMap<FlightId, usize>,
    aircraft_index: HashMap<AircraftId, usize>,
}

impl Roster {
    pub fn new(flights: Vec<Flight>, aircraft: Vec<Aircraft>) -> Result<Roster, EngineError> {
        Roster::build(flights, aircraft, None)
    }

    /// A narrowed copy of `source`. Onward links may point at flights that
    /// only `source` holds; such links never constrain a run.
    pub fn subset_of(
        source: &Roster,
        flights: Vec<Flight>,
        aircraft: Vec<Aircraft>,
    ) -> Result<Roster, EngineError> {
        Roster::build(flights, aircraft, Some(source))
    }

    fn build(
        flights: Vec<Flight>,
        aircraft: Vec<Aircraft>,
        source: Option<&Roster>,
    ) -> Result<Roster, EngineError> {
        if flights.is_empty() {
            return Err(EngineError::NoFlights);
        }
        if aircraft.is_empty() {
            return Err(EngineError::NoAircraft);
        }

        let mut flights_index = HashMap::with_capacity(flights.len());
        for (i, f) in flights.iter().enumerate() {
            if flights_index.insert(f.id.clone(), i).is_some() {
                return Err(EngineError::DuplicateFlight(f.id.clone()));
            }
            f.ready_at(f.ground_time)?;
        }

        let mut aircraft_index = HashMap::with_capacity(aircraft.len());
        for (i, a) in aircraft.iter().enumerate() {
            if aircraft_index.insert(a.id.clone(), i).is_some() {
                return Err(EngineError::DuplicateAircraft(a.id.clone()));
            }
            if a.efficiency == 0.0 {
                return Err(EngineError::ZeroEfficiency(a.id.clone()));
            }
        }

        if let Some(dangling) = flights
            .iter()
            .filter_map(|f| f.onward_flight.as_ref())
            .find(|onward| {
                !flights_index.contains_key(*onward)
                    && source.is_none_or(|s| !s.flights_index.contains_key(*onward))
            })
        {
            return Err(EngineError::UnknownFlight(dangling.clone()));
        }

        Ok(Roster {
            flights,
            aircraft,
            flights_index,
            aircraft_index,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Roster, EngineError> {
        let data = std::fs::read_to_string(path)?;
        let raw: Scenario = serde_json::from_str(&data)?;
        Roster::new(raw.flights, raw.aircraft)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn flight(&self, id: &FlightId) -> Result<&Flight, EngineError> {
        self.flights_index
            .get(id)
            .map(|i| &self.flights[*i])
            .ok_or_else(|| EngineError::UnknownFlight(id.clone()))
    }

    pub fn tail(&self, id: &AircraftId) -> Option<&Aircraft> {
        self.aircraft_index.get(id).map(|i| &self.aircraft[*i])
    }

    pub fn require_tail(&self, id: &AircraftId) -> Result<&Aircraft, EngineError> {
        self.tail(id)
            .ok_or_else(|| EngineError::UnknownAircraft(id.clone()))
    }
}

/// On-disk scenario layout.
#[derive(Deserialize)]
pub struct Scenario {
    pub flights: Vec<Flight>,
    pub aircraft: Vec<Aircraft>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::utils::{aircraft, flight};

    #[test]
    fn test_empty_inputs_are_configuration_errors() {
        let err = Roster::new(vec![], vec![aircraft("A1", "X", 150, 3.0, 10.0)]).unwrap_err();
        assert!(matches!(err, EngineError::NoFlights));
        assert!(err.is_configuration());

        let f = flight("F1", "2025-03-07 09:00", "2025-03-07 10:00", 30, "X");
        let err = Roster::new(vec![f], vec![]).unwrap_err();
        assert!(matches!(err, EngineError::NoAircraft));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_dangling_onward_flight_is_rejected() {
        let mut f = flight("F1", "2025-03-07 09:00", "2025-03-07 10:00", 30, "X");
        f.onward_flight = Some("F9".into());
        let err = Roster::new(vec![f], vec![aircraft("A1", "X", 150, 3.0, 10.0)]).unwrap_err();
        assert!(matches!(err, EngineError::UnknownFlight(ref id) if &**id == "F9"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_subset_resolves_onward_links_against_source() {
        let mut f1 = flight("F1", "2025-03-07 09:00", "2025-03-07 10:00", 30, "X");
        f1.onward_flight = Some("F2".into());
        let f2 = flight("F2", "2025-03-07 11:00", "2025-03-07 12:00", 30, "X");
        let fleet = vec![aircraft("A1", "X", 150, 3.0, 10.0)];
        let source = Roster::new(vec![f1.clone(), f2], fleet.clone()).unwrap();

        let subset = Roster::subset_of(&source, vec![f1.clone()], fleet.clone()).unwrap();
        assert_eq!(Some("F2".into()), subset.flights()[0].onward_flight);
        assert!(subset.flight(&"F2".into()).is_err());

        f1.onward_flight = Some("F9".into());
        let err = Roster::subset_of(&source, vec![f1], fleet).unwrap_err();
        assert!(matches!(err, EngineError::UnknownFlight(ref id) if &**id == "F9"));
    }

    #[test]
    fn test_duplicates_and_zero_efficiency_are_rejected() {
        let f = flight("F1", "2025-03-07 09:00", "2025-03-07 10:00", 30, "X");
        let err = Roster::new(
            vec![f.clone(), f.clone()],
            vec![aircraft("A1", "X", 150, 3.0, 10.0)],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateFlight(_)));

        let err = Roster::new(
            vec![f.clone()],
            vec![aircraft("A1", "X", 150, 3.0, 10.0), aircraft("A1", "X", 150, 3.0, 10.0)],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateAircraft(_)));

        let err = Roster::new(vec![f], vec![aircraft("A1", "X", 150, 3.0, 0.0)]).unwrap_err();
        assert!(matches!(err, EngineError::ZeroEfficiency(_)));
    }

    #[test]
    fn test_unrepresentable_ground_time_is_rejected() {
        for ground_time in [u64::MAX, 10_000_000_000_000] {
            let f = flight("F1", "2025-03-07 09:00", "2025-03-07 10:00", ground_time, "X");
            let err = Roster::new(vec![f], vec![aircraft("A1", "X", 150, 3.0, 10.0)]).unwrap_err();
            assert!(matches!(err, EngineError::GroundTimeOutOfRange(ref id, g) if &**id == "F1" && g == ground_time));
        }
    }

    #[test]
    fn test_scenario_json_field_names() {
        let json = r#"{
            "flights": [{
                "flight_id": "F001", "origin": "JFK", "dest": "LAX",
                "dep_time": "2025-03-07 08:00", "arr_time": "2025-03-07 10:00",
                "ground_time": 60, "subtype": "A320", "min_seating_capacity": 160,
                "passengers": 160, "distance": 2475
            }],
            "aircraft": [{
                "tail_num": "N123", "subtype": "A320", "capacity": 180,
                "base_fuel": 2.5, "efficiency": 12,
                "pre_assignments": [{"start": "2025-03-07 13:00", "end": "2025-03-07 15:00"}]
            }]
        }"#;
        let raw: Scenario = serde_json::from_str(json).unwrap();
        let roster = Roster::new(raw.flights, raw.aircraft).unwrap();
        assert_eq!(None, roster.flights()[0].onward_flight);
        assert_eq!(2475.0, roster.flights()[0].distance);
        assert_eq!(1, roster.aircraft()[0].pre_assignments.len());
        assert!(roster.tail(&"N123".into()).is_some());
        assert!(roster.flight(&"F404".into()).is_err());
    }
}
