use crate::aircraft::AircraftId;
use crate::flight::FlightId;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Partial flight -> tail map.
///
/// Iteration follows first-insertion order; assigning a flight that is
/// already present replaces its tail but keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    order: Vec<FlightId>,
    tails: HashMap<FlightId, AircraftId>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment::default()
    }

    pub fn insert(&mut self, flight: FlightId, tail: AircraftId) {
        if self.tails.insert(flight.clone(), tail).is_none() {
            self.order.push(flight);
        }
    }

    pub fn tail_of(&self, flight: &FlightId) -> Option<&AircraftId> {
        self.tails.get(flight)
    }

    pub fn contains(&self, flight: &FlightId) -> bool {
        self.tails.contains_key(flight)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlightId, &AircraftId)> {
        self.order
            .iter()
            .filter_map(|f| self.tails.get(f).map(|t| (f, t)))
    }

    /// Flights currently flown by `tail`.
    pub fn flights_on<'a>(&'a self, tail: &'a AircraftId) -> impl Iterator<Item = &'a FlightId> {
        self.iter().filter(move |(_, t)| *t == tail).map(|(f, _)| f)
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (flight, tail) in self.iter() {
            map.serialize_entry(flight, tail)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = Assignment;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of flight ids to tail numbers")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Assignment, M::Error> {
                let mut assignment = Assignment::new();
                while let Some((flight, tail)) = access.next_entry::<FlightId, AircraftId>()? {
                    assignment.insert(flight, tail);
                }
                Ok(assignment)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut assignment = Assignment::new();
        iter.into_iter()
            .for_each(|(f, t)| assignment.insert(f.into(), t.into()));
        assignment
    }
}
