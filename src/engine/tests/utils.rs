use crate::aircraft::{Aircraft, PreAssignment};
use crate::engine::snapshot::ResultSnapshot;
use crate::flight::Flight;
use crate::roster::Roster;
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn t(s: &str) -> Time {
    s.parse().unwrap()
}

pub fn plus(time: Time, minutes: u64) -> Time {
    time.checked_add_minutes(minutes).unwrap()
}

pub fn minus(time: Time, minutes: u64) -> Time {
    time.checked_sub_minutes(minutes).unwrap()
}

/// A 100-seat, 500-unit-distance leg from KRK to WAW.
pub fn flight(flight_id: &str, dep: &str, arr: &str, ground_time: u64, subtype: &str) -> Flight {
    Flight {
        id: id(flight_id),
        origin: id("KRK"),
        dest: id("WAW"),
        dep_time: t(dep),
        arr_time: t(arr),
        ground_time,
        subtype: id(subtype),
        min_seating_capacity: 100,
        passengers: 120,
        distance: 500.0,
        onward_flight: None,
    }
}

pub fn aircraft(tail: &str, subtype: &str, capacity: u32, base_fuel: f64, efficiency: f64) -> Aircraft {
    Aircraft {
        id: id(tail),
        subtype: id(subtype),
        capacity,
        base_fuel,
        efficiency,
        pre_assignments: vec![],
    }
}

pub fn blackout(start: &str, end: &str) -> PreAssignment {
    PreAssignment {
        start: t(start),
        end: t(end),
    }
}

pub fn roster(flights: Vec<Flight>, aircraft: Vec<Aircraft>) -> Roster {
    Roster::new(flights, aircraft).unwrap()
}

pub fn pairs(snapshot: &ResultSnapshot) -> Vec<(&str, &str)> {
    snapshot
        .assignments
        .iter()
        .map(|(f, a)| (&**f, &**a))
        .collect()
}

pub fn arb_subtype() -> impl Strategy<Value = Arc<str>> {
    prop_oneof![Just(id("X")), Just(id("Y"))]
}

/// Legs within one day starting 2025-03-07 00:00.
pub fn arb_flight(n: usize) -> impl Strategy<Value = Flight> {
    (
        arb_subtype(),
        0..1200u64,
        30..300u64,
        0..60u64,
        80..200u32,
        100..3000u32,
    )
        .prop_map(move |(subtype, dep, dur, ground, seats, distance)| {
            let start = t("2025-03-07 00:00");
            Flight {
                id: id(&format!("FL_{n}")),
                origin: id("KRK"),
                dest: id("WAW"),
                dep_time: plus(start, dep),
                arr_time: plus(start, dep + dur),
                ground_time: ground,
                subtype,
                min_seating_capacity: seats,
                passengers: seats,
                distance: distance as f64,
                onward_flight: None,
            }
        })
}

pub fn arb_aircraft(n: usize) -> impl Strategy<Value = Aircraft> {
    (
        arb_subtype(),
        100..220u32,
        1..5u32,
        5..15u32,
        proptest::option::of((0..1200u64, 15..240u64)),
    )
        .prop_map(move |(subtype, capacity, fuel, eff, window)| {
            let start = t("2025-03-07 00:00");
            Aircraft {
                id: id(&format!("AC_{n}")),
                subtype,
                capacity,
                base_fuel: fuel as f64,
                efficiency: eff as f64,
                pre_assignments: window
                    .map(|(from, len)| {
                        vec![PreAssignment {
                            start: plus(start, from),
                            end: plus(start, from + len),
                        }]
                    })
                    .unwrap_or_default(),
            }
        })
}
