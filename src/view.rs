use tabled::Tabled;
use tailwise::aircraft::Aircraft;
use tailwise::engine::{Event, ResultSnapshot};
use tailwise::flight::Flight;
use tailwise::stats::Statistics;

#[derive(Tabled)]
pub struct FlightRow {
    #[tabled(rename = "flight")]
    id: String,
    route: String,
    dep: String,
    arr: String,
    #[tabled(rename = "ground")]
    ground_time: u64,
    subtype: String,
    seats: u32,
    pax: u32,
    distance: f64,
    onward: String,
}

impl From<&Flight> for FlightRow {
    fn from(f: &Flight) -> Self {
        FlightRow {
            id: f.id.to_string(),
            route: format!("{}-{}", f.origin, f.dest),
            dep: f.dep_time.to_string(),
            arr: f.arr_time.to_string(),
            ground_time: f.ground_time,
            subtype: f.subtype.to_string(),
            seats: f.min_seating_capacity,
            pax: f.passengers,
            distance: f.distance,
            onward: f.onward_flight.as_deref().unwrap_or("-").to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct AircraftRow {
    tail: String,
    subtype: String,
    capacity: u32,
    base_fuel: f64,
    efficiency: f64,
    blackouts: String,
}

impl From<&Aircraft> for AircraftRow {
    fn from(a: &Aircraft) -> Self {
        let blackouts = a
            .pre_assignments
            .iter()
            .map(|p| format!("{} - {}", p.start, p.end))
            .collect::<Vec<_>>();
        AircraftRow {
            tail: a.id.to_string(),
            subtype: a.subtype.to_string(),
            capacity: a.capacity,
            base_fuel: a.base_fuel,
            efficiency: a.efficiency,
            blackouts: if blackouts.is_empty() { "-".to_string() } else { blackouts.join("\n") },
        }
    }
}

#[derive(Tabled)]
pub struct EventRow {
    flight: String,
    tail: String,
    route: String,
    dep: String,
    arr: String,
    pax: u32,
    onward: String,
    carbon: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        EventRow {
            flight: e.flight_id.to_string(),
            tail: e.tail_num.to_string(),
            route: format!("{}-{}", e.origin, e.dest),
            dep: e.dep_time.to_string(),
            arr: e.arr_time.to_string(),
            pax: e.passengers,
            onward: e.onward_flight.as_deref().unwrap_or("-").to_string(),
            carbon: format!("{:.2}", e.carbon),
        }
    }
}

#[derive(Tabled)]
pub struct HistoryRow {
    timestamp: String,
    mode: String,
    assigned: usize,
    carbon: String,
    recovered: usize,
}

impl From<&ResultSnapshot> for HistoryRow {
    fn from(s: &ResultSnapshot) -> Self {
        HistoryRow {
            timestamp: s.timestamp.to_string(),
            mode: s.mode.to_string(),
            assigned: s.assignments.len(),
            carbon: format!("{:.2}", s.total_carbon()),
            recovered: s.chaos_recovered,
        }
    }
}

#[derive(Tabled)]
pub struct StatisticsRow {
    total_flights: usize,
    avg_passengers: String,
    total_co2: String,
    chaos_recovered: usize,
}

impl From<&Statistics> for StatisticsRow {
    fn from(s: &Statistics) -> Self {
        StatisticsRow {
            total_flights: s.total_flights,
            avg_passengers: format!("{:.1}", s.avg_passengers),
            total_co2: format!("{:.2}", s.total_co2),
            chaos_recovered: s.chaos_recovered,
        }
    }
}
