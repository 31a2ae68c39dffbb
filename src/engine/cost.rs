use crate::aircraft::Aircraft;
use crate::error::EngineError;
use crate::flight::Flight;

/// Emissions-proportional cost of flying `flight` with `aircraft`.
///
/// Every cost in a run goes through here, for rewards and for committed
/// events alike. Zero efficiency fails instead of producing an infinite cost.
pub fn carbon(flight: &Flight, aircraft: &Aircraft) -> Result<f64, EngineError> {
    if aircraft.efficiency == 0.0 {
        return Err(EngineError::ZeroEfficiency(aircraft.id.clone()));
    }
    Ok(flight.distance * aircraft.base_fuel / aircraft.efficiency)
}
