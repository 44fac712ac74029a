//! Entity validation ahead of any persistence attempt.
//!
//! Every check here fails closed: the first violated rule aborts the write
//! with a specific reason. Missing referenced entities are reported as
//! [`SpacewaysError::Referential`], everything else as
//! [`SpacewaysError::Validation`]. The only storage access is read-only
//! existence probes through the [`Store`]; validation never mutates.

use crate::error::{Result, SpacewaysError};
use crate::model::{DayOfWeek, Flight, Planet, Route, SpaceStation, SpacecraftType, Spaceport};
use crate::persist::Store;

fn validation(reason: impl Into<String>) -> SpacewaysError {
    SpacewaysError::Validation(reason.into())
}

fn referential(reason: impl Into<String>) -> SpacewaysError {
    SpacewaysError::Referential(reason.into())
}

pub fn planet(planet: &Planet) -> Result<()> {
    if planet.name.trim().is_empty() {
        return Err(validation("Planet name cannot be empty."));
    }
    if planet.size <= 0 {
        return Err(validation("Planet size must be a positive integer."));
    }
    if planet.population < 0 {
        return Err(validation("Population must be a non-negative integer."));
    }
    Ok(())
}

pub fn station(store: &mut Store, station: &SpaceStation) -> Result<()> {
    if station.name.trim().is_empty() {
        return Err(validation("Station name cannot be empty."));
    }
    if station.capacity <= 0 {
        return Err(validation("Capacity must be a positive integer."));
    }
    if let Some(planet) = &station.planet {
        if planet.trim().is_empty() {
            return Err(validation("Planet associated must be a valid name or absent."));
        }
        if !store.planet_exists(planet)? {
            return Err(referential(format!("Planet '{planet}' does not exist.")));
        }
    }
    Ok(())
}

pub fn spaceport(store: &mut Store, port: &Spaceport) -> Result<()> {
    if port.name.trim().is_empty() {
        return Err(validation("Port name cannot be empty."));
    }
    match (&port.planet, &port.station) {
        (None, None) => {
            return Err(validation("Must be owned by either a planet or a spacestation."));
        }
        (Some(_), Some(_)) => {
            return Err(validation(
                "A spaceport cannot belong to both a planet and a station.",
            ));
        }
        _ => (),
    }
    if port.fee < 0 {
        return Err(validation("Fee must be a non-negative integer."));
    }
    if port.capacity <= 0 {
        return Err(validation("Capacity must be a positive integer."));
    }
    if let Some(station) = &port.station {
        // one port per station, carrying the station's identity
        if port.name != *station {
            return Err(validation(
                "Port name must match station name if owned by a spacestation.",
            ));
        }
        if !store.station_exists(station)? {
            return Err(referential(format!("Station '{station}' does not exist.")));
        }
    }
    if let Some(planet) = &port.planet {
        if !store.planet_exists(planet)? {
            return Err(referential(format!("Planet '{planet}' does not exist.")));
        }
    }
    Ok(())
}

pub fn spacecraft(craft: &SpacecraftType) -> Result<()> {
    if craft.name.trim().is_empty() {
        return Err(validation("Type name cannot be empty."));
    }
    if craft.capacity <= 0 {
        return Err(validation("Capacity must be a positive integer."));
    }
    if craft.max_range <= 0 {
        return Err(validation("Range must be a positive integer."));
    }
    Ok(())
}

pub fn route(store: &mut Store, route: &Route) -> Result<()> {
    if route.origin == route.destination {
        return Err(validation("A route must connect two different spaceports."));
    }
    if route.distance <= 0 {
        return Err(validation("Distance must be a positive integer."));
    }
    if !store.port_exists(route.origin)? {
        return Err(referential(format!(
            "Spaceport {} does not exist.",
            route.origin
        )));
    }
    if !store.port_exists(route.destination)? {
        return Err(referential(format!(
            "Spaceport {} does not exist.",
            route.destination
        )));
    }
    // ports on one body are not routed, only inter-body links are
    if let (Some(origin_planet), Some(dest_planet)) = (
        store.port_planet(route.origin)?,
        store.port_planet(route.destination)?,
    ) {
        if origin_planet == dest_planet {
            return Err(validation(format!(
                "Both ports are owned by planet '{origin_planet}'; routes within one planet are not allowed."
            )));
        }
    }
    Ok(())
}

/// Validate a flight together with its schedule-day tokens.
///
/// Day tokens must match the canonical weekday names exactly, with no
/// duplicates and at least one day; a single bad token rejects the whole
/// multi-day insert. Returns the parsed days for staging.
pub fn flight(store: &mut Store, flight: &Flight, days: &[String]) -> Result<Vec<DayOfWeek>> {
    if flight.number.trim().is_empty() {
        return Err(validation("Flight number cannot be empty."));
    }
    if store.flight_exists(&flight.number)? {
        return Err(validation(format!(
            "Flight number '{}' already exists.",
            flight.number
        )));
    }
    let distance = store
        .route_distance(flight.route)?
        .ok_or_else(|| referential(format!("Route ID {} does not exist.", flight.route)))?;
    let range = store.craft_range(&flight.spacecraft)?.ok_or_else(|| {
        referential(format!(
            "Spacecraft type '{}' does not exist.",
            flight.spacecraft
        ))
    })?;
    if distance > range {
        return Err(validation(format!(
            "Route distance {} exceeds the range {} of spacecraft '{}'.",
            distance, range, flight.spacecraft
        )));
    }
    if !flight.duration_hours.is_finite() || flight.duration_hours <= 0.0 {
        return Err(validation("Flight duration must be a positive number."));
    }
    // recorded as two-decimal hours, so two integer digits at most
    if flight.duration_hours >= 100.0 {
        return Err(validation("Flight duration must be below 100 hours."));
    }
    if days.is_empty() {
        return Err(validation("A flight must be scheduled on at least one day."));
    }
    let mut schedule = Vec::with_capacity(days.len());
    for token in days {
        let day: DayOfWeek = token.parse()?;
        if schedule.contains(&day) {
            return Err(validation(format!("Duplicate day: {day}")));
        }
        schedule.push(day);
    }
    Ok(schedule)
}
