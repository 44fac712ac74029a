//! The transactional entry writer.
//!
//! Every write is one logical unit: validate, stage inside a transaction,
//! present a summary to the caller-supplied decision closure, then commit on
//! a yes and roll back on a no or on any staging error. The compound
//! flight-plus-schedule write stages the flight row and all of its schedule
//! rows in the same transaction, so no flight can ever persist without its
//! days. At most one of fully-committed or fully-rolled-back results from
//! any single call.
//!
//! The decision closure stands in for whatever interactive surface drives
//! the writer; it receives a human-readable summary of the staged entry and
//! answers yes or no. An answer that arrives after the configured timeout is
//! treated as a no, so an abandoned confirmation cannot turn into a commit
//! long after the fact.

use std::time::{Duration, Instant};

use rusqlite::Transaction;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{Flight, Planet, PortId, Route, RouteId, SpaceStation, SpacecraftType, Spaceport};
use crate::persist::Store;
use crate::validate;

pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

/// How a write call ended. An aborted write is a normal outcome, not an
/// error: the store is untouched and the caller simply declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The entry is durable; carries the new surrogate key where one is
    /// assigned on creation.
    Committed(T),
    /// The caller declined, or the confirmation timed out; rolled back.
    Aborted,
}

impl<T> Outcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed(_))
    }
}

pub struct Writer<'db, 'store> {
    store: &'store mut Store<'db>,
    confirmation_timeout: Duration,
}

impl<'db, 'store> Writer<'db, 'store> {
    pub fn new(store: &'store mut Store<'db>) -> Self {
        Self::with_timeout(store, DEFAULT_CONFIRMATION_TIMEOUT)
    }

    pub fn with_timeout(store: &'store mut Store<'db>, confirmation_timeout: Duration) -> Self {
        Self {
            store,
            confirmation_timeout,
        }
    }

    pub fn add_planet(
        &mut self,
        planet: &Planet,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome> {
        validate::planet(planet)?;
        let tx = self.store.begin()?;
        self.store.insert_planet(planet)?;
        if self.settle(tx, &planet.to_string(), confirm)? {
            Ok(Outcome::Committed(()))
        } else {
            Ok(Outcome::Aborted)
        }
    }

    pub fn add_station(
        &mut self,
        station: &SpaceStation,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome> {
        validate::station(self.store, station)?;
        let tx = self.store.begin()?;
        self.store.insert_station(station)?;
        if self.settle(tx, &station.to_string(), confirm)? {
            Ok(Outcome::Committed(()))
        } else {
            Ok(Outcome::Aborted)
        }
    }

    pub fn add_spaceport(
        &mut self,
        port: &Spaceport,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome<PortId>> {
        validate::spaceport(self.store, port)?;
        let tx = self.store.begin()?;
        let id = self.store.insert_spaceport(port)?;
        if self.settle(tx, &port.to_string(), confirm)? {
            Ok(Outcome::Committed(id))
        } else {
            Ok(Outcome::Aborted)
        }
    }

    pub fn add_spacecraft(
        &mut self,
        craft: &SpacecraftType,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome> {
        validate::spacecraft(craft)?;
        let tx = self.store.begin()?;
        self.store.insert_spacecraft(craft)?;
        if self.settle(tx, &craft.to_string(), confirm)? {
            Ok(Outcome::Committed(()))
        } else {
            Ok(Outcome::Aborted)
        }
    }

    pub fn add_route(
        &mut self,
        route: &Route,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome<RouteId>> {
        validate::route(self.store, route)?;
        let tx = self.store.begin()?;
        let id = self.store.insert_route(route)?;
        if self.settle(tx, &route.to_string(), confirm)? {
            Ok(Outcome::Committed(id))
        } else {
            Ok(Outcome::Aborted)
        }
    }

    /// The compound write: one flight row plus one schedule row per day, all
    /// in a single transaction. Day tokens are validated up front; a storage
    /// failure on any row rolls the whole group back.
    pub fn add_flight(
        &mut self,
        flight: &Flight,
        days: &[String],
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome> {
        let schedule = validate::flight(self.store, flight, days)?;
        let tx = self.store.begin()?;
        self.store.insert_flight(flight)?;
        for day in &schedule {
            self.store.insert_schedule_day(&flight.number, *day)?;
        }
        let day_names: Vec<&str> = schedule.iter().map(|d| d.name()).collect();
        let summary = format!("{flight} on {}", day_names.join(", "));
        if self.settle(tx, &summary, confirm)? {
            Ok(Outcome::Committed(()))
        } else {
            Ok(Outcome::Aborted)
        }
    }

    // Commit only on an affirmative answer inside the timeout; anything
    // else drops the transaction, which rolls back.
    fn settle(
        &self,
        tx: Transaction<'_>,
        summary: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool> {
        let asked = Instant::now();
        let confirmed = confirm(summary);
        let waited = asked.elapsed();
        if !confirmed {
            debug!(summary, "entry not confirmed, rolling back");
            return Ok(false);
        }
        if waited > self.confirmation_timeout {
            warn!(
                summary,
                waited_ms = waited.as_millis() as u64,
                "confirmation arrived after the timeout, rolling back"
            );
            return Ok(false);
        }
        tx.commit()?;
        info!(summary, "entry committed");
        Ok(true)
    }
}
