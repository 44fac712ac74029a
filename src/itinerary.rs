//! The itinerary query engine: five fixed, parameterized read-only
//! traversals of the route/flight/schedule graph. Queries never fail on an
//! empty match; they return an empty, ordered sequence of rows.
//!
//! Weekday filtering and ordering always follow the canonical Monday..Sunday
//! sequence. Day ranges are expanded to an explicit name list in Rust and
//! bound as placeholders, and result ordering ranks the day column through a
//! `case` expression, so the store's lexical collation never leaks into
//! weekday semantics.

use rusqlite::{Connection, params, params_from_iter};

use crate::error::Result;
use crate::model::{
    ConnectedPort, DayOfWeek, DepartureTime, FinderHit, PortId, RouteFlight, ScheduledFlight,
};

// canonical rank of the schedule's day column, for ordering
const DAY_RANK: &str = "
            case fs.day_of_week
                when 'Monday' then 1
                when 'Tuesday' then 2
                when 'Wednesday' then 3
                when 'Thursday' then 4
                when 'Friday' then 5
                when 'Saturday' then 6
                when 'Sunday' then 7
            end";

/// The departure-time window of the flight finder opens at the requested
/// time and closes this many hours later (clamped to the end of the day).
pub const FINDER_WINDOW_HOURS: i64 = 3;

pub struct Itineraries<'db> {
    db: &'db Connection,
}

impl<'db> Itineraries<'db> {
    pub fn new(db: &'db Connection) -> Self {
        Self { db }
    }

    /// The distinct other ports directly reachable from the named port over
    /// any route, in either direction, ordered by port name.
    pub fn connected_ports(&self, port_name: &str) -> Result<Vec<ConnectedPort>> {
        let mut stmt = self.db.prepare(
            "
            select distinct
                    case when r.origin_id = sp.spaceport_id
                        then r.dest_id
                        else r.origin_id end as other_port_id,
                    sp2.port_name
                from spaceports sp
                join routes r
                on sp.spaceport_id in (r.origin_id, r.dest_id)
                join spaceports sp2
                on sp2.spaceport_id = case when r.origin_id = sp.spaceport_id
                                            then r.dest_id
                                            else r.origin_id end
                where sp.port_name = ?
                order by sp2.port_name
        ",
        )?;
        let rows = stmt.query_map(params![port_name], |row| {
            Ok(ConnectedPort {
                port_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Flights departing from the named port on a day inside the inclusive
    /// canonical range, ordered by weekday rank then departure time.
    pub fn departures(
        &self,
        port_name: &str,
        from: DayOfWeek,
        to: DayOfWeek,
    ) -> Result<Vec<ScheduledFlight>> {
        self.scheduled(port_name, from, to, "r.origin_id")
    }

    /// As [`departures`](Self::departures), joined on the route destination.
    pub fn arrivals(
        &self,
        port_name: &str,
        from: DayOfWeek,
        to: DayOfWeek,
    ) -> Result<Vec<ScheduledFlight>> {
        self.scheduled(port_name, from, to, "r.dest_id")
    }

    fn scheduled(
        &self,
        port_name: &str,
        from: DayOfWeek,
        to: DayOfWeek,
        endpoint: &str,
    ) -> Result<Vec<ScheduledFlight>> {
        let span = DayOfWeek::span(from, to);
        let placeholders = vec!["?"; span.len()].join(", ");
        let sql = format!(
            "
            select f.flight_number, fs.day_of_week, f.departure_time, f.flight_duration
                from flights f
                join flight_schedule fs
                on f.flight_number = fs.flight_number
                join routes r
                on f.route_id = r.route_id
                join spaceports sp
                on {endpoint} = sp.spaceport_id
                where sp.port_name = ?
                and fs.day_of_week in ({placeholders})
                order by {DAY_RANK}, f.departure_time
        "
        );
        let mut stmt = self.db.prepare(&sql)?;
        let mut binds: Vec<String> = vec![port_name.to_string()];
        binds.extend(span.iter().map(|d| d.name().to_string()));
        let rows = stmt.query_map(params_from_iter(binds.iter()), |row| {
            Ok(ScheduledFlight {
                flight_number: row.get(0)?,
                day: row.get(1)?,
                departure: row.get(2)?,
                duration_hours: row.get(3)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Every flight whose route matches the exact ordered port pair, with
    /// port names, route distance and spacecraft type.
    pub fn flights_between(
        &self,
        origin: PortId,
        destination: PortId,
    ) -> Result<Vec<RouteFlight>> {
        let sql = format!(
            "
            select f.flight_number, fs.day_of_week, f.departure_time, f.flight_duration,
                    sp1.port_name, sp2.port_name, r.dist, f.spacecraft_type
                from flights f
                join flight_schedule fs
                on f.flight_number = fs.flight_number
                join routes r
                on f.route_id = r.route_id
                join spaceports sp1
                on r.origin_id = sp1.spaceport_id
                join spaceports sp2
                on r.dest_id = sp2.spaceport_id
                where r.origin_id = ?
                and r.dest_id = ?
                order by {DAY_RANK}, f.departure_time
        "
        );
        let mut stmt = self.db.prepare(&sql)?;
        let rows = stmt.query_map(params![origin, destination], |row| {
            Ok(RouteFlight {
                flight_number: row.get(0)?,
                day: row.get(1)?,
                departure: row.get(2)?,
                duration_hours: row.get(3)?,
                origin: row.get(4)?,
                destination: row.get(5)?,
                distance: row.get(6)?,
                spacecraft: row.get(7)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Direct flights on the exact route and day departing inside the window
    /// `[depart_after, depart_after + 3h]`, with duration at most
    /// `max_travel_hours`, capped at `max_results` rows.
    ///
    /// The cap is a plain result-count limit. True multi-hop itineraries
    /// across intermediate ports are not searched; only the direct route is
    /// considered.
    pub fn find_flights(
        &self,
        day: DayOfWeek,
        origin: PortId,
        destination: PortId,
        depart_after: DepartureTime,
        max_travel_hours: f64,
        max_results: u32,
    ) -> Result<Vec<FinderHit>> {
        let window_end = depart_after.window_end(FINDER_WINDOW_HOURS);
        let mut stmt = self.db.prepare(
            "
            select f.flight_number, fs.day_of_week, f.departure_time, f.flight_duration,
                    r.origin_id, r.dest_id, r.dist, f.spacecraft_type
                from flights f
                join flight_schedule fs
                on f.flight_number = fs.flight_number
                join routes r
                on f.route_id = r.route_id
                where r.origin_id = ?
                and r.dest_id = ?
                and fs.day_of_week = ?
                and f.departure_time >= ?
                and f.departure_time <= ?
                and f.flight_duration <= ?
                order by f.departure_time
                limit ?
        ",
        )?;
        let rows = stmt.query_map(
            params![
                origin,
                destination,
                day,
                depart_after,
                window_end,
                max_travel_hours,
                max_results
            ],
            |row| {
                Ok(FinderHit {
                    flight_number: row.get(0)?,
                    day: row.get(1)?,
                    departure: row.get(2)?,
                    duration_hours: row.get(3)?,
                    origin_id: row.get(4)?,
                    destination_id: row.get(5)?,
                    distance: row.get(6)?,
                    spacecraft: row.get(7)?,
                })
            },
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }
}
