// used for persistence
use rusqlite::{Connection, Error, Statement, Transaction, params};
use tracing::debug;

use crate::error::Result;
use crate::model::{DayOfWeek, Flight, Planet, PortId, Route, RouteId, SpaceStation, SpacecraftType, Spaceport};

// One entry per table, created only when the catalog probe misses.
// Constraints the validator also checks are kept in the DDL so the store
// rejects what slips past application code.
const TABLES: [(&str, &str); 7] = [
    (
        "planets",
        "
        create table planets (
            planet_name text not null,
            size integer not null,
            population integer not null,
            constraint referenceable_planet primary key (
                planet_name
            ),
            constraint chk_planet_size check (size > 0),
            constraint chk_planet_population check (population >= 0)
        );
        ",
    ),
    (
        "spacestations",
        "
        create table spacestations (
            station_name text not null,
            planet_associated text default null,
            capacity_limit integer not null,
            constraint referenceable_station primary key (
                station_name
            ),
            constraint station_on_planet foreign key (
                planet_associated
            ) references planets(planet_name),
            constraint chk_station_capacity check (capacity_limit > 0)
        );
        ",
    ),
    (
        "spaceports",
        "
        create table spaceports (
            spaceport_id integer primary key autoincrement,
            port_name text not null,
            planet_name text null,
            station_name text null,
            capacity integer not null,
            fee integer not null,
            constraint port_on_planet foreign key (
                planet_name
            ) references planets(planet_name),
            constraint port_on_station foreign key (
                station_name
            ) references spacestations(station_name),
            constraint uq_station unique (station_name),
            constraint uq_planet_port unique (planet_name, port_name),
            constraint chk_spaceport_capacity check (capacity > 0),
            constraint chk_spaceport_fee check (fee >= 0),
            constraint chk_one_owner check (
                (planet_name is null) <> (station_name is null)
            )
        );
        ",
    ),
    (
        "spacecrafts",
        "
        create table spacecrafts (
            type_name text not null,
            capacity integer not null,
            max_range integer not null,
            constraint referenceable_spacecraft primary key (
                type_name
            ),
            constraint chk_sc_capacity check (capacity > 0),
            constraint chk_sc_range check (max_range > 0)
        );
        ",
    ),
    (
        "routes",
        "
        create table routes (
            route_id integer primary key autoincrement,
            origin_id integer not null,
            dest_id integer not null,
            dist integer not null,
            constraint route_origin foreign key (
                origin_id
            ) references spaceports(spaceport_id),
            constraint route_dest foreign key (
                dest_id
            ) references spaceports(spaceport_id),
            constraint chk_route_distance check (dist > 0),
            constraint chk_route_endpoints check (origin_id <> dest_id)
        );
        ",
    ),
    (
        "flights",
        "
        create table flights (
            flight_number text not null,
            route_id integer not null,
            spacecraft_type text not null,
            departure_time text not null,
            flight_duration real not null,
            constraint referenceable_flight primary key (
                flight_number
            ),
            constraint flight_on_route foreign key (
                route_id
            ) references routes(route_id),
            constraint flight_by_craft foreign key (
                spacecraft_type
            ) references spacecrafts(type_name),
            constraint chk_flight_duration check (flight_duration > 0)
        );
        ",
    ),
    (
        "flight_schedule",
        "
        create table flight_schedule (
            flight_number text not null,
            day_of_week text not null,
            constraint unique_flight_day primary key (
                flight_number, day_of_week
            ),
            constraint schedule_of_flight foreign key (
                flight_number
            ) references flights(flight_number),
            constraint chk_day check (day_of_week in (
                'Monday','Tuesday','Wednesday','Thursday','Friday','Saturday','Sunday'
            ))
        );
        ",
    ),
];

fn table_exists(connection: &Connection, name: &str) -> Result<bool> {
    let count: i64 = connection.query_row(
        "
        select count(*)
            from sqlite_master
            where type = 'table'
            and name = ?
        ",
        params![name],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}

/// Create any table that is not yet present. Safe to call repeatedly; each
/// table is probed in the catalog before its DDL runs.
pub fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch("pragma foreign_keys = on;")?;
    for (name, ddl) in TABLES {
        if !table_exists(connection, name)? {
            connection.execute_batch(ddl)?;
            debug!(table = name, "created table");
        }
    }
    Ok(())
}

// ------------- Store -------------
/// Prepared access to the travel registry tables over a borrowed connection.
/// The caller owns the connection; the store owns no entity state of its own.
pub struct Store<'db> {
    pub db: &'db Connection,
    // Adders
    add_planet: Statement<'db>,
    add_station: Statement<'db>,
    add_port: Statement<'db>,
    add_craft: Statement<'db>,
    add_route: Statement<'db>,
    add_flight: Statement<'db>,
    add_schedule_day: Statement<'db>,
    // Existence probes for the validator
    get_planet: Statement<'db>,
    get_station: Statement<'db>,
    get_port: Statement<'db>,
    get_port_planet: Statement<'db>,
    get_craft_range: Statement<'db>,
    get_route_distance: Statement<'db>,
    get_flight: Statement<'db>,
}

impl<'db> Store<'db> {
    pub fn new<'connection>(connection: &'connection Connection) -> Result<Store<'connection>> {
        ensure_schema(connection)?;
        Ok(Store {
            db: connection,
            add_planet: connection.prepare(
                "
                insert into planets (
                    planet_name,
                    size,
                    population
                ) values (?, ?, ?)
            ",
            )?,
            add_station: connection.prepare(
                "
                insert into spacestations (
                    station_name,
                    planet_associated,
                    capacity_limit
                ) values (?, ?, ?)
            ",
            )?,
            add_port: connection.prepare(
                "
                insert into spaceports (
                    port_name,
                    planet_name,
                    station_name,
                    capacity,
                    fee
                ) values (?, ?, ?, ?, ?)
            ",
            )?,
            add_craft: connection.prepare(
                "
                insert into spacecrafts (
                    type_name,
                    capacity,
                    max_range
                ) values (?, ?, ?)
            ",
            )?,
            add_route: connection.prepare(
                "
                insert into routes (
                    origin_id,
                    dest_id,
                    dist
                ) values (?, ?, ?)
            ",
            )?,
            add_flight: connection.prepare(
                "
                insert into flights (
                    flight_number,
                    route_id,
                    spacecraft_type,
                    departure_time,
                    flight_duration
                ) values (?, ?, ?, ?, ?)
            ",
            )?,
            add_schedule_day: connection.prepare(
                "
                insert into flight_schedule (
                    flight_number,
                    day_of_week
                ) values (?, ?)
            ",
            )?,
            get_planet: connection.prepare(
                "
                select count(*)
                    from planets
                    where planet_name = ?
            ",
            )?,
            get_station: connection.prepare(
                "
                select count(*)
                    from spacestations
                    where station_name = ?
            ",
            )?,
            get_port: connection.prepare(
                "
                select count(*)
                    from spaceports
                    where spaceport_id = ?
            ",
            )?,
            get_port_planet: connection.prepare(
                "
                select planet_name
                    from spaceports
                    where spaceport_id = ?
            ",
            )?,
            get_craft_range: connection.prepare(
                "
                select max_range
                    from spacecrafts
                    where type_name = ?
            ",
            )?,
            get_route_distance: connection.prepare(
                "
                select dist
                    from routes
                    where route_id = ?
            ",
            )?,
            get_flight: connection.prepare(
                "
                select count(*)
                    from flights
                    where flight_number = ?
            ",
            )?,
        })
    }

    /// Open a transaction on the underlying connection. Dropping it rolls
    /// back; only an explicit `commit` makes staged writes durable.
    pub fn begin(&self) -> Result<Transaction<'db>> {
        let db: &'db Connection = self.db;
        Ok(db.unchecked_transaction()?)
    }

    // ------------- probes (read-only) -------------

    pub fn planet_exists(&mut self, name: &str) -> Result<bool> {
        let count: i64 = self.get_planet.query_row(params![name], |r| r.get(0))?;
        Ok(count > 0)
    }

    pub fn station_exists(&mut self, name: &str) -> Result<bool> {
        let count: i64 = self.get_station.query_row(params![name], |r| r.get(0))?;
        Ok(count > 0)
    }

    pub fn port_exists(&mut self, port: PortId) -> Result<bool> {
        let count: i64 = self.get_port.query_row(params![port], |r| r.get(0))?;
        Ok(count > 0)
    }

    /// The owning planet of a port, if the port exists and is planet-owned.
    pub fn port_planet(&mut self, port: PortId) -> Result<Option<String>> {
        match self
            .get_port_planet
            .query_row(params![port], |r| r.get::<_, Option<String>>(0))
        {
            Ok(planet) => Ok(planet),
            Err(Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn craft_range(&mut self, name: &str) -> Result<Option<i64>> {
        match self.get_craft_range.query_row(params![name], |r| r.get(0)) {
            Ok(range) => Ok(Some(range)),
            Err(Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn route_distance(&mut self, route: RouteId) -> Result<Option<i64>> {
        match self.get_route_distance.query_row(params![route], |r| r.get(0)) {
            Ok(dist) => Ok(Some(dist)),
            Err(Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn flight_exists(&mut self, number: &str) -> Result<bool> {
        let count: i64 = self.get_flight.query_row(params![number], |r| r.get(0))?;
        Ok(count > 0)
    }

    // ------------- staged inserts -------------
    // These run inside whatever transaction is open on the connection; the
    // writer decides whether they ever become visible.

    pub fn insert_planet(&mut self, planet: &Planet) -> Result<()> {
        self.add_planet
            .execute(params![&planet.name, &planet.size, &planet.population])?;
        Ok(())
    }

    pub fn insert_station(&mut self, station: &SpaceStation) -> Result<()> {
        self.add_station
            .execute(params![&station.name, &station.planet, &station.capacity])?;
        Ok(())
    }

    pub fn insert_spaceport(&mut self, port: &Spaceport) -> Result<PortId> {
        self.add_port.execute(params![
            &port.name,
            &port.planet,
            &port.station,
            &port.capacity,
            &port.fee
        ])?;
        Ok(self.db.last_insert_rowid())
    }

    pub fn insert_spacecraft(&mut self, craft: &SpacecraftType) -> Result<()> {
        self.add_craft
            .execute(params![&craft.name, &craft.capacity, &craft.max_range])?;
        Ok(())
    }

    pub fn insert_route(&mut self, route: &Route) -> Result<RouteId> {
        self.add_route
            .execute(params![&route.origin, &route.destination, &route.distance])?;
        Ok(self.db.last_insert_rowid())
    }

    pub fn insert_flight(&mut self, flight: &Flight) -> Result<()> {
        self.add_flight.execute(params![
            &flight.number,
            &flight.route,
            &flight.spacecraft,
            &flight.departure,
            &flight.duration_hours
        ])?;
        Ok(())
    }

    pub fn insert_schedule_day(&mut self, number: &str, day: DayOfWeek) -> Result<()> {
        self.add_schedule_day.execute(params![number, day])?;
        Ok(())
    }
}
