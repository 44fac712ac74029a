//! A line-oriented console front end for the travel registry. This is the
//! stand-in presentation adapter: it parses each command into typed
//! arguments, calls into the core, and renders rows or outcomes. Business
//! rules live in the library, not here.

use std::io::{self, BufRead, Write as _};

use rusqlite::Connection;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spaceways::error::{Result, SpacewaysError};
use spaceways::itinerary::Itineraries;
use spaceways::model::{
    DayOfWeek, DepartureTime, Flight, Planet, Route, SpaceStation, SpacecraftType, Spaceport,
};
use spaceways::persist::Store;
use spaceways::settings::Settings;
use spaceways::writer::{Outcome, Writer};

const USAGE: &str = "\
Commands:
  add planet <name> <size> <population>
  add station <name> <planet|-> <capacity>
  add port <name> <planet|-> <station|-> <capacity> <fee>
  add craft <name> <capacity> <range>
  add route <origin id> <dest id> <distance>
  add flight <number> <route id> <craft> <HH:MM[:SS]> <hours> <day,day,...>
  ports <port name>
  departures <port name> <from day> <to day>
  arrivals <port name> <from day> <to day>
  flights <origin id> <dest id>
  find <day> <origin id> <dest id> <HH:MM[:SS]> <max hours> <max results>
  help | quit";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Err(err) = run() {
        // connection-level failure during setup is fatal, no degraded mode
        eprintln!("Fatal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::load()?;
    let connection = if settings.database.path == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(&settings.database.path)
    }?;
    let mut store = Store::new(&connection)?;
    info!(path = %settings.database.path, "store ready");
    println!("Spaceways travel registry. Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => (),
            ["quit"] | ["exit"] => break,
            ["help"] => println!("{USAGE}"),
            words => match dispatch(&mut store, &connection, &settings, words) {
                Ok(()) => (),
                Err(err) => println!("{err}"),
            },
        }
    }
    Ok(())
}

fn dispatch(
    store: &mut Store,
    connection: &Connection,
    settings: &Settings,
    words: &[&str],
) -> Result<()> {
    let queries = Itineraries::new(connection);
    match words {
        ["add", "planet", name, size, population] => {
            let planet = Planet {
                name: name.to_string(),
                size: parse(size, "size")?,
                population: parse(population, "population")?,
            };
            report(writer(store, settings).add_planet(&planet, confirm_on_stdin))
        }
        ["add", "station", name, planet, capacity] => {
            let station = SpaceStation {
                name: name.to_string(),
                planet: optional(planet),
                capacity: parse(capacity, "capacity")?,
            };
            report(writer(store, settings).add_station(&station, confirm_on_stdin))
        }
        ["add", "port", name, planet, station, capacity, fee] => {
            let port = Spaceport {
                name: name.to_string(),
                planet: optional(planet),
                station: optional(station),
                capacity: parse(capacity, "capacity")?,
                fee: parse(fee, "fee")?,
            };
            match writer(store, settings).add_spaceport(&port, confirm_on_stdin)? {
                Outcome::Committed(id) => println!("Saved as spaceport {id}."),
                Outcome::Aborted => println!("Discarded."),
            }
            Ok(())
        }
        ["add", "craft", name, capacity, range] => {
            let craft = SpacecraftType {
                name: name.to_string(),
                capacity: parse(capacity, "capacity")?,
                max_range: parse(range, "range")?,
            };
            report(writer(store, settings).add_spacecraft(&craft, confirm_on_stdin))
        }
        ["add", "route", origin, destination, distance] => {
            let route = Route {
                origin: parse(origin, "origin id")?,
                destination: parse(destination, "destination id")?,
                distance: parse(distance, "distance")?,
            };
            match writer(store, settings).add_route(&route, confirm_on_stdin)? {
                Outcome::Committed(id) => println!("Saved as route {id}."),
                Outcome::Aborted => println!("Discarded."),
            }
            Ok(())
        }
        ["add", "flight", number, route, craft, time, hours, days] => {
            let flight = Flight {
                number: number.to_string(),
                route: parse(route, "route id")?,
                spacecraft: craft.to_string(),
                departure: DepartureTime::parse(time)?,
                duration_hours: parse(hours, "duration")?,
            };
            let days: Vec<String> = days.split(',').map(|d| d.trim().to_string()).collect();
            report(writer(store, settings).add_flight(&flight, &days, confirm_on_stdin))
        }
        ["ports", name] => render(queries.connected_ports(name)?),
        ["departures", port, from, to] => {
            render(queries.departures(port, from.parse()?, to.parse()?)?)
        }
        ["arrivals", port, from, to] => {
            render(queries.arrivals(port, from.parse()?, to.parse()?)?)
        }
        ["flights", origin, destination] => render(
            queries.flights_between(parse(origin, "origin id")?, parse(destination, "destination id")?)?,
        ),
        ["find", day, origin, destination, time, hours, limit] => {
            let day: DayOfWeek = day.parse()?;
            render(queries.find_flights(
                day,
                parse(origin, "origin id")?,
                parse(destination, "destination id")?,
                DepartureTime::parse(time)?,
                parse(hours, "max hours")?,
                parse(limit, "max results")?,
            )?)
        }
        _ => {
            println!("Unrecognized command. Type 'help'.");
            Ok(())
        }
    }
}

fn writer<'db, 'store>(store: &'store mut Store<'db>, settings: &Settings) -> Writer<'db, 'store> {
    Writer::with_timeout(store, settings.confirmation_timeout())
}

fn optional(field: &str) -> Option<String> {
    if field == "-" {
        None
    } else {
        Some(field.to_string())
    }
}

fn parse<T: std::str::FromStr>(field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| SpacewaysError::Validation(format!("Please enter a valid value for {what}.")))
}

fn confirm_on_stdin(summary: &str) -> bool {
    print!("Save {summary}? [y/N] ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn report<T>(outcome: Result<Outcome<T>>) -> Result<()> {
    match outcome? {
        Outcome::Committed(_) => println!("Saved."),
        Outcome::Aborted => println!("Discarded."),
    }
    Ok(())
}

fn render<R: std::fmt::Display>(rows: Vec<R>) -> Result<()> {
    if rows.is_empty() {
        println!("No results found.");
    } else {
        for row in &rows {
            println!("{row}");
        }
    }
    Ok(())
}
