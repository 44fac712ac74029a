use std::fmt;
use std::str::FromStr;

// time-of-day values behind departures
use chrono::{Duration, NaiveTime};
// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SpacewaysError;

/// Surrogate identifier of a spaceport (the store's rowid).
pub type PortId = i64;
/// Surrogate identifier of a route.
pub type RouteId = i64;

// ------------- DayOfWeek -------------
/// A weekday in the canonical Monday..Sunday sequence.
///
/// All range and sort comparisons on weekdays use this canonical order,
/// never the lexical order of the names (which would put Friday before
/// Monday). Parsing is case-sensitive: only the seven exact names are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

// backing storage for the spans handed out by DayOfWeek::span
static CANONICAL_WEEK: [DayOfWeek; 7] = DayOfWeek::ALL;

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Position in the canonical sequence, 1 (Monday) through 7 (Sunday).
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    /// The inclusive canonical span between two days, normalized
    /// Monday-first: `span(Friday, Monday)` equals `span(Monday, Friday)`.
    pub fn span(a: DayOfWeek, b: DayOfWeek) -> &'static [DayOfWeek] {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        &CANONICAL_WEEK[lo as usize..=hi as usize]
    }
}

impl FromStr for DayOfWeek {
    type Err = SpacewaysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|d| d.name() == s)
            .copied()
            .ok_or_else(|| SpacewaysError::Validation(format!("Invalid day: {s}")))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ToSql for DayOfWeek {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.name()))
    }
}

impl FromSql for DayOfWeek {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: SpacewaysError| FromSqlError::Other(Box::new(e)))
    }
}

// ------------- DepartureTime -------------
lazy_static! {
    // two-digit hour and minute, optional two-digit seconds
    static ref TIME_OF_DAY: Regex = Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").unwrap();
}

/// A validated time of day, the departure time of a flight.
///
/// Only the strict `HH:MM` and `HH:MM:SS` forms are accepted; the value is
/// normalized to `HH:MM:SS` for storage so that textual comparison orders
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    pub fn parse(text: &str) -> crate::error::Result<Self> {
        if !TIME_OF_DAY.is_match(text) {
            return Err(SpacewaysError::Validation(format!(
                "Invalid time format: {text}"
            )));
        }
        let format = if text.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
        let time = NaiveTime::parse_from_str(text, format)
            .map_err(|_| SpacewaysError::Validation(format!("Invalid time of day: {text}")))?;
        Ok(Self(time))
    }

    /// The end of a search window opening at this time, clamped to the last
    /// second of the day rather than wrapping past midnight.
    pub fn window_end(&self, hours: i64) -> DepartureTime {
        let (end, wrapped) = self.0.overflowing_add_signed(Duration::hours(hours));
        if wrapped == 0 {
            Self(end)
        } else {
            Self(NaiveTime::from_hms_opt(23, 59, 59).expect("valid clock time"))
        }
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl ToSql for DepartureTime {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for DepartureTime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        DepartureTime::parse(text).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

// ------------- Entities -------------
// The entity structs are plain data carriers: the presentation side hands
// them over fully parsed, the validator judges them, the writer persists
// them. Ownership of all durable state stays with the store.

#[derive(Debug, Clone)]
pub struct Planet {
    pub name: String,
    pub size: i64,
    pub population: i64,
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "planet '{}' (size {}, population {})",
            self.name, self.size, self.population
        )
    }
}

#[derive(Debug, Clone)]
pub struct SpaceStation {
    pub name: String,
    /// Stations may orbit a planet or float free.
    pub planet: Option<String>,
    pub capacity: i64,
}

impl fmt::Display for SpaceStation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.planet {
            Some(planet) => write!(
                f,
                "station '{}' at planet '{}' (capacity {})",
                self.name, planet, self.capacity
            ),
            None => write!(f, "free station '{}' (capacity {})", self.name, self.capacity),
        }
    }
}

/// A boarding facility owned by exactly one planet or one station.
///
/// Both owner fields are optional on purpose: exclusivity is a business rule
/// the validator enforces (and the schema double-checks), not something the
/// type system hides from the caller.
#[derive(Debug, Clone)]
pub struct Spaceport {
    pub name: String,
    pub planet: Option<String>,
    pub station: Option<String>,
    pub capacity: i64,
    pub fee: i64,
}

impl fmt::Display for Spaceport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let owner = match (&self.planet, &self.station) {
            (Some(p), _) => format!("planet '{p}'"),
            (_, Some(s)) => format!("station '{s}'"),
            _ => "no owner".to_string(),
        };
        write!(
            f,
            "spaceport '{}' owned by {} (capacity {}, fee {})",
            self.name, owner, self.capacity, self.fee
        )
    }
}

#[derive(Debug, Clone)]
pub struct SpacecraftType {
    pub name: String,
    pub capacity: i64,
    /// The longest route distance this craft can fly.
    pub max_range: i64,
}

impl fmt::Display for SpacecraftType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "spacecraft type '{}' (capacity {}, range {})",
            self.name, self.capacity, self.max_range
        )
    }
}

/// A directed, distance-bearing link between two spaceports.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub origin: PortId,
    pub destination: PortId,
    pub distance: i64,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route from port {} to port {} (distance {})",
            self.origin, self.destination, self.distance
        )
    }
}

/// A scheduled service on one route, operated by one spacecraft type.
/// The weekdays it runs on live in the schedule, not here.
#[derive(Debug, Clone)]
pub struct Flight {
    pub number: String,
    pub route: RouteId,
    pub spacecraft: String,
    pub departure: DepartureTime,
    /// Duration in hours, fractional to two decimals.
    pub duration_hours: f64,
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "flight '{}' on route {} with '{}' departing {} ({} h)",
            self.number, self.route, self.spacecraft, self.departure, self.duration_hours
        )
    }
}

// ------------- Query rows -------------

/// One port directly reachable from the queried port over some route.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedPort {
    pub port_id: PortId,
    pub name: String,
}

impl fmt::Display for ConnectedPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.port_id, self.name)
    }
}

/// A departure or arrival hit within a weekday range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledFlight {
    pub flight_number: String,
    pub day: DayOfWeek,
    pub departure: DepartureTime,
    pub duration_hours: f64,
}

impl fmt::Display for ScheduledFlight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.flight_number, self.day, self.departure, self.duration_hours
        )
    }
}

/// A flight between two specific ports, with route and craft details.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFlight {
    pub flight_number: String,
    pub day: DayOfWeek,
    pub departure: DepartureTime,
    pub duration_hours: f64,
    pub origin: String,
    pub destination: String,
    pub distance: i64,
    pub spacecraft: String,
}

impl fmt::Display for RouteFlight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.flight_number,
            self.day,
            self.departure,
            self.duration_hours,
            self.origin,
            self.destination,
            self.distance,
            self.spacecraft
        )
    }
}

/// A flight-finder hit on the exact route and day, inside the time window.
#[derive(Debug, Clone, PartialEq)]
pub struct FinderHit {
    pub flight_number: String,
    pub day: DayOfWeek,
    pub departure: DepartureTime,
    pub duration_hours: f64,
    pub origin_id: PortId,
    pub destination_id: PortId,
    pub distance: i64,
    pub spacecraft: String,
}

impl fmt::Display for FinderHit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.flight_number,
            self.day,
            self.departure,
            self.duration_hours,
            self.origin_id,
            self.destination_id,
            self.distance,
            self.spacecraft
        )
    }
}
