use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rusqlite::Connection;
use spaceways::itinerary::Itineraries;
use spaceways::model::{DayOfWeek, DepartureTime, Flight, Planet, Route, SpacecraftType, Spaceport};
use spaceways::persist::Store;
use spaceways::writer::{Outcome, Writer};

// A ring of ports on alternating planets, one flight per link per weekday.
fn seed(conn: &Connection, ports: i64) {
    let mut store = Store::new(conn).expect("store");
    let mut writer = Writer::new(&mut store);
    for (name, size) in [("Mars", 6779), ("Venus", 12104)] {
        writer
            .add_planet(
                &Planet {
                    name: name.to_string(),
                    size,
                    population: 0,
                },
                |_| true,
            )
            .expect("planet");
    }
    writer
        .add_spacecraft(
            &SpacecraftType {
                name: "Falcon".to_string(),
                capacity: 40,
                max_range: 1000,
            },
            |_| true,
        )
        .expect("craft");
    let mut ids = Vec::new();
    for i in 0..ports {
        let planet = if i % 2 == 0 { "Mars" } else { "Venus" };
        let port = Spaceport {
            name: format!("Port-{i}"),
            planet: Some(planet.to_string()),
            station: None,
            capacity: 100,
            fee: 5,
        };
        match writer.add_spaceport(&port, |_| true).expect("port") {
            Outcome::Committed(id) => ids.push(id),
            Outcome::Aborted => unreachable!(),
        }
    }
    for i in 0..ports as usize {
        let origin = ids[i];
        let destination = ids[(i + 1) % ids.len()];
        let route = match writer
            .add_route(
                &Route {
                    origin,
                    destination,
                    distance: 100,
                },
                |_| true,
            )
            .expect("route")
        {
            Outcome::Committed(id) => id,
            Outcome::Aborted => unreachable!(),
        };
        let days: Vec<String> = DayOfWeek::ALL.iter().map(|d| d.name().to_string()).collect();
        let flight = Flight {
            number: format!("SP{i}"),
            route,
            spacecraft: "Falcon".to_string(),
            departure: DepartureTime::parse("08:00").expect("time"),
            duration_hours: 2.5,
        };
        writer.add_flight(&flight, &days, |_| true).expect("flight");
    }
}

fn itinerary_benchmarks(c: &mut Criterion) {
    let conn = Connection::open_in_memory().expect("connection");
    seed(&conn, 64);
    let queries = Itineraries::new(&conn);

    c.bench_function("departures_full_week", |b| {
        b.iter(|| {
            queries
                .departures(black_box("Port-0"), DayOfWeek::Monday, DayOfWeek::Sunday)
                .expect("query")
        })
    });

    c.bench_function("connected_ports", |b| {
        b.iter(|| queries.connected_ports(black_box("Port-0")).expect("query"))
    });

    c.bench_function("find_flights_window", |b| {
        let after = DepartureTime::parse("07:00").expect("time");
        b.iter(|| {
            queries
                .find_flights(DayOfWeek::Monday, black_box(1), black_box(2), after, 10.0, 5)
                .expect("query")
        })
    });
}

criterion_group!(benches, itinerary_benchmarks);
criterion_main!(benches);
