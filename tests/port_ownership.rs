use rusqlite::Connection;
use spaceways::error::SpacewaysError;
use spaceways::model::{Planet, SpaceStation, Spaceport};
use spaceways::persist::Store;
use spaceways::writer::Writer;

fn setup(conn: &Connection) -> Store<'_> {
    let mut store = Store::new(conn).expect("store");
    let mut writer = Writer::new(&mut store);
    writer
        .add_planet(
            &Planet {
                name: "Mars".to_string(),
                size: 6779,
                population: 0,
            },
            |_| true,
        )
        .expect("seed planet");
    store
}

fn spaceport_count(conn: &Connection) -> i64 {
    conn.query_row("select count(*) from spaceports", [], |r| r.get(0))
        .expect("count")
}

#[test]
fn both_owners_rejected_before_any_storage_call() {
    let conn = Connection::open_in_memory().expect("connection");
    let mut store = setup(&conn);
    let mut writer = Writer::new(&mut store);
    let port = Spaceport {
        name: "Twin".to_string(),
        planet: Some("Mars".to_string()),
        station: Some("Gateway".to_string()),
        capacity: 100,
        fee: 5,
    };
    let err = writer
        .add_spaceport(&port, |_| panic!("confirmation must never be reached"))
        .expect_err("both owners must be rejected");
    assert!(matches!(err, SpacewaysError::Validation(_)), "got {err}");
    assert_eq!(spaceport_count(&conn), 0);
}

#[test]
fn ownerless_port_rejected() {
    let conn = Connection::open_in_memory().expect("connection");
    let mut store = setup(&conn);
    let mut writer = Writer::new(&mut store);
    let port = Spaceport {
        name: "Orphan".to_string(),
        planet: None,
        station: None,
        capacity: 100,
        fee: 5,
    };
    let err = writer
        .add_spaceport(&port, |_| true)
        .expect_err("ownerless port must be rejected");
    assert!(matches!(err, SpacewaysError::Validation(_)), "got {err}");
    assert_eq!(spaceport_count(&conn), 0);
}

#[test]
fn station_port_must_carry_the_station_name() {
    let conn = Connection::open_in_memory().expect("connection");
    let mut store = setup(&conn);
    let mut writer = Writer::new(&mut store);
    writer
        .add_station(
            &SpaceStation {
                name: "Gateway".to_string(),
                planet: Some("Mars".to_string()),
                capacity: 500,
            },
            |_| true,
        )
        .expect("seed station");

    let mismatched = Spaceport {
        name: "SomethingElse".to_string(),
        planet: None,
        station: Some("Gateway".to_string()),
        capacity: 50,
        fee: 0,
    };
    let err = writer
        .add_spaceport(&mismatched, |_| true)
        .expect_err("name mismatch must be rejected");
    assert!(matches!(err, SpacewaysError::Validation(_)), "got {err}");

    let matching = Spaceport {
        name: "Gateway".to_string(),
        planet: None,
        station: Some("Gateway".to_string()),
        capacity: 50,
        fee: 0,
    };
    let outcome = writer
        .add_spaceport(&matching, |_| true)
        .expect("matching name is fine");
    assert!(outcome.is_committed());
}

#[test]
fn station_on_unknown_planet_is_a_referential_error() {
    // Scenario: Phobos-1 above Mars works, Orphan above Venus does not
    let conn = Connection::open_in_memory().expect("connection");
    let mut store = setup(&conn);
    let mut writer = Writer::new(&mut store);
    let outcome = writer
        .add_station(
            &SpaceStation {
                name: "Phobos-1".to_string(),
                planet: Some("Mars".to_string()),
                capacity: 500,
            },
            |_| true,
        )
        .expect("station above a known planet");
    assert!(outcome.is_committed());

    let err = writer
        .add_station(
            &SpaceStation {
                name: "Orphan".to_string(),
                planet: Some("Venus".to_string()),
                capacity: 10,
            },
            |_| true,
        )
        .expect_err("Venus does not exist");
    assert!(matches!(err, SpacewaysError::Referential(_)), "got {err}");
}

#[test]
fn free_floating_station_needs_no_planet() {
    let conn = Connection::open_in_memory().expect("connection");
    let mut store = setup(&conn);
    let mut writer = Writer::new(&mut store);
    let outcome = writer
        .add_station(
            &SpaceStation {
                name: "Deep-Space-9".to_string(),
                planet: None,
                capacity: 300,
            },
            |_| true,
        )
        .expect("free station");
    assert!(outcome.is_committed());
}
