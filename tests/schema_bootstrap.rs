use rusqlite::Connection;
use spaceways::model::Planet;
use spaceways::persist::{Store, ensure_schema};
use spaceways::writer::Writer;

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("select name from sqlite_master where type = 'table' order by name")
        .expect("catalog query");
    let names = stmt
        .query_map([], |row| row.get(0))
        .expect("catalog rows")
        .collect::<Result<Vec<String>, _>>()
        .expect("catalog names");
    names
}

#[test]
fn bootstrap_twice_produces_the_same_schema() {
    let conn = Connection::open_in_memory().expect("connection");
    ensure_schema(&conn).expect("first bootstrap");
    let first = table_names(&conn);
    // second pass must probe the catalog and create nothing
    ensure_schema(&conn).expect("second bootstrap");
    assert_eq!(first, table_names(&conn));
    for table in [
        "planets",
        "spacestations",
        "spaceports",
        "spacecrafts",
        "routes",
        "flights",
        "flight_schedule",
    ] {
        assert!(
            first.contains(&table.to_string()),
            "missing table {table} after bootstrap"
        );
    }
}

#[test]
fn opening_a_store_twice_on_one_connection_is_harmless() {
    let conn = Connection::open_in_memory().expect("connection");
    {
        let _store = Store::new(&conn).expect("first store");
    }
    let _store = Store::new(&conn).expect("second store over existing tables");
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registry.db");
    {
        let conn = Connection::open(&path).expect("create database file");
        let mut store = Store::new(&conn).expect("store");
        let mut writer = Writer::new(&mut store);
        let outcome = writer
            .add_planet(
                &Planet {
                    name: "Mars".to_string(),
                    size: 6779,
                    population: 0,
                },
                |_| true,
            )
            .expect("planet write");
        assert!(outcome.is_committed());
    }
    // reopening must keep the data and skip table creation
    let conn = Connection::open(&path).expect("reopen database file");
    let mut store = Store::new(&conn).expect("store over existing file");
    assert!(store.planet_exists("Mars").expect("probe"));
}
