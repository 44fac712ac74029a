use spaceways::model::DepartureTime;

#[test]
fn accepts_the_two_strict_forms() {
    assert_eq!(DepartureTime::parse("08:00").expect("short form").to_string(), "08:00:00");
    assert_eq!(
        DepartureTime::parse("23:59:59").expect("long form").to_string(),
        "23:59:59"
    );
    assert_eq!(DepartureTime::parse("00:00").expect("midnight").to_string(), "00:00:00");
}

#[test]
fn rejects_loose_or_out_of_range_forms() {
    for bad in [
        "8:00",      // one-digit hour
        "08:0",      // one-digit minute
        "0800",      // no separator
        "24:00",     // hour out of range
        "08:60",     // minute out of range
        "08:00:61",  // second out of range
        " 08:00",    // stray whitespace
        "08:00 ",
        "08-00",
        "2024-01-01 08:00:00", // date prefixes are not accepted
        "",
    ] {
        assert!(
            DepartureTime::parse(bad).is_err(),
            "'{bad}' should not parse as a departure time"
        );
    }
}

#[test]
fn window_end_adds_hours_and_clamps_at_end_of_day() {
    let morning = DepartureTime::parse("07:00").expect("time");
    assert_eq!(morning.window_end(3).to_string(), "10:00:00");

    let evening = DepartureTime::parse("22:30").expect("time");
    assert_eq!(evening.window_end(3).to_string(), "23:59:59");
}

#[test]
fn normalized_text_orders_chronologically() {
    let early = DepartureTime::parse("06:30").expect("time");
    let late = DepartureTime::parse("14:00").expect("time");
    assert!(early < late);
    assert!(early.to_string() < late.to_string());
}
