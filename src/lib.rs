//! Spaceways – the data-entry and itinerary query core of an interplanetary
//! travel registry.
//!
//! The registry models planets, space stations, spaceports, spacecraft
//! types, routes between ports, flights and their weekly schedules, all held
//! in a normalized relational store. The crate is the core only: everything
//! presentational collects typed arguments, calls in here, and renders the
//! rows or the outcome it gets back.
//!
//! ## Modules
//! * [`model`] – Entity types, the canonical [`model::DayOfWeek`] weekday and
//!   the strict [`model::DepartureTime`] time-of-day, plus query row shapes.
//! * [`validate`] – Fail-closed business validation with read-only existence
//!   probes; nothing reaches storage unvalidated.
//! * [`persist`] – SQLite schema bootstrap and prepared-statement access over
//!   a borrowed connection.
//! * [`writer`] – The confirm-then-commit-or-rollback transactional writer.
//! * [`itinerary`] – The five parameterized itinerary queries.
//! * [`settings`] – File/environment configuration for the binary.
//!
//! ## Ownership
//! The store is the sole owner of entity state. The caller owns the
//! connection and passes it in; no in-memory cache survives an operation,
//! and every query or write goes back to the store.
//!
//! ## Quick Start
//! ```
//! use rusqlite::Connection;
//! use spaceways::{model::Planet, persist::Store, writer::Writer};
//! let conn = Connection::open_in_memory().unwrap();
//! let mut store = Store::new(&conn).unwrap();
//! let mut writer = Writer::new(&mut store);
//! let outcome = writer
//!     .add_planet(
//!         &Planet { name: "Mars".to_string(), size: 6779, population: 0 },
//!         |_summary| true,
//!     )
//!     .unwrap();
//! assert!(outcome.is_committed());
//! ```

pub mod error;
pub mod itinerary;
pub mod model;
pub mod persist;
pub mod settings;
pub mod validate;
pub mod writer;
