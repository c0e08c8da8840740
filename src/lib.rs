//! Truckcare – fleet tire and maintenance record keeping on an embedded
//! SQLite store.
//!
//! The crate tracks two vehicle classes with distinct tire layouts:
//! * A [`model::Tractor`] is a powered unit with eight tire positions
//!   (`F1..F8`) and a mileage counter.
//! * A [`model::Trailer`] is a towed unit with twelve tire positions
//!   (`R1..R12`) and no mileage of its own.
//!
//! Tire changes are recorded as [`model::TireEvent`] rows — a history
//! per (vehicle, position) — and service actions as
//! [`model::MaintenanceRecord`] rows. The non-trivial part is the
//! current-state resolution: the tire mounted at a position is the
//! event with the greatest `change_date`, ties broken by the greatest
//! surrogate id, and the resolved view always covers every position of
//! the class's closed set.
//!
//! ## Modules
//! * [`model`] – entities, the class-tagged position sets and labels.
//! * [`store`] – SQLite file ownership and idempotent schema setup.
//! * [`db`] – the entity repository (validated CRUD, cascading deletes)
//!   and the current-state resolver.
//! * [`validate`] – field validation applied before any write.
//! * [`export`] – BOM-prefixed delimited-text export of all tables.
//! * [`config`] – settings and default database location.
//! * [`error`] – the validation / storage / config error taxonomy.
//!
//! ## Persistence
//! A [`store::Store`] owns one `rusqlite::Connection`, either file
//! backed or in memory. Every repository operation is synchronous and
//! runs as a single transaction; a cascading vehicle delete removes the
//! children and the parent as one atomic unit. The database file is
//! treated as exclusively owned by the running process and lock
//! contention fails fast instead of blocking.
//!
//! ## Quick Start
//! ```
//! use truckcare::db::Database;
//! use truckcare::model::VehicleClass;
//! use truckcare::store::PersistenceMode;
//!
//! let mut db = Database::new(PersistenceMode::InMemory).expect("db");
//! let id = db.create_tractor("ABC-123", 120_000, "").expect("tractor");
//! db.create_tire_event(VehicleClass::Tractor, id, "F1", "2025-01-15", 120_000,
//!     "Brandt", "AllTerrain", "").expect("event");
//! let current = db.current_tires(VehicleClass::Tractor, id).expect("resolved");
//! assert_eq!(current.len(), 8);
//! assert!(current.iter().any(|(pos, e)| *pos == "F1" && e.is_some()));
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod model;
pub mod store;
pub mod validate;
