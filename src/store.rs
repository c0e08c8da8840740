//! Ownership of the on-disk SQLite file: connection setup, pragmas and
//! the idempotent schema definition.

use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

/// Where the store keeps its rows. File-backed for normal operation,
/// in-memory for tests and scratch sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(PathBuf),
}

pub struct Store {
    pub(crate) conn: Connection,
}

impl Store {
    /// Open (and if necessary create) the store. Schema creation is
    /// idempotent: opening an already-initialized file leaves existing
    /// rows untouched.
    pub fn open(mode: PersistenceMode) -> Result<Store> {
        let conn = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                Connection::open(path)?
            }
        };
        // The file is exclusively owned by this process; a second writer
        // is a deployment error and should fail immediately rather than
        // wait on the lock.
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 0;",
        )?;
        let store = Store { conn };
        store.init_schema()?;
        if let PersistenceMode::File(path) = &mode {
            info!(path = %path.display(), "store opened");
        }
        Ok(store)
    }

    /// Table definitions for the split tractor/trailer schema. The two
    /// child tables are keyed by a class discriminator plus the parent
    /// id, so no single foreign key can cover both parent tables; the
    /// repository enforces parent existence and cascade deletion instead.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            create table if not exists tractors (
                id integer primary key autoincrement,
                plate text not null unique,
                mileage integer not null check (mileage >= 0),
                note text not null default '',
                created_at text not null default (datetime('now'))
            );

            create table if not exists trailers (
                id integer primary key autoincrement,
                plate text not null unique,
                note text not null default '',
                created_at text not null default (datetime('now'))
            );

            create table if not exists tire_events (
                id integer primary key autoincrement,
                vehicle_type text not null check (vehicle_type in ('tractor', 'trailer')),
                vehicle_id integer not null,
                position text not null check (position in (
                    'F1','F2','F3','F4','F5','F6','F7','F8',
                    'R1','R2','R3','R4','R5','R6','R7','R8','R9','R10','R11','R12'
                )),
                change_date text not null,
                mileage integer not null check (mileage >= 0),
                brand text not null default '',
                model text not null default '',
                note text not null default '',
                created_at text not null default (datetime('now'))
            );

            create index if not exists idx_tire_events_vehicle_pos_date
                on tire_events (vehicle_type, vehicle_id, position, change_date);

            create table if not exists maintenance_records (
                id integer primary key autoincrement,
                vehicle_type text not null check (vehicle_type in ('tractor', 'trailer')),
                vehicle_id integer not null,
                record_type text not null,
                service_date text not null,
                mileage integer not null check (mileage >= 0),
                note text not null default '',
                created_at text not null default (datetime('now'))
            );

            create index if not exists idx_maintenance_vehicle_date
                on maintenance_records (vehicle_type, vehicle_id, service_date);
            ",
        )?;
        Ok(())
    }
}
