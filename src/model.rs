use std::fmt;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::Serialize;

// ------------- Positions -------------
// Tire positions are fixed axle/wheel slot labels. The set is closed
// per vehicle class: a tractor carries eight (front unit), a trailer
// carries twelve. The labels double as database values.
pub const TRACTOR_POSITIONS: [&str; 8] = ["F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8"];

pub const TRAILER_POSITIONS: [&str; 12] = [
    "R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9", "R10", "R11", "R12",
];

// Suggested record types for maintenance entries. The column itself is
// free text; this set only seeds selection lists.
pub const MAINTENANCE_TYPES: [&str; 3] = ["oil change", "service", "other"];

// ------------- VehicleClass -------------
/// Discriminator between the two vehicle kinds. Each variant carries
/// its own closed set of valid tire positions, so position validity is
/// always looked up by tag rather than compared at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VehicleClass {
    Tractor,
    Trailer,
}

impl VehicleClass {
    /// The stable tag stored in the `vehicle_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Tractor => "tractor",
            VehicleClass::Trailer => "trailer",
        }
    }

    /// Parse a stored `vehicle_type` tag back into a class.
    pub fn from_tag(tag: &str) -> Option<VehicleClass> {
        match tag {
            "tractor" => Some(VehicleClass::Tractor),
            "trailer" => Some(VehicleClass::Trailer),
            _ => None,
        }
    }

    /// The closed position set valid for this class, in canonical order.
    pub fn positions(&self) -> &'static [&'static str] {
        match self {
            VehicleClass::Tractor => &TRACTOR_POSITIONS,
            VehicleClass::Trailer => &TRAILER_POSITIONS,
        }
    }

    pub fn valid_position(&self, position: &str) -> bool {
        self.positions().contains(&position)
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for VehicleClass {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for VehicleClass {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let tag = value.as_str()?;
        VehicleClass::from_tag(tag)
            .ok_or_else(|| FromSqlError::Other(format!("unknown vehicle_type '{tag}'").into()))
    }
}

// ------------- Entities -------------
// Rows are read back exactly as stored; all timestamps and dates are
// kept as their ISO text forms.

/// A powered unit. Tracks mileage on the vehicle itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tractor {
    pub id: i64,
    pub plate: String,
    pub mileage: i64,
    pub note: String,
    pub created_at: String,
}

/// A towed unit. No mileage counter of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trailer {
    pub id: i64,
    pub plate: String,
    pub note: String,
    pub created_at: String,
}

/// One tire replacement at one position on one date. Multiple events
/// for the same (vehicle, position) form a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TireEvent {
    pub id: i64,
    pub vehicle_class: VehicleClass,
    pub vehicle_id: i64,
    pub position: String,
    pub change_date: String,
    pub mileage: i64,
    pub brand: String,
    pub model: String,
    pub note: String,
    pub created_at: String,
}

/// One service action on one date, unordered relative to tire history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub vehicle_class: VehicleClass,
    pub vehicle_id: i64,
    pub record_type: String,
    pub service_date: String,
    pub mileage: i64,
    pub note: String,
    pub created_at: String,
}
