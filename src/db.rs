//! The entity repository and the current-state resolver.
//!
//! A [`Database`] wires a [`Store`] together with input validation and
//! exposes synchronous CRUD over tractors, trailers, tire events and
//! maintenance records. Every write is one transaction; multi-statement
//! operations (cascading deletes) are all-or-nothing.

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::error::{Result, TruckCareError};
use crate::model::{MaintenanceRecord, TireEvent, Tractor, Trailer, VehicleClass};
use crate::store::{PersistenceMode, Store};
use crate::validate;

pub struct Database {
    store: Store,
}

// ------------- Row mapping -------------

fn tractor_from_row(row: &Row) -> rusqlite::Result<Tractor> {
    Ok(Tractor {
        id: row.get(0)?,
        plate: row.get(1)?,
        mileage: row.get(2)?,
        note: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn trailer_from_row(row: &Row) -> rusqlite::Result<Trailer> {
    Ok(Trailer {
        id: row.get(0)?,
        plate: row.get(1)?,
        note: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn tire_event_from_row(row: &Row) -> rusqlite::Result<TireEvent> {
    Ok(TireEvent {
        id: row.get(0)?,
        vehicle_class: row.get(1)?,
        vehicle_id: row.get(2)?,
        position: row.get(3)?,
        change_date: row.get(4)?,
        mileage: row.get(5)?,
        brand: row.get(6)?,
        model: row.get(7)?,
        note: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn maintenance_from_row(row: &Row) -> rusqlite::Result<MaintenanceRecord> {
    Ok(MaintenanceRecord {
        id: row.get(0)?,
        vehicle_class: row.get(1)?,
        vehicle_id: row.get(2)?,
        record_type: row.get(3)?,
        service_date: row.get(4)?,
        mileage: row.get(5)?,
        note: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const TIRE_EVENT_COLUMNS: &str =
    "id, vehicle_type, vehicle_id, position, change_date, mileage, brand, model, note, created_at";

const MAINTENANCE_COLUMNS: &str =
    "id, vehicle_type, vehicle_id, record_type, service_date, mileage, note, created_at";

impl Database {
    pub fn new(mode: PersistenceMode) -> Result<Database> {
        Ok(Database {
            store: Store::open(mode)?,
        })
    }

    fn vehicle_table(class: VehicleClass) -> &'static str {
        match class {
            VehicleClass::Tractor => "tractors",
            VehicleClass::Trailer => "trailers",
        }
    }

    // Children are only ever created for a parent that exists in its
    // class's table; the discriminated child tables have no declarative
    // foreign key to enforce this.
    fn require_vehicle(&self, class: VehicleClass, vehicle_id: i64) -> Result<()> {
        let sql = format!(
            "select 1 from {} where id = ?1",
            Self::vehicle_table(class)
        );
        let mut stmt = self.store.conn.prepare(&sql)?;
        if stmt.exists(params![vehicle_id])? {
            Ok(())
        } else {
            Err(TruckCareError::Validation(format!(
                "no {class} with id {vehicle_id}"
            )))
        }
    }

    // ------------- Tractors -------------

    pub fn create_tractor(&mut self, plate: &str, mileage: i64, note: &str) -> Result<i64> {
        let plate = validate::required_text("plate", plate)?;
        let mileage = validate::non_negative_mileage(mileage)?;
        self.store.conn.execute(
            "insert into tractors (plate, mileage, note) values (?1, ?2, ?3)",
            params![plate, mileage, note],
        )?;
        let id = self.store.conn.last_insert_rowid();
        info!(id, %plate, "tractor created");
        Ok(id)
    }

    pub fn list_tractors(&self) -> Result<Vec<Tractor>> {
        let mut stmt = self.store.conn.prepare(
            "select id, plate, mileage, note, created_at from tractors order by plate",
        )?;
        let rows = stmt.query_map([], tractor_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_tractor(&self, id: i64) -> Result<Option<Tractor>> {
        Ok(self
            .store
            .conn
            .query_row(
                "select id, plate, mileage, note, created_at from tractors where id = ?1",
                params![id],
                tractor_from_row,
            )
            .optional()?)
    }

    /// Plate, mileage and note are the only mutable fields; updating a
    /// vanished id is a no-op.
    pub fn update_tractor(&mut self, id: i64, plate: &str, mileage: i64, note: &str) -> Result<()> {
        let plate = validate::required_text("plate", plate)?;
        let mileage = validate::non_negative_mileage(mileage)?;
        self.store.conn.execute(
            "update tractors set plate = ?1, mileage = ?2, note = ?3 where id = ?4",
            params![plate, mileage, note, id],
        )?;
        Ok(())
    }

    pub fn delete_tractor(&mut self, id: i64) -> Result<()> {
        self.delete_vehicle(VehicleClass::Tractor, id)
    }

    // ------------- Trailers -------------

    pub fn create_trailer(&mut self, plate: &str, note: &str) -> Result<i64> {
        let plate = validate::required_text("plate", plate)?;
        self.store.conn.execute(
            "insert into trailers (plate, note) values (?1, ?2)",
            params![plate, note],
        )?;
        let id = self.store.conn.last_insert_rowid();
        info!(id, %plate, "trailer created");
        Ok(id)
    }

    pub fn list_trailers(&self) -> Result<Vec<Trailer>> {
        let mut stmt = self
            .store
            .conn
            .prepare("select id, plate, note, created_at from trailers order by plate")?;
        let rows = stmt.query_map([], trailer_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_trailer(&self, id: i64) -> Result<Option<Trailer>> {
        Ok(self
            .store
            .conn
            .query_row(
                "select id, plate, note, created_at from trailers where id = ?1",
                params![id],
                trailer_from_row,
            )
            .optional()?)
    }

    pub fn update_trailer(&mut self, id: i64, plate: &str, note: &str) -> Result<()> {
        let plate = validate::required_text("plate", plate)?;
        self.store.conn.execute(
            "update trailers set plate = ?1, note = ?2 where id = ?3",
            params![plate, note, id],
        )?;
        Ok(())
    }

    pub fn delete_trailer(&mut self, id: i64) -> Result<()> {
        self.delete_vehicle(VehicleClass::Trailer, id)
    }

    // Children first, parent last, one transaction. A parent delete
    // must never leave orphaned child rows observable.
    fn delete_vehicle(&mut self, class: VehicleClass, id: i64) -> Result<()> {
        let tx = self.store.conn.transaction()?;
        let events = tx.execute(
            "delete from tire_events where vehicle_type = ?1 and vehicle_id = ?2",
            params![class, id],
        )?;
        let records = tx.execute(
            "delete from maintenance_records where vehicle_type = ?1 and vehicle_id = ?2",
            params![class, id],
        )?;
        let sql = format!("delete from {} where id = ?1", Self::vehicle_table(class));
        let parents = tx.execute(&sql, params![id])?;
        tx.commit()?;
        if parents > 0 {
            info!(%class, id, events, records, "vehicle deleted with children");
        }
        Ok(())
    }

    // ------------- Tire events -------------

    #[allow(clippy::too_many_arguments)]
    pub fn create_tire_event(
        &mut self,
        class: VehicleClass,
        vehicle_id: i64,
        position: &str,
        change_date: &str,
        mileage: i64,
        brand: &str,
        model: &str,
        note: &str,
    ) -> Result<i64> {
        let position = validate::position_in_class(class, position)?;
        let change_date = validate::iso_date("change date", change_date)?;
        let mileage = validate::non_negative_mileage(mileage)?;
        self.require_vehicle(class, vehicle_id)?;
        self.store.conn.execute(
            "insert into tire_events
                (vehicle_type, vehicle_id, position, change_date, mileage, brand, model, note)
             values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![class, vehicle_id, position, change_date, mileage, brand, model, note],
        )?;
        let id = self.store.conn.last_insert_rowid();
        info!(id, %class, vehicle_id, %position, "tire event created");
        Ok(id)
    }

    /// Tire history for one vehicle, newest first (ties broken by the
    /// higher id). An optional position narrows to one slot.
    pub fn list_tire_events(
        &self,
        class: VehicleClass,
        vehicle_id: i64,
        position: Option<&str>,
    ) -> Result<Vec<TireEvent>> {
        if let Some(position) = position {
            let position = validate::position_in_class(class, position)?;
            let sql = format!(
                "select {TIRE_EVENT_COLUMNS} from tire_events
                 where vehicle_type = ?1 and vehicle_id = ?2 and position = ?3
                 order by change_date desc, id desc"
            );
            let mut stmt = self.store.conn.prepare(&sql)?;
            let rows = stmt.query_map(params![class, vehicle_id, position], tire_event_from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        } else {
            let sql = format!(
                "select {TIRE_EVENT_COLUMNS} from tire_events
                 where vehicle_type = ?1 and vehicle_id = ?2
                 order by change_date desc, id desc"
            );
            let mut stmt = self.store.conn.prepare(&sql)?;
            let rows = stmt.query_map(params![class, vehicle_id], tire_event_from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        }
    }

    /// The class used for position validation is the one recorded on
    /// the existing event, so an edit can never move an event into a
    /// different class's position space. Vanished ids are no-ops.
    #[allow(clippy::too_many_arguments)]
    pub fn update_tire_event(
        &mut self,
        event_id: i64,
        position: &str,
        change_date: &str,
        mileage: i64,
        brand: &str,
        model: &str,
        note: &str,
    ) -> Result<()> {
        let stored: Option<VehicleClass> = self
            .store
            .conn
            .query_row(
                "select vehicle_type from tire_events where id = ?1",
                params![event_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(class) = stored else {
            return Ok(());
        };
        let position = validate::position_in_class(class, position)?;
        let change_date = validate::iso_date("change date", change_date)?;
        let mileage = validate::non_negative_mileage(mileage)?;
        self.store.conn.execute(
            "update tire_events
             set position = ?1, change_date = ?2, mileage = ?3, brand = ?4, model = ?5, note = ?6
             where id = ?7",
            params![position, change_date, mileage, brand, model, note, event_id],
        )?;
        Ok(())
    }

    pub fn delete_tire_event(&mut self, event_id: i64) -> Result<()> {
        self.store
            .conn
            .execute("delete from tire_events where id = ?1", params![event_id])?;
        Ok(())
    }

    // ------------- Maintenance records -------------

    pub fn create_maintenance_record(
        &mut self,
        class: VehicleClass,
        vehicle_id: i64,
        record_type: &str,
        service_date: &str,
        mileage: i64,
        note: &str,
    ) -> Result<i64> {
        let record_type = validate::required_text("record type", record_type)?;
        let service_date = validate::iso_date("service date", service_date)?;
        let mileage = validate::non_negative_mileage(mileage)?;
        self.require_vehicle(class, vehicle_id)?;
        self.store.conn.execute(
            "insert into maintenance_records
                (vehicle_type, vehicle_id, record_type, service_date, mileage, note)
             values (?1, ?2, ?3, ?4, ?5, ?6)",
            params![class, vehicle_id, record_type, service_date, mileage, note],
        )?;
        let id = self.store.conn.last_insert_rowid();
        info!(id, %class, vehicle_id, %record_type, "maintenance record created");
        Ok(id)
    }

    pub fn list_maintenance_records(
        &self,
        class: VehicleClass,
        vehicle_id: i64,
    ) -> Result<Vec<MaintenanceRecord>> {
        let sql = format!(
            "select {MAINTENANCE_COLUMNS} from maintenance_records
             where vehicle_type = ?1 and vehicle_id = ?2
             order by service_date desc, id desc"
        );
        let mut stmt = self.store.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![class, vehicle_id], maintenance_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn update_maintenance_record(
        &mut self,
        record_id: i64,
        record_type: &str,
        service_date: &str,
        mileage: i64,
        note: &str,
    ) -> Result<()> {
        let record_type = validate::required_text("record type", record_type)?;
        let service_date = validate::iso_date("service date", service_date)?;
        let mileage = validate::non_negative_mileage(mileage)?;
        self.store.conn.execute(
            "update maintenance_records
             set record_type = ?1, service_date = ?2, mileage = ?3, note = ?4
             where id = ?5",
            params![record_type, service_date, mileage, note, record_id],
        )?;
        Ok(())
    }

    pub fn delete_maintenance_record(&mut self, record_id: i64) -> Result<()> {
        self.store.conn.execute(
            "delete from maintenance_records where id = ?1",
            params![record_id],
        )?;
        Ok(())
    }

    // ------------- Current-state resolver -------------

    /// The tire currently mounted at every position of the vehicle's
    /// class, in canonical set order. Positions without history map to
    /// `None`; they are never omitted.
    ///
    /// "Current" means the event with the maximum `change_date`; events
    /// sharing that date are resolved to the one with the maximum id
    /// (the most recently inserted row), regardless of the order the
    /// identical-date rows were written in.
    pub fn current_tires(
        &self,
        class: VehicleClass,
        vehicle_id: i64,
    ) -> Result<Vec<(&'static str, Option<TireEvent>)>> {
        let sql = format!(
            "select {TIRE_EVENT_COLUMNS} from tire_events t
             where t.vehicle_type = ?1 and t.vehicle_id = ?2
               and t.id = (
                 select t2.id from tire_events t2
                 where t2.vehicle_type = t.vehicle_type
                   and t2.vehicle_id = t.vehicle_id
                   and t2.position = t.position
                 order by t2.change_date desc, t2.id desc
                 limit 1
               )"
        );
        let mut stmt = self.store.conn.prepare(&sql)?;
        let latest = stmt
            .query_map(params![class, vehicle_id], tire_event_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(class
            .positions()
            .iter()
            .map(|&pos| {
                let event = latest.iter().find(|e| e.position == pos).cloned();
                (pos, event)
            })
            .collect())
    }
}
