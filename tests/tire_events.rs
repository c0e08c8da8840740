use truckcare::db::Database;
use truckcare::error::TruckCareError;
use truckcare::model::{MAINTENANCE_TYPES, TRACTOR_POSITIONS, TRAILER_POSITIONS, VehicleClass};
use truckcare::store::PersistenceMode;

fn db() -> Database {
    Database::new(PersistenceMode::InMemory).expect("db")
}

#[test]
fn tractor_accepts_exactly_the_f_positions() {
    let mut db = db();
    let tid = db.create_tractor("TRACTOR-001", 0, "").expect("tractor");

    for pos in TRACTOR_POSITIONS {
        db.create_tire_event(VehicleClass::Tractor, tid, pos, "2025-01-01", 100, "", "", "")
            .unwrap_or_else(|e| panic!("position {pos} should be valid: {e}"));
    }

    // R1 belongs to trailers; the event table must stay unchanged.
    let before = db
        .list_tire_events(VehicleClass::Tractor, tid, None)
        .expect("list")
        .len();
    let err = db
        .create_tire_event(VehicleClass::Tractor, tid, "R1", "2025-01-01", 100, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
    let after = db
        .list_tire_events(VehicleClass::Tractor, tid, None)
        .expect("list")
        .len();
    assert_eq!(before, after);
}

#[test]
fn trailer_accepts_exactly_the_r_positions() {
    let mut db = db();
    let tid = db.create_trailer("TRAILER-001", "").expect("trailer");

    for pos in TRAILER_POSITIONS {
        db.create_tire_event(VehicleClass::Trailer, tid, pos, "2025-01-01", 100, "", "", "")
            .unwrap_or_else(|e| panic!("position {pos} should be valid: {e}"));
    }

    let err = db
        .create_tire_event(VehicleClass::Trailer, tid, "F1", "2025-01-01", 100, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
}

#[test]
fn events_list_newest_first_with_id_tiebreak() {
    let mut db = db();
    let tid = db.create_tractor("ORDER-1", 0, "").expect("tractor");
    let old = db
        .create_tire_event(VehicleClass::Tractor, tid, "F1", "2025-01-01", 1, "", "", "")
        .expect("event");
    let tied_a = db
        .create_tire_event(VehicleClass::Tractor, tid, "F2", "2025-03-01", 2, "", "", "")
        .expect("event");
    let tied_b = db
        .create_tire_event(VehicleClass::Tractor, tid, "F3", "2025-03-01", 3, "", "", "")
        .expect("event");

    let ids: Vec<i64> = db
        .list_tire_events(VehicleClass::Tractor, tid, None)
        .expect("list")
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![tied_b, tied_a, old]);
}

#[test]
fn list_can_filter_by_position() {
    let mut db = db();
    let tid = db.create_tractor("FILTER-1", 0, "").expect("tractor");
    db.create_tire_event(VehicleClass::Tractor, tid, "F1", "2025-01-01", 100, "A", "", "")
        .expect("event");
    db.create_tire_event(VehicleClass::Tractor, tid, "F2", "2025-01-02", 200, "B", "", "")
        .expect("event");

    let f1 = db
        .list_tire_events(VehicleClass::Tractor, tid, Some("F1"))
        .expect("list");
    assert_eq!(f1.len(), 1);
    assert_eq!(f1[0].position, "F1");
    assert_eq!(f1[0].brand, "A");

    // A filter position outside the class set is itself a validation error.
    let err = db
        .list_tire_events(VehicleClass::Tractor, tid, Some("R1"))
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
}

#[test]
fn update_validates_position_against_the_stored_class() {
    let mut db = db();
    let tid = db.create_trailer("UPD-1", "").expect("trailer");
    let eid = db
        .create_tire_event(VehicleClass::Trailer, tid, "R1", "2025-01-01", 10, "", "", "")
        .expect("event");

    // The caller does not re-supply the class; an edit cannot slide the
    // event into the tractor position space.
    let err = db
        .update_tire_event(eid, "F1", "2025-01-02", 20, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));

    db.update_tire_event(eid, "R2", "2025-01-02", 20, "Brandt", "XL", "rotated")
        .expect("valid update");
    let events = db
        .list_tire_events(VehicleClass::Trailer, tid, None)
        .expect("list");
    assert_eq!(events[0].position, "R2");
    assert_eq!(events[0].brand, "Brandt");

    // Vanished ids are no-ops, not errors.
    db.update_tire_event(9999, "R3", "2025-01-03", 30, "", "", "")
        .expect("noop");
    db.delete_tire_event(9999).expect("noop");
}

#[test]
fn event_dates_and_mileage_are_validated() {
    let mut db = db();
    let tid = db.create_tractor("VAL-1", 0, "").expect("tractor");

    let err = db
        .create_tire_event(VehicleClass::Tractor, tid, "F1", "2025-02-30", 10, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
    let err = db
        .create_tire_event(VehicleClass::Tractor, tid, "F1", "not-a-date", 10, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
    let err = db
        .create_tire_event(VehicleClass::Tractor, tid, "F1", "2025-01-01", -5, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
    assert!(db
        .list_tire_events(VehicleClass::Tractor, tid, None)
        .expect("list")
        .is_empty());
}

#[test]
fn events_require_an_existing_vehicle_of_the_right_class() {
    let mut db = db();
    let tid = db.create_tractor("OWN-1", 0, "").expect("tractor");

    let err = db
        .create_tire_event(VehicleClass::Tractor, tid + 1, "F1", "2025-01-01", 0, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));

    // The tractor's id does not exist in the trailer table.
    let err = db
        .create_tire_event(VehicleClass::Trailer, tid, "R1", "2025-01-01", 0, "", "", "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
}

#[test]
fn maintenance_records_validate_and_order_like_events() {
    let mut db = db();
    let tid = db.create_tractor("MAINT-1", 1000, "").expect("tractor");

    let err = db
        .create_maintenance_record(VehicleClass::Tractor, tid, "  ", "2025-01-01", 0, "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));
    let err = db
        .create_maintenance_record(VehicleClass::Tractor, tid, "oil change", "2025-01-01", -1, "")
        .unwrap_err();
    assert!(matches!(err, TruckCareError::Validation(_)));

    let first = db
        .create_maintenance_record(VehicleClass::Tractor, tid, "oil change", "2025-01-01", 1000, "")
        .expect("record");
    let second = db
        .create_maintenance_record(VehicleClass::Tractor, tid, "service", "2025-02-01", 1500, "")
        .expect("record");

    let records = db
        .list_maintenance_records(VehicleClass::Tractor, tid)
        .expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, second);
    assert_eq!(records[1].id, first);

    db.update_maintenance_record(first, "other", "2025-01-05", 1100, "rework")
        .expect("update");
    let records = db
        .list_maintenance_records(VehicleClass::Tractor, tid)
        .expect("list");
    assert_eq!(records[1].record_type, "other");

    db.delete_maintenance_record(first).expect("delete");
    assert_eq!(
        db.list_maintenance_records(VehicleClass::Tractor, tid)
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn suggested_maintenance_types_are_accepted_alongside_free_text() {
    let mut db = db();
    let tid = db.create_trailer("TYPES-1", "").expect("trailer");
    for record_type in MAINTENANCE_TYPES {
        db.create_maintenance_record(VehicleClass::Trailer, tid, record_type, "2025-03-01", 0, "")
            .unwrap_or_else(|e| panic!("suggested type '{record_type}' rejected: {e}"));
    }
    db.create_maintenance_record(VehicleClass::Trailer, tid, "brake pads", "2025-03-02", 0, "")
        .expect("free text record type");
    assert_eq!(
        db.list_maintenance_records(VehicleClass::Trailer, tid)
            .expect("list")
            .len(),
        MAINTENANCE_TYPES.len() + 1
    );
}
