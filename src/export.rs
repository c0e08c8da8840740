//! Spreadsheet export: four comma-delimited files, one per table.
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet
//! applications pick the encoding up without prompting. Event and
//! record rows are annotated with the owning vehicle's class label and
//! plate. The destination directory is created when absent.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::model::VehicleClass;

const BOM: &[u8] = b"\xef\xbb\xbf";

const TRACTOR_HEADER: [&str; 5] = ["id", "plate", "mileage", "note", "created_at"];
const TRAILER_HEADER: [&str; 4] = ["id", "plate", "note", "created_at"];
const TIRE_EVENT_HEADER: [&str; 11] = [
    "id",
    "vehicle_type",
    "vehicle_id",
    "vehicle_plate",
    "position",
    "change_date",
    "mileage",
    "brand",
    "model",
    "note",
    "created_at",
];
const MAINTENANCE_HEADER: [&str; 9] = [
    "id",
    "vehicle_type",
    "vehicle_id",
    "vehicle_plate",
    "record_type",
    "service_date",
    "mileage",
    "note",
    "created_at",
];

// Quote a field when it carries a delimiter, a quote or a line break;
// embedded quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[String]) -> Result<()> {
    let line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;
    Ok(())
}

fn open_with_bom(path: &Path) -> Result<BufWriter<File>> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(BOM)?;
    Ok(out)
}

fn strings(header: &[&str]) -> Vec<String> {
    header.iter().map(|s| s.to_string()).collect()
}

/// Export every table to `out_dir` and return the written paths in a
/// fixed order: tractors, trailers, tire events, maintenance records.
pub fn export_csv(db: &Database, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(4);

    let tractors = db.list_tractors()?;
    let trailers = db.list_trailers()?;

    let path = out_dir.join("tractors.csv");
    let mut out = open_with_bom(&path)?;
    write_row(&mut out, &strings(&TRACTOR_HEADER))?;
    for v in &tractors {
        write_row(
            &mut out,
            &[
                v.id.to_string(),
                v.plate.clone(),
                v.mileage.to_string(),
                v.note.clone(),
                v.created_at.clone(),
            ],
        )?;
    }
    out.flush()?;
    info!(path = %path.display(), rows = tractors.len(), "exported");
    written.push(path);

    let path = out_dir.join("trailers.csv");
    let mut out = open_with_bom(&path)?;
    write_row(&mut out, &strings(&TRAILER_HEADER))?;
    for v in &trailers {
        write_row(
            &mut out,
            &[
                v.id.to_string(),
                v.plate.clone(),
                v.note.clone(),
                v.created_at.clone(),
            ],
        )?;
    }
    out.flush()?;
    info!(path = %path.display(), rows = trailers.len(), "exported");
    written.push(path);

    // Child exports join the owner's plate in, tractors first.
    let owners: Vec<(VehicleClass, i64, &str)> = tractors
        .iter()
        .map(|v| (VehicleClass::Tractor, v.id, v.plate.as_str()))
        .chain(
            trailers
                .iter()
                .map(|v| (VehicleClass::Trailer, v.id, v.plate.as_str())),
        )
        .collect();

    let path = out_dir.join("tire_events.csv");
    let mut out = open_with_bom(&path)?;
    write_row(&mut out, &strings(&TIRE_EVENT_HEADER))?;
    let mut rows = 0usize;
    for &(class, vehicle_id, plate) in &owners {
        for e in db.list_tire_events(class, vehicle_id, None)? {
            write_row(
                &mut out,
                &[
                    e.id.to_string(),
                    class.as_str().to_string(),
                    e.vehicle_id.to_string(),
                    plate.to_string(),
                    e.position.clone(),
                    e.change_date.clone(),
                    e.mileage.to_string(),
                    e.brand.clone(),
                    e.model.clone(),
                    e.note.clone(),
                    e.created_at.clone(),
                ],
            )?;
            rows += 1;
        }
    }
    out.flush()?;
    info!(path = %path.display(), rows, "exported");
    written.push(path);

    let path = out_dir.join("maintenance_records.csv");
    let mut out = open_with_bom(&path)?;
    write_row(&mut out, &strings(&MAINTENANCE_HEADER))?;
    let mut rows = 0usize;
    for &(class, vehicle_id, plate) in &owners {
        for r in db.list_maintenance_records(class, vehicle_id)? {
            write_row(
                &mut out,
                &[
                    r.id.to_string(),
                    class.as_str().to_string(),
                    r.vehicle_id.to_string(),
                    plate.to_string(),
                    r.record_type.clone(),
                    r.service_date.clone(),
                    r.mileage.to_string(),
                    r.note.clone(),
                    r.created_at.clone(),
                ],
            )?;
            rows += 1;
        }
    }
    out.flush()?;
    info!(path = %path.display(), rows, "exported");
    written.push(path);

    Ok(written)
}
