//! Minimal operational surface: initialize the store, print a summary,
//! or export everything to a directory of delimited text files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use truckcare::config::Settings;
use truckcare::db::Database;
use truckcare::error::{Result, TruckCareError};
use truckcare::export::export_csv;
use truckcare::model::VehicleClass;
use truckcare::store::PersistenceMode;

fn usage() -> String {
    "usage: truckcare <init | summary | export <dir>>".to_string()
}

fn open(settings: &Settings) -> Result<Database> {
    Database::new(PersistenceMode::File(settings.database.clone()))
}

fn summary(db: &Database) -> Result<()> {
    let tractors = db.list_tractors()?;
    let trailers = db.list_trailers()?;
    println!("tractors: {}", tractors.len());
    for v in &tractors {
        let mounted = db
            .current_tires(VehicleClass::Tractor, v.id)?
            .iter()
            .filter(|(_, e)| e.is_some())
            .count();
        println!("  [{}] {} ({} km, {mounted}/8 positions tracked)", v.id, v.plate, v.mileage);
    }
    println!("trailers: {}", trailers.len());
    for v in &trailers {
        let mounted = db
            .current_tires(VehicleClass::Trailer, v.id)?
            .iter()
            .filter(|(_, e)| e.is_some())
            .count();
        println!("  [{}] {} ({mounted}/12 positions tracked)", v.id, v.plate);
    }
    Ok(())
}

fn run() -> Result<()> {
    let settings = Settings::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("init") => {
            open(&settings)?;
            println!("store ready at {}", settings.database.display());
            Ok(())
        }
        Some("summary") | None => {
            let db = open(&settings)?;
            summary(&db)
        }
        Some("export") => {
            let dir: PathBuf = args
                .get(1)
                .map(|d| Path::new(d).to_path_buf())
                .ok_or_else(|| TruckCareError::Config(usage()))?;
            let db = open(&settings)?;
            let written = export_csv(&db, &dir)?;
            for path in written {
                println!("wrote {}", path.display());
            }
            Ok(())
        }
        Some(other) => Err(TruckCareError::Config(format!(
            "unknown command '{other}'\n{}",
            usage()
        ))),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "truckcare failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
