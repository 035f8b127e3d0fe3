//! Generate `schedules.json` and `trains.json` for a line catalog.
//!
//! Usage: `generate-timetable [DATA_DIR]` (default `./data`). Reads
//! `lines.json` from the directory and writes the two files next to it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rail_server::catalog::{
    CatalogError, GeneratorConfig, LINES_FILE, LineRecord, SCHEDULES_FILE, ScheduleRecord,
    TRAINS_FILE, TrainRecord, convert_all, convert_line, generate_roster, generate_schedules,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"));

    match generate(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "generation failed");
            ExitCode::FAILURE
        }
    }
}

fn generate(dir: &Path) -> Result<(), CatalogError> {
    let lines_path = dir.join(LINES_FILE);
    let contents = std::fs::read_to_string(&lines_path).map_err(|source| CatalogError::Io {
        path: lines_path.clone(),
        source,
    })?;
    let records: Vec<LineRecord> =
        serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
            origin: lines_path.display().to_string(),
            message: e.to_string(),
        })?;

    let lines = convert_all(&records, "line", convert_line);
    let schedules: Vec<ScheduleRecord> = generate_schedules(&lines, &GeneratorConfig::default())
        .iter()
        .map(ScheduleRecord::from)
        .collect();
    let trains: Vec<TrainRecord> = generate_roster(&lines).iter().map(TrainRecord::from).collect();

    write_json(&dir.join(SCHEDULES_FILE), &schedules)?;
    write_json(&dir.join(TRAINS_FILE), &trains)?;

    info!(
        lines = lines.len(),
        schedules = schedules.len(),
        trains = trains.len(),
        dir = %dir.display(),
        "wrote timetable"
    );
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CatalogError::Json {
        origin: path.display().to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
