//! Network catalog: lines, timetables, the train roster and districts.
//!
//! Provides loading from JSON documents (a directory or an HTTP server),
//! conversion into validated domain types, and a refreshable shared handle.

mod convert;
mod error;
mod generate;
mod records;
mod snapshot;
mod source;
mod store;

pub use convert::{
    ConversionError, convert_all, convert_district, convert_line, convert_schedule, convert_train,
};
pub use error::CatalogError;
pub use generate::{GeneratorConfig, generate_roster, generate_schedules};
pub use records::{
    DistrictRecord, LineRecord, ScheduleRecord, SeatsRecord, StopRecord, TrainRecord,
};
pub use snapshot::{Catalog, derive_districts};
pub use source::{
    AnySource, CatalogSource, DISTRICTS_FILE, FileCatalogSource, HttpCatalogConfig,
    HttpCatalogSource, LINES_FILE, SCHEDULES_FILE, TRAINS_FILE, assemble,
};
pub use store::{CatalogStore, Snapshot};
