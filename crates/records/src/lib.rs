//! Task sheet ingestion.
//!
//! This is where task data enters the system. A sheet (CSV with a header row)
//! is checked for the required columns, incomplete rows are dealt with, and the
//! survivors become an immutable [`RecordSet`] that the matcher indexes.
//!
//! ## What we do here
//!
//! - **Validate columns** - `Task`, `Description`, `Actions`, `Objects` must all
//!   be present; every missing one is reported at once.
//! - **Filter rows** - rows without a task or description are dropped (or
//!   rejected in strict mode).
//! - **Preserve order** - records keep sheet order; duplicates stay.
//! - **Log outcomes** - `records_loaded` / `records_rejected` via tracing.
//!
//! What we don't do: normalize text, deduplicate, or know anything about
//! searching. The store is a fidelity-preserving container.
//!
//! ## Example
//!
//! ```
//! use records::{parse_csv_str, RecordsConfig};
//!
//! let sheet = "Task,Description,Actions,Objects\nTea,Boil water for tea,boil,kettle\n";
//! let set = parse_csv_str(sheet, &RecordsConfig::default()).unwrap();
//!
//! assert_eq!(set.len(), 1);
//! assert_eq!(set[0].description, "Boil water for tea");
//! ```
mod config;
mod error;
mod sheet;
mod types;

pub use crate::config::{RecordsConfig, REQUIRED_COLUMNS};
pub use crate::error::{LoadError, ValidationError};
pub use crate::sheet::{load_csv_path, load_csv_reader, parse_csv_str};
pub use crate::types::{Record, RecordSet};
