//! CSV task sheet loading.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::{RecordsConfig, REQUIRED_COLUMNS};
use crate::error::{LoadError, ValidationError};
use crate::types::{Record, RecordSet};

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    task: usize,
    description: usize,
    actions: usize,
    objects: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, ValidationError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| position(name).is_none())
            .map(|&name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns(missing));
        }

        // Every lookup succeeded above.
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            task: at("Task"),
            description: at("Description"),
            actions: at("Actions"),
            objects: at("Objects"),
        })
    }

    fn record(&self, row: &StringRecord) -> Record {
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        Record {
            task: field(self.task),
            description: field(self.description),
            actions: field(self.actions),
            objects: field(self.objects),
        }
    }
}

/// Load a task sheet from any reader.
///
/// The header row is required. Short rows are tolerated (missing trailing
/// fields read as empty strings) and blank lines are skipped. Rows without a
/// `Task` or `Description` are dropped or rejected per
/// [`RecordsConfig::skip_incomplete_rows`].
pub fn load_csv_reader<R: Read>(reader: R, cfg: &RecordsConfig) -> Result<RecordSet, LoadError> {
    cfg.validate()?;

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(cfg.delimiter)
        .trim(if cfg.trim_headers {
            Trim::Headers
        } else {
            Trim::None
        })
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers).inspect_err(|err| {
        tracing::warn!(error = %err, "records_rejected");
    })?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (offset, row) in csv_reader.records().enumerate() {
        let row = row?;
        if let Some(limit) = cfg.max_rows {
            if offset >= limit {
                tracing::warn!(limit, "records_rejected");
                return Err(ValidationError::TooManyRows { limit }.into());
            }
        }

        let record = columns.record(&row);
        let empty_field = if record.task.is_empty() {
            Some("Task")
        } else if record.description.is_empty() {
            Some("Description")
        } else {
            None
        };
        match empty_field {
            None => records.push(record),
            Some(_) if cfg.skip_incomplete_rows => dropped += 1,
            Some(field) => {
                // Header is line 1, so the first data row is row 2.
                let err = ValidationError::IncompleteRow {
                    row: offset + 2,
                    field,
                };
                tracing::warn!(error = %err, "records_rejected");
                return Err(err.into());
            }
        }
    }

    let set = RecordSet::new(records).inspect_err(|err| {
        tracing::warn!(error = %err, dropped, "records_rejected");
    })?;
    tracing::info!(records = set.len(), dropped, "records_loaded");
    Ok(set)
}

/// Load a task sheet from a file on disk.
pub fn load_csv_path<P: AsRef<Path>>(path: P, cfg: &RecordsConfig) -> Result<RecordSet, LoadError> {
    let file = File::open(path.as_ref())?;
    load_csv_reader(file, cfg)
}

/// Load a task sheet held in memory (e.g. an uploaded request body).
pub fn parse_csv_str(text: &str, cfg: &RecordsConfig) -> Result<RecordSet, LoadError> {
    load_csv_reader(text.as_bytes(), cfg)
}
