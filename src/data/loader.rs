use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-records dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row containing the four required columns (recommended)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Extra columns are ignored. An empty table is an error.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    let dataset = LaunchDataset::from_records(records);
    if dataset.is_empty() {
        return Err(anyhow::Error::new(DataError::EmptyDataset)
            .context(format!("loading launch records from {}", path.display())));
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

fn parse_payload(raw: &str, row: usize) -> Result<f64, DataError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::InvalidValue {
            row,
            column: PAYLOAD_COLUMN.to_string(),
            value: raw.to_string(),
        })
}

/// Accepts `0`/`1` and their float spellings (`1.0`).
fn parse_class(raw: &str, row: usize) -> Result<Outcome, DataError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(Outcome::from_class)
        .or_else(|| trimmed.parse::<f64>().ok().and_then(outcome_from_number))
        .ok_or_else(|| DataError::InvalidClass {
            row,
            value: raw.to_string(),
        })
}

/// Numeric class flag; only exactly `0.0` and `1.0` map to an outcome.
fn outcome_from_number(class: f64) -> Option<Outcome> {
    if class == 0.0 {
        Some(Outcome::Failure)
    } else if class == 1.0 {
        Some(Outcome::Success)
    } else {
        None
    }
}

fn missing_column(column: &str, available: &[String]) -> DataError {
    DataError::MissingColumn {
        column: column.to_string(),
        available: available.join(", "),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions of the required fields in a CSV header.
struct CsvColumns {
    site: usize,
    payload: usize,
    class: usize,
    booster: usize,
}

impl CsvColumns {
    fn locate(headers: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| missing_column(name, headers))
        };
        Ok(CsvColumns {
            site: find(SITE_COLUMN)?,
            payload: find(PAYLOAD_COLUMN)?,
            class: find(CLASS_COLUMN)?,
            booster: find(BOOSTER_COLUMN)?,
        })
    }
}

/// CSV layout: header row with column names, one launch per row.
/// Rows are numbered from 1 in error messages.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let cols = CsvColumns::locate(&headers)?;
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        records.push(LaunchRecord {
            site: cell(cols.site).trim().to_string(),
            payload_mass_kg: parse_payload(cell(cols.payload), row)?,
            outcome: parse_class(cell(cols.class), row)?,
            booster_category: cell(cols.booster).trim().to_string(),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;

        let field = |name: &str| -> Result<String, DataError> {
            let keys: Vec<String> = obj.keys().cloned().collect();
            obj.get(name)
                .map(|v| json_cell_text(v).trim().to_string())
                .ok_or_else(|| missing_column(name, &keys))
        };

        records.push(LaunchRecord {
            site: field(SITE_COLUMN)?,
            payload_mass_kg: parse_payload(&field(PAYLOAD_COLUMN)?, row)?,
            outcome: parse_class(&field(CLASS_COLUMN)?, row)?,
            booster_category: field(BOOSTER_COLUMN)?,
        });
    }

    Ok(records)
}

fn json_cell_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => u8::from(*b).to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Numeric columns may be any integer or float type (and `class` may be
/// boolean); both are cast to `Float64` before reading. Text cells are trimmed
/// the same way as in the CSV and JSON loaders.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }
    Ok(records)
}

fn read_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let site = cast(column(batch, SITE_COLUMN)?, &DataType::Utf8).context("casting site column")?;
    let booster =
        cast(column(batch, BOOSTER_COLUMN)?, &DataType::Utf8).context("casting booster column")?;
    let payload = cast(column(batch, PAYLOAD_COLUMN)?, &DataType::Float64)
        .context("casting payload column")?;
    // Float64 keeps fractional flags visible so they can be rejected.
    let class =
        cast(column(batch, CLASS_COLUMN)?, &DataType::Float64).context("casting class column")?;

    let site = site.as_string::<i32>();
    let booster = booster.as_string::<i32>();
    let payload = payload.as_primitive::<Float64Type>();
    let class = class.as_primitive::<Float64Type>();

    for i in 0..batch.num_rows() {
        let row = row_offset + i + 1;

        if payload.is_null(i) || !payload.value(i).is_finite() {
            bail!(DataError::InvalidValue {
                row,
                column: PAYLOAD_COLUMN.to_string(),
                value: payload_cell_text(payload, i),
            });
        }
        let outcome = class
            .is_valid(i)
            .then(|| outcome_from_number(class.value(i)))
            .flatten()
            .ok_or_else(|| DataError::InvalidClass {
                row,
                value: if class.is_null(i) {
                    "null".to_string()
                } else {
                    class.value(i).to_string()
                },
            })?;

        let text = |arr: &arrow::array::StringArray| {
            if arr.is_null(i) {
                String::new()
            } else {
                arr.value(i).trim().to_string()
            }
        };

        out.push(LaunchRecord {
            site: text(site),
            payload_mass_kg: payload.value(i),
            outcome,
            booster_category: text(booster),
        });
    }
    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, DataError> {
    let schema = batch.schema();
    schema.index_of(name).map(|idx| batch.column(idx)).map_err(|_| {
        let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
        missing_column(name, &names)
    })
}

fn payload_cell_text(payload: &arrow::array::Float64Array, i: usize) -> String {
    if payload.is_null(i) {
        "null".to_string()
    } else {
        payload.value(i).to_string()
    }
}
