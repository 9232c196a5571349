use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    LaunchRecord, LaunchTable, OutcomeClass, COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS,
    COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a dataset cannot be loaded. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {0}")]
    NotFound(PathBuf),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': invalid value '{value}'")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("dataset {0} contains no rows")]
    Empty(PathBuf),
}

type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field
///
/// Required columns are `Launch Site`, `Payload Mass (kg)`,
/// `Booster Version Category` and `class`. `Flight Number` and
/// `Booster Version` are picked up when present; anything else is ignored.
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    if records.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let table = LaunchTable::from_records(records);
    if let Some(bounds) = table.payload_bounds() {
        log::info!(
            "Loaded {} launches from {} (sites {:?}, payload {}..={} kg)",
            table.len(),
            path.display(),
            table.sites(),
            bounds.min,
            bounds.max
        );
    }
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// Field validation shared by all formats
// ---------------------------------------------------------------------------

fn parse_error(row: usize, column: &'static str, value: impl ToString) -> LoadError {
    LoadError::Parse {
        row,
        column,
        value: value.to_string(),
    }
}

fn check_payload(row: usize, v: f64) -> Result<f64> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(parse_error(row, COL_PAYLOAD_MASS, v))
    }
}

fn check_class(row: usize, v: f64) -> Result<OutcomeClass> {
    if v == 0.0 {
        Ok(OutcomeClass::Failure)
    } else if v == 1.0 {
        Ok(OutcomeClass::Success)
    } else {
        Err(parse_error(row, COL_CLASS, v))
    }
}

fn check_flight_number(row: usize, v: f64) -> Result<u32> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Ok(v as u32)
    } else {
        Err(parse_error(row, COL_FLIGHT_NUMBER, v))
    }
}

fn parse_number(row: usize, column: &'static str, s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| parse_error(row, column, s))
}

/// Blank or absent cells in optional text columns read as `None`.
fn optional_text(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn required_text(row: usize, column: &'static str, s: Option<&str>) -> Result<String> {
    match s.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        other => Err(parse_error(row, column, other.unwrap_or(""))),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();

    let find = |name: &str| headers.iter().position(|h| h.trim() == name);
    let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

    let site_idx = require(COL_LAUNCH_SITE)?;
    let payload_idx = require(COL_PAYLOAD_MASS)?;
    let category_idx = require(COL_BOOSTER_CATEGORY)?;
    let class_idx = require(COL_CLASS)?;
    let flight_idx = find(COL_FLIGHT_NUMBER);
    let version_idx = find(COL_BOOSTER_VERSION);

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let payload_raw = record.get(payload_idx).unwrap_or("");
        let class_raw = record.get(class_idx).unwrap_or("");

        let flight_number = match flight_idx.and_then(|i| record.get(i)).map(str::trim) {
            Some(s) if !s.is_empty() => {
                Some(check_flight_number(row, parse_number(row, COL_FLIGHT_NUMBER, s)?)?)
            }
            _ => None,
        };
        let booster_version = optional_text(version_idx.and_then(|i| record.get(i)));

        records.push(LaunchRecord {
            launch_site: required_text(row, COL_LAUNCH_SITE, record.get(site_idx))?,
            payload_mass_kg: check_payload(row, parse_number(row, COL_PAYLOAD_MASS, payload_raw)?)?,
            booster_version_category: required_text(row, COL_BOOSTER_CATEGORY, record.get(category_idx))?,
            class: check_class(row, parse_number(row, COL_CLASS, class_raw)?)?,
            flight_number,
            booster_version,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 0.0,
///     "Booster Version": "F9 v1.0  B0003",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let root: JsonValue = serde_json::from_reader(io::BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| parse_error(0, COL_LAUNCH_SITE, "expected a top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or_else(|| parse_error(row, COL_LAUNCH_SITE, value))?;

        let number = |column: &'static str| -> Result<f64> {
            match obj.get(column) {
                Some(v) => v.as_f64().ok_or_else(|| parse_error(row, column, v)),
                None => Err(parse_error(row, column, "<missing>")),
            }
        };
        let text = |column: &'static str| required_text(row, column, obj.get(column).and_then(|v| v.as_str()));

        let flight_number = match obj.get(COL_FLIGHT_NUMBER) {
            None | Some(JsonValue::Null) => None,
            Some(_) => Some(check_flight_number(row, number(COL_FLIGHT_NUMBER)?)?),
        };

        records.push(LaunchRecord {
            launch_site: text(COL_LAUNCH_SITE)?,
            payload_mass_kg: check_payload(row, number(COL_PAYLOAD_MASS)?)?,
            booster_version_category: text(COL_BOOSTER_CATEGORY)?,
            class: check_class(row, number(COL_CLASS)?)?,
            flight_number,
            booster_version: optional_text(obj.get(COL_BOOSTER_VERSION).and_then(|v| v.as_str())),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch field.
///
/// Strings must be Utf8 or LargeUtf8; numeric columns may be Int32, Int64,
/// Float32 or Float64. Works with files written by Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let find = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));
        let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

        let site_col = require(COL_LAUNCH_SITE)?;
        let payload_col = require(COL_PAYLOAD_MASS)?;
        let category_col = require(COL_BOOSTER_CATEGORY)?;
        let class_col = require(COL_CLASS)?;
        let flight_col = find(COL_FLIGHT_NUMBER);
        let version_col = find(COL_BOOSTER_VERSION);

        for i in 0..batch.num_rows() {
            let row = records.len();
            let number = |col: &Arc<dyn Array>, column: &'static str| {
                number_at(col, i).ok_or_else(|| parse_error(row, column, format!("{:?}", col.data_type())))
            };

            let flight_number = match flight_col {
                Some(col) if !col.is_null(i) => {
                    Some(check_flight_number(row, number(col, COL_FLIGHT_NUMBER)?)?)
                }
                _ => None,
            };

            records.push(LaunchRecord {
                launch_site: required_text(row, COL_LAUNCH_SITE, string_at(site_col, i))?,
                payload_mass_kg: check_payload(row, number(payload_col, COL_PAYLOAD_MASS)?)?,
                booster_version_category: required_text(
                    row,
                    COL_BOOSTER_CATEGORY,
                    string_at(category_col, i),
                )?,
                class: check_class(row, number(class_col, COL_CLASS)?)?,
                flight_number,
                booster_version: optional_text(version_col.and_then(|c| string_at(c, i))),
            });
        }
    }

    Ok(records)
}

// -- Arrow helpers --

/// Read a string cell; `None` for nulls and non-string columns.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<&str> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row)),
        _ => None,
    }
}

/// Read a numeric cell as `f64`; `None` for nulls and non-numeric columns.
fn number_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| f64::from(a.value(row))),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| f64::from(a.value(row))),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{ArrayRef, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    const HEADER: &str = "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_and_derives_bounds() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.csv",
            &format!(
                "{HEADER}\n\
                 1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
                 2,VAFB SLC-4E,1,9600,F9 FT B1029.1,FT\n\
                 3,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT\n"
            ),
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        let bounds = table.payload_bounds().unwrap();
        assert_eq!((bounds.min, bounds.max), (0.0, 9600.0));
        assert_eq!(table.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);

        let first = &table.records()[0];
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(first.class, OutcomeClass::Failure);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "minimal.csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,500,FT,1\n",
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.records()[0].flight_number, None);
        assert_eq!(table.records()[0].booster_version, None);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)), "{err}");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.csv", "Launch Site,class\nA,1\n");
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, COL_PAYLOAD_MASS),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_payload_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            &format!("{HEADER}\n1,A,1,500,F9,FT\n2,A,1,heavy,F9,FT\n"),
        );
        match load_file(&path) {
            Err(LoadError::Parse { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, COL_PAYLOAD_MASS);
                assert_eq!(value, "heavy");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn negative_payload_and_bad_class_are_rejected() {
        let dir = TempDir::new().unwrap();
        let neg = write_file(&dir, "neg.csv", &format!("{HEADER}\n1,A,1,-5,F9,FT\n"));
        assert!(matches!(load_file(&neg), Err(LoadError::Parse { column: COL_PAYLOAD_MASS, .. })));

        let class = write_file(&dir, "class.csv", &format!("{HEADER}\n1,A,2,5,F9,FT\n"));
        assert!(matches!(load_file(&class), Err(LoadError::Parse { column: COL_CLASS, .. })));
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", &format!("{HEADER}\n"));
        assert!(matches!(load_file(&path), Err(LoadError::Empty(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "launches.xlsx", "");
        assert!(matches!(load_file(&path), Err(LoadError::UnsupportedExtension(e)) if e == "xlsx"));
    }

    #[test]
    fn loads_records_oriented_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.json",
            r#"[
                {"Flight Number": 4, "Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 500.0,
                 "Booster Version": "F9 v1.0  B0006", "Booster Version Category": "v1.0"},
                {"Launch Site": "KSC LC-39A", "class": 1, "Payload Mass (kg)": 2490,
                 "Booster Version Category": "FT"}
            ]"#,
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].flight_number, Some(4));
        assert_eq!(table.records()[1].payload_mass_kg, 2490.0);
        assert_eq!(table.records()[1].class, OutcomeClass::Success);
    }

    #[test]
    fn blank_booster_version_reads_as_none_in_every_format() {
        let dir = TempDir::new().unwrap();
        let csv = write_file(&dir, "blank.csv", &format!("{HEADER}\n1,A,1,500,  ,FT\n"));
        assert_eq!(load_file(&csv).unwrap().records()[0].booster_version, None);

        let json = write_file(
            &dir,
            "blank.json",
            r#"[{"Launch Site": "A", "class": 1, "Payload Mass (kg)": 500, "Booster Version": " ",
                 "Booster Version Category": "FT"}]"#,
        );
        assert_eq!(load_file(&json).unwrap().records()[0].booster_version, None);

        let path = dir.path().join("blank.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["A"])),
            Arc::new(Float64Array::from(vec![500.0])),
            Arc::new(StringArray::from(vec!["FT"])),
            Arc::new(Int64Array::from(vec![1])),
            Arc::new(StringArray::from(vec![""])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.records()[0].booster_version, None);
        assert_eq!(table.records()[0].label(), "FT");
    }

    #[test]
    fn json_null_payload_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.json",
            r#"[{"Launch Site": "A", "class": 1, "Payload Mass (kg)": null, "Booster Version Category": "FT"}]"#,
        );
        assert!(matches!(load_file(&path), Err(LoadError::Parse { column: COL_PAYLOAD_MASS, .. })));
    }

    #[test]
    fn loads_parquet_with_integer_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["A", "B"])),
            Arc::new(Float64Array::from(vec![500.0, 5000.0])),
            Arc::new(StringArray::from(vec!["FT", "B4"])),
            Arc::new(Int64Array::from(vec![1, 0])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].booster_version_category, "B4");
        assert_eq!(table.records()[1].class, OutcomeClass::Failure);
        assert_eq!(table.payload_bounds().unwrap().max, 5000.0);
    }
}
