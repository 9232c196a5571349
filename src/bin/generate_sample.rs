use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use launch_dash::data::model::{
    LaunchRecord, OutcomeClass, COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS,
    COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Booster generations in flight order: (category, success rate, max payload kg).
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 0.2, 700.0),
    ("v1.1", 0.35, 4500.0),
    ("FT", 0.75, 9600.0),
    ("B4", 0.55, 7100.0),
    ("B5", 0.95, 5300.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate(n: u32, rng: &mut SimpleRng) -> Vec<LaunchRecord> {
    (1..=n)
        .map(|flight| {
            let era = ((flight - 1) as usize * BOOSTERS.len()) / n as usize;
            let (category, success_rate, max_payload) = BOOSTERS[era];
            let site = SITES[(rng.next_u64() % SITES.len() as u64) as usize];
            let payload = (rng.next_f64() * max_payload).round();
            let class = if rng.next_f64() < success_rate {
                OutcomeClass::Success
            } else {
                OutcomeClass::Failure
            };
            LaunchRecord {
                launch_site: site.to_string(),
                payload_mass_kg: payload,
                booster_version_category: category.to_string(),
                class,
                flight_number: Some(flight),
                booster_version: Some(format!("F9 {category} B{:04}", 1000 + flight)),
            }
        })
        .collect()
}

fn write_csv(path: &Path, records: &[LaunchRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[LaunchRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_FLIGHT_NUMBER, DataType::Int64, false),
        Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
        Field::new(COL_CLASS, DataType::Int64, false),
        Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
        Field::new(COL_BOOSTER_VERSION, DataType::Utf8, false),
        Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(
            records.iter().map(|r| i64::from(r.flight_number.unwrap_or(0))),
        )),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.launch_site.as_str()))),
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| i64::from(r.class.as_u8())))),
        Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.payload_mass_kg))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.booster_version.as_deref().unwrap_or("")),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.booster_version_category.as_str()),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records = generate(56, &mut rng);

    let csv_path = Path::new("spacex_launch_dash.csv");
    let parquet_path = Path::new("spacex_launch_dash.parquet");
    write_csv(csv_path, &records)?;
    write_parquet(parquet_path, &records)?;

    println!(
        "Wrote {} launches to {} and {}",
        records.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
