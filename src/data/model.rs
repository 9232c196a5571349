use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names as they appear in the source file
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

/// Selector value meaning "no site filter".
pub const ALL_SITES: &str = "ALL SITES";

// ---------------------------------------------------------------------------
// OutcomeClass – the binary success indicator
// ---------------------------------------------------------------------------

/// Launch outcome, stored as `0` (failure) or `1` (success) in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    pub fn as_u8(self) -> u8 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_u8())
    }
}

impl TryFrom<u8> for OutcomeClass {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(OutcomeClass::Failure),
            1 => Ok(OutcomeClass::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl From<OutcomeClass> for u8 {
    fn from(c: OutcomeClass) -> u8 {
        c.as_u8()
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
    #[serde(rename = "class")]
    pub class: OutcomeClass,
    #[serde(rename = "Flight Number", default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default, skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    /// Short label used for hover text and table rows.
    pub fn label(&self) -> String {
        match (&self.booster_version, self.flight_number) {
            (Some(v), Some(n)) => format!("#{n} {v}"),
            (Some(v), None) => v.clone(),
            (None, Some(n)) => format!("#{n}"),
            (None, None) => self.booster_version_category.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadBounds – min/max of the payload column, fixed at load time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices derived once at load time.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories, sorted.
    booster_categories: BTreeSet<String>,
    /// `None` only for an empty table.
    payload_bounds: Option<PayloadBounds>,
}

impl LaunchTable {
    /// Build the table and its derived indices from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<PayloadBounds> = None;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
            let p = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some(b) => PayloadBounds {
                    min: b.min.min(p),
                    max: b.max.max(p),
                },
                None => PayloadBounds { min: p, max: p },
            });
        }

        LaunchTable {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Payload min/max over all rows; `None` when the table is empty.
    pub fn payload_bounds(&self) -> Option<PayloadBounds> {
        self.payload_bounds
    }

    /// The payload range covering every row (an unsatisfiable range if empty).
    pub fn full_payload_range(&self) -> PayloadRange {
        match self.payload_bounds {
            Some(b) => PayloadRange::new(b.min, b.max),
            None => PayloadRange::new(0.0, -1.0),
        }
    }

    /// A view containing every row.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            table: self,
            indices: (0..self.records.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TableView – a read-only filtered subset of a table
// ---------------------------------------------------------------------------

/// Ordered subset of a table's rows, by index into the table.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a LaunchTable,
    indices: Vec<usize>,
}

impl<'a> TableView<'a> {
    pub(crate) fn with_indices(table: &'a LaunchTable, indices: Vec<usize>) -> Self {
        TableView { table, indices }
    }

    pub fn table(&self) -> &'a LaunchTable {
        self.table
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate over the rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'a LaunchRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl PartialEq for TableView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.indices == other.indices
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Site selector value: the "all sites" sentinel or one site name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelection::All)
    }
}

impl From<String> for SiteSelection {
    fn from(s: String) -> Self {
        if s == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(s)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(s: &str) -> Self {
        SiteSelection::from(s.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(s: SiteSelection) -> String {
        s.to_string()
    }
}

impl FromStr for SiteSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SiteSelection::from(s))
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload bounds in kilograms. `low > high` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

/// Current control values: one site selection and one payload range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Controls {
    /// `ALL SITES` over the table's full payload range.
    pub fn for_table(table: &LaunchTable) -> Self {
        Controls {
            site: SiteSelection::All,
            payload: table.full_payload_range(),
        }
    }
}
