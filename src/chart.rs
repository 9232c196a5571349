//! Declarative chart descriptions built from filtered launch rows.
//!
//! Nothing here draws. The desktop front-end paints these specs with egui and
//! the web front-end hands them to Plotly as JSON.

use serde::{Deserialize, Serialize};

use crate::data::filter::{filter_by_payload_range, filter_by_site};
use crate::data::model::{
    Controls, LaunchTable, PayloadRange, SiteSelection, COL_BOOSTER_CATEGORY, COL_CLASS,
    COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// How slice values are derived from the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieAggregation {
    /// Sum `values_field` per distinct `names_field` value.
    SumByName,
    /// Count rows per distinct `names_field` value.
    CountByName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartSpec {
    pub title: String,
    pub names_field: String,
    pub values_field: Option<String>,
    pub aggregation: PieAggregation,
    /// Slices in order of first appearance of their label.
    pub slices: Vec<PieSlice>,
}

impl PieChartSpec {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }
}

/// Success pie for the selected site.
///
/// * `ALL SITES` – sum of `class` per launch site over the whole table, so
///   each slice is that site's number of successful launches.
/// * one site – row count per `class` value within that site.
pub fn pie_chart_spec(table: &LaunchTable, site: &SiteSelection) -> PieChartSpec {
    match site {
        SiteSelection::All => {
            let mut slices: Vec<PieSlice> = table
                .sites()
                .iter()
                .map(|s| PieSlice {
                    label: s.clone(),
                    value: 0.0,
                })
                .collect();
            for rec in table.records() {
                if let Some(slice) = slices.iter_mut().find(|s| s.label == rec.launch_site) {
                    slice.value += rec.class.as_f64();
                }
            }
            PieChartSpec {
                title: "Total Success Launches by Site".to_string(),
                names_field: COL_LAUNCH_SITE.to_string(),
                values_field: Some(COL_CLASS.to_string()),
                aggregation: PieAggregation::SumByName,
                slices,
            }
        }
        SiteSelection::Site(name) => {
            let view = filter_by_site(&table.view(), site);
            let mut slices: Vec<PieSlice> = Vec::new();
            for rec in view.iter() {
                let label = rec.class.to_string();
                match slices.iter_mut().find(|s| s.label == label) {
                    Some(slice) => slice.value += 1.0,
                    None => slices.push(PieSlice { label, value: 1.0 }),
                }
            }
            PieChartSpec {
                title: format!("Total Success Launches for site {name}"),
                names_field: COL_CLASS.to_string(),
                values_field: None,
                aggregation: PieAggregation::CountByName,
                slices,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Value of the colour-grouping field.
    pub group: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChartSpec {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub color_field: String,
    /// Distinct groups among `points`, sorted.
    pub groups: Vec<String>,
    /// One point per surviving row, in table order.
    pub points: Vec<ScatterPoint>,
}

/// Payload vs. outcome for rows inside `range`, narrowed to `site` unless it
/// is `ALL SITES`. Range is applied first.
pub fn scatter_chart_spec(
    table: &LaunchTable,
    site: &SiteSelection,
    range: &PayloadRange,
) -> ScatterChartSpec {
    let in_range = filter_by_payload_range(&table.view(), range);
    let (view, title) = match site {
        SiteSelection::All => (
            in_range,
            "Correlation between Payload and Success for all Sites".to_string(),
        ),
        SiteSelection::Site(name) => (
            filter_by_site(&in_range, site),
            format!("Correlation between Payload and Success for site {name}"),
        ),
    };

    let points: Vec<ScatterPoint> = view
        .iter()
        .map(|rec| ScatterPoint {
            x: rec.payload_mass_kg,
            y: rec.class.as_f64(),
            group: rec.booster_version_category.clone(),
            label: rec.label(),
        })
        .collect();

    let mut groups: Vec<String> = points.iter().map(|p| p.group.clone()).collect();
    groups.sort();
    groups.dedup();

    ScatterChartSpec {
        title,
        x_field: COL_PAYLOAD_MASS.to_string(),
        y_field: COL_CLASS.to_string(),
        color_field: COL_BOOSTER_CATEGORY.to_string(),
        groups,
        points,
    }
}

// ---------------------------------------------------------------------------
// Both charts at once
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub pie: PieChartSpec,
    pub scatter: ScatterChartSpec,
}

/// Rebuild both charts for the current control values.
pub fn recompute_view(table: &LaunchTable, controls: &Controls) -> DashboardView {
    DashboardView {
        pie: pie_chart_spec(table, &controls.site),
        scatter: scatter_chart_spec(table, &controls.site, &controls.payload),
    }
}
