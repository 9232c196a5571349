//! Static dashboard layout as plain data.
//!
//! Both front-ends build their controls from this: the desktop UI reads it
//! directly and the web page fetches it from `/api/layout`.

use serde::{Deserialize, Serialize};

use crate::data::model::{Controls, LaunchTable, PayloadRange, SiteSelection, ALL_SITES};

pub const HEADING: &str = "SpaceX Launch Records Dashboard";
pub const PAYLOAD_STEP_KG: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownSpec {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMark {
    pub at: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSliderSpec {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    /// Initial `[low, high]`.
    pub value: [f64; 2],
}

impl RangeSliderSpec {
    /// Snap `v` to `min + k * step`, clamped into `[min, max]`.
    ///
    /// Values at or past `max` snap to `max` so the top of the range stays
    /// reachable when it is not on the step grid.
    pub fn snap(&self, v: f64) -> f64 {
        if v >= self.max {
            return self.max;
        }
        if v <= self.min || self.step <= 0.0 {
            return v.clamp(self.min, self.max);
        }
        let k = ((v - self.min) / self.step).round();
        (self.min + k * self.step).min(self.max)
    }

    /// Value of the high handle as reported by a slider that only stops on
    /// `min + k * step`.
    ///
    /// The last grid stop stands for `max`, so a `max` off the grid (9600 on
    /// a 1000 step) is still reachable.
    pub fn upper_value(&self, v: f64) -> f64 {
        if v + self.step > self.max {
            self.max
        } else {
            v
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
    pub heading: String,
    pub site_dropdown: DropdownSpec,
    pub pie_graph: GraphSpec,
    pub payload_slider: RangeSliderSpec,
    pub scatter_graph: GraphSpec,
}

impl DashboardLayout {
    /// Layout for a loaded table: one dropdown entry per site, slider bounded
    /// by the payload column.
    pub fn for_table(table: &LaunchTable) -> Self {
        let mut options = vec![DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(table.sites().iter().map(|s| DropdownOption {
            label: s.clone(),
            value: s.clone(),
        }));

        let range = table.full_payload_range();
        let (min, max) = (range.low, range.high.max(range.low));

        DashboardLayout {
            heading: HEADING.to_string(),
            site_dropdown: DropdownSpec {
                id: "site-dropdown".to_string(),
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here".to_string(),
                searchable: true,
            },
            pie_graph: GraphSpec {
                id: "success-pie-chart".to_string(),
            },
            payload_slider: RangeSliderSpec {
                id: "payload-slider".to_string(),
                label: "Payload range (Kg):".to_string(),
                min,
                max,
                step: PAYLOAD_STEP_KG,
                marks: vec![
                    SliderMark { at: min, label: format!("{min}") },
                    SliderMark { at: max, label: format!("{max}") },
                ],
                value: [min, max],
            },
            scatter_graph: GraphSpec {
                id: "success-payload-scatter-chart".to_string(),
            },
        }
    }

    /// Control values the dashboard starts with.
    pub fn default_controls(&self) -> Controls {
        Controls {
            site: SiteSelection::from(self.site_dropdown.value.as_str()),
            payload: PayloadRange::new(self.payload_slider.value[0], self.payload_slider.value[1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn table() -> LaunchTable {
        let rec = |site: &str, payload: f64| LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: "FT".to_string(),
            class: OutcomeClass::Success,
            flight_number: None,
            booster_version: None,
        };
        LaunchTable::from_records(vec![
            rec("CCAFS LC-40", 0.0),
            rec("VAFB SLC-4E", 9600.0),
            rec("CCAFS LC-40", 2500.0),
        ])
    }

    #[test]
    fn dropdown_lists_sentinel_then_sites() {
        let layout = DashboardLayout::for_table(&table());
        let values: Vec<&str> = layout
            .site_dropdown
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, ["ALL SITES", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(layout.site_dropdown.options[0].label, "All Sites");
    }

    #[test]
    fn slider_spans_payload_bounds() {
        let layout = DashboardLayout::for_table(&table());
        let s = &layout.payload_slider;
        assert_eq!((s.min, s.max, s.step), (0.0, 9600.0, 1000.0));
        assert_eq!(s.value, [0.0, 9600.0]);
        assert_eq!(s.marks.len(), 2);
    }

    #[test]
    fn default_controls_select_everything() {
        let t = table();
        let controls = DashboardLayout::for_table(&t).default_controls();
        assert_eq!(controls, Controls::for_table(&t));
    }

    #[test]
    fn snap_stays_on_grid_and_reaches_both_ends() {
        let s = DashboardLayout::for_table(&table()).payload_slider;
        assert_eq!(s.snap(-50.0), 0.0);
        assert_eq!(s.snap(1400.0), 1000.0);
        assert_eq!(s.snap(9400.0), 9000.0);
        assert_eq!(s.snap(9550.0), 9600.0);
        assert_eq!(s.snap(20_000.0), 9600.0);
    }

    #[test]
    fn last_grid_stop_of_high_handle_means_max() {
        let s = DashboardLayout::for_table(&table()).payload_slider;
        assert_eq!(s.upper_value(9000.0), 9600.0);
        assert_eq!(s.upper_value(9600.0), 9600.0);
        assert_eq!(s.upper_value(8000.0), 8000.0);
        assert_eq!(s.upper_value(0.0), 0.0);
    }
}
