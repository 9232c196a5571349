use std::sync::Arc;

use crate::chart::{recompute_view, DashboardView};
use crate::color::ColorMap;
use crate::data::model::{Controls, LaunchTable, SiteSelection};
use crate::layout::DashboardLayout;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup; never mutated.
    pub table: Arc<LaunchTable>,

    /// Control tree derived from the table.
    pub layout: DashboardLayout,

    /// Current site selection and payload range.
    pub controls: Controls,

    /// Charts for the current controls (recomputed on change).
    pub view: DashboardView,

    /// Colours for booster categories in the scatter chart.
    pub category_colors: ColorMap,

    /// Colours for pie slices, keyed by site name or class label.
    pub slice_colors: ColorMap,
}

impl AppState {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        let layout = DashboardLayout::for_table(&table);
        let controls = layout.default_controls();
        let view = recompute_view(&table, &controls);
        let category_colors = ColorMap::new(table.booster_categories());
        let slice_colors = slice_colors_for(&table);

        Self {
            table,
            layout,
            controls,
            view,
            category_colors,
            slice_colors,
        }
    }

    /// Rebuild both charts after a control change.
    pub fn refresh(&mut self) {
        self.view = recompute_view(&self.table, &self.controls);
    }

    /// Select a site (or `ALL SITES`).
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.controls.site != site {
            log::debug!("site -> {site}");
            self.controls.site = site;
            self.refresh();
        }
    }

    /// Move the low end of the payload range, snapped to the slider step.
    pub fn set_low(&mut self, low: f64) {
        let low = self.layout.payload_slider.snap(low);
        if self.controls.payload.low != low {
            self.controls.payload.low = low;
            self.refresh();
        }
    }

    /// Move the high end of the payload range, snapped to the slider step.
    pub fn set_high(&mut self, high: f64) {
        let high = self.layout.payload_slider.snap(high);
        if self.controls.payload.high != high {
            self.controls.payload.high = high;
            self.refresh();
        }
    }

    /// Restore the initial control values.
    pub fn reset(&mut self) {
        self.controls = self.layout.default_controls();
        self.refresh();
    }
}

/// Site names and the two class labels share one palette so a site pie and a
/// class pie never reuse each other's colours.
fn slice_colors_for(table: &LaunchTable) -> ColorMap {
    let mut labels: Vec<String> = table.sites().to_vec();
    labels.push("0".to_string());
    labels.push("1".to_string());
    ColorMap::new(&labels)
}
