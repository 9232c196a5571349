use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the site selector and payload-range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Site selector ----
    let dropdown = state.layout.site_dropdown.clone();
    let current = state.controls.site.to_string();
    let selected_text = dropdown
        .options
        .iter()
        .find(|o| o.value == current)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| dropdown.placeholder.clone());

    ui.strong("Launch site");
    egui::ComboBox::from_id_salt(dropdown.id.as_str())
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &dropdown.options {
                if ui.selectable_label(current == opt.value, &opt.label).clicked() {
                    state.set_site(SiteSelection::from(opt.value.as_str()));
                }
            }
        });
    ui.add_space(8.0);

    // ---- Payload range ----
    let slider = state.layout.payload_slider.clone();
    ui.strong(&slider.label);

    let mut low = state.controls.payload.low;
    if ui
        .add(egui::Slider::new(&mut low, slider.min..=slider.max).text("low"))
        .changed()
    {
        state.set_low(low);
    }

    let mut high = state.controls.payload.high;
    if ui
        .add(egui::Slider::new(&mut high, slider.min..=slider.max).text("high"))
        .changed()
    {
        state.set_high(high);
    }

    ui.horizontal(|ui: &mut Ui| {
        for mark in &slider.marks {
            ui.small(&mark.label);
        }
    });
    ui.add_space(8.0);

    if ui.button("Reset").clicked() {
        state.reset();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard heading and row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new(&state.layout.heading).strong());
        ui.separator();
        ui.label(format!(
            "{} launches loaded, {} in scatter",
            state.table.len(),
            state.view.scatter.points.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – rows currently plotted
// ---------------------------------------------------------------------------

/// Tabulate the scatter points so individual launches can be read off.
pub fn rows_table(ui: &mut Ui, state: &AppState) {
    let scatter = &state.view.scatter;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch");
            });
            header.col(|ui| {
                ui.strong(&scatter.x_field);
            });
            header.col(|ui| {
                ui.strong(&scatter.y_field);
            });
            header.col(|ui| {
                ui.strong(&scatter.color_field);
            });
        })
        .body(|body| {
            body.rows(18.0, scatter.points.len(), |mut row| {
                let p = &scatter.points[row.index()];
                row.col(|ui| {
                    ui.label(&p.label);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.x));
                });
                row.col(|ui| {
                    ui.label(format!("{}", p.y));
                });
                row.col(|ui| {
                    ui.label(RichText::new(&p.group).color(state.category_colors.color_for(&p.group)));
                });
            });
        });
}
