use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::chart::{PieChartSpec, ScatterChartSpec};
use crate::color::ColorMap;
use crate::state::AppState;

/// Sectors are drawn as convex fans no wider than this.
const MAX_SEGMENT: f32 = TAU / 16.0;

// ---------------------------------------------------------------------------
// Central panel: pie on top, scatter below
// ---------------------------------------------------------------------------

pub fn charts(ui: &mut Ui, state: &AppState) {
    let half = ui.available_height() * 0.5;

    ui.allocate_ui(Vec2::new(ui.available_width(), half), |ui: &mut Ui| {
        pie_chart(ui, &state.view.pie, &state.slice_colors);
    });
    ui.separator();
    scatter_chart(ui, &state.view.scatter, &state.category_colors);
}

// ---------------------------------------------------------------------------
// Pie chart (painted directly; egui_plot has no pie)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, spec: &PieChartSpec, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    let total = spec.total();
    if total <= 0.0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(empty_pie_message(spec));
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).max(80.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.45;

        let mut start = -TAU / 4.0;
        for slice in &spec.slices {
            if slice.value <= 0.0 {
                continue;
            }
            let sweep = (slice.value / total) as f32 * TAU;
            let color = colors.color_for(&slice.label);
            paint_sector(&painter, center, radius, start, sweep, color);

            let mid = start + sweep / 2.0;
            let pct = slice.value / total * 100.0;
            painter.text(
                center + Vec2::angled(mid) * radius * 0.65,
                Align2::CENTER_CENTER,
                format!("{pct:.1}%"),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
            start += sweep;
        }

        // Legend
        ui.vertical(|ui: &mut Ui| {
            for slice in &spec.slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, colors.color_for(&slice.label));
                    ui.label(format!("{}  ({})", slice.label, slice.value));
                });
            }
        });
    });
}

/// Text shown instead of a pie whose slices sum to zero.
fn empty_pie_message(spec: &PieChartSpec) -> &'static str {
    if spec.slices.is_empty() {
        "No launches match the current selection."
    } else {
        "No successful launches in the current selection."
    }
}

fn paint_sector(painter: &egui::Painter, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    let segments = (sweep / MAX_SEGMENT).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    for k in 0..segments {
        let a0 = start + step * k as f32;
        let arc_steps = 8;
        let mut points = Vec::with_capacity(arc_steps + 2);
        points.push(center);
        for j in 0..=arc_steps {
            let a = a0 + step * j as f32 / arc_steps as f32;
            points.push(center + Vec2::angled(a) * radius);
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
    painter.line_segment(
        [center, center + Vec2::angled(start) * radius],
        Stroke::new(1.5, Color32::WHITE),
    );
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, spec: &ScatterChartSpec, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label(spec.x_field.as_str())
        .y_axis_label(spec.y_field.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One series per group so the legend lists booster categories.
            for group in &spec.groups {
                let points: PlotPoints = spec
                    .points
                    .iter()
                    .filter(|p| &p.group == group)
                    .map(|p| [p.x, p.y])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(group)
                        .color(colors.color_for(group))
                        .radius(4.0),
                );
            }
        });
}
