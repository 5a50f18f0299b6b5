use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, HLine, Plot};
use nomina_viewer::data::aggregate::LoadBand;

use crate::color::band_fill;
use crate::state::AppState;
use crate::ui::summary::format_hours;

// ---------------------------------------------------------------------------
// Hours per teacher (central panel, chart view)
// ---------------------------------------------------------------------------

/// Bar chart of total hours per teacher in display order, with the load
/// ceiling drawn as a horizontal line.
pub fn hours_chart(ui: &mut Ui, state: &AppState) {
    let ceiling = state.config.max_hours;

    let bars: Vec<Bar> = state
        .summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let band = LoadBand::classify(summary.total_hours, ceiling);
            Bar::new(i as f64, summary.total_hours)
                .name(format!(
                    "{} ({} hrs)",
                    summary.full_name,
                    format_hours(summary.total_hours)
                ))
                .fill(band_fill(band))
                .width(0.8)
        })
        .collect();

    let labels: Vec<String> = state
        .summaries
        .iter()
        .map(|s| s.teacher_id.clone())
        .collect();

    Plot::new("hours_chart")
        .height(360.0)
        .x_axis_label("Docente (ID)")
        .y_axis_label("Horas")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            plot_ui.hline(HLine::new(ceiling).name("Máximo"));
        });
}
