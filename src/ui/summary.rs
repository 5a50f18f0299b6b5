use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use nomina_viewer::data::aggregate::{LoadBand, SortKey, TeacherSummary};

use crate::color::band_fill;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let metrics = &state.metrics;
    let mean = metrics
        .mean_hours
        .map(|m| format!("{m:.1}"))
        .unwrap_or_else(|| "–".to_string());

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Docentes encontrados", metrics.teachers.to_string());
        metric(&mut cols[1], "Horas totales", format_total_hours(metrics.total_hours));
        metric(&mut cols[2], "Promedio de horas", mean);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.weak(label);
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

/// Sortable per-teacher table; hours drawn against the load ceiling.
pub fn summary_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📋 Carga académica");
    let ceiling = state.config.max_hours;
    let mut clicked: Option<SortKey> = None;

    let header_label = |key: SortKey, text: &str| -> String {
        if state.sort_key != key {
            return text.to_string();
        }
        let arrow = if state.sort_ascending { "▲" } else { "▼" };
        format!("{text} {arrow}")
    };
    let headers = [
        (SortKey::TeacherId, header_label(SortKey::TeacherId, "ID")),
        (SortKey::Name, header_label(SortKey::Name, "Docente")),
        (SortKey::Category, header_label(SortKey::Category, "Categoría")),
    ];
    let hours_header = header_label(SortKey::Hours, &format!("Carga horaria (máx {ceiling})"));
    let shown: &AppState = state;

    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(60.0))
            .column(Column::initial(240.0).resizable(true))
            .column(Column::auto().at_least(80.0))
            .column(Column::initial(200.0).resizable(true))
            .column(Column::initial(180.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for (key, text) in &headers {
                    header.col(|ui: &mut Ui| {
                        if ui.button(RichText::new(text).strong()).clicked() {
                            clicked = Some(*key);
                        }
                    });
                }
                header.col(|ui: &mut Ui| {
                    ui.strong("Información académica");
                });
                header.col(|ui: &mut Ui| {
                    if ui.button(RichText::new(&hours_header).strong()).clicked() {
                        clicked = Some(SortKey::Hours);
                    }
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Turnos");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, shown.summaries.len(), |mut row| {
                    let summary = &shown.summaries[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(&summary.teacher_id);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&summary.full_name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&summary.category);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&summary.academic_info);
                    });
                    row.col(|ui: &mut Ui| {
                        hours_bar(ui, summary.total_hours, ceiling);
                    });
                    row.col(|ui: &mut Ui| {
                        shift_chips(ui, shown, summary);
                    });
                });
            });
    });

    if let Some(key) = clicked {
        state.sort_by(key);
    }
}

fn hours_bar(ui: &mut Ui, hours: f64, ceiling: f64) {
    let fraction = (hours / ceiling).clamp(0.0, 1.0) as f32;
    ui.add(
        egui::ProgressBar::new(fraction)
            .desired_height(ROW_HEIGHT - 4.0)
            .text(format!("{} hrs", format_hours(hours))),
    );
}

fn shift_chips(ui: &mut Ui, state: &AppState, summary: &TeacherSummary) {
    ui.horizontal(|ui: &mut Ui| {
        for shift in &summary.shifts {
            let color = state
                .shift_palette
                .as_ref()
                .map(|p| p.color_for(shift))
                .unwrap_or(Color32::GRAY);
            ui.label(RichText::new(shift).color(color).small());
        }
    });
}

/// Headline total, whole hours only (fractions are dropped, not rounded).
pub fn format_total_hours(hours: f64) -> String {
    format!("{}", hours.trunc() as i64)
}

/// Whole hours print without decimals.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}")
    } else {
        format!("{hours:.1}")
    }
}

// ---------------------------------------------------------------------------
// Card grid
// ---------------------------------------------------------------------------

/// One card per teacher, filled by load band.
pub fn card_grid(ui: &mut Ui, state: &AppState) {
    let ceiling = state.config.max_hours;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for summary in &state.summaries {
            let band = LoadBand::classify(summary.total_hours, ceiling);
            egui::Frame::group(ui.style())
                .fill(band_fill(band))
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(220.0);
                    ui.vertical(|ui: &mut Ui| {
                        ui.label(RichText::new(&summary.full_name).strong().color(Color32::WHITE));
                        ui.label(
                            RichText::new(format!("ID {} · {}", summary.teacher_id, summary.category))
                                .small()
                                .color(Color32::LIGHT_GRAY),
                        );
                        ui.label(
                            RichText::new(format!("{} hrs", format_hours(summary.total_hours)))
                                .size(22.0)
                                .color(Color32::WHITE),
                        );
                        ui.label(
                            RichText::new(format!("{} asignaturas", summary.subject_count))
                                .small()
                                .color(Color32::LIGHT_GRAY),
                        );
                        shift_chips(ui, state, summary);
                    });
                });
        }
    });
}

// ---------------------------------------------------------------------------
// Detail table
// ---------------------------------------------------------------------------

/// Subject-level rows behind the current summaries.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let Some(workload) = &state.workload else {
        return;
    };

    egui::CollapsingHeader::new("Ver detalle de asignaturas por docente")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.push_id("detail_table", |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .column(Column::initial(240.0).resizable(true))
                    .column(Column::initial(320.0).resizable(true))
                    .column(Column::auto().at_least(90.0))
                    .column(Column::remainder())
                    .header(ROW_HEIGHT, |mut header| {
                        for title in ["Docente", "Asignatura", "Turno", "Horas"] {
                            header.col(|ui: &mut Ui| {
                                ui.strong(title);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                            let r = &workload.rows[state.visible_indices[row.index()]];
                            row.col(|ui: &mut Ui| {
                                ui.label(&r.full_name);
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(&r.subject);
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(&r.shift);
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(format_hours(r.hours));
                            });
                        });
                    });
            });
        });
}
