use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – search box and shift selection
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    let Some(workload) = state.workload.clone() else {
        ui.label("No data loaded.");
        return;
    };

    ui.strong("Buscar docente, ID o asignatura");
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.filter.query)
            .hint_text("e.g. GARCIA or 1024")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.refilter();
    }
    ui.separator();

    let n_selected = state.filter.shifts.len();
    let n_total = workload.shifts.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("Turno  ({n_selected}/{n_total})"));
        if ui.small_button("Clear").clicked() {
            state.clear_shifts();
        }
    });
    if n_selected == 0 {
        ui.weak("All shifts shown");
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for shift in &workload.shifts {
                let mut checked = state.filter.shifts.contains(shift);
                let mut text = RichText::new(shift);
                if let Some(palette) = &state.shift_palette {
                    text = text.color(palette.color_for(shift));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_shift(shift);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(workload) = &state.workload {
            let name = workload
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} assignments, {} visible",
                workload.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel helpers
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard while nothing is loaded.
pub fn empty_view(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        let text = match &state.status_message {
            Some(msg) => format!("{msg}\n\nOpen the payroll export with File → Open…"),
            None => "Open the payroll export with File → Open…".to_string(),
        };
        ui.heading(text);
    });
}

pub fn view_switch(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.view, View::Table, "📋 Tabla");
        ui.selectable_value(&mut state.view, View::Cards, "🗂 Tarjetas");
        ui.selectable_value(&mut state.view, View::Chart, "📊 Gráfica");
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open payroll export")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
