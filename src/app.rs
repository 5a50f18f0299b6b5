use eframe::egui;
use nomina_viewer::config::AppConfig;

use crate::state::{AppState, View};
use crate::ui::{panels, plot, summary};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NominaApp {
    pub state: AppState,
}

impl NominaApp {
    /// Build the app and load the configured source file right away.
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        let path = state.source_path.clone();
        state.load(&path);
        Self { state }
    }
}

impl eframe::App for NominaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics + current view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.workload.is_none() {
                panels::empty_view(ui, &self.state);
                return;
            }

            summary::metrics_row(ui, &self.state);
            ui.separator();
            panels::view_switch(ui, &mut self.state);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    match self.state.view {
                        View::Table => summary::summary_table(ui, &mut self.state),
                        View::Cards => summary::card_grid(ui, &self.state),
                        View::Chart => plot::hours_chart(ui, &self.state),
                    }
                    ui.add_space(8.0);
                    summary::detail_table(ui, &self.state);
                });
        });
    }
}
