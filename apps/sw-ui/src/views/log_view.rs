use egui_extras::{Column, TableBuilder};
use sw_dashboard::LogRegistry;

const ROW_HEIGHT: f32 = 20.0;

/// Event log table, newest row first.
#[derive(Default)]
pub struct LogView;

impl LogView {
    pub fn show(&self, ui: &mut egui::Ui, log: &LogRegistry) {
        ui.horizontal(|ui| {
            ui.heading("System Logs");
            ui.label(format!("({} entries)", log.len()));
            if log.evicted() > 0 {
                ui.weak(format!("{} older entries dropped", log.evicted()));
            }
        });

        let rows: Vec<_> = log.entries().collect();
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(110.0).at_least(90.0))
            .column(Column::remainder())
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Time");
                });
                header.col(|ui| {
                    ui.strong("Message");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let entry = rows[row.index()];
                    row.col(|ui| {
                        ui.label(&entry.timestamp);
                    });
                    row.col(|ui| {
                        ui.label(&entry.message);
                    });
                });
            });
    }
}
