use sw_dashboard::DisplaySlots;

/// The three metric cards at the top of the page.
#[derive(Default)]
pub struct MetricsView;

impl MetricsView {
    pub fn show(&self, ui: &mut egui::Ui, display: &DisplaySlots) {
        ui.columns(3, |columns| {
            metric_card(&mut columns[0], "Energy Output", &display.energy, None);
            metric_card(&mut columns[1], "Tilt Angle", &display.tilt, None);
            metric_card(
                &mut columns[2],
                "System Status",
                &display.status,
                Some(status_color(&display.status)),
            );
        });
    }
}

fn metric_card(ui: &mut egui::Ui, title: &str, value: &str, color: Option<egui::Color32>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(title).strong());
            let text = egui::RichText::new(if value.is_empty() { "--" } else { value }).size(26.0);
            match color {
                Some(color) => ui.label(text.color(color)),
                None => ui.label(text),
            };
        });
    });
}

fn status_color(status: &str) -> egui::Color32 {
    match status {
        "Online" => egui::Color32::from_rgb(39, 174, 96),
        "Optimizing" => egui::Color32::from_rgb(45, 156, 219),
        "Maintenance" => egui::Color32::from_rgb(243, 156, 18),
        "Error" => egui::Color32::RED,
        _ => egui::Color32::GRAY,
    }
}
