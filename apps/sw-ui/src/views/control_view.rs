use sw_control::SystemState;
use sw_core::units::in_liters;
use sw_dashboard::ControlLoop;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlActions {
    pub stop_all: bool,
    pub resume: bool,
}

/// Panel control loop status and manual overrides.
#[derive(Default)]
pub struct ControlView;

impl ControlView {
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        control: Option<&ControlLoop>,
        pending_overrides: usize,
    ) -> ControlActions {
        let mut actions = ControlActions::default();
        ui.heading("Panel Control");
        ui.separator();

        let Some(control) = control else {
            ui.label("Control loop disabled in config");
            return actions;
        };

        let manager = control.manager();
        let report = control.report();
        egui::Grid::new("control_status")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("State");
                ui.label(egui::RichText::new(report.current_state.label()).color(state_color(
                    report.current_state,
                )));
                ui.end_row();

                if let Some(readings) = manager.last_readings() {
                    ui.label("Dust");
                    ui.label(format!("{:.1} %", readings.dust_pct));
                    ui.end_row();
                    ui.label("Wind");
                    ui.label(format!("{:.1} m/s", readings.wind_speed_mps));
                    ui.end_row();
                }

                let pose = manager.actuator().pose();
                ui.label("Base");
                ui.label(format!("{:.1}°", pose.base_deg));
                ui.end_row();
                ui.label("Tilt");
                ui.label(format!("{:.1}°", pose.tilt_deg));
                ui.end_row();

                let cleaning = manager.cleaning();
                ui.label("Water");
                ui.label(format!("{:.3} L", in_liters(cleaning.water_remaining())));
                ui.end_row();
                ui.label("Water cleans");
                ui.label(cleaning.water_cleans().to_string());
                ui.end_row();

                if let Some(started) = report.wind_clean_start_time_s {
                    ui.label("Wind clean since");
                    ui.label(format!("{started:.0} s"));
                    ui.end_row();
                }

                ui.label("Steps");
                ui.label(control.steps().to_string());
                ui.end_row();
            });

        if pending_overrides > 0 {
            ui.weak(format!("{pending_overrides} override(s) pending"));
        }

        ui.separator();
        ui.horizontal(|ui| {
            actions.stop_all = ui.button("Stop all").clicked();
            actions.resume = ui
                .add_enabled(
                    report.current_state == SystemState::Idle,
                    egui::Button::new("Resume"),
                )
                .clicked();
        });
        actions
    }
}

fn state_color(state: SystemState) -> egui::Color32 {
    match state {
        SystemState::SunTracking => egui::Color32::from_rgb(39, 174, 96),
        SystemState::CleaningWind => egui::Color32::from_rgb(155, 89, 182),
        SystemState::CleaningWater => egui::Color32::from_rgb(52, 152, 219),
        SystemState::Idle => egui::Color32::GRAY,
    }
}
