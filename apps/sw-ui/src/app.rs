use crate::dialogs::{ModalDialogs, PendingConfirm};
use crate::views::{ChartView, ControlView, LogView, MetricsView};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use sw_control::OverrideCommand;
use sw_dashboard::actions::RESET_PROMPT;
use sw_dashboard::{Dashboard, DashboardConfig, DashboardResult, config};

/// Longest gap between repaints while the dashboard is running.
const MAX_REPAINT_INTERVAL: Duration = Duration::from_secs(1);

pub struct SolarDashboardApp {
    dashboard: Option<Dashboard>,
    startup_error: Option<String>,
    started_at: Instant,
    dialogs: ModalDialogs,
    metrics_view: MetricsView,
    chart_view: ChartView,
    log_view: LogView,
    control_view: ControlView,
}

impl SolarDashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config_path: Option<PathBuf>) -> Self {
        let started_at = Instant::now();
        let (dashboard, startup_error) = match build_dashboard(config_path) {
            Ok(mut dashboard) => {
                dashboard.startup(0.0);
                (Some(dashboard), None)
            }
            Err(e) => {
                tracing::error!(error = %e, "dashboard failed to start");
                (None, Some(format!("Dashboard failed to start: {e}")))
            }
        };

        Self {
            dashboard,
            startup_error,
            started_at,
            dialogs: ModalDialogs::default(),
            metrics_view: MetricsView,
            chart_view: ChartView,
            log_view: LogView,
            control_view: ControlView,
        }
    }

    fn now_s(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

fn build_dashboard(config_path: Option<PathBuf>) -> DashboardResult<Dashboard> {
    let config = match config_path {
        Some(path) => config::load(&path)?,
        None => DashboardConfig::default(),
    };
    Dashboard::from_config(config)
}

impl eframe::App for SolarDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now_s();

        let Some(dashboard) = self.dashboard.as_mut() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Solar Panel Monitoring");
                if let Some(error) = &self.startup_error {
                    ui.colored_label(egui::Color32::RED, error);
                }
            });
            return;
        };

        dashboard.update(now);

        if let Some((PendingConfirm::Reset, answer)) = self.dialogs.show(ctx) {
            dashboard.reset_system(&mut self.dialogs.answered(answer));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Solar Panel Monitoring");
                ui.separator();
                ui.add_enabled_ui(!self.dialogs.is_open(), |ui| {
                    if ui.button("Start Cleaning").clicked() {
                        dashboard.start_cleaning(&mut self.dialogs.answered(true));
                    }
                    if ui.button("Reset System").clicked() {
                        self.dialogs.ask(PendingConfirm::Reset, RESET_PROMPT);
                    }
                });
            });
        });

        let control_actions = egui::SidePanel::right("control")
            .default_width(240.0)
            .show(ctx, |ui| {
                self.control_view
                    .show(ui, dashboard.control(), dashboard.pending_overrides())
            })
            .inner;
        if control_actions.stop_all {
            dashboard.queue_override(OverrideCommand::StopAll);
        }
        if control_actions.resume {
            dashboard.queue_override(OverrideCommand::Resume);
        }

        egui::TopBottomPanel::bottom("logs")
            .resizable(true)
            .default_height(240.0)
            .show(ctx, |ui| {
                self.log_view.show(ui, dashboard.log());
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.metrics_view.show(ui, dashboard.display());
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.chart_view.show(ui, dashboard.charts().charts());
            });
        });

        // Wake up for the next tick without waiting for input.
        if let Some(wait) = dashboard.next_wakeup(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(wait).min(MAX_REPAINT_INTERVAL));
        }
    }
}

impl Drop for SolarDashboardApp {
    fn drop(&mut self) {
        if let Some(dashboard) = self.dashboard.as_mut() {
            dashboard.shutdown();
        }
    }
}
