use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotBounds, PlotPoints, Polygon};
use sw_dashboard::{ChartKind, ChartSpec, Rgba};

const CHART_HEIGHT: f32 = 220.0;

/// Grid of the static dashboard charts, two per row.
#[derive(Default)]
pub struct ChartView;

impl ChartView {
    pub fn show(&self, ui: &mut egui::Ui, charts: &[ChartSpec]) {
        for pair in charts.chunks(2) {
            ui.columns(2, |columns| {
                for (column, chart) in columns.iter_mut().zip(pair) {
                    show_chart(column, chart);
                }
            });
            ui.add_space(8.0);
        }
    }
}

fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// One trapezoid between the line and `y = 0` per segment.
///
/// egui only fills convex polygons, so the area under a line is drawn in pieces.
fn area_under(points: &[[f64; 2]]) -> Vec<[[f64; 2]; 4]> {
    points
        .windows(2)
        .map(|w| {
            let ([x0, y0], [x1, y1]) = (w[0], w[1]);
            [[x0, 0.0], [x0, y0], [x1, y1], [x1, 0.0]]
        })
        .collect()
}

fn show_chart(ui: &mut egui::Ui, chart: &ChartSpec) {
    ui.label(egui::RichText::new(&chart.title).strong());

    let labels = chart.labels.clone();
    let (y_min, y_max) = chart.y_range();
    let fixed_max = chart.y_axis.max;
    let last_index = chart.labels.len().saturating_sub(1) as f64;

    Plot::new(chart.surface.as_str())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_y(y_min)
        .include_y(y_max)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-6 && i >= 0.0 {
                labels.get(i as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            match chart.kind {
                ChartKind::Line => {
                    let points = chart.points();
                    if chart.dataset.fill {
                        let fill = color32(chart.dataset.fill_color);
                        for quad in area_under(&points) {
                            plot_ui.polygon(
                                Polygon::new(PlotPoints::from(quad.to_vec()))
                                    .fill_color(fill)
                                    .stroke(egui::Stroke::NONE),
                            );
                        }
                    }
                    plot_ui.line(
                        Line::new(PlotPoints::from(points))
                            .name(&chart.dataset.label)
                            .color(color32(chart.dataset.border_color)),
                    );
                }
                ChartKind::Bar => {
                    let bars = chart
                        .points()
                        .into_iter()
                        .zip(&chart.labels)
                        .map(|([x, y], label)| {
                            Bar::new(x, y)
                                .name(label)
                                .width(0.6)
                                .fill(color32(chart.dataset.fill_color))
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .name(&chart.dataset.label)
                            .color(color32(chart.dataset.border_color)),
                    );
                }
            }
            if let Some(max) = fixed_max {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [-0.5, y_min],
                    [last_index + 0.5, max],
                ));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_dashboard::charts::ENERGY_CHART;
    use sw_dashboard::default_charts;

    #[test]
    fn area_under_covers_each_segment() {
        let quads = area_under(&[[0.0, 10.0], [1.0, 13.0], [2.0, 9.0]]);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0], [[0.0, 0.0], [0.0, 10.0], [1.0, 13.0], [1.0, 0.0]]);
        assert_eq!(quads[1], [[1.0, 0.0], [1.0, 13.0], [2.0, 9.0], [2.0, 0.0]]);
        assert!(area_under(&[[0.0, 1.0]]).is_empty());
    }

    #[test]
    fn line_fill_uses_dataset_colour() {
        let charts = default_charts();
        let energy = charts
            .iter()
            .find(|c| c.surface == ENERGY_CHART)
            .unwrap();
        assert!(energy.dataset.fill);
        let fill = color32(energy.dataset.fill_color);
        assert_eq!(fill.a(), 51);
        assert_eq!(fill, egui::Color32::from_rgba_unmultiplied(45, 156, 219, 51));
    }
}
