// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use crate::trace::step::{step_points, time_bounds};
use crate::trace::{DecodedTrace, TIME_AXIS_LABEL};
// matplotlib's default cycle, so screenshots match the old script
const PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
];
/// Panels pan and zoom together along the time axis.
const TIME_AXIS_GROUP: &str = "flocra-time";
/// Step lines of one panel, built once at startup.
struct Panel {
    id: String,
    lines: Vec<(String, Vec<[f64; 2]>)>,
}
pub struct TraceViewerApp {
    panels: Vec<Panel>,
    x_range: (f64, f64),
}
impl TraceViewerApp {
    pub fn new(trace: &DecodedTrace) -> Self {
        let times = trace.time_us();
        let panels = trace
            .groups
            .iter()
            .map(|group| Panel {
                id: format!("trace-{}", group.name),
                lines: group
                    .labels
                    .iter()
                    .enumerate()
                    .map(|(idx, label)| (label.clone(), step_points(times, &group.channel(idx))))
                    .collect(),
            })
            .collect();
        Self {
            panels,
            x_range: time_bounds(times),
        }
    }
    fn show_panels(&self, ui: &mut egui::Ui) {
        let count = self.panels.len().max(1) as f32;
        let spacing = ui.spacing().item_spacing.y;
        let height = ((ui.available_height() - spacing * (count - 1.0)) / count).max(80.0);
        let last = self.panels.len().saturating_sub(1);
        for (idx, panel) in self.panels.iter().enumerate() {
            let mut plot = Plot::new(panel.id.as_str())
                .height(height)
                .legend(Legend::default())
                .include_x(self.x_range.0)
                .include_x(self.x_range.1)
                .link_axis(TIME_AXIS_GROUP, true, false);
            if idx == last {
                plot = plot.x_axis_label(TIME_AXIS_LABEL);
            }
            plot.show(ui, |plot_ui| {
                for (line_idx, (label, points)) in panel.lines.iter().enumerate() {
                    let color = PALETTE[line_idx % PALETTE.len()];
                    plot_ui.line(
                        Line::new(PlotPoints::new(points.clone()))
                            .name(label)
                            .color(color),
                    );
                }
            });
        }
    }
}
impl eframe::App for TraceViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| self.show_panels(ui));
    }
}
