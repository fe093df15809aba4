use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::trace::error::TraceError;
use crate::trace::pipeline::DecodedTrace;
use crate::trace::step::{step_points, time_bounds};
pub const TIME_AXIS_LABEL: &str = "time (us)";
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        // 12 x 8 inch figure at 100 dpi.
        Self {
            width: 1200,
            height: 800,
            background: WHITE,
            palette: vec![
                RGBColor(0x1f, 0x77, 0xb4),
                RGBColor(0xff, 0x7f, 0x0e),
                RGBColor(0x2c, 0xa0, 0x2c),
                RGBColor(0xd6, 0x27, 0x28),
                RGBColor(0x94, 0x67, 0xbd),
                RGBColor(0x8c, 0x56, 0x4b),
            ],
        }
    }
}
impl PlotStyle {
    /// Palette entry for line `idx`, black when the palette is empty.
    pub fn color(&self, idx: usize) -> RGBColor {
        if self.palette.is_empty() {
            BLACK
        } else {
            self.palette[idx % self.palette.len()]
        }
    }
}
/// Draw one stacked step-plot panel per channel group and encode it as PNG.
pub fn render_trace_png(trace: &DecodedTrace, style: &PlotStyle) -> Result<Vec<u8>, TraceError> {
    if trace.groups.is_empty() || trace.num_samples() == 0 {
        return Err(TraceError::Plot("trace has no samples".into()));
    }
    let times = trace.time_us();
    let (t_min, t_max) = time_bounds(times);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let panels = root.split_evenly((trace.groups.len(), 1));
        let last = panels.len() - 1;
        for (panel_idx, (panel, group)) in panels.iter().zip(&trace.groups).enumerate() {
            let (y_min, y_max) = group
                .min_max()
                .map(|(lo, hi)| (lo as f64, hi as f64))
                .unwrap_or((0.0, 1.0));
            let pad = ((y_max - y_min) * 0.05).max(0.5);
            let mut chart = ChartBuilder::on(panel)
                .margin(8)
                .set_label_area_size(LabelAreaPosition::Left, 60)
                .set_label_area_size(
                    LabelAreaPosition::Bottom,
                    if panel_idx == last { 40 } else { 20 },
                )
                .build_cartesian_2d(t_min..t_max, (y_min - pad)..(y_max + pad))?;
            let mut mesh = chart.configure_mesh();
            mesh.light_line_style(&BLACK.mix(0.05));
            if panel_idx == last {
                mesh.x_desc(TIME_AXIS_LABEL);
            }
            mesh.draw()?;
            for (idx, label) in group.labels.iter().enumerate() {
                let color = style.color(idx);
                let series = step_points(times, &group.channel(idx))
                    .into_iter()
                    .map(|[t, v]| (t, v));
                chart
                    .draw_series(LineSeries::new(series, &color))?
                    .label(label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .border_style(&BLACK.mix(0.3))
                .background_style(&style.background.mix(0.8))
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, TraceError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| TraceError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
