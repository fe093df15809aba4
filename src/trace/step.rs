/// Corner points of a "post" step function: each value is held until the
/// next sample time, then jumps.
pub fn step_points(times: &[f64], values: &[f64]) -> Vec<[f64; 2]> {
    let n = times.len().min(values.len());
    let mut points = Vec::with_capacity(n.saturating_mul(2).saturating_sub(1));
    for i in 0..n {
        if i > 0 {
            points.push([times[i], values[i - 1]]);
        }
        points.push([times[i], values[i]]);
    }
    points
}
/// Shared time range of a stacked figure, widened when every sample sits on
/// the same instant.
pub fn time_bounds(times: &[f64]) -> (f64, f64) {
    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}
