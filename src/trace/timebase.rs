use log::warn;
use ndarray::{Array1, ArrayView1};
use crate::trace::TraceError;
/// Rebased tick counter and the matching microsecond axis.
#[derive(Clone, Debug)]
pub struct Timebase {
    pub ticks: Array1<f64>,
    pub micros: Array1<f64>,
}
impl Timebase {
    /// Drop the dead time the simulator spends on memory writes before the
    /// sequence starts: rows 0 and 1 land on tick 1 and later rows keep
    /// their distance from row 1.
    pub fn normalize(raw_ticks: ArrayView1<'_, f64>, divisor: f64) -> Result<Self, TraceError> {
        if raw_ticks.len() < 2 {
            return Err(TraceError::InsufficientData {
                required: 2,
                actual: raw_ticks.len(),
            });
        }
        let origin = raw_ticks[1];
        let mut ticks = raw_ticks.mapv(|t| t - origin + 1.0);
        ticks[0] = ticks[1];
        if let Some(row) = ticks
            .windows(2)
            .into_iter()
            .position(|pair| pair[1] < pair[0])
        {
            warn!("tick counter goes backwards after row {}", row + 1);
        }
        let micros = ticks.mapv(|t| t / divisor);
        Ok(Self { ticks, micros })
    }
    pub fn len(&self) -> usize {
        self.micros.len()
    }
    pub fn span_us(&self) -> (f64, f64) {
        let first = self.micros.first().copied().unwrap_or(0.0);
        let last = self.micros.last().copied().unwrap_or(0.0);
        (first, last)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::layout::FLOCRA_CLOCK_MHZ;
    use ndarray::array;
    #[test]
    fn dead_time_is_removed() {
        let raw = array![1000.0, 1000.0, 1005.0, 1010.0];
        let tb = Timebase::normalize(raw.view(), FLOCRA_CLOCK_MHZ).unwrap();
        assert_eq!(tb.ticks.to_vec(), vec![1.0, 1.0, 6.0, 11.0]);
        assert!((tb.micros[2] - 6.0 / 122.88).abs() < 1e-12);
        assert!((tb.micros[2] - 0.0488).abs() < 1e-4);
        assert_eq!(tb.len(), 4);
    }
    #[test]
    fn first_row_is_pulled_onto_second() {
        // Row 0 is usually the reset sample, far before the first write.
        let raw = array![3.0, 52_000.0, 52_010.0];
        let tb = Timebase::normalize(raw.view(), 1.0).unwrap();
        assert_eq!(tb.ticks[0], tb.ticks[1]);
        assert_eq!(tb.ticks.to_vec(), vec![1.0, 1.0, 11.0]);
        assert_eq!(tb.span_us(), (1.0, 11.0));
    }
    #[test]
    fn single_row_is_rejected() {
        let raw = array![7.0];
        let err = Timebase::normalize(raw.view(), FLOCRA_CLOCK_MHZ).unwrap_err();
        assert!(matches!(
            err,
            TraceError::InsufficientData {
                required: 2,
                actual: 1
            }
        ));
    }
    #[test]
    fn normalized_axis_is_non_decreasing() {
        let raw = array![0.0, 400.0, 400.0, 401.0, 900.0, 12_345.0];
        let tb = Timebase::normalize(raw.view(), FLOCRA_CLOCK_MHZ).unwrap();
        assert!(tb.micros.windows(2).into_iter().all(|w| w[0] <= w[1]));
    }
}
