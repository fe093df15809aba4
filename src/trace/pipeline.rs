use std::io::Read;
use std::path::Path;
use log::{debug, info};
use crate::trace::decode::{decode_group, ChannelGroup};
use crate::trace::error::TraceError;
use crate::trace::layout::{ResolvedGroup, TraceLayout};
use crate::trace::loader::SampleTable;
use crate::trace::timebase::Timebase;
/// Everything the renderers need: one time axis, one entry per panel.
#[derive(Clone, Debug)]
pub struct DecodedTrace {
    pub timebase: Timebase,
    pub groups: Vec<ChannelGroup>,
}
impl DecodedTrace {
    pub fn time_us(&self) -> &[f64] {
        self.timebase
            .micros
            .as_slice()
            .unwrap_or_default()
    }
    pub fn num_samples(&self) -> usize {
        self.timebase.len()
    }
}
/// Loader, time normalizer and channel decoder run back to back.
pub struct TracePipeline {
    layout: TraceLayout,
}
impl TracePipeline {
    pub fn new(layout: TraceLayout) -> Self {
        Self { layout }
    }
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<DecodedTrace, TraceError> {
        let table = SampleTable::from_path(path.as_ref())?;
        info!(
            "{}: {} samples, {} columns",
            path.as_ref().display(),
            table.num_rows(),
            table.num_columns()
        );
        self.decode(&table)
    }
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<DecodedTrace, TraceError> {
        let table = SampleTable::from_reader(reader)?;
        self.decode(&table)
    }
    pub fn decode(&self, table: &SampleTable) -> Result<DecodedTrace, TraceError> {
        // A header-only file has no width either; report the row count first.
        if table.num_rows() < 2 {
            return Err(TraceError::InsufficientData {
                required: 2,
                actual: table.num_rows(),
            });
        }
        let resolved = self.layout.resolve(table.num_columns())?;
        let timebase = Timebase::normalize(
            table.column(self.layout.time_column),
            self.layout.time_divisor,
        )?;
        let groups: Vec<ChannelGroup> = resolved
            .iter()
            .map(|group| {
                let labels = legend_labels(group, table);
                decode_group(table.data.view(), group, labels)
            })
            .collect();
        for group in &groups {
            if let Some((min, max)) = group.min_max() {
                debug!(
                    "{}: {} channels, {}-bit {}, range {min}..={max}",
                    group.name,
                    group.num_channels(),
                    group.format.width,
                    if group.format.signed { "signed" } else { "unsigned" },
                );
            }
        }
        Ok(DecodedTrace { timebase, groups })
    }
}
/// Configured labels first, then the CSV header, then `<group> <n>`.
/// Labels beyond the group's columns are dropped.
fn legend_labels(group: &ResolvedGroup, table: &SampleTable) -> Vec<String> {
    group
        .columns
        .clone()
        .enumerate()
        .map(|(idx, column)| {
            group
                .spec
                .labels
                .get(idx)
                .cloned()
                .or_else(|| table.header(column).map(str::to_owned))
                .unwrap_or_else(|| format!("{} {idx}", group.spec.name))
        })
        .collect()
}
