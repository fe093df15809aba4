use std::fs;
use std::ops::Range;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::trace::TraceError;
/// flocra system clock in MHz; ticks divided by this give microseconds.
pub const FLOCRA_CLOCK_MHZ: f64 = 122.88;
/// How one block of columns is packed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    /// Field width in bits.
    pub width: u32,
    pub signed: bool,
    /// Index of the first column of the group.
    pub offset: usize,
    /// Number of columns; `None` takes every column after `offset`.
    #[serde(default)]
    pub columns: Option<usize>,
    /// Legend text, one per column.
    #[serde(default)]
    pub labels: Vec<String>,
}
impl GroupSpec {
    fn fixed(name: &str, width: u32, signed: bool, offset: usize, labels: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            width,
            signed,
            offset,
            columns: Some(labels.len()),
            labels: labels.iter().map(|l| (*l).to_owned()).collect(),
        }
    }
}
/// Column layout of a simulator trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceLayout {
    pub time_divisor: f64,
    #[serde(default)]
    pub time_column: usize,
    pub groups: Vec<GroupSpec>,
}
/// A group pinned to concrete columns of a loaded table.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedGroup {
    pub spec: GroupSpec,
    pub columns: Range<usize>,
}
impl Default for TraceLayout {
    fn default() -> Self {
        Self::ocra1()
    }
}
impl TraceLayout {
    /// Layout written by `flocra_sim` with the OCRA1 gradient board.
    pub fn ocra1() -> Self {
        let mut io = GroupSpec::fixed(
            "io",
            8,
            false,
            13,
            &["rx gate", "tx gate", "trig out", "leds"],
        );
        io.columns = None;
        Self {
            time_divisor: FLOCRA_CLOCK_MHZ,
            time_column: 0,
            groups: vec![
                GroupSpec::fixed("tx", 16, true, 1, &["tx0 i", "tx0 q", "tx1 i", "tx1 q"]),
                GroupSpec::fixed(
                    "fhdo",
                    16,
                    true,
                    5,
                    &["fhdo x", "fhdo y", "fhdo z", "fhdo z2"],
                ),
                GroupSpec::fixed(
                    "ocra1",
                    18,
                    true,
                    9,
                    &["ocra1 x", "ocra1 y", "ocra1 z", "ocra1 z2"],
                ),
                io,
            ],
        }
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
    pub fn from_json_str(text: &str) -> Result<Self, TraceError> {
        let layout: Self = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }
    pub fn validate(&self) -> Result<(), TraceError> {
        if !self.time_divisor.is_finite() || self.time_divisor <= 0.0 {
            return Err(TraceError::InvalidLayout(format!(
                "time divisor must be a positive number, got {}",
                self.time_divisor
            )));
        }
        if self.groups.is_empty() {
            return Err(TraceError::InvalidLayout("no channel groups".into()));
        }
        let last = self.groups.len() - 1;
        let time_end = self.time_column.checked_add(1).ok_or_else(|| {
            TraceError::InvalidLayout(format!("time column {} is out of range", self.time_column))
        })?;
        let mut taken: Vec<(usize, usize, &str)> = vec![(self.time_column, time_end, "time")];
        for (idx, group) in self.groups.iter().enumerate() {
            if !(1..=32).contains(&group.width) {
                return Err(TraceError::InvalidLayout(format!(
                    "group `{}` has width {}, expected 1..=32 bits",
                    group.name, group.width
                )));
            }
            let end = match group.columns {
                Some(0) => {
                    return Err(TraceError::InvalidLayout(format!(
                        "group `{}` has zero columns",
                        group.name
                    )))
                }
                Some(n) => group.offset.checked_add(n).ok_or_else(|| {
                    TraceError::InvalidLayout(format!(
                        "group `{}` ends past the last addressable column",
                        group.name
                    ))
                })?,
                None if idx == last => usize::MAX,
                None => {
                    return Err(TraceError::InvalidLayout(format!(
                        "only the last group may take the remaining columns, not `{}`",
                        group.name
                    )))
                }
            };
            if let Some((_, _, other)) = taken
                .iter()
                .find(|(start, stop, _)| group.offset < *stop && *start < end)
            {
                return Err(TraceError::InvalidLayout(format!(
                    "group `{}` overlaps `{other}`",
                    group.name
                )));
            }
            taken.push((group.offset, end, group.name.as_str()));
        }
        Ok(())
    }
    /// Smallest table width every fixed column fits into. Saturates, so
    /// call `validate` first to reject layouts that overflow.
    pub fn required_columns(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.offset.saturating_add(g.columns.unwrap_or(0)))
            .chain(std::iter::once(self.time_column.saturating_add(1)))
            .max()
            .unwrap_or(0)
    }
    /// Pin every group to columns of a table `total_columns` wide.
    pub fn resolve(&self, total_columns: usize) -> Result<Vec<ResolvedGroup>, TraceError> {
        self.validate()?;
        let required = self.required_columns();
        if total_columns < required {
            return Err(TraceError::LayoutMismatch {
                required,
                actual: total_columns,
            });
        }
        self.groups
            .iter()
            .map(|spec| {
                let end = match spec.columns {
                    Some(n) => spec.offset.saturating_add(n),
                    None => total_columns,
                };
                if end <= spec.offset {
                    return Err(TraceError::EmptyGroup(spec.name.clone()));
                }
                Ok(ResolvedGroup {
                    spec: spec.clone(),
                    columns: spec.offset..end,
                })
            })
            .collect()
    }
}
