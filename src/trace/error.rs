use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}, column {column}: cannot parse {value:?} as a number")]
    Parse {
        line: u64,
        column: usize,
        value: String,
    },
    #[error("line {line}: expected {expected} columns, got {actual}")]
    RaggedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },
    #[error("need at least {required} data rows to rebase the time axis, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("invalid channel layout: {0}")]
    InvalidLayout(String),
    #[error("layout needs at least {required} columns, table has {actual}")]
    LayoutMismatch { required: usize, actual: usize },
    #[error("channel group `{0}` has no columns in this table")]
    EmptyGroup(String),
    #[error("failed to parse layout file: {0}")]
    LayoutFile(#[from] serde_json::Error),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for TraceError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        TraceError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for TraceError {
    fn from(value: image::ImageError) -> Self {
        TraceError::Plot(value.to_string())
    }
}
