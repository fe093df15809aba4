use std::fs::File;
use std::io::Read;
use std::path::Path;
use log::debug;
use ndarray::{Array2, ArrayView1};
use crate::trace::TraceError;
/// Numeric table as written by `flocra_sim`: one header line, then rows of
/// equal width.
#[derive(Clone, Debug)]
pub struct SampleTable {
    pub headers: Vec<String>,
    pub data: Array2<f64>, // rows x columns
}
impl SampleTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!(
            "loaded {} rows x {} columns from {}",
            table.num_rows(),
            table.num_columns(),
            path.display()
        );
        Ok(table)
    }
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TraceError> {
        // Row widths are checked here so the header may differ from the data.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let mut width: Option<usize> = None;
        let mut rows = 0usize;
        let mut flat = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            // Blank lines are skipped by np.loadtxt-style readers; do the same.
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            let expected = *width.get_or_insert(record.len());
            if record.len() != expected {
                return Err(TraceError::RaggedRow {
                    line,
                    expected,
                    actual: record.len(),
                });
            }
            for (column, field) in record.iter().enumerate() {
                let value = field.parse::<f64>().map_err(|_| TraceError::Parse {
                    line,
                    column,
                    value: field.to_owned(),
                })?;
                flat.push(value);
            }
            rows += 1;
        }
        let data = Array2::from_shape_vec((rows, width.unwrap_or(0)), flat)?;
        Ok(Self { headers, data })
    }
    pub fn num_rows(&self) -> usize {
        self.data.nrows()
    }
    pub fn num_columns(&self) -> usize {
        self.data.ncols()
    }
    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.column(index)
    }
    /// Header text of a column, if the header row had one.
    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers
            .get(index)
            .map(String::as_str)
            .filter(|h| !h.is_empty())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn skips_header_and_parses_rows() {
        let csv = "time,a,b\n0,1,2\n5, -3 ,4.5\n";
        let table = SampleTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["time", "a", "b"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.data[[1, 1]], -3.0);
        assert_eq!(table.data[[1, 2]], 4.5);
        assert_eq!(table.column(0).to_vec(), vec![0.0, 5.0]);
    }
    #[test]
    fn header_width_may_differ_from_data() {
        let csv = "time,values\n0,1,2\n1,3,4\n";
        let table = SampleTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.num_columns(), 3);
        assert_eq!(table.header(1), Some("values"));
        assert_eq!(table.header(2), None);
    }
    #[test]
    fn ragged_rows_are_rejected() {
        let csv = "h\n0,1,2\n1,2\n";
        let err = SampleTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            TraceError::RaggedRow {
                line,
                expected,
                actual,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    #[test]
    fn malformed_numbers_are_rejected() {
        let csv = "h\n0,1\n1,x7\n";
        let err = SampleTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            TraceError::Parse { line: 3, column: 1, ref value } if value == "x7"
        ));
    }
    #[test]
    fn missing_file_reports_path() {
        let err = SampleTable::from_path("/nonexistent/flocra_sim.csv").unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/flocra_sim.csv"));
    }
    #[test]
    fn header_only_file_is_empty() {
        let table = SampleTable::from_reader("time,a\n".as_bytes()).unwrap();
        assert_eq!(table.num_rows(), 0);
    }
}
