use serde::{Deserialize, Serialize};

/// Spreadsheet line of the first data row: line 1 holds the headers and
/// lines are 1-based.
pub const FIRST_DATA_LINE: usize = 2;

/// One decoded spreadsheet line: header text to cell value, in column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    source_row_index: usize,
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(source_row_index: usize, cells: Vec<(String, String)>) -> Self {
        Self {
            source_row_index,
            cells,
        }
    }

    /// Row built from the `index`-th (0-based) data row of a sheet
    pub fn from_data_index(index: usize, cells: Vec<(String, String)>) -> Self {
        Self::new(index + FIRST_DATA_LINE, cells)
    }

    pub fn source_row_index(&self) -> usize {
        self.source_row_index
    }

    /// Value of the first column whose trimmed header equals `header`
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name.trim() == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.trim().is_empty())
    }
}
