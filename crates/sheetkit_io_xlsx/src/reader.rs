//! Workbook read session with merged-region aware row linearization.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::merge::MergedRegionIndex;
use crate::spec::{SheetError, SheetResult};

/// Open XLSX workbook for reading.
pub struct XlsxReader {
    path_file_in: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl XlsxReader {
    /// Open the workbook at `path_file_in` and load its merged regions.
    pub fn new(path_file_in: PathBuf) -> SheetResult<Self> {
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(&path_file_in)?;
        workbook.load_merged_regions()?;
        log::debug!("workbook opened for read: {}", path_file_in.display());
        Ok(Self {
            path_file_in,
            workbook,
        })
    }

    /// Run `body` against the workbook at `path_file_in`.
    ///
    /// The file handle is released on every exit path.
    pub fn open<P, F, T>(path_file_in: P, body: F) -> SheetResult<T>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut XlsxReader) -> SheetResult<T>,
    {
        let mut reader = XlsxReader::new(path_file_in.as_ref().to_path_buf())?;
        body(&mut reader)
    }

    /// Return input file path as string.
    pub fn file_in(&self) -> String {
        self.path_file_in.to_string_lossy().to_string()
    }

    /// Names of all sheets in workbook order.
    pub fn all_sheets(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Load one sheet with its merged-region index.
    pub fn sheet(&mut self, name: &str) -> SheetResult<SheetReader> {
        if !self.all_sheets().iter().any(|c_name| c_name == name) {
            return Err(SheetError::SheetNotFound(name.to_string()));
        }

        let range = self.workbook.worksheet_range(name)?;
        let index = MergedRegionIndex::from_regions(
            self.workbook
                .merged_regions_by_sheet(name)
                .into_iter()
                .map(|(_, _, dims)| dims),
        );
        log::debug!(
            "sheet loaded: {name:?} rows={} merged_regions={}",
            range.height(),
            index.len()
        );

        Ok(SheetReader {
            name: name.to_string(),
            range,
            index,
        })
    }

    /// Load every sheet in workbook order.
    pub fn sheets(&mut self) -> SheetResult<Vec<SheetReader>> {
        self.all_sheets()
            .iter()
            .map(|c_name| self.sheet(c_name))
            .collect()
    }
}

impl Drop for XlsxReader {
    fn drop(&mut self) {
        log::debug!("workbook closed: {}", self.path_file_in.display());
    }
}

/// Cell grid of one sheet plus its merged regions.
#[derive(Debug, Clone)]
pub struct SheetReader {
    name: String,
    range: Range<Data>,
    index: MergedRegionIndex,
}

impl SheetReader {
    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merged regions of this sheet.
    pub fn merged_regions(&self) -> &MergedRegionIndex {
        &self.index
    }

    /// Number of rows, counted from row 0 to the last used row.
    pub fn row_count(&self) -> usize {
        self.range
            .end()
            .map_or(0, |(n_row, _)| n_row as usize + 1)
    }

    /// Number of columns, counted from column 0 to the last used column.
    pub fn col_count(&self) -> usize {
        self.range
            .end()
            .map_or(0, |(_, n_col)| n_col as usize + 1)
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        let (Ok(n_row), Ok(n_col)) = (u32::try_from(row), u32::try_from(col)) else {
            return None;
        };
        self.range.get_value((n_row, n_col))
    }

    /// Display text of one cell; empty for blank or unused cells.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.cell(row, col)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Number of cells in `row` up to and including its last non-empty cell.
    pub fn row_len(&self, row: usize) -> usize {
        (0..self.col_count())
            .rev()
            .find(|col| {
                self.cell(row, *col)
                    .is_some_and(|value| !matches!(value, Data::Empty))
            })
            .map_or(0, |col| col + 1)
    }

    /// Trimmed cell texts of one row with non-anchor merged cells removed.
    ///
    /// The row ends at its last non-empty cell, so an empty row is `[]`.
    pub fn row(&self, row: usize) -> Vec<String> {
        (0..self.row_len(row))
            .filter(|col| !self.index.contains_non_anchor(row, *col))
            .map(|col| self.cell_text(row, col).trim().to_string())
            .collect()
    }

    /// Every row, linearized as in [`Self::row`].
    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.row_count()).map(|row| self.row(row)).collect()
    }
}
