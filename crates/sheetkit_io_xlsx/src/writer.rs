//! Workbook write session and the typed cell-write dispatcher.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::conf::{N_WIDTH_COLUMN_DEFAULT, derive_default_styles};
use crate::spec::{
    EnumCellKind, EnumCellValue, SheetError, SheetResult, SpecCellWrite, SpecMergedRegion,
    SpecResolvedFormat, SpecStyle, SpecXlsxReport,
};
use crate::style::resolve_style;
use crate::util::{cast_col_num, cast_row_num, sanitize_sheet_name, validate_merged_region};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    pub fn new(path_file_out: PathBuf) -> Self {
        log::debug!("workbook opened for write: {}", path_file_out.display());
        Self {
            path_file_out,
            workbook: Workbook::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Run `body` against a fresh workbook and save it when `body` succeeds.
    ///
    /// An `Err` from `body` is returned as-is and nothing is written to disk.
    /// The in-memory workbook is released on every exit path.
    pub fn create<P, F, T>(path_file_out: P, body: F) -> SheetResult<T>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut XlsxWriter) -> SheetResult<T>,
    {
        let mut writer = XlsxWriter::new(path_file_out.as_ref().to_path_buf());
        let output = body(&mut writer)?;
        writer.close()?;
        Ok(output)
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return snapshot of the session report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> SheetResult<()> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        log::debug!("workbook saved: {}", self.path_file_out.display());
        Ok(())
    }

    /// Resolve a style and record its diagnostics in the session report.
    pub fn resolve(&mut self, spec: &SpecStyle) -> SpecResolvedFormat {
        let resolved = resolve_style(spec);
        for diagnostic in &resolved.diagnostics {
            self.report.warn(diagnostic.to_string());
        }
        resolved
    }

    /// Resolve one of the named presets from [`derive_default_styles`].
    pub fn resolve_preset(&mut self, name: &str) -> Option<SpecResolvedFormat> {
        let spec = derive_default_styles().remove(name)?;
        Some(self.resolve(&spec))
    }

    /// Names of all sheets in workbook order.
    pub fn all_sheets(&mut self) -> Vec<String> {
        self.workbook
            .worksheets_mut()
            .iter()
            .map(|worksheet| worksheet.name())
            .collect()
    }

    /// Get the sheet called `name`, creating it at `position` when absent.
    ///
    /// The name is sanitized first. `position` is clamped to the sheet count.
    pub fn sheet(&mut self, name: &str, position: usize) -> SheetResult<SheetWriter<'_>> {
        if self.if_closed {
            return Err(SheetError::WriterClosed);
        }

        let c_name = sanitize_sheet_name(name, "_");
        if c_name != name {
            let c_msg = format!("Sheet name {name:?} sanitized to {c_name:?}.");
            log::warn!("{c_msg}");
            self.report.warn(c_msg);
        }

        // Sheet names are unique without regard to case.
        let c_name_lower = c_name.to_lowercase();
        let l_worksheets = self.workbook.worksheets_mut();
        let idx_sheet = match l_worksheets
            .iter()
            .position(|worksheet| worksheet.name().to_lowercase() == c_name_lower)
        {
            Some(idx_existing) => idx_existing,
            None => {
                let mut worksheet = Worksheet::new();
                worksheet.set_name(&c_name)?;

                let n_position = usize::min(position, l_worksheets.len());
                l_worksheets.insert(n_position, worksheet);
                self.report.sheets.push(c_name.clone());
                log::debug!("sheet created: {c_name:?} at position {n_position}");
                n_position
            }
        };

        let worksheet = &mut l_worksheets[idx_sheet];
        Ok(SheetWriter {
            worksheet,
            report: &mut self.report,
        })
    }
}

impl Drop for XlsxWriter {
    fn drop(&mut self) {
        if !self.if_closed {
            log::debug!(
                "workbook released without save: {}",
                self.path_file_out.display()
            );
        }
    }
}

/// One worksheet of an open [`XlsxWriter`] session.
pub struct SheetWriter<'a> {
    worksheet: &'a mut Worksheet,
    report: &'a mut SpecXlsxReport,
}

impl SheetWriter<'_> {
    /// Sheet name.
    pub fn name(&self) -> String {
        self.worksheet.name()
    }

    /// Write a text cell.
    pub fn label(
        &mut self,
        row: usize,
        col: usize,
        text: impl Into<String>,
        format: Option<&SpecResolvedFormat>,
    ) -> SheetResult<()> {
        self.write(EnumCellKind::Label, row, col, EnumCellValue::String(text.into()), format)
    }

    /// Write a numeric cell.
    pub fn number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        format: Option<&SpecResolvedFormat>,
    ) -> SheetResult<()> {
        self.write(EnumCellKind::Number, row, col, EnumCellValue::Number(value), format)
    }

    /// Write a cell of `kind`.
    pub fn write(
        &mut self,
        kind: EnumCellKind,
        row: usize,
        col: usize,
        value: impl Into<EnumCellValue>,
        format: Option<&SpecResolvedFormat>,
    ) -> SheetResult<()> {
        self.write_cell(SpecCellWrite {
            kind,
            row,
            col,
            value: value.into(),
            format,
        })
    }

    /// Dispatch one cell write to the matching engine constructor, then fix
    /// the column width.
    ///
    /// A value whose representation does not match `kind` is an error.
    pub fn write_cell(&mut self, request: SpecCellWrite<'_>) -> SheetResult<()> {
        let n_row = cast_row_num(request.row)?;
        let n_col = cast_col_num(request.col)?;
        let format = request.format.map(|resolved| &resolved.format);

        match (request.kind, &request.value, format) {
            (EnumCellKind::Label, EnumCellValue::String(text), Some(format)) => {
                self.worksheet
                    .write_string_with_format(n_row, n_col, text, format)?;
            }
            (EnumCellKind::Label, EnumCellValue::String(text), None) => {
                self.worksheet.write_string(n_row, n_col, text)?;
            }
            (EnumCellKind::Number, EnumCellValue::Number(value), Some(format)) => {
                self.worksheet
                    .write_number_with_format(n_row, n_col, *value, format)?;
            }
            (EnumCellKind::Number, EnumCellValue::Number(value), None) => {
                self.worksheet.write_number(n_row, n_col, *value)?;
            }
            (kind, value, _) => {
                return Err(SheetError::CellValueMismatch {
                    kind,
                    value: value.to_string(),
                    row: request.row,
                    col: request.col,
                });
            }
        }

        self.worksheet
            .set_column_width(n_col, N_WIDTH_COLUMN_DEFAULT)?;
        Ok(())
    }

    /// Merge a rectangle and write `text` into its anchor.
    pub fn merge(
        &mut self,
        region: SpecMergedRegion,
        text: &str,
        format: Option<&SpecResolvedFormat>,
    ) -> SheetResult<()> {
        validate_merged_region(&region)?;
        let format_default = Format::new();
        let format = format.map_or(&format_default, |resolved| &resolved.format);

        self.worksheet.merge_range(
            cast_row_num(region.top)?,
            cast_col_num(region.left)?,
            cast_row_num(region.bottom)?,
            cast_col_num(region.right)?,
            text,
            format,
        )?;
        self.worksheet
            .set_column_width(cast_col_num(region.left)?, N_WIDTH_COLUMN_DEFAULT)?;
        Ok(())
    }

    /// Record a warning in the owning session report.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.report.warn(msg);
    }
}
