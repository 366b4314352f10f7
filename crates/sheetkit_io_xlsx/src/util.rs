//! Stateless helper utilities shared by the writer and reader.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SheetError, SheetResult, SpecMergedRegion};

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Convert a zero-based row index into the engine row type.
pub fn cast_row_num(value: usize) -> SheetResult<u32> {
    if value >= N_NROWS_EXCEL_MAX {
        return Err(SheetError::RowOutOfRange(value));
    }
    u32::try_from(value).map_err(|_| SheetError::RowOutOfRange(value))
}

/// Convert a zero-based column index into the engine column type.
pub fn cast_col_num(value: usize) -> SheetResult<u16> {
    if value >= N_NCOLS_EXCEL_MAX {
        return Err(SheetError::ColumnOutOfRange(value));
    }
    u16::try_from(value).map_err(|_| SheetError::ColumnOutOfRange(value))
}

/// Check corner order of a region before handing it to the engine.
pub fn validate_merged_region(region: &SpecMergedRegion) -> SheetResult<()> {
    if region.top > region.bottom || region.left > region.right {
        return Err(SheetError::InvalidRegion(*region));
    }
    Ok(())
}
