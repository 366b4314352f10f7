//! `sheetkit_io_xlsx` v1:
//! Declarative cell styling and grid I/O over XLSX engines.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : style/cell/region models, reports and errors
//! - `symbol` : symbol vocabulary per style attribute
//! - `style`  : style resolution into engine formats
//! - `merge`  : merged-region index
//! - `writer` : write session and typed cell-write dispatcher
//! - `reader` : read session and row linearization
//! - `util`   : pure helper functions
pub mod conf;
pub mod merge;
pub mod reader;
pub mod spec;
pub mod style;
pub mod symbol;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_COLUMN_DEFAULT,
    TUP_EXCEL_ILLEGAL, derive_default_border_spec, derive_default_font_spec,
    derive_default_styles,
};
pub use merge::{MergedRegionIndex, TraitRegionCorners};
pub use reader::{SheetReader, XlsxReader};
pub use spec::{
    EnumCellKind, EnumCellValue, EnumStyleDiagnosticKind, SheetError, SheetResult,
    SpecAppliedBorder, SpecAppliedFont, SpecAppliedStyle, SpecBorder, SpecCellWrite, SpecFont,
    SpecMergedRegion, SpecResolvedFormat, SpecStyle, SpecStyleDiagnostic, SpecValue,
    SpecXlsxReport,
};
pub use style::{derive_rust_xlsx_format, resolve_style};
pub use symbol::{
    EnumAlignment, EnumBorderLineStyle, EnumBorderSide, EnumColour, EnumFontFamily,
    EnumFontWeight, EnumSymbol, EnumUnderlineStyle, SpecUnresolvedSymbol, TraitSymbol,
    list_symbol_vocabulary, log_symbol_vocabulary, resolve_symbol,
};
pub use util::sanitize_sheet_name;
pub use writer::{SheetWriter, XlsxWriter};
