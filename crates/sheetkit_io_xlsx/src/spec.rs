//! Shared style, cell and region specification models.

use std::fmt;

use rust_xlsxwriter::Format;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::symbol::{
    EnumAlignment, EnumBorderLineStyle, EnumBorderSide, EnumColour, EnumFontFamily,
    EnumFontWeight, EnumSymbol, EnumUnderlineStyle,
};

////////////////////////////////////////////////////////////////////////////////
// #region StyleValue

/// Leaf value of a style specification.
///
/// `Null` is a value that was written explicitly; an absent key is modeled as
/// `None` on the owning field instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "SpecValueRepr")]
pub enum SpecValue {
    /// Explicit null.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer scalar.
    Integer(i64),
    /// Floating point scalar.
    Float(f64),
    /// Symbolic name or free text.
    Text(String),
    /// Already-typed vocabulary constant.
    Symbol(EnumSymbol),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecValueRepr {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<SpecValueRepr> for SpecValue {
    fn from(value: SpecValueRepr) -> Self {
        match value {
            SpecValueRepr::Null => SpecValue::Null,
            SpecValueRepr::Bool(val) => SpecValue::Bool(val),
            SpecValueRepr::Integer(val) => SpecValue::Integer(val),
            SpecValueRepr::Float(val) => SpecValue::Float(val),
            SpecValueRepr::Text(val) => SpecValue::Text(val),
        }
    }
}

impl SpecValue {
    /// Boolean view; `None` for any other variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SpecValue::Bool(val) => Some(*val),
            _ => None,
        }
    }

    /// Numeric view of integer and float variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SpecValue::Integer(val) => Some(*val as f64),
            SpecValue::Float(val) => Some(*val),
            _ => None,
        }
    }

    /// Whether this is an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, SpecValue::Null)
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Null => write!(f, "null"),
            SpecValue::Bool(val) => write!(f, "{val}"),
            SpecValue::Integer(val) => write!(f, "{val}"),
            SpecValue::Float(val) => write!(f, "{val}"),
            SpecValue::Text(val) => write!(f, "{val}"),
            SpecValue::Symbol(val) => write!(f, "{val}"),
        }
    }
}

impl From<&str> for SpecValue {
    fn from(val: &str) -> Self {
        SpecValue::Text(val.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(val: String) -> Self {
        SpecValue::Text(val)
    }
}

impl From<bool> for SpecValue {
    fn from(val: bool) -> Self {
        SpecValue::Bool(val)
    }
}

impl From<i64> for SpecValue {
    fn from(val: i64) -> Self {
        SpecValue::Integer(val)
    }
}

impl From<f64> for SpecValue {
    fn from(val: f64) -> Self {
        SpecValue::Float(val)
    }
}

/// Keep an explicit JSON `null` as `Some(SpecValue::Null)`.
///
/// Paired with `#[serde(default)]` so that an absent key stays `None`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<SpecValue>, D::Error>
where
    D: Deserializer<'de>,
{
    SpecValue::deserialize(deserializer).map(Some)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleSpecification

/// Font sub-specification.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SpecFont {
    /// Font family name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub name: Option<SpecValue>,
    /// Font size in points.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub size: Option<SpecValue>,
    /// Underline style name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub underline_style: Option<SpecValue>,
    /// Italic flag.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub italic: Option<SpecValue>,
    /// Font color name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub color: Option<SpecValue>,
    /// Bold flag.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub bold: Option<SpecValue>,
}

impl SpecFont {
    /// Merge two font specs; keys present on `other` win, null included.
    pub fn merge(&self, other: &SpecFont) -> SpecFont {
        SpecFont {
            name: other.name.clone().or_else(|| self.name.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            underline_style: other
                .underline_style
                .clone()
                .or_else(|| self.underline_style.clone()),
            italic: other.italic.clone().or_else(|| self.italic.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
            bold: other.bold.clone().or_else(|| self.bold.clone()),
        }
    }
}

/// Border sub-specification.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SpecBorder {
    /// Sides the border applies to.
    #[serde(rename = "where", default, deserialize_with = "deserialize_present")]
    pub where_: Option<SpecValue>,
    /// Line style name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub line_style: Option<SpecValue>,
    /// Border color name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub color: Option<SpecValue>,
}

impl SpecBorder {
    /// Merge two border specs; keys present on `other` win, null included.
    pub fn merge(&self, other: &SpecBorder) -> SpecBorder {
        SpecBorder {
            where_: other.where_.clone().or_else(|| self.where_.clone()),
            line_style: other.line_style.clone().or_else(|| self.line_style.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
        }
    }
}

/// Declarative cell style.
///
/// ```
/// use sheetkit_io_xlsx::SpecStyle;
///
/// let spec = SpecStyle::from_json_str(
///     r#"{"color": "yellow", "font": {"bold": true}, "border": {"line_style": "medium"}}"#,
/// )
/// .unwrap();
/// assert!(spec.font.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SpecStyle {
    /// Background color name.
    #[serde(alias = "bkcolor", default, deserialize_with = "deserialize_present")]
    pub color: Option<SpecValue>,
    /// Horizontal alignment name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub alignment: Option<SpecValue>,
    /// Text wrap flag.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub wrap: Option<SpecValue>,
    /// Font override.
    #[serde(default)]
    pub font: Option<SpecFont>,
    /// Border directive.
    #[serde(default)]
    pub border: Option<SpecBorder>,
}

impl SpecStyle {
    /// Parse a style from JSON text.
    pub fn from_json_str(text: &str) -> Result<SpecStyle, SheetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Convert a style from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<SpecStyle, SheetError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Return a new style by overlaying `patch` onto `self`.
    ///
    /// Nested `font`/`border` maps are merged key by key.
    pub fn with_(&self, patch: SpecStyle) -> SpecStyle {
        SpecStyle {
            color: patch.color.or_else(|| self.color.clone()),
            alignment: patch.alignment.or_else(|| self.alignment.clone()),
            wrap: patch.wrap.or_else(|| self.wrap.clone()),
            font: match (&self.font, patch.font) {
                (Some(base), Some(over)) => Some(base.merge(&over)),
                (base, over) => over.or_else(|| base.clone()),
            },
            border: match (&self.border, patch.border) {
                (Some(base), Some(over)) => Some(base.merge(&over)),
                (base, over) => over.or_else(|| base.clone()),
            },
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ResolvedStyle

/// Category of a non-fatal style diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumStyleDiagnosticKind {
    /// Value present but not accepted for the attribute.
    UnsupportedValue {
        /// Offending value as written.
        value: String,
    },
    /// Required key missing after default merge.
    MissingPath,
}

/// One non-fatal style diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStyleDiagnostic {
    /// Dotted key path, e.g. `border.line_style`.
    pub path: String,
    /// What went wrong.
    pub kind: EnumStyleDiagnosticKind,
}

impl fmt::Display for SpecStyleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EnumStyleDiagnosticKind::UnsupportedValue { value } => {
                write!(f, "Unsupported {} specification: {value}. Nothing happens.", self.path)
            }
            EnumStyleDiagnosticKind::MissingPath => {
                write!(f, "Missing {} specification. Directive skipped.", self.path)
            }
        }
    }
}

/// Font attributes that made it into the format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecAppliedFont {
    /// Font family.
    pub family: Option<EnumFontFamily>,
    /// Point size.
    pub size: Option<f64>,
    /// Underline style.
    pub underline_style: Option<EnumUnderlineStyle>,
    /// Bold or regular weight.
    pub weight: Option<EnumFontWeight>,
    /// Italic flag.
    pub italic: Option<bool>,
    /// Font color.
    pub color: Option<EnumColour>,
}

/// Border directive that made it into the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecAppliedBorder {
    /// Side(s) the border is drawn on.
    pub side: EnumBorderSide,
    /// Line style.
    pub line_style: EnumBorderLineStyle,
    /// Line color.
    pub color: EnumColour,
}

/// Attributes applied to a resolved format. Unset fields were absent or
/// rejected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecAppliedStyle {
    /// Applied font attributes.
    pub font: Option<SpecAppliedFont>,
    /// Background fill color.
    pub background: Option<EnumColour>,
    /// Horizontal alignment.
    pub alignment: Option<EnumAlignment>,
    /// Text wrap flag.
    pub wrap: Option<bool>,
    /// Applied border directive.
    pub border: Option<SpecAppliedBorder>,
}

/// Engine-ready format built from one [`SpecStyle`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecResolvedFormat {
    /// Engine format handle.
    pub format: Format,
    /// Applied attributes.
    pub applied: SpecAppliedStyle,
    /// Non-fatal diagnostics raised while resolving.
    pub diagnostics: Vec<SpecStyleDiagnostic>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellWriteSpecification

/// Logical cell kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCellKind {
    /// Text cell.
    Label,
    /// Numeric cell.
    Number,
}

impl fmt::Display for EnumCellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumCellKind::Label => write!(f, "label"),
            EnumCellKind::Number => write!(f, "number"),
        }
    }
}

/// Cell value payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl fmt::Display for EnumCellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumCellValue::String(val) => write!(f, "{val:?}"),
            EnumCellValue::Number(val) => write!(f, "{val}"),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(val: &str) -> Self {
        EnumCellValue::String(val.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(val: String) -> Self {
        EnumCellValue::String(val)
    }
}

impl From<f64> for EnumCellValue {
    fn from(val: f64) -> Self {
        EnumCellValue::Number(val)
    }
}

impl From<i64> for EnumCellValue {
    fn from(val: i64) -> Self {
        EnumCellValue::Number(val as f64)
    }
}

impl From<i32> for EnumCellValue {
    fn from(val: i32) -> Self {
        EnumCellValue::Number(f64::from(val))
    }
}

/// One typed cell write, consumed immediately by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCellWrite<'a> {
    /// Cell kind selecting the engine constructor.
    pub kind: EnumCellKind,
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// Value payload.
    pub value: EnumCellValue,
    /// Optional resolved style.
    pub format: Option<&'a SpecResolvedFormat>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergedRegionSpecification

/// Rectangular merged region in zero-based inclusive coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecMergedRegion {
    /// First row, inclusive.
    pub top: usize,
    /// First column, inclusive.
    pub left: usize,
    /// Last row, inclusive.
    pub bottom: usize,
    /// Last column, inclusive.
    pub right: usize,
}

impl SpecMergedRegion {
    /// Whether `(row, col)` lies inside the rectangle.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.top && row <= self.bottom && col >= self.left && col <= self.right
    }

    /// Whether `(row, col)` is the top-left anchor.
    pub fn is_anchor(&self, row: usize, col: usize) -> bool {
        row == self.top && col == self.left
    }

    /// Whether two rectangles share at least one cell.
    pub fn overlaps(&self, other: &SpecMergedRegion) -> bool {
        self.top <= other.bottom
            && other.top <= self.bottom
            && self.left <= other.right
            && other.left <= self.right
    }
}

impl fmt::Display for SpecMergedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.top, self.left, self.bottom, self.right
        )
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-session report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet names touched by the session, in creation order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Fatal workbook/sheet errors.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Engine failure while building or saving a workbook.
    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
    /// Engine failure while opening or reading a workbook.
    #[error("xlsx read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),
    /// Style configuration text is not valid.
    #[error("invalid style configuration: {0}")]
    InvalidStyleConfig(#[from] serde_json::Error),
    /// Value representation does not fit the cell kind.
    #[error("cannot build {kind} cell at (row={row}, col={col}) from value {value}")]
    CellValueMismatch {
        /// Requested kind.
        kind: EnumCellKind,
        /// Offending value.
        value: String,
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// Row index beyond the engine limit.
    #[error("row index overflow: {0}")]
    RowOutOfRange(usize),
    /// Column index beyond the engine limit.
    #[error("column index overflow: {0}")]
    ColumnOutOfRange(usize),
    /// Region corners are out of order.
    #[error("invalid merged region {0}: top/left must not exceed bottom/right")]
    InvalidRegion(SpecMergedRegion),
    /// No sheet with that name.
    #[error("sheet not found: {0:?}")]
    SheetNotFound(String),
    /// Write attempted after the session was closed.
    #[error("cannot write after close()")]
    WriterClosed,
}

/// Result alias for fatal workbook/sheet errors.
pub type SheetResult<T> = Result<T, SheetError>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
