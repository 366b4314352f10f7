//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::{SpecBorder, SpecFont, SpecStyle, SpecValue};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Column width set by every cell write, in character units.
pub const N_WIDTH_COLUMN_DEFAULT: f64 = 30.0;

/// Font defaults merged under any caller-supplied `font` map.
pub fn derive_default_font_spec() -> SpecFont {
    SpecFont {
        name: Some(SpecValue::from("arial")),
        size: Some(SpecValue::Integer(11)),
        underline_style: Some(SpecValue::from("no_underline")),
        italic: Some(SpecValue::Bool(false)),
        color: Some(SpecValue::from("black")),
        bold: Some(SpecValue::Bool(false)),
    }
}

/// Border defaults merged under any caller-supplied `border` map.
pub fn derive_default_border_spec() -> SpecBorder {
    SpecBorder {
        where_: Some(SpecValue::from("all")),
        line_style: Some(SpecValue::from("single")),
        color: Some(SpecValue::from("black")),
    }
}

/// Build named style presets.
///
/// - `text`: no overrides.
/// - `header`: bold 12pt double-underlined, medium red border, wrapped,
///   right-aligned on yellow.
/// - `number`: right-aligned.
pub fn derive_default_styles() -> BTreeMap<String, SpecStyle> {
    let mut dict_styles = BTreeMap::new();
    dict_styles.insert("text".to_string(), SpecStyle::default());
    dict_styles.insert(
        "header".to_string(),
        SpecStyle {
            color: Some(SpecValue::from("yellow")),
            alignment: Some(SpecValue::from("right")),
            wrap: Some(SpecValue::Bool(true)),
            font: Some(SpecFont {
                bold: Some(SpecValue::Bool(true)),
                size: Some(SpecValue::Integer(12)),
                underline_style: Some(SpecValue::from("double")),
                ..Default::default()
            }),
            border: Some(SpecBorder {
                where_: Some(SpecValue::from("all")),
                line_style: Some(SpecValue::from("medium")),
                color: Some(SpecValue::from("red")),
            }),
        },
    );
    dict_styles.insert(
        "number".to_string(),
        SpecStyle {
            alignment: Some(SpecValue::from("right")),
            ..Default::default()
        },
    );
    dict_styles
}
