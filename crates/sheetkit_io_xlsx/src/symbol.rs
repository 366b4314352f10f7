//! Symbol vocabulary: accepted symbolic names per style attribute category.
//!
//! Every category is a closed enum with a static name table. Lookup is
//! case-insensitive and returns an explicit unresolved result carrying the
//! offending text, never a silent default.

use std::collections::BTreeMap;
use std::fmt;

use rust_xlsxwriter::{Color, FormatAlign, FormatBorder, FormatUnderline};

use crate::spec::SpecValue;

////////////////////////////////////////////////////////////////////////////////
// #region SymbolTrait

/// Typed vocabulary constant wrapped for storage in a [`SpecValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumSymbol {
    /// Color constant.
    Colour(EnumColour),
    /// Border side constant.
    BorderSide(EnumBorderSide),
    /// Border line style constant.
    BorderLineStyle(EnumBorderLineStyle),
    /// Underline style constant.
    UnderlineStyle(EnumUnderlineStyle),
    /// Font family constant.
    FontFamily(EnumFontFamily),
    /// Font weight constant.
    FontWeight(EnumFontWeight),
    /// Horizontal alignment constant.
    Alignment(EnumAlignment),
}

impl EnumSymbol {
    /// Category name of the wrapped constant.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Colour(_) => EnumColour::CATEGORY,
            Self::BorderSide(_) => EnumBorderSide::CATEGORY,
            Self::BorderLineStyle(_) => EnumBorderLineStyle::CATEGORY,
            Self::UnderlineStyle(_) => EnumUnderlineStyle::CATEGORY,
            Self::FontFamily(_) => EnumFontFamily::CATEGORY,
            Self::FontWeight(_) => EnumFontWeight::CATEGORY,
            Self::Alignment(_) => EnumAlignment::CATEGORY,
        }
    }

    /// Canonical symbolic name of the wrapped constant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Colour(val) => val.name(),
            Self::BorderSide(val) => val.name(),
            Self::BorderLineStyle(val) => val.name(),
            Self::UnderlineStyle(val) => val.name(),
            Self::FontFamily(val) => val.name(),
            Self::FontWeight(val) => val.name(),
            Self::Alignment(val) => val.name(),
        }
    }
}

impl fmt::Display for EnumSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.category(), self.name())
    }
}

/// One attribute category of the vocabulary.
pub trait TraitSymbol: Sized + Copy + PartialEq + fmt::Debug + 'static {
    /// Category key used in diagnostics and introspection.
    const CATEGORY: &'static str;

    /// Accepted upper-case names. The first entry for a constant is canonical;
    /// later entries for the same constant are aliases.
    const TUP_SYMBOLS: &'static [(&'static str, Self)];

    /// Unwrap a typed constant of this category.
    fn from_symbol(symbol: EnumSymbol) -> Option<Self>;

    /// Wrap into the category-tagged union.
    fn into_symbol(self) -> EnumSymbol;

    /// Look up a symbolic name after trimming and upper-casing it.
    fn from_name(name: &str) -> Option<Self> {
        let c_name = normalize_symbol_name(name);
        Self::TUP_SYMBOLS
            .iter()
            .find(|(c_symbol, _)| *c_symbol == c_name)
            .map(|(_, val)| *val)
    }

    /// Canonical name of this constant.
    fn name(self) -> &'static str {
        Self::TUP_SYMBOLS
            .iter()
            .find(|(_, val)| *val == self)
            .map(|(c_symbol, _)| *c_symbol)
            .unwrap_or("UNKNOWN")
    }

    /// All accepted names, aliases included.
    fn names() -> Vec<&'static str> {
        Self::TUP_SYMBOLS.iter().map(|(c_symbol, _)| *c_symbol).collect()
    }
}

/// Failed symbolic lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecUnresolvedSymbol {
    /// Category that was searched.
    pub category: &'static str,
    /// Offending value as written by the caller.
    pub value: String,
}

impl fmt::Display for SpecUnresolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported {} value: {}", self.category, self.value)
    }
}

/// Trim and upper-case a symbolic name.
pub fn normalize_symbol_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Resolve a style leaf value against category `T`.
///
/// Text is looked up by name; a typed constant of the same category passes
/// through unchanged. Anything else is unresolved.
pub fn resolve_symbol<T: TraitSymbol>(value: &SpecValue) -> Result<T, SpecUnresolvedSymbol> {
    let resolved = match value {
        SpecValue::Text(text) => T::from_name(text),
        SpecValue::Symbol(symbol) => T::from_symbol(*symbol),
        _ => None,
    };
    resolved.ok_or_else(|| SpecUnresolvedSymbol {
        category: T::CATEGORY,
        value: value.to_string(),
    })
}

macro_rules! impl_symbol_category {
    ($ty:ident, $variant:ident, $category:literal, [$(($c_name:literal, $val:expr)),+ $(,)?]) => {
        impl TraitSymbol for $ty {
            const CATEGORY: &'static str = $category;
            const TUP_SYMBOLS: &'static [(&'static str, Self)] = &[$(($c_name, $val)),+];

            fn from_symbol(symbol: EnumSymbol) -> Option<Self> {
                match symbol {
                    EnumSymbol::$variant(val) => Some(val),
                    _ => None,
                }
            }

            fn into_symbol(self) -> EnumSymbol {
                EnumSymbol::$variant(self)
            }
        }

        impl From<$ty> for SpecValue {
            fn from(val: $ty) -> Self {
                SpecValue::Symbol(val.into_symbol())
            }
        }
    };
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Colour

/// Palette colors accepted for backgrounds, fonts and borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumColour {
    Automatic,
    Black,
    White,
    Red,
    BrightGreen,
    Blue,
    Yellow,
    Pink,
    Turquoise,
    DarkRed,
    Green,
    DarkBlue,
    DarkYellow,
    Violet,
    Teal,
    Grey25Percent,
    Grey40Percent,
    Grey50Percent,
    Grey80Percent,
    Periwinkle,
    Plum,
    Ivory,
    LightTurquoise,
    DarkPurple,
    Coral,
    OceanBlue,
    IceBlue,
    SkyBlue,
    LightGreen,
    VeryLightYellow,
    PaleBlue,
    Rose,
    Lavender,
    Tan,
    LightBlue,
    Aqua,
    Lime,
    Gold,
    LightOrange,
    Orange,
    BlueGrey,
    DarkTeal,
    SeaGreen,
    DarkGreen,
    OliveGreen,
    Brown,
    Indigo,
}

impl_symbol_category!(EnumColour, Colour, "color", [
    ("AUTOMATIC", EnumColour::Automatic),
    ("BLACK", EnumColour::Black),
    ("WHITE", EnumColour::White),
    ("RED", EnumColour::Red),
    ("BRIGHT_GREEN", EnumColour::BrightGreen),
    ("BLUE", EnumColour::Blue),
    ("YELLOW", EnumColour::Yellow),
    ("PINK", EnumColour::Pink),
    ("TURQUOISE", EnumColour::Turquoise),
    ("DARK_RED", EnumColour::DarkRed),
    ("GREEN", EnumColour::Green),
    ("DARK_BLUE", EnumColour::DarkBlue),
    ("DARK_YELLOW", EnumColour::DarkYellow),
    ("VIOLET", EnumColour::Violet),
    ("TEAL", EnumColour::Teal),
    ("GREY_25_PERCENT", EnumColour::Grey25Percent),
    ("GREY_40_PERCENT", EnumColour::Grey40Percent),
    ("GREY_50_PERCENT", EnumColour::Grey50Percent),
    ("GREY_80_PERCENT", EnumColour::Grey80Percent),
    ("PERIWINKLE", EnumColour::Periwinkle),
    ("PLUM", EnumColour::Plum),
    ("IVORY", EnumColour::Ivory),
    ("LIGHT_TURQUOISE", EnumColour::LightTurquoise),
    ("DARK_PURPLE", EnumColour::DarkPurple),
    ("CORAL", EnumColour::Coral),
    ("OCEAN_BLUE", EnumColour::OceanBlue),
    ("ICE_BLUE", EnumColour::IceBlue),
    ("SKY_BLUE", EnumColour::SkyBlue),
    ("LIGHT_GREEN", EnumColour::LightGreen),
    ("VERY_LIGHT_YELLOW", EnumColour::VeryLightYellow),
    ("PALE_BLUE", EnumColour::PaleBlue),
    ("ROSE", EnumColour::Rose),
    ("LAVENDER", EnumColour::Lavender),
    ("TAN", EnumColour::Tan),
    ("LIGHT_BLUE", EnumColour::LightBlue),
    ("AQUA", EnumColour::Aqua),
    ("LIME", EnumColour::Lime),
    ("GOLD", EnumColour::Gold),
    ("LIGHT_ORANGE", EnumColour::LightOrange),
    ("ORANGE", EnumColour::Orange),
    ("BLUE_GREY", EnumColour::BlueGrey),
    ("DARK_TEAL", EnumColour::DarkTeal),
    ("SEA_GREEN", EnumColour::SeaGreen),
    ("DARK_GREEN", EnumColour::DarkGreen),
    ("OLIVE_GREEN", EnumColour::OliveGreen),
    ("BROWN", EnumColour::Brown),
    ("INDIGO", EnumColour::Indigo),
    ("GREY", EnumColour::Grey50Percent),
    ("GRAY", EnumColour::Grey50Percent),
]);

impl EnumColour {
    /// RGB value of the palette entry; `None` for [`EnumColour::Automatic`].
    pub fn rgb(self) -> Option<u32> {
        let n_rgb = match self {
            Self::Automatic => return None,
            Self::Black => 0x000000,
            Self::White => 0xFFFFFF,
            Self::Red => 0xFF0000,
            Self::BrightGreen => 0x00FF00,
            Self::Blue => 0x0000FF,
            Self::Yellow => 0xFFFF00,
            Self::Pink => 0xFF00FF,
            Self::Turquoise => 0x00FFFF,
            Self::DarkRed => 0x800000,
            Self::Green => 0x008000,
            Self::DarkBlue => 0x000080,
            Self::DarkYellow => 0x808000,
            Self::Violet => 0x800080,
            Self::Teal => 0x008080,
            Self::Grey25Percent => 0xC0C0C0,
            Self::Grey40Percent => 0x969696,
            Self::Grey50Percent => 0x808080,
            Self::Grey80Percent => 0x333333,
            Self::Periwinkle => 0x9999FF,
            Self::Plum => 0x993366,
            Self::Ivory => 0xFFFFCC,
            Self::LightTurquoise => 0xCCFFFF,
            Self::DarkPurple => 0x660066,
            Self::Coral => 0xFF8080,
            Self::OceanBlue => 0x0066CC,
            Self::IceBlue => 0xCCCCFF,
            Self::SkyBlue => 0x00CCFF,
            Self::LightGreen => 0xCCFFCC,
            Self::VeryLightYellow => 0xFFFF99,
            Self::PaleBlue => 0x99CCFF,
            Self::Rose => 0xFF99CC,
            Self::Lavender => 0xCC99FF,
            Self::Tan => 0xFFCC99,
            Self::LightBlue => 0x3366FF,
            Self::Aqua => 0x33CCCC,
            Self::Lime => 0x99CC00,
            Self::Gold => 0xFFCC00,
            Self::LightOrange => 0xFF9900,
            Self::Orange => 0xFF6600,
            Self::BlueGrey => 0x666699,
            Self::DarkTeal => 0x003366,
            Self::SeaGreen => 0x339966,
            Self::DarkGreen => 0x003300,
            Self::OliveGreen => 0x333300,
            Self::Brown => 0x993300,
            Self::Indigo => 0x333399,
        };
        Some(n_rgb)
    }

    /// Engine color value.
    pub fn to_xlsx_color(self) -> Color {
        match self.rgb() {
            Some(n_rgb) => Color::RGB(n_rgb),
            None => Color::Automatic,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Border

/// Cell sides a border directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumBorderSide {
    None,
    All,
    Top,
    Bottom,
    Left,
    Right,
}

impl_symbol_category!(EnumBorderSide, BorderSide, "border", [
    ("NONE", EnumBorderSide::None),
    ("ALL", EnumBorderSide::All),
    ("TOP", EnumBorderSide::Top),
    ("BOTTOM", EnumBorderSide::Bottom),
    ("LEFT", EnumBorderSide::Left),
    ("RIGHT", EnumBorderSide::Right),
]);

/// Border line styles. `SINGLE` is accepted as an alias of `THIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumBorderLineStyle {
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantedDashDot,
}

impl_symbol_category!(EnumBorderLineStyle, BorderLineStyle, "border_line_style", [
    ("NONE", EnumBorderLineStyle::None),
    ("THIN", EnumBorderLineStyle::Thin),
    ("MEDIUM", EnumBorderLineStyle::Medium),
    ("DASHED", EnumBorderLineStyle::Dashed),
    ("DOTTED", EnumBorderLineStyle::Dotted),
    ("THICK", EnumBorderLineStyle::Thick),
    ("DOUBLE", EnumBorderLineStyle::Double),
    ("HAIR", EnumBorderLineStyle::Hair),
    ("MEDIUM_DASHED", EnumBorderLineStyle::MediumDashed),
    ("DASH_DOT", EnumBorderLineStyle::DashDot),
    ("MEDIUM_DASH_DOT", EnumBorderLineStyle::MediumDashDot),
    ("DASH_DOT_DOT", EnumBorderLineStyle::DashDotDot),
    ("MEDIUM_DASH_DOT_DOT", EnumBorderLineStyle::MediumDashDotDot),
    ("SLANTED_DASH_DOT", EnumBorderLineStyle::SlantedDashDot),
    ("SINGLE", EnumBorderLineStyle::Thin),
]);

impl EnumBorderLineStyle {
    /// Engine border style.
    pub fn to_xlsx_border(self) -> FormatBorder {
        match self {
            Self::None => FormatBorder::None,
            Self::Thin => FormatBorder::Thin,
            Self::Medium => FormatBorder::Medium,
            Self::Dashed => FormatBorder::Dashed,
            Self::Dotted => FormatBorder::Dotted,
            Self::Thick => FormatBorder::Thick,
            Self::Double => FormatBorder::Double,
            Self::Hair => FormatBorder::Hair,
            Self::MediumDashed => FormatBorder::MediumDashed,
            Self::DashDot => FormatBorder::DashDot,
            Self::MediumDashDot => FormatBorder::MediumDashDot,
            Self::DashDotDot => FormatBorder::DashDotDot,
            Self::MediumDashDotDot => FormatBorder::MediumDashDotDot,
            Self::SlantedDashDot => FormatBorder::SlantDashDot,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Font

/// Font underline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumUnderlineStyle {
    NoUnderline,
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
}

impl_symbol_category!(EnumUnderlineStyle, UnderlineStyle, "underline_style", [
    ("NO_UNDERLINE", EnumUnderlineStyle::NoUnderline),
    ("SINGLE", EnumUnderlineStyle::Single),
    ("DOUBLE", EnumUnderlineStyle::Double),
    ("SINGLE_ACCOUNTING", EnumUnderlineStyle::SingleAccounting),
    ("DOUBLE_ACCOUNTING", EnumUnderlineStyle::DoubleAccounting),
]);

impl EnumUnderlineStyle {
    /// Engine underline style.
    pub fn to_xlsx_underline(self) -> FormatUnderline {
        match self {
            Self::NoUnderline => FormatUnderline::None,
            Self::Single => FormatUnderline::Single,
            Self::Double => FormatUnderline::Double,
            Self::SingleAccounting => FormatUnderline::SingleAccounting,
            Self::DoubleAccounting => FormatUnderline::DoubleAccounting,
        }
    }
}

/// Font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFontFamily {
    Arial,
    Times,
    Courier,
    Tahoma,
}

impl_symbol_category!(EnumFontFamily, FontFamily, "font_family", [
    ("ARIAL", EnumFontFamily::Arial),
    ("TIMES", EnumFontFamily::Times),
    ("COURIER", EnumFontFamily::Courier),
    ("TAHOMA", EnumFontFamily::Tahoma),
    ("TIMES_NEW_ROMAN", EnumFontFamily::Times),
    ("COURIER_NEW", EnumFontFamily::Courier),
]);

impl EnumFontFamily {
    /// Font name written into the workbook.
    pub fn font_name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Times => "Times New Roman",
            Self::Courier => "Courier New",
            Self::Tahoma => "Tahoma",
        }
    }
}

/// Font weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFontWeight {
    Bold,
    NoBold,
}

impl_symbol_category!(EnumFontWeight, FontWeight, "font_weight", [
    ("BOLD", EnumFontWeight::Bold),
    ("NO_BOLD", EnumFontWeight::NoBold),
]);

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Alignment

/// Horizontal alignments. `CENTER` is accepted as an alias of `CENTRE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumAlignment {
    General,
    Left,
    Centre,
    Right,
    Fill,
    Justify,
}

impl_symbol_category!(EnumAlignment, Alignment, "alignment", [
    ("GENERAL", EnumAlignment::General),
    ("LEFT", EnumAlignment::Left),
    ("CENTRE", EnumAlignment::Centre),
    ("RIGHT", EnumAlignment::Right),
    ("FILL", EnumAlignment::Fill),
    ("JUSTIFY", EnumAlignment::Justify),
    ("CENTER", EnumAlignment::Centre),
]);

impl EnumAlignment {
    /// Engine alignment.
    pub fn to_xlsx_align(self) -> FormatAlign {
        match self {
            Self::General => FormatAlign::General,
            Self::Left => FormatAlign::Left,
            Self::Centre => FormatAlign::Center,
            Self::Right => FormatAlign::Right,
            Self::Fill => FormatAlign::Fill,
            Self::Justify => FormatAlign::Justify,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Introspection

/// Every attribute category with its accepted names.
pub fn list_symbol_vocabulary() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut dict_vocab = BTreeMap::new();
    dict_vocab.insert(EnumColour::CATEGORY, EnumColour::names());
    dict_vocab.insert(EnumBorderSide::CATEGORY, EnumBorderSide::names());
    dict_vocab.insert(EnumBorderLineStyle::CATEGORY, EnumBorderLineStyle::names());
    dict_vocab.insert(EnumUnderlineStyle::CATEGORY, EnumUnderlineStyle::names());
    dict_vocab.insert(EnumFontFamily::CATEGORY, EnumFontFamily::names());
    dict_vocab.insert(EnumFontWeight::CATEGORY, EnumFontWeight::names());
    dict_vocab.insert(EnumAlignment::CATEGORY, EnumAlignment::names());
    dict_vocab
}

/// Log the vocabulary, one line per category, and return the logged lines.
pub fn log_symbol_vocabulary() -> Vec<String> {
    list_symbol_vocabulary()
        .into_iter()
        .map(|(c_category, l_names)| {
            let c_line = format!("allowed {c_category}(s) = {}", l_names.join(", "));
            log::info!("{c_line}");
            c_line
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
