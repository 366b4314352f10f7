//! Style resolution: nested [`SpecStyle`] to engine-ready [`Format`].
//!
//! Resolution never fails. Defaults are merged into `font` and `border`,
//! symbolic names are looked up in the vocabulary, and any attribute that is
//! missing or unsupported is left unset with one diagnostic. The order is
//! fixed: font, background, alignment, wrap, border.

use rust_xlsxwriter::{Format, FormatBorder};

use crate::conf::{derive_default_border_spec, derive_default_font_spec};
use crate::spec::{
    EnumStyleDiagnosticKind, SpecAppliedBorder, SpecAppliedFont, SpecAppliedStyle, SpecBorder,
    SpecFont, SpecResolvedFormat, SpecStyle, SpecStyleDiagnostic, SpecValue,
};
use crate::symbol::{
    EnumAlignment, EnumBorderLineStyle, EnumBorderSide, EnumColour, EnumFontFamily,
    EnumFontWeight, EnumUnderlineStyle, TraitSymbol, resolve_symbol,
};

/// Resolve a style specification into a format plus diagnostics.
pub fn resolve_style(spec: &SpecStyle) -> SpecResolvedFormat {
    let mut resolver = StyleResolver::default();
    let mut applied = SpecAppliedStyle::default();

    if let Some(font_spec) = &spec.font {
        let font_merged = derive_default_font_spec().merge(font_spec);
        applied.font = Some(resolver.resolve_font(&font_merged));
    }

    if let Some(value) = &spec.color {
        applied.background = resolver.resolve_symbol_at::<EnumColour>("color", value);
    }
    if let Some(value) = &spec.alignment {
        applied.alignment = resolver.resolve_symbol_at::<EnumAlignment>("alignment", value);
    }
    if let Some(value) = &spec.wrap {
        applied.wrap = resolver.resolve_bool_at("wrap", value);
    }

    if let Some(border_spec) = &spec.border {
        let border_merged = derive_default_border_spec().merge(border_spec);
        applied.border = resolver.resolve_border(&border_merged);
    }

    SpecResolvedFormat {
        format: derive_rust_xlsx_format(&applied),
        applied,
        diagnostics: resolver.l_diagnostics,
    }
}

#[derive(Debug, Default)]
struct StyleResolver {
    l_diagnostics: Vec<SpecStyleDiagnostic>,
}

impl StyleResolver {
    fn report(&mut self, path: &str, kind: EnumStyleDiagnosticKind) {
        let diagnostic = SpecStyleDiagnostic {
            path: path.to_string(),
            kind,
        };
        log::info!("{diagnostic}");
        self.l_diagnostics.push(diagnostic);
    }

    fn report_unsupported(&mut self, path: &str, value: String) {
        self.report(path, EnumStyleDiagnosticKind::UnsupportedValue { value });
    }

    /// Present-null and (post-merge) absent values are both missing paths.
    fn require<'a>(&mut self, path: &str, value: Option<&'a SpecValue>) -> Option<&'a SpecValue> {
        match value {
            Some(val) if !val.is_null() => Some(val),
            _ => {
                self.report(path, EnumStyleDiagnosticKind::MissingPath);
                None
            }
        }
    }

    fn resolve_symbol_at<T: TraitSymbol>(&mut self, path: &str, value: &SpecValue) -> Option<T> {
        let value = self.require(path, Some(value))?;
        match resolve_symbol::<T>(value) {
            Ok(val) => Some(val),
            Err(err) => {
                self.report_unsupported(path, err.value);
                None
            }
        }
    }

    fn resolve_bool_at(&mut self, path: &str, value: &SpecValue) -> Option<bool> {
        let value = self.require(path, Some(value))?;
        let flag = value.as_bool();
        if flag.is_none() {
            self.report_unsupported(path, value.to_string());
        }
        flag
    }

    fn resolve_size_at(&mut self, path: &str, value: &SpecValue) -> Option<f64> {
        let value = self.require(path, Some(value))?;
        match value.as_f64() {
            Some(n_size) if n_size.is_finite() && n_size > 0.0 => Some(n_size),
            _ => {
                self.report_unsupported(path, value.to_string());
                None
            }
        }
    }

    /// `bold` takes a boolean or a font weight name.
    fn resolve_weight_at(&mut self, path: &str, value: &SpecValue) -> Option<EnumFontWeight> {
        match value {
            SpecValue::Bool(true) => Some(EnumFontWeight::Bold),
            SpecValue::Bool(false) => Some(EnumFontWeight::NoBold),
            _ => self.resolve_symbol_at::<EnumFontWeight>(path, value),
        }
    }

    fn resolve_font(&mut self, font: &SpecFont) -> SpecAppliedFont {
        let mut applied = SpecAppliedFont::default();

        if let Some(value) = self.require("font.name", font.name.as_ref()) {
            applied.family = self.resolve_symbol_at::<EnumFontFamily>("font.name", value);
        }
        if let Some(value) = self.require("font.size", font.size.as_ref()) {
            applied.size = self.resolve_size_at("font.size", value);
        }
        if let Some(value) = self.require("font.underline_style", font.underline_style.as_ref()) {
            applied.underline_style =
                self.resolve_symbol_at::<EnumUnderlineStyle>("font.underline_style", value);
        }
        if let Some(value) = self.require("font.bold", font.bold.as_ref()) {
            applied.weight = self.resolve_weight_at("font.bold", value);
        }
        if let Some(value) = self.require("font.italic", font.italic.as_ref()) {
            applied.italic = self.resolve_bool_at("font.italic", value);
        }
        if let Some(value) = self.require("font.color", font.color.as_ref()) {
            applied.color = self.resolve_symbol_at::<EnumColour>("font.color", value);
        }

        applied
    }

    /// All three parts resolve, or no border is applied.
    fn resolve_border(&mut self, border: &SpecBorder) -> Option<SpecAppliedBorder> {
        let value_side = self.require("border.where", border.where_.as_ref());
        let value_line = self.require("border.line_style", border.line_style.as_ref());
        let value_color = self.require("border.color", border.color.as_ref());

        let side = value_side
            .and_then(|val| self.resolve_symbol_at::<EnumBorderSide>("border.where", val));
        let line_style = value_line.and_then(|val| {
            self.resolve_symbol_at::<EnumBorderLineStyle>("border.line_style", val)
        });
        let color = value_color
            .and_then(|val| self.resolve_symbol_at::<EnumColour>("border.color", val));

        Some(SpecAppliedBorder {
            side: side?,
            line_style: line_style?,
            color: color?,
        })
    }
}

/// Build the engine format from applied attributes.
pub fn derive_rust_xlsx_format(applied: &SpecAppliedStyle) -> Format {
    let mut format = Format::new();

    if let Some(font) = &applied.font {
        if let Some(family) = font.family {
            format = format.set_font_name(family.font_name());
        }
        if let Some(n_size) = font.size {
            format = format.set_font_size(n_size);
        }
        if let Some(underline) = font.underline_style {
            format = format.set_underline(underline.to_xlsx_underline());
        }
        if font.weight == Some(EnumFontWeight::Bold) {
            format = format.set_bold();
        }
        if font.italic == Some(true) {
            format = format.set_italic();
        }
        if let Some(color) = font.color {
            format = format.set_font_color(color.to_xlsx_color());
        }
    }

    if let Some(color) = applied.background {
        format = format.set_background_color(color.to_xlsx_color());
    }
    if let Some(align) = applied.alignment {
        format = format.set_align(align.to_xlsx_align());
    }
    if applied.wrap == Some(true) {
        format = format.set_text_wrap();
    }

    if let Some(border) = applied.border {
        let line = border.line_style.to_xlsx_border();
        let color = border.color.to_xlsx_color();
        format = match border.side {
            EnumBorderSide::None => format.set_border(FormatBorder::None),
            EnumBorderSide::All => format.set_border(line).set_border_color(color),
            EnumBorderSide::Top => format.set_border_top(line).set_border_top_color(color),
            EnumBorderSide::Bottom => format
                .set_border_bottom(line)
                .set_border_bottom_color(color),
            EnumBorderSide::Left => format.set_border_left(line).set_border_left_color(color),
            EnumBorderSide::Right => format
                .set_border_right(line)
                .set_border_right_color(color),
        };
    }

    format
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_from_json(text: &str) -> SpecStyle {
        SpecStyle::from_json_str(text).expect("style json")
    }

    #[test]
    fn test_empty_style_applies_nothing() {
        let resolved = resolve_style(&SpecStyle::default());
        assert_eq!(resolved.applied, SpecAppliedStyle::default());
        assert!(resolved.diagnostics.is_empty());
        assert_eq!(resolved.format, Format::new());
    }

    #[test]
    fn test_font_defaults_are_merged() {
        let resolved = resolve_style(&spec_from_json(r#"{"font": {"bold": true}}"#));
        assert!(resolved.diagnostics.is_empty());
        assert_eq!(
            resolved.applied.font,
            Some(SpecAppliedFont {
                family: Some(EnumFontFamily::Arial),
                size: Some(11.0),
                underline_style: Some(EnumUnderlineStyle::NoUnderline),
                weight: Some(EnumFontWeight::Bold),
                italic: Some(false),
                color: Some(EnumColour::Black),
            })
        );
    }

    #[test]
    fn test_partial_font_equals_spelled_out_font() {
        let resolved_short = resolve_style(&spec_from_json(r#"{"font": {"bold": true}}"#));
        let resolved_full = resolve_style(&spec_from_json(
            r#"{"font": {"bold": true, "name": "arial", "size": 11,
                "underline_style": "no_underline", "italic": false, "color": "black"}}"#,
        ));
        assert_eq!(resolved_short, resolved_full);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let spec = spec_from_json(
            r#"{"font": {"name": "times", "size": 14, "italic": true, "color": "blue"}}"#,
        );
        assert_eq!(resolve_style(&spec), resolve_style(&spec));
    }

    #[test]
    fn test_background_lookup_is_case_insensitive() {
        let l_resolved: Vec<_> = ["Yellow", "YELLOW", "yellow"]
            .iter()
            .map(|c_name| {
                resolve_style(&SpecStyle {
                    color: Some(SpecValue::from(*c_name)),
                    ..Default::default()
                })
            })
            .collect();

        for resolved in &l_resolved {
            assert_eq!(resolved.applied.background, Some(EnumColour::Yellow));
            assert!(resolved.diagnostics.is_empty());
        }
        assert_eq!(l_resolved[0].format, l_resolved[1].format);
        assert_eq!(l_resolved[1].format, l_resolved[2].format);
    }

    #[test]
    fn test_unsupported_alignment_is_reported_and_skipped() {
        let resolved = resolve_style(&spec_from_json(
            r#"{"alignment": "diagonal", "color": "red", "wrap": true}"#,
        ));
        assert_eq!(resolved.applied.alignment, None);
        assert_eq!(resolved.applied.background, Some(EnumColour::Red));
        assert_eq!(resolved.applied.wrap, Some(true));
        assert_eq!(
            resolved.diagnostics,
            vec![SpecStyleDiagnostic {
                path: "alignment".to_string(),
                kind: EnumStyleDiagnosticKind::UnsupportedValue {
                    value: "diagonal".to_string()
                },
            }]
        );
        assert_eq!(
            resolved.diagnostics[0].to_string(),
            "Unsupported alignment specification: diagonal. Nothing happens."
        );
    }

    #[test]
    fn test_missing_border_applies_no_border() {
        let resolved = resolve_style(&spec_from_json(r#"{"color": "yellow"}"#));
        assert_eq!(resolved.applied.border, None);
        assert!(
            resolved
                .diagnostics
                .iter()
                .all(|diag| !diag.path.starts_with("border"))
        );
    }

    #[test]
    fn test_border_defaults_are_merged() {
        let resolved = resolve_style(&spec_from_json(r#"{"border": {"color": "red"}}"#));
        assert!(resolved.diagnostics.is_empty());
        assert_eq!(
            resolved.applied.border,
            Some(SpecAppliedBorder {
                side: EnumBorderSide::All,
                line_style: EnumBorderLineStyle::Thin,
                color: EnumColour::Red,
            })
        );
    }

    #[test]
    fn test_unsupported_border_side_skips_whole_border() {
        let resolved = resolve_style(&spec_from_json(
            r#"{"border": {"where": "diagonal", "line_style": "medium", "color": "red"}}"#,
        ));
        assert_eq!(resolved.applied.border, None);
        assert_eq!(resolved.diagnostics.len(), 1);
        assert_eq!(resolved.diagnostics[0].path, "border.where");
        assert_eq!(resolved.format, Format::new());
    }

    #[test]
    fn test_null_border_key_is_a_missing_path() {
        let resolved = resolve_style(&spec_from_json(r#"{"border": {"line_style": null}}"#));
        assert_eq!(resolved.applied.border, None);
        assert_eq!(
            resolved.diagnostics,
            vec![SpecStyleDiagnostic {
                path: "border.line_style".to_string(),
                kind: EnumStyleDiagnosticKind::MissingPath,
            }]
        );
    }

    #[test]
    fn test_bad_font_attribute_only_drops_that_attribute() {
        let resolved = resolve_style(&spec_from_json(
            r#"{"font": {"name": "comic_sans", "size": "huge", "bold": true}}"#,
        ));
        let font = resolved.applied.font.expect("font");
        assert_eq!(font.family, None);
        assert_eq!(font.size, None);
        assert_eq!(font.weight, Some(EnumFontWeight::Bold));
        assert_eq!(font.color, Some(EnumColour::Black));

        let l_paths: Vec<_> = resolved
            .diagnostics
            .iter()
            .map(|diag| diag.path.as_str())
            .collect();
        assert_eq!(l_paths, vec!["font.name", "font.size"]);
    }

    #[test]
    fn test_typed_constants_pass_through() {
        let resolved = resolve_style(&SpecStyle {
            color: Some(EnumColour::Gold.into()),
            alignment: Some(EnumAlignment::Centre.into()),
            ..Default::default()
        });
        assert!(resolved.diagnostics.is_empty());
        assert_eq!(resolved.applied.background, Some(EnumColour::Gold));
        assert_eq!(resolved.applied.alignment, Some(EnumAlignment::Centre));
    }

    #[test]
    fn test_header_style_builds_expected_format() {
        let resolved = resolve_style(&spec_from_json(
            r#"{"font": {"bold": true, "size": 12, "underline_style": "double"},
                "border": {"where": "all", "line_style": "medium", "color": "red"},
                "wrap": true, "alignment": "right", "bkcolor": "yellow"}"#,
        ));
        assert!(resolved.diagnostics.is_empty());

        let format_expected = Format::new()
            .set_font_name("Arial")
            .set_font_size(12.0)
            .set_underline(EnumUnderlineStyle::Double.to_xlsx_underline())
            .set_bold()
            .set_font_color(EnumColour::Black.to_xlsx_color())
            .set_background_color(EnumColour::Yellow.to_xlsx_color())
            .set_align(EnumAlignment::Right.to_xlsx_align())
            .set_text_wrap()
            .set_border(FormatBorder::Medium)
            .set_border_color(EnumColour::Red.to_xlsx_color());
        assert_eq!(resolved.format, format_expected);
    }
}
