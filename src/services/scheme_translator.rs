use cam02_ucs::{Projection, Rgb, Translation, ViewingConditions};

use crate::error::SchemeError;
use crate::models::{AppConfig, ColorScheme};

/// Rows whose lightness is inverted by `--invert`. They are never scaled by
/// the lightness factor.
pub const INVERT_ROWS: [&str; 5] = [
    "Foreground Color",
    "Background Color",
    "Bold Color",
    "Cursor Color",
    "Cursor Text Color",
];

/// A row of the palette, in translation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRow {
    pub name: String,
    /// Position in the palette, `0..21`
    pub index: usize,
    /// True for [`INVERT_ROWS`]
    pub invert: bool,
}

/// The 16 ANSI rows followed by the invert rows.
pub fn palette_rows() -> Vec<PaletteRow> {
    let ansi = (0..16).map(|i| (format!("Ansi {i} Color"), false));
    let special = INVERT_ROWS.iter().map(|name| (name.to_string(), true));
    ansi.chain(special)
        .enumerate()
        .map(|(index, (name, invert))| PaletteRow {
            name,
            index,
            invert,
        })
        .collect()
}

/// How a scheme should be translated.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationSettings {
    pub source: ViewingConditions,
    pub destination: ViewingConditions,
    /// Invert lightness of the invert rows
    pub invert: bool,
    /// Lightness factor for the ANSI rows
    pub j_factor: f64,
    /// Colorfulness factor for every row
    pub m_factor: f64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            source: ViewingConditions::NEUTRAL,
            destination: ViewingConditions::NEUTRAL,
            invert: false,
            j_factor: 1.0,
            m_factor: 1.0,
        }
    }
}

/// Settings given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub src_bg: Option<String>,
    pub dst_bg: Option<String>,
    /// `--invert` / `--no-invert`
    pub invert: Option<bool>,
    pub j_fac: Option<f64>,
    pub m_fac: Option<f64>,
}

impl TranslationSettings {
    /// Combine command line, config file and built-in defaults, in that
    /// order of precedence.
    pub fn resolve(config: &AppConfig, overrides: &Overrides) -> Self {
        let src_bg = overrides.src_bg.as_deref().or(config.src_bg.as_deref());
        let dst_bg = overrides.dst_bg.as_deref().or(config.dst_bg.as_deref());
        let defaults = Self::default();
        Self {
            source: src_bg.map_or(defaults.source, |name| config.resolve_conditions(name)),
            destination: dst_bg.map_or(defaults.destination, |name| {
                config.resolve_conditions(name)
            }),
            invert: overrides.invert.or(config.invert).unwrap_or(defaults.invert),
            j_factor: overrides.j_fac.or(config.j_fac).unwrap_or(defaults.j_factor),
            m_factor: overrides.m_fac.or(config.m_fac).unwrap_or(defaults.m_factor),
        }
    }
}

/// Outcome for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTranslation {
    pub name: String,
    pub index: usize,
    pub before: Rgb,
    pub after: Rgb,
    /// Gamut search report, absent when recovered
    pub projection: Option<Projection>,
    /// The model failed numerically and `after` is a plain clamp
    pub recovered: bool,
}

/// Translates the palette rows of color schemes.
pub struct SchemeTranslator {
    ansi: Translation,
    special: Translation,
    rows: Vec<PaletteRow>,
}

impl SchemeTranslator {
    pub fn new(settings: &TranslationSettings) -> Self {
        let base = Translation::new(&settings.source, &settings.destination)
            .chroma_factor(settings.m_factor);
        Self {
            ansi: base.clone().lightness_factor(settings.j_factor),
            special: base.invert_lightness(settings.invert),
            rows: palette_rows(),
        }
    }

    pub fn rows(&self) -> &[PaletteRow] {
        &self.rows
    }

    /// Translate one color as `row`.
    ///
    /// Numeric failures do not abort: the row falls back to a clamped color
    /// and is marked `recovered`.
    pub fn translate_color(&self, row: &PaletteRow, before: Rgb) -> RowTranslation {
        let translation = if row.invert { &self.special } else { &self.ansi };

        let (after, projection, recovered) = match translation.unconstrained(before) {
            Err(e) => {
                tracing::warn!(row = %row.name, %e, "Translation failed, clamping source color");
                (before.clamped(), None, true)
            }
            Ok(raw) => match translation.constrain(raw) {
                Ok(projection) => (projection.rgb, Some(projection), false),
                Err(e) => {
                    tracing::warn!(row = %row.name, %e, "Gamut projection failed, clamping");
                    (raw.clamped(), None, true)
                }
            },
        };

        if let Some(search) = projection.as_ref().and_then(|p| p.search.as_ref()) {
            tracing::debug!(
                row = %row.name,
                iterations = search.iterations,
                evaluations = search.evaluations,
                residual = search.value,
                converged = search.converged,
                "Projected into gamut"
            );
        }

        RowTranslation {
            name: row.name.clone(),
            index: row.index,
            before,
            after,
            projection,
            recovered,
        }
    }

    /// Translate every palette row of `scheme` in place.
    ///
    /// All rows are read before any is written, so a missing row leaves the
    /// scheme untouched.
    pub fn translate_scheme(
        &self,
        scheme: &mut ColorScheme,
    ) -> Result<Vec<RowTranslation>, SchemeError> {
        let colors = self
            .rows
            .iter()
            .map(|row| scheme.color(&row.name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(self.rows.len());
        for (row, before) in self.rows.iter().zip(colors) {
            let result = self.translate_color(row, before);
            scheme.set_color(&row.name, result.after)?;
            results.push(result);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_palette_rows() {
        let rows = palette_rows();
        assert_eq!(rows.len(), 21);
        assert_eq!(rows[0].name, "Ansi 0 Color");
        assert_eq!(rows[15].name, "Ansi 15 Color");
        assert_eq!(rows[16].name, "Foreground Color");
        assert_eq!(rows[20].name, "Cursor Text Color");
        assert!(rows[..16].iter().all(|row| !row.invert));
        assert!(rows[16..].iter().all(|row| row.invert));
        assert!(rows.iter().enumerate().all(|(i, row)| row.index == i));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = TranslationSettings::resolve(&AppConfig::default(), &Overrides::default());
        assert_eq!(settings, TranslationSettings::default());
    }

    #[test]
    fn test_resolve_precedence() {
        let config: AppConfig = serde_yaml::from_str(
            "src_bg: dark\ndst_bg: dark\ninvert: true\nj_fac: 0.8\nm_fac: 1.2\n",
        )
        .unwrap();
        let overrides = Overrides {
            dst_bg: Some("light".to_string()),
            m_fac: Some(0.5),
            ..Default::default()
        };
        let settings = TranslationSettings::resolve(&config, &overrides);

        assert_eq!(settings.source, ViewingConditions::DARK);
        assert_eq!(settings.destination, ViewingConditions::LIGHT);
        assert!(settings.invert);
        assert_eq!(settings.j_factor, 0.8);
        assert_eq!(settings.m_factor, 0.5);
    }

    #[test]
    fn test_resolve_invert_flags() {
        let config: AppConfig = serde_yaml::from_str("invert: true\n").unwrap();
        let resolve = |invert| {
            let overrides = Overrides {
                invert,
                ..Default::default()
            };
            TranslationSettings::resolve(&config, &overrides).invert
        };
        assert!(resolve(None));
        assert!(resolve(Some(true)));
        assert!(!resolve(Some(false)));

        let overrides = Overrides {
            invert: Some(true),
            ..Default::default()
        };
        assert!(TranslationSettings::resolve(&AppConfig::default(), &overrides).invert);
    }

    #[test]
    fn test_resolve_unknown_background_is_neutral() {
        let overrides = Overrides {
            src_bg: Some("sepia".to_string()),
            ..Default::default()
        };
        let settings = TranslationSettings::resolve(&AppConfig::default(), &overrides);
        assert_eq!(settings.source, ViewingConditions::NEUTRAL);
    }

    #[test]
    fn test_default_settings_are_identity() {
        let translator = SchemeTranslator::new(&TranslationSettings::default());
        for row in translator.rows() {
            let before = Rgb::new(0.2, 0.4, 0.6);
            let result = translator.translate_color(row, before);
            assert!(!result.recovered);
            assert!(before.max_difference(result.after) < 1e-6, "{result:?}");
        }
    }

    #[test]
    fn test_lightness_factor_skips_invert_rows() {
        let settings = TranslationSettings {
            j_factor: 0.5,
            ..Default::default()
        };
        let translator = SchemeTranslator::new(&settings);
        let rows = translator.rows();
        let grey = Rgb::new(0.6, 0.6, 0.6);

        let ansi = translator.translate_color(&rows[7], grey);
        assert!(ansi.after.g < 0.5, "ANSI row not darkened: {:?}", ansi.after);

        let foreground = translator.translate_color(&rows[16], grey);
        assert!(grey.max_difference(foreground.after) < 1e-6);
    }

    #[test]
    fn test_invert_only_touches_invert_rows() {
        let settings = TranslationSettings {
            invert: true,
            ..Default::default()
        };
        let translator = SchemeTranslator::new(&settings);
        let rows = translator.rows();
        let dark = Rgb::new(0.1, 0.1, 0.1);

        let ansi = translator.translate_color(&rows[0], dark);
        assert!(dark.max_difference(ansi.after) < 1e-6);

        let background = translator.translate_color(&rows[17], dark);
        assert!(background.after.g > 0.8, "{:?}", background.after);
    }

    #[test]
    fn test_white_dark_to_light() {
        let settings = TranslationSettings {
            source: ViewingConditions::DARK,
            destination: ViewingConditions::LIGHT,
            ..Default::default()
        };
        let translator = SchemeTranslator::new(&settings);
        let result = translator.translate_color(&translator.rows()[15], Rgb::new(1.0, 1.0, 1.0));
        assert!(approx_eq(result.after.r, 0.993, 2e-3), "{:?}", result.after);
        assert!(result.after.is_in_gamut());
        assert!(result.projection.is_some());
    }

    #[test]
    fn test_numeric_failure_is_recovered() {
        let translator = SchemeTranslator::new(&TranslationSettings::default());
        let row = &translator.rows()[1];
        let result = translator.translate_color(row, Rgb::new(f64::NAN, 0.5, 0.5));
        assert!(result.recovered);
        assert!(result.projection.is_none());
        assert_eq!(result.after.g, 0.5);
    }

    #[test]
    fn test_projection_failure_falls_back_to_clamped_destination() {
        let settings = TranslationSettings {
            source: ViewingConditions::DARK,
            destination: ViewingConditions::DARK,
            j_factor: 0.5,
            m_factor: 1.5,
            ..Default::default()
        };
        let translator = SchemeTranslator::new(&settings);
        let row = &translator.rows()[4];
        let before = Rgb::new(0.0, 0.0, 0.5);

        let raw = translator.ansi.unconstrained(before).unwrap();
        assert!(!raw.is_in_gamut(), "{raw:?}");
        assert!(translator.ansi.constrain(raw).is_err());

        let result = translator.translate_color(row, before);
        assert!(result.recovered);
        assert!(result.projection.is_none());
        assert_eq!(result.after, raw.clamped());
        assert!(result.after.is_in_gamut());
    }
}
