//! Viewing conditions and the named background presets
//!
//! A terminal palette is seen against its own background, which acts as the
//! viewing condition's background field. The three presets differ only in
//! that relative background luminance:
//!
//! | Preset    | `Y_w` | `L_A` | `Y_b` | Surround |
//! |-----------|-------|-------|-------|----------|
//! | `dark`    | 80    | 16    | 0.8   | average  |
//! | `neutral` | 80    | 16    | 16    | average  |
//! | `light`   | 80    | 16    | 80    | average  |

/// CIECAM02 surround category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Surround {
    #[default]
    Average,
    Dim,
    Dark,
}

impl Surround {
    /// Factor determining the degree of adaptation, `F`.
    #[inline]
    pub fn adaptation_factor(self) -> f64 {
        match self {
            Surround::Average => 1.0,
            Surround::Dim => 0.9,
            Surround::Dark => 0.8,
        }
    }

    /// Impact of the surround, `c`.
    #[inline]
    pub fn impact(self) -> f64 {
        match self {
            Surround::Average => 0.69,
            Surround::Dim => 0.59,
            Surround::Dark => 0.525,
        }
    }

    /// Chromatic induction factor, `N_c`.
    #[inline]
    pub fn chromatic_induction(self) -> f64 {
        match self {
            Surround::Average => 1.0,
            Surround::Dim => 0.9,
            Surround::Dark => 0.8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Surround::Average => "average",
            Surround::Dim => "dim",
            Surround::Dark => "dark",
        }
    }
}

/// The environment a color is viewed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    /// Luminance of the adapting white, `Y_w` (cd/m²)
    pub adapting_white: f64,
    /// Luminance of the adapting field, `L_A` (cd/m²)
    pub adapting_luminance: f64,
    /// Relative luminance of the background, `Y_b`
    pub background_luminance: f64,
    pub surround: Surround,
}

impl ViewingConditions {
    /// Dark terminal background.
    pub const DARK: Self = Self::new(80.0, 16.0, 0.8, Surround::Average);
    /// Mid-grey background. Also the fallback for unknown names.
    pub const NEUTRAL: Self = Self::new(80.0, 16.0, 16.0, Surround::Average);
    /// Light terminal background.
    pub const LIGHT: Self = Self::new(80.0, 16.0, 80.0, Surround::Average);

    /// All presets with their registry names.
    pub const PRESETS: [(&'static str, Self); 3] = [
        ("dark", Self::DARK),
        ("neutral", Self::NEUTRAL),
        ("light", Self::LIGHT),
    ];

    pub const fn new(
        adapting_white: f64,
        adapting_luminance: f64,
        background_luminance: f64,
        surround: Surround,
    ) -> Self {
        Self {
            adapting_white,
            adapting_luminance,
            background_luminance,
            surround,
        }
    }

    /// Strict, case-insensitive preset lookup.
    ///
    /// # Example
    /// ```
    /// use cam02_ucs::ViewingConditions;
    /// assert_eq!(ViewingConditions::lookup("Light"), Some(ViewingConditions::LIGHT));
    /// assert_eq!(ViewingConditions::lookup("sepia"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, conditions)| *conditions)
    }

    /// Permissive preset lookup: absent or unrecognized names yield
    /// [`ViewingConditions::NEUTRAL`].
    ///
    /// This never fails. Callers that want to reject typos should use
    /// [`ViewingConditions::lookup`] and decide for themselves.
    ///
    /// # Example
    /// ```
    /// use cam02_ucs::ViewingConditions;
    /// assert_eq!(ViewingConditions::by_name(Some("DARK")), ViewingConditions::DARK);
    /// assert_eq!(ViewingConditions::by_name(Some("sepia")), ViewingConditions::NEUTRAL);
    /// assert_eq!(ViewingConditions::by_name(None), ViewingConditions::NEUTRAL);
    /// ```
    pub fn by_name(name: Option<&str>) -> Self {
        name.and_then(Self::lookup).unwrap_or(Self::NEUTRAL)
    }
}

impl Default for ViewingConditions {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
