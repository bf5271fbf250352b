pub mod scheme_translator;

pub use scheme_translator::{
    palette_rows, Overrides, PaletteRow, RowTranslation, SchemeTranslator, TranslationSettings,
    INVERT_ROWS,
};
