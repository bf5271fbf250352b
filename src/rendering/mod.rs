pub mod terminal;

pub use terminal::{palette_escape, row_line, swatch};
