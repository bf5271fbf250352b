//! iterm-schemer - translate terminal color schemes between backgrounds
//!
//! Reads an iTerm2 `.itermcolors` scheme, translates its 21 palette rows from
//! one background (dark, neutral, light or a configured custom condition) to
//! another with the [`cam02_ucs`] appearance model, and writes the result.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
