//! iTerm2 color schemes (`.itermcolors`)
//!
//! A scheme is an XML property list: a dictionary of row names (`Ansi 0 Color`,
//! `Foreground Color`, ...) to color dictionaries holding float components.
//! Only the three RGB components are ever rewritten; every other key and row
//! round-trips untouched.

use std::io::{Read, Seek, Write};
use std::path::Path;

use cam02_ucs::Rgb;
use plist::{Dictionary, Value};

use crate::error::SchemeError;

/// Component keys in R, G, B order.
pub const COMPONENTS: [&str; 3] = ["Red Component", "Green Component", "Blue Component"];

/// A parsed color scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    rows: Dictionary,
}

impl ColorScheme {
    pub fn from_dictionary(rows: Dictionary) -> Self {
        Self { rows }
    }

    /// Load a scheme from a `.itermcolors` file (XML or binary plist).
    pub fn from_file(path: &Path) -> Result<Self, SchemeError> {
        Self::from_value(Value::from_file(path)?)
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, SchemeError> {
        Self::from_value(Value::from_reader(reader)?)
    }

    fn from_value(value: Value) -> Result<Self, SchemeError> {
        match value {
            Value::Dictionary(rows) => Ok(Self { rows }),
            _ => Err(SchemeError::NotADictionary),
        }
    }

    pub fn contains_row(&self, row: &str) -> bool {
        self.rows.contains_key(row)
    }

    pub fn row_names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Read the RGB color of `row`.
    ///
    /// Integer components are accepted as well as reals.
    pub fn color(&self, row: &str) -> Result<Rgb, SchemeError> {
        let entry = self.row(row)?;
        let mut rgb = [0.0; 3];
        for (slot, component) in rgb.iter_mut().zip(COMPONENTS) {
            let value = entry
                .get(component)
                .ok_or_else(|| SchemeError::MissingComponent {
                    row: row.to_string(),
                    component,
                })?;
            *slot = as_number(value).ok_or_else(|| SchemeError::InvalidComponent {
                row: row.to_string(),
                component,
            })?;
        }
        Ok(Rgb::from(rgb))
    }

    /// Overwrite the RGB components of an existing `row`.
    pub fn set_color(&mut self, row: &str, rgb: Rgb) -> Result<(), SchemeError> {
        let entry = self
            .rows
            .get_mut(row)
            .and_then(Value::as_dictionary_mut)
            .ok_or_else(|| SchemeError::MissingRow(row.to_string()))?;
        for (component, value) in COMPONENTS.into_iter().zip(rgb.to_array()) {
            entry.insert(component.to_string(), Value::Real(value));
        }
        Ok(())
    }

    /// Write the scheme as an XML property list.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), SchemeError> {
        Value::Dictionary(self.rows.clone()).to_writer_xml(writer)?;
        Ok(())
    }

    pub fn write_file(&self, path: &Path) -> Result<(), SchemeError> {
        Value::Dictionary(self.rows.clone()).to_file_xml(path)?;
        Ok(())
    }

    fn row(&self, row: &str) -> Result<&Dictionary, SchemeError> {
        self.rows
            .get(row)
            .and_then(Value::as_dictionary)
            .ok_or_else(|| SchemeError::MissingRow(row.to_string()))
    }
}

fn as_number(value: &Value) -> Option<f64> {
    value
        .as_real()
        .or_else(|| value.as_signed_integer().map(|i| i as f64))
        .or_else(|| value.as_unsigned_integer().map(|u| u as f64))
}
