//! JSON output format.

use chrono::NaiveDate;
use macrolens_types::ConsolidatedTable;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}

/// One table row as a JSON object, keys in column order.
struct Row<'a> {
    date: NaiveDate,
    names: &'a [&'a str],
    values: Vec<f64>,
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len() + 1))?;
        map.serialize_entry("date", &self.date.format("%Y-%m-%d").to_string())?;
        for (name, value) in self.names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// All rows of a table as a JSON array.
struct Rows<'a>(&'a ConsolidatedTable, &'a [&'a str]);

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for (date, values) in self.0.rows() {
            seq.serialize_element(&Row {
                date,
                names: self.1,
                values,
            })?;
        }
        seq.end()
    }
}

impl Formatter for JsonFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &ConsolidatedTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let names: Vec<&str> = table.column_names().collect();
        match self.style {
            JsonStyle::Array => {
                let rows = Rows(table, &names);
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &rows)?;
                } else {
                    serde_json::to_writer(&mut writer, &rows)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for (date, values) in table.rows() {
                    let row = Row {
                        date,
                        names: &names,
                        values,
                    };
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
