// Copyright 2023 vinyldns-cli authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Rendering of API responses as ASCII tables or JSON.

use std::io::Write;

use clap::ValueEnum;
use comfy_table::Table;
use comfy_table::presets::ASCII_FULL;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Headerless table, one row per entry; key/value views use two cells per row.
pub fn basic_table(rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

pub fn header_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Two-column table of labelled values.
pub fn key_value_table(pairs: &[(&str, String)]) -> String {
    basic_table(
        pairs
            .iter()
            .map(|(key, value)| vec![key.to_string(), value.clone()])
            .collect(),
    )
}

/// Writes command results in the selected [`OutputFormat`].
pub struct Printer<'a> {
    format: OutputFormat,
    out: &'a mut dyn Write,
}

impl<'a> Printer<'a> {
    pub fn new(format: OutputFormat, out: &'a mut dyn Write) -> Self {
        Self { format, out }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Serializes `value` compactly on a single line.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string(value)?;
        self.line(&rendered)
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    pub fn basic_table(&mut self, rows: Vec<Vec<String>>) -> Result<()> {
        self.line(&basic_table(rows))
    }

    pub fn header_table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        self.line(&header_table(headers, rows))
    }

    pub fn key_value_table(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        self.line(&key_value_table(pairs))
    }
}
