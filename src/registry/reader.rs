//! RHS register reader.
//!
//! The export is `;`-delimited with a header row. Columns are located by
//! name (case-insensitive), so extra or reordered columns are fine.

use std::collections::HashMap;
use std::io::Read;

use log::{debug, warn};

use super::{Grex, Registry, RegistryError};

const DELIMITER: u8 = b';';
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const COL_EPITHET: &str = "EPITHET";
pub const COL_SEED: &str = "SEED";
pub const COL_POLLEN: &str = "POLLEN";
pub const COL_ORIGINATOR: &str = "ORIGINATOR NAME";
pub const COL_DATE: &str = "DATE OF REGISTRATION";

/// Column positions resolved from the header row.
struct Columns {
    epithet: usize,
    seed: usize,
    pollen: usize,
    originator: usize,
    date: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, RegistryError> {
        let idx: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, col)| (col.trim().to_uppercase(), i))
            .collect();
        let find = |name: &str| {
            idx.get(name)
                .copied()
                .ok_or_else(|| RegistryError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            epithet: find(COL_EPITHET)?,
            seed: find(COL_SEED)?,
            pollen: find(COL_POLLEN)?,
            originator: find(COL_ORIGINATOR)?,
            date: find(COL_DATE)?,
        })
    }

    fn width(&self) -> usize {
        [
            self.epithet,
            self.seed,
            self.pollen,
            self.originator,
            self.date,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// One record with the physical line it starts on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Parse a whole register.
pub fn read_register<R: Read>(mut rd: R) -> Result<Registry, RegistryError> {
    let mut raw = Vec::new();
    rd.read_to_end(&mut raw)?;
    let data = raw.strip_prefix(UTF8_BOM).unwrap_or(raw.as_slice());

    let mut records = split_records(data).into_iter();
    let header = records.next().ok_or(RegistryError::EmptyInput)?;
    let cols = Columns::from_header(&header.fields)?;
    let width = cols.width();

    let mut registry = Registry::new();
    for record in records {
        let row = record.fields;
        if row.len() < width {
            return Err(RegistryError::ShortRow {
                line: record.line,
                expected: width,
                found: row.len(),
            });
        }
        let grex = Grex {
            name: row[cols.epithet].clone(),
            seed: row[cols.seed].clone(),
            pollen: row[cols.pollen].clone(),
            originator: row[cols.originator].clone(),
            date: registration_year(&row[cols.date]).to_string(),
        };
        if let Some(old) = registry.insert(grex) {
            warn!(
                "line {}: duplicate grex {:?} replaces earlier row",
                record.line, old.name
            );
        }
    }
    debug!("{} grexes read", registry.len());
    Ok(registry)
}

/// Last `/`-separated segment of a registration date (`dd/mm/yyyy` → `yyyy`).
pub fn registration_year(date: &str) -> &str {
    date.rsplit('/').next().unwrap_or(date).trim()
}

/// Split raw register bytes into records, skipping blank lines.
///
/// Fields may be `"`-quoted with `""` as an escaped quote; quoted fields may
/// span lines. `\r\n` is read as `\n`.
pub fn split_records(data: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field: Vec<u8> = Vec::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;

    let mut bytes = data.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'\r' if bytes.peek() == Some(&b'\n') => {}
            b'"' if in_quotes => {
                if bytes.peek() == Some(&b'"') {
                    field.push(b'"');
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            b'"' if field.is_empty() => in_quotes = true,
            b'\n' if in_quotes => {
                field.push(b'\n');
                line += 1;
            }
            b'\n' => {
                fields.push(decode_field(&std::mem::take(&mut field)));
                let record = Record {
                    line: start,
                    fields: std::mem::take(&mut fields),
                };
                if !record.is_blank() {
                    records.push(record);
                }
                line += 1;
                start = line;
            }
            DELIMITER if !in_quotes => fields.push(decode_field(&std::mem::take(&mut field))),
            b => field.push(b),
        }
    }
    if !fields.is_empty() || !field.is_empty() {
        fields.push(decode_field(&field));
        let record = Record { line: start, fields };
        if !record.is_blank() {
            records.push(record);
        }
    }
    records
}

/// UTF-8 when valid, otherwise Latin-1 (older RHS exports).
pub fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_registry_reader.rs"]
mod tests;
