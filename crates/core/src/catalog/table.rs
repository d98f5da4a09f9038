//! The immutable in-memory record table.

use std::collections::{BTreeMap, HashMap};

use super::Record;
use crate::source::DataSourceError;

/// How raw rows are turned into records.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Header of the unique integer identifier column.
    pub id_column: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            id_column: "index".to_string(),
        }
    }
}

/// Snapshot of every record loaded from the source.
///
/// Built wholesale and never mutated; a refresh produces a new table with a
/// higher generation.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    records: Vec<Record>,
    positions: HashMap<u64, usize>,
    columns: Vec<String>,
    generation: u64,
}

impl RecordTable {
    /// An empty table, used when the source could not be loaded.
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    /// Build a table from the header row followed by data rows.
    ///
    /// Fully blank rows are skipped. Rows shorter than the header are padded
    /// with empty cells; cells beyond the header are ignored.
    pub fn from_rows(
        rows: Vec<Vec<String>>,
        options: &TableOptions,
        generation: u64,
    ) -> Result<Self, DataSourceError> {
        let mut rows = rows.into_iter();
        let columns: Vec<String> = match rows.next() {
            Some(header) if header.iter().any(|h| !h.trim().is_empty()) => {
                header.into_iter().map(|h| h.trim().to_string()).collect()
            }
            _ => return Err(DataSourceError::Empty),
        };

        let id_column = options.id_column.trim();
        let id_pos = columns
            .iter()
            .position(|c| c == id_column)
            .ok_or_else(|| DataSourceError::MissingIdColumn(id_column.to_string()))?;

        let mut records = Vec::new();
        let mut positions = HashMap::new();

        // Sheet row numbers are 1-based and the header occupies row 1.
        for (row_number, row) in rows.enumerate().map(|(i, r)| (i + 2, r)) {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let raw_id = row.get(id_pos).map(|c| c.trim()).unwrap_or_default();
            let index: u64 = raw_id
                .parse()
                .map_err(|_| DataSourceError::InvalidIdentifier {
                    row: row_number,
                    value: raw_id.to_string(),
                })?;

            if positions.contains_key(&index) {
                return Err(DataSourceError::DuplicateIdentifier(index));
            }

            let fields: BTreeMap<String, String> = columns
                .iter()
                .zip(row)
                .filter(|(header, value)| !header.is_empty() && !value.trim().is_empty())
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect();

            positions.insert(index, records.len());
            records.push(Record::new(index, fields));
        }

        Ok(Self {
            records,
            positions,
            columns,
            generation,
        })
    }

    /// Look up a record by identifier.
    pub fn get(&self, index: u64) -> Option<&Record> {
        self.positions.get(&index).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, index: u64) -> bool {
        self.positions.contains_key(&index)
    }

    /// Records in source row order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Identifiers in source row order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.records.iter().map(|r| r.index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records shown in the catalog grid (those with a cover).
    pub fn catalog_len(&self) -> usize {
        self.records.iter().filter(|r| r.has_cover()).count()
    }

    /// Header row as read from the source.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
