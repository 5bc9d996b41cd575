use std::collections::HashMap;

/// A parsed CSV source, kept as strings until the join decides how to coerce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Label of the source this table came from (path or URL).
    pub name: String,
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    /// Each data row; may be shorter than `headers` when trailing fields are missing.
    pub rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            // first occurrence wins for duplicated header names
            index.entry(h.clone()).or_insert(i);
        }
        Self {
            name: name.into(),
            headers,
            rows,
            index,
        }
    }

    /// Build a table from string literals; handy for fixtures.
    pub fn from_rows(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|f| f.to_string()).collect())
                .collect(),
        )
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Field `column` of row `row`, or `None` when the column does not exist
    /// or the row is too short to contain it.
    pub fn field(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
