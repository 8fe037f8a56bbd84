//! Driver-independent result rows.

use sea_query::Value;

/// One row of a result set: column names and their decoded values, in
/// result-set order.
///
/// ```rust
/// use rowguard::DataRow;
/// use sea_query::Value;
///
/// let row = DataRow::from_pairs([("Id", Value::Int(Some(7))), ("Name", "Acme".into())]);
/// assert_eq!(row.get_by_name("name"), Some(&Value::String(Some("Acme".into()))));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataRow {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.push(name, value);
        }
        row
    }

    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Look a column up by name: exact match first, then ASCII
    /// case-insensitive (unquoted identifiers come back lower-cased).
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|idx| &self.values[idx])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }

    /// The row's values, dropping the column names.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
