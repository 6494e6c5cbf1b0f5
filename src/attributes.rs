//! Attribute tables attached to decoded layers

use ahash::RandomState;
use indexmap::IndexMap;
use std::fmt;

/// Storage type of an attribute column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Column name, unique within a table
    pub name: String,
    pub field_type: FieldType,
    /// Display width in characters
    pub width: Option<u16>,
    /// Display decimals for numeric columns
    pub precision: Option<u8>,
}

impl FieldDef {
    /// String column
    pub fn string(name: impl Into<String>, width: u16) -> Self {
        FieldDef {
            name: name.into(),
            field_type: FieldType::String,
            width: Some(width),
            precision: None,
        }
    }

    /// Numeric column
    pub fn number(name: impl Into<String>, width: u16, precision: u8) -> Self {
        FieldDef {
            name: name.into(),
            field_type: FieldType::Number,
            width: Some(width),
            precision: Some(precision),
        }
    }
}

/// A single attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    /// Numeric text that could not be parsed
    Null,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(n: Option<f64>) -> Self {
        n.map_or(FieldValue::Null, FieldValue::Number)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Null => Ok(()),
        }
    }
}

/// The attribute row describing one shape
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeRecord {
    values: Vec<FieldValue>,
}

impl AttributeRecord {
    pub fn new(values: Vec<FieldValue>) -> Self {
        AttributeRecord { values }
    }

    /// Value at a column position
    pub fn get(&self, column: usize) -> Option<&FieldValue> {
        self.values.get(column)
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered columns plus one record per shape.
///
/// Record `i` describes shape `i` of the owning layer.
#[derive(Debug, Clone)]
pub struct AttributeTable {
    fields: IndexMap<String, FieldDef, RandomState>,
    records: Vec<AttributeRecord>,
}

impl AttributeTable {
    /// Create a table with no columns
    pub fn new() -> Self {
        AttributeTable {
            fields: IndexMap::with_hasher(RandomState::new()),
            records: Vec::new(),
        }
    }

    /// Create a table with the given columns, in order.
    ///
    /// A repeated name keeps the first definition.
    pub fn with_fields(fields: impl IntoIterator<Item = FieldDef>) -> Self {
        let mut table = Self::new();
        for field in fields {
            table.fields.entry(field.name.clone()).or_insert(field);
        }
        table
    }

    /// Append a record; its values must follow the column order
    pub(crate) fn push_record(&mut self, record: AttributeRecord) {
        debug_assert_eq!(record.len(), self.fields.len());
        self.records.push(record);
    }

    /// Column definitions in order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    /// Column names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Position of a column
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn record(&self, row: usize) -> Option<&AttributeRecord> {
        self.records.get(row)
    }

    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    /// Value of a named column in a row
    pub fn value(&self, row: usize, name: &str) -> Option<&FieldValue> {
        let column = self.field_index(name)?;
        self.records.get(row)?.get(column)
    }

    /// All values of one column, in row order
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a FieldValue> + 'a> {
        let column = self.field_index(name)?;
        Some(self.records.iter().filter_map(move |r| r.get(column)))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AttributeTable {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.values().eq(other.fields.values())
            && self.records == other.records
    }
}
