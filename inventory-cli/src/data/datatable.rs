use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Represents the data type of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Null,
    Mixed, // For columns with mixed types
}

impl DataType {
    /// Merge two types (for columns with mixed types)
    pub fn merge(&self, other: &DataType) -> DataType {
        if self == other {
            return self.clone();
        }

        match (self, other) {
            (DataType::Null, t) | (t, DataType::Null) => t.clone(),
            (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                DataType::Float
            }
            _ => DataType::Mixed,
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub null_count: usize,
}

impl DataColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::String,
            nullable: true,
            null_count: 0,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

/// A single cell value in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(String), // Stored as ISO 8601 string
    Null,
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::String(_) => DataType::String,
            DataValue::Integer(_) => DataType::Integer,
            DataValue::Float(_) => DataType::Float,
            DataValue::Boolean(_) => DataType::Boolean,
            DataValue::DateTime(_) => DataType::DateTime,
            DataValue::Null => DataType::Null,
        }
    }

    /// Wrap an optional value, mapping `None` to `Null`
    pub fn from_opt<T, F>(opt: Option<T>, wrap: F) -> Self
    where
        F: FnOnce(T) -> DataValue,
    {
        opt.map(wrap).unwrap_or(DataValue::Null)
    }
}

impl From<&JsonValue> for DataValue {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => DataValue::Null,
            JsonValue::Bool(b) => DataValue::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    DataValue::Float(f)
                } else {
                    DataValue::String(n.to_string())
                }
            }
            JsonValue::String(s) => {
                // Simple heuristic for ISO 8601 date/time strings
                if s.contains('-') && s.len() >= 8 && s.len() <= 30 {
                    DataValue::DateTime(s.clone())
                } else {
                    DataValue::String(s.clone())
                }
            }
            JsonValue::Array(_) | JsonValue::Object(_) => {
                // Store complex values as their JSON text
                DataValue::String(json.to_string())
            }
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::DateTime(dt) => write!(f, "{}", dt),
            DataValue::Null => write!(f, ""),
        }
    }
}

/// A row of data in the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRow {
    pub values: Vec<DataValue>,
}

impl DataRow {
    pub fn new(values: Vec<DataValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&DataValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The main DataTable structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: DataColumn) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn add_row(&mut self, row: DataRow) -> Result<(), String> {
        if row.len() != self.columns.len() {
            return Err(format!(
                "Row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Infer and update column types based on data
    pub fn infer_column_types(&mut self) {
        for (col_idx, column) in self.columns.iter_mut().enumerate() {
            let mut inferred_type = DataType::Null;
            let mut null_count = 0;

            for row in &self.rows {
                if let Some(value) = row.get(col_idx) {
                    if value.is_null() {
                        null_count += 1;
                    } else {
                        inferred_type = inferred_type.merge(&value.data_type());
                    }
                }
            }

            column.data_type = inferred_type;
            column.null_count = null_count;
            column.nullable = null_count > 0;
        }
    }

    /// Get a value at specific row and column
    pub fn get_value(&self, row: usize, col: usize) -> Option<&DataValue> {
        self.rows.get(row)?.get(col)
    }

    /// Get a value by row index and column name
    pub fn get_value_by_name(&self, row: usize, col_name: &str) -> Option<&DataValue> {
        let col_idx = self.get_column_index(col_name)?;
        self.get_value(row, col_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatable_creation() {
        let mut table = DataTable::new("test");

        table.add_column(DataColumn::new("id").with_type(DataType::Integer));
        table.add_column(DataColumn::new("name").with_type(DataType::String));
        table.add_column(DataColumn::new("active").with_type(DataType::Boolean));

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);

        let row = DataRow::new(vec![
            DataValue::Integer(1),
            DataValue::String("Alice".to_string()),
            DataValue::Boolean(true),
        ]);

        table.add_row(row).unwrap();
        assert_eq!(table.row_count(), 1);

        let value = table.get_value_by_name(0, "name").unwrap();
        assert_eq!(value.to_string(), "Alice");
    }

    #[test]
    fn test_row_arity_check() {
        let mut table = DataTable::new("test");
        table.add_column(DataColumn::new("only"));

        let result = table.add_row(DataRow::new(vec![
            DataValue::Integer(1),
            DataValue::Integer(2),
        ]));
        assert!(result.is_err());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_type_inference() {
        let mut table = DataTable::new("test");

        // Add a column without a type
        table.add_column(DataColumn::new("mixed"));

        // Add rows with different types
        table
            .add_row(DataRow::new(vec![DataValue::Integer(1)]))
            .unwrap();
        table
            .add_row(DataRow::new(vec![DataValue::Float(2.5)]))
            .unwrap();
        table.add_row(DataRow::new(vec![DataValue::Null])).unwrap();

        table.infer_column_types();

        // Should infer Float since we have both Integer and Float
        assert_eq!(table.columns[0].data_type, DataType::Float);
        assert_eq!(table.columns[0].null_count, 1);
        assert!(table.columns[0].nullable);
    }

    #[test]
    fn test_datavalue_from_json() {
        use serde_json::json;

        assert_eq!(DataValue::from(&json!(null)), DataValue::Null);
        assert_eq!(DataValue::from(&json!(true)), DataValue::Boolean(true));
        assert_eq!(DataValue::from(&json!(42)), DataValue::Integer(42));
        assert_eq!(DataValue::from(&json!(2.5)), DataValue::Float(2.5));
        assert_eq!(
            DataValue::from(&json!("hello")),
            DataValue::String("hello".to_string())
        );
        assert_eq!(
            DataValue::from(&json!("2024-01-01T10:30:00Z")),
            DataValue::DateTime("2024-01-01T10:30:00Z".to_string())
        );
        assert_eq!(
            DataValue::from(&json!([1, 2])),
            DataValue::String("[1,2]".to_string())
        );
    }

    #[test]
    fn test_null_displays_empty() {
        assert_eq!(DataValue::Null.to_string(), "");
        assert_eq!(
            DataValue::from_opt(None::<i64>, DataValue::Integer),
            DataValue::Null
        );
        assert_eq!(
            DataValue::from_opt(Some(7), DataValue::Integer),
            DataValue::Integer(7)
        );
    }
}
