use crate::data::datatable::{DataRow, DataValue};

/// Custom per-column filter predicate: (cell value, filter text) -> keep row
pub type FilterPredicate = Box<dyn Fn(&DataValue, &str) -> bool + Send + Sync>;

/// Custom cell renderer: (cell value, projected row) -> display text
pub type CellRenderer = Box<dyn Fn(&DataValue, &DataRow) -> String + Send + Sync>;

/// Describes one displayed column of a table view.
///
/// `key` must match a column name in the backing DataTable; a key with no
/// match renders (and filters) as null. Descriptors are supplied once per
/// view and never change afterwards.
pub struct ColumnSpec {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    filter_fn: Option<FilterPredicate>,
    render_fn: Option<CellRenderer>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: true,
            filter_fn: None,
            render_fn: None,
        }
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_filter_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&DataValue, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_fn = Some(Box::new(f));
        self
    }

    pub fn with_renderer<F>(mut self, f: F) -> Self
    where
        F: Fn(&DataValue, &DataRow) -> String + Send + Sync + 'static,
    {
        self.render_fn = Some(Box::new(f));
        self
    }

    /// Apply this column's filter predicate (custom if supplied, else the
    /// default case-insensitive substring match).
    pub fn matches(&self, value: &DataValue, filter: &str) -> bool {
        match &self.filter_fn {
            Some(f) => f(value, filter),
            None => default_filter(value, filter),
        }
    }

    /// Render a cell (custom renderer if supplied, else the value's
    /// default string form).
    pub fn render(&self, value: &DataValue, row: &DataRow) -> String {
        match &self.render_fn {
            Some(f) => f(value, row),
            None => value.to_string(),
        }
    }
}

/// Default column filter: case-insensitive substring match against the
/// value's string representation.
pub fn default_filter(value: &DataValue, filter: &str) -> bool {
    value
        .to_string()
        .to_lowercase()
        .contains(&filter.to_lowercase())
}
