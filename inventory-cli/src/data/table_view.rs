use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::data::column::ColumnSpec;
use crate::data::datatable::{DataRow, DataTable, DataValue};
use crate::data::datavalue_compare::compare_optional_datavalues;

/// Allowed page sizes when the caller does not configure a set
pub const DEFAULT_PAGE_SIZE_OPTIONS: &[usize] = &[10, 25, 50];

static NULL_VALUE: DataValue = DataValue::Null;

/// Active sort: column key plus direction
#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    pub key: String,
    pub ascending: bool,
}

/// A filterable, sortable, paginated view over an immutable DataTable.
///
/// The view never mutates the backing table; it keeps a list of visible row
/// indices that is recomputed from scratch on every interaction-state change,
/// so the displayed page is always a pure function of (table, descriptors,
/// filter state, sort state, pagination state). After any change the page
/// index is re-clamped to the last valid page.
pub struct TableView {
    /// The underlying immutable data source
    source: Arc<DataTable>,

    /// Displayed columns, in display order
    columns: Vec<ColumnSpec>,

    /// Source column index per descriptor (None if the key has no match)
    column_indices: Vec<Option<usize>>,

    /// Free-text filter over the whole row
    global_filter: String,

    /// Per-column free-text filters, keyed by column key
    column_filters: HashMap<String, String>,

    sort: Option<SortState>,

    page_size_options: Vec<usize>,
    page_size: usize,
    page: usize,

    /// Row indices visible after filtering and sorting
    visible_rows: Vec<usize>,
}

impl TableView {
    /// Create a view showing all rows of the table through the given columns
    pub fn new(source: Arc<DataTable>, columns: Vec<ColumnSpec>) -> Self {
        let column_indices = columns
            .iter()
            .map(|spec| source.get_column_index(&spec.key))
            .collect();
        let visible_rows = (0..source.row_count()).collect();

        Self {
            source,
            columns,
            column_indices,
            global_filter: String::new(),
            column_filters: HashMap::new(),
            sort: None,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            page_size: DEFAULT_PAGE_SIZE_OPTIONS[0],
            page: 0,
            visible_rows,
        }
    }

    /// Replace the allowed page sizes. The current page size snaps to the
    /// first option if it is no longer allowed.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        if options.is_empty() || options.contains(&0) {
            return self;
        }
        self.page_size_options = options;
        if !self.page_size_options.contains(&self.page_size) {
            self.page_size = self.page_size_options[0];
        }
        self
    }

    /// Set the initial page size (must be one of the allowed options)
    pub fn with_initial_page_size(mut self, size: usize) -> Self {
        if self.page_size_options.contains(&size) {
            self.page_size = size;
        }
        self
    }

    // --- filter state ---

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn set_global_filter(&mut self, filter: impl Into<String>) {
        self.global_filter = filter.into();
        self.recompute();
    }

    pub fn column_filter(&self, key: &str) -> &str {
        self.column_filters.get(key).map_or("", |s| s.as_str())
    }

    /// Set or clear one column's filter. Keys matching no descriptor are
    /// ignored, like disallowed page sizes.
    pub fn set_column_filter(&mut self, key: impl Into<String>, filter: impl Into<String>) {
        let key = key.into();
        let filter = filter.into();
        if !self.columns.iter().any(|spec| spec.key == key) {
            return;
        }
        if filter.is_empty() {
            self.column_filters.remove(&key);
        } else {
            self.column_filters.insert(key, filter);
        }
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.global_filter.clear();
        self.column_filters.clear();
        self.recompute();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.global_filter.is_empty() || !self.column_filters.is_empty()
    }

    // --- sort state ---

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Cycle the sort on a column: ascending, then descending, then back to
    /// the unsorted original order. Activating a different column always
    /// starts ascending. Columns marked not sortable are ignored.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|spec| spec.key == key && spec.sortable);
        if !sortable {
            return;
        }

        self.sort = match self.sort.take() {
            Some(prev) if prev.key == key && prev.ascending => Some(SortState {
                key: key.to_string(),
                ascending: false,
            }),
            Some(prev) if prev.key == key => None,
            _ => Some(SortState {
                key: key.to_string(),
                ascending: true,
            }),
        };
        debug!(target: "view", "sort state now {:?}", self.sort);
        self.recompute();
    }

    // --- pagination state ---

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Number of pages, never less than 1 so an empty result still reads
    /// "Page 1 of 1"
    pub fn page_count(&self) -> usize {
        self.visible_rows.len().div_ceil(self.page_size).max(1)
    }

    /// Change the page size and jump back to the first page. Sizes outside
    /// the allowed set are ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if !self.page_size_options.contains(&size) {
            return;
        }
        self.page_size = size;
        self.page = 0;
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn last_page(&mut self) {
        self.page = self.page_count() - 1;
    }

    /// Whether previous/first navigation would move (drives disabled controls)
    pub fn can_page_back(&self) -> bool {
        self.page > 0
    }

    /// Whether next/last navigation would move (drives disabled controls)
    pub fn can_page_forward(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    // --- derived view ---

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    pub fn source(&self) -> &DataTable {
        &self.source
    }

    /// Count of rows after filtering
    pub fn row_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn total_row_count(&self) -> usize {
        self.source.row_count()
    }

    /// Filtered/sorted row indices, before pagination
    pub fn visible_row_indices(&self) -> &[usize] {
        &self.visible_rows
    }

    /// The rows of the current page, projected to the descriptor columns
    pub fn page_rows(&self) -> Vec<DataRow> {
        let start = self.page * self.page_size;
        self.visible_rows
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&row_idx| self.project_row(row_idx))
            .collect()
    }

    /// Render one cell of a projected row through the column's renderer
    pub fn render_cell(&self, col: usize, row: &DataRow) -> String {
        let value = row.get(col).unwrap_or(&NULL_VALUE);
        self.columns[col].render(value, row)
    }

    /// Index (into the descriptor list) of the sorted column, if any
    pub fn sorted_column(&self) -> Option<usize> {
        let sort = self.sort.as_ref()?;
        self.columns.iter().position(|c| c.key == sort.key)
    }

    fn project_row(&self, row_idx: usize) -> DataRow {
        let values = self
            .column_indices
            .iter()
            .map(|col_idx| {
                col_idx
                    .and_then(|c| self.source.get_value(row_idx, c))
                    .cloned()
                    .unwrap_or(DataValue::Null)
            })
            .collect();
        DataRow::new(values)
    }

    /// Rebuild the visible row list: filter, then stable sort, then re-clamp
    /// the page index.
    fn recompute(&mut self) {
        let mut rows: Vec<usize> = (0..self.source.row_count()).collect();

        if !self.global_filter.is_empty() {
            let needle = self.global_filter.to_lowercase();
            rows.retain(|&row_idx| self.row_contains(row_idx, &needle));
        }

        for (pos, spec) in self.columns.iter().enumerate() {
            let Some(filter) = self.column_filters.get(&spec.key) else {
                continue;
            };
            if filter.is_empty() {
                continue;
            }
            let col_idx = self.column_indices[pos];
            rows.retain(|&row_idx| {
                let value = col_idx
                    .and_then(|c| self.source.get_value(row_idx, c))
                    .unwrap_or(&NULL_VALUE);
                spec.matches(value, filter)
            });
        }

        if let Some(sort) = &self.sort {
            if let Some(col) = self.source.get_column_index(&sort.key) {
                let source = &self.source;
                // slice::sort_by is stable, so equal keys keep input order
                rows.sort_by(|&a, &b| {
                    let ord = compare_optional_datavalues(
                        source.get_value(a, col),
                        source.get_value(b, col),
                    );
                    if sort.ascending {
                        ord
                    } else {
                        ord.reverse()
                    }
                });
            }
        }

        self.visible_rows = rows;
        let last = self.page_count() - 1;
        if self.page > last {
            self.page = last;
        }
    }

    /// Global filter match: any cell of the source row contains the needle,
    /// case-insensitively. Scans the whole row, including columns not
    /// displayed by a descriptor.
    fn row_contains(&self, row_idx: usize, needle: &str) -> bool {
        let Some(row) = self.source.rows.get(row_idx) else {
            return false;
        };
        row.values
            .iter()
            .any(|value| value.to_string().to_lowercase().contains(needle))
    }
}
