//! Data layer: immutable tables and the derived table view.
//!
//! A `DataTable` holds the flattened inventory; `TableView` derives the
//! filtered, sorted, paginated presentation without touching the source.

pub mod column;
pub mod datatable;
pub mod datavalue_compare;
pub mod table_view;
