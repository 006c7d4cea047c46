pub mod app;
pub mod table_widget;
