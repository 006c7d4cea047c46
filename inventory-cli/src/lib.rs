pub mod api_client;
pub mod config;
pub mod data;
pub mod inventory;
pub mod logging;
pub mod table_display;
pub mod ui;
