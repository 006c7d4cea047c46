use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::data::table_view::TableView;

/// Print the view's current page to stdout (non-interactive mode)
pub fn display_page(view: &TableView) {
    let page_rows = view.page_rows();
    if page_rows.is_empty() {
        println!("{}", "No data found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = view
        .headers()
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(headers);

    for row in &page_rows {
        let cells: Vec<String> = (0..view.columns().len())
            .map(|col| view.render_cell(col, row))
            .collect();
        table.add_row(cells);
    }

    println!("{table}");
    println!(
        "\n{}",
        format!(
            "Page {} of {} | {} rows",
            view.page() + 1,
            view.page_count(),
            view.row_count()
        )
        .green()
    );
}
