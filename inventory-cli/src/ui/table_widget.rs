use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::data::datatable::DataRow;
use crate::data::table_view::TableView;

/// Handles all rendering of the table view
pub struct TableRenderer;

impl TableRenderer {
    /// Render the table body: a two-line header (label + active filter),
    /// the current page of rows, or the empty placeholder.
    pub fn render_table(
        f: &mut Frame,
        area: Rect,
        view: &TableView,
        selected_column: usize,
        show_row_numbers: bool,
    ) {
        let page_rows = view.page_rows();
        let title = format!(
            "Inventory ({} of {} rows)",
            view.row_count(),
            view.total_row_count()
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if page_rows.is_empty() {
            let empty_msg = Paragraph::new("No data found.")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(empty_msg, area);
            return;
        }

        let sorted = view.sorted_column();
        let ascending = view.sort().map(|s| s.ascending).unwrap_or(true);

        let mut header_cells: Vec<Cell> = Vec::new();
        if show_row_numbers {
            header_cells.push(Cell::from(Text::from(vec![
                Line::from("#"),
                Line::from(""),
            ])));
        }
        for (idx, spec) in view.columns().iter().enumerate() {
            let mut label = spec.header.clone();
            if sorted == Some(idx) {
                label.push_str(if ascending { " ↑" } else { " ↓" });
            }
            let mut label_style = Style::default().add_modifier(Modifier::BOLD);
            if idx == selected_column {
                label_style = label_style.fg(Color::Yellow);
            }

            let filter = view.column_filter(&spec.key);
            let filter_line = if filter.is_empty() {
                Line::from("")
            } else {
                Line::from(Span::styled(
                    format!("/{}", filter),
                    Style::default().fg(Color::Yellow),
                ))
            };

            header_cells.push(Cell::from(Text::from(vec![
                Line::styled(label, label_style),
                filter_line,
            ])));
        }
        let header = Row::new(header_cells)
            .height(2)
            .style(Style::default().fg(Color::White).bg(Color::DarkGray));

        let first_row_number = view.page() * view.page_size() + 1;
        let rows: Vec<Row> = page_rows
            .iter()
            .enumerate()
            .map(|(i, data_row)| {
                let mut cells: Vec<Cell> = Vec::new();
                if show_row_numbers {
                    cells.push(Cell::from((first_row_number + i).to_string()));
                }
                for col in 0..view.columns().len() {
                    cells.push(Cell::from(view.render_cell(col, data_row)));
                }
                Row::new(cells)
            })
            .collect();

        let widths = Self::column_widths(view, show_row_numbers, &page_rows);
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1);
        f.render_widget(table, area);
    }

    /// Width per column: widest visible cell, capped so one long value
    /// cannot starve the rest
    fn column_widths(
        view: &TableView,
        show_row_numbers: bool,
        page_rows: &[DataRow],
    ) -> Vec<Constraint> {
        let mut widths = Vec::new();
        if show_row_numbers {
            widths.push(Constraint::Length(5));
        }
        for (col, spec) in view.columns().iter().enumerate() {
            let mut max = spec.header.chars().count() + 2; // room for the sort arrow
            for row in page_rows {
                max = max.max(view.render_cell(col, row).chars().count());
            }
            widths.push(Constraint::Length(max.min(30) as u16));
        }
        widths
    }

    /// Render the search/filter input line at the top
    pub fn render_filter_line(f: &mut Frame, area: Rect, title: &str, content: &str, editing: bool) {
        let style = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let input = Paragraph::new(content)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
    }

    /// Render the pagination status line at the bottom of the screen.
    /// Navigation affordances dim at their boundary instead of wrapping.
    pub fn render_status_line(f: &mut Frame, area: Rect, view: &TableView, hint: &str) {
        let base = Style::default().fg(Color::White).bg(Color::DarkGray);
        let back = if view.can_page_back() {
            base
        } else {
            base.add_modifier(Modifier::DIM)
        };
        let forward = if view.can_page_forward() {
            base
        } else {
            base.add_modifier(Modifier::DIM)
        };

        let line = Line::from(vec![
            Span::styled(" |< ", back),
            Span::styled("< ", back),
            Span::styled(
                format!("Page {} of {}", view.page() + 1, view.page_count()),
                base,
            ),
            Span::styled(" >", forward),
            Span::styled(" >| ", forward),
            Span::styled(
                format!(
                    "| {} rows{} | size {} | {}",
                    view.row_count(),
                    if view.has_active_filters() {
                        " (filtered)"
                    } else {
                        ""
                    },
                    view.page_size(),
                    hint
                ),
                base,
            ),
        ]);

        let status = Paragraph::new(line).style(base);
        f.render_widget(status, area);
    }

    /// Render the help screen
    pub fn render_help(f: &mut Frame, area: Rect) {
        let help_text = vec![
            "=== Inventory Viewer Help ===",
            "",
            "COLUMNS:",
            "  ←/→ or h/l      - Select column",
            "  s or Enter      - Sort by selected column (asc → desc → off)",
            "",
            "FILTERS:",
            "  /               - Edit global search",
            "  f               - Edit selected column's filter",
            "  c               - Clear all filters",
            "  Enter/Esc       - Leave filter editing (filter stays applied)",
            "",
            "PAGES:",
            "  PgUp/PgDn or p/n - Previous/next page",
            "  Home/End or g/G  - First/last page",
            "  [ / ]            - Smaller/larger page size",
            "",
            "Press any key to close help",
        ];

        let lines: Vec<Line> = help_text.iter().map(|&line| Line::from(line)).collect();
        let help_widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().fg(Color::White));

        f.render_widget(help_widget, area);
    }
}
