use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{Frame, Terminal};
use tracing::info;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::data::table_view::TableView;
use crate::ui::table_widget::TableRenderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    GlobalFilter,
    ColumnFilter,
    Help,
}

/// The interactive table application. All state lives here and is updated
/// synchronously on each key press; the view recomputes from scratch on
/// every change.
pub struct App {
    view: TableView,
    mode: AppMode,
    selected_column: usize,
    input: Input,
    show_row_numbers: bool,
    should_quit: bool,
}

impl App {
    pub fn new(view: TableView, show_row_numbers: bool) -> Self {
        Self {
            view,
            mode: AppMode::Normal,
            selected_column: 0,
            input: Input::default(),
            show_row_numbers,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        info!(target: "ui", "entering interactive mode");
        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::GlobalFilter | AppMode::ColumnFilter => self.handle_filter_key(key),
            AppMode::Help => self.mode = AppMode::Normal,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < self.view.columns().len() {
                    self.selected_column += 1;
                }
            }

            KeyCode::Char('s') | KeyCode::Enter => {
                if let Some(key) = self.selected_key() {
                    self.view.toggle_sort(&key);
                }
            }

            KeyCode::Char('/') => {
                self.input = Input::new(self.view.global_filter().to_string());
                self.mode = AppMode::GlobalFilter;
            }
            KeyCode::Char('f') => {
                if let Some(key) = self.selected_key() {
                    self.input = Input::new(self.view.column_filter(&key).to_string());
                    self.mode = AppMode::ColumnFilter;
                }
            }
            KeyCode::Char('c') => self.view.clear_filters(),

            KeyCode::PageDown | KeyCode::Char('n') => self.view.next_page(),
            KeyCode::PageUp | KeyCode::Char('p') => self.view.prev_page(),
            KeyCode::Home | KeyCode::Char('g') => self.view.first_page(),
            KeyCode::End | KeyCode::Char('G') => self.view.last_page(),
            KeyCode::Char('[') => self.cycle_page_size(false),
            KeyCode::Char(']') => self.cycle_page_size(true),

            KeyCode::Char('?') | KeyCode::F(1) => self.mode = AppMode::Help,
            _ => {}
        }
    }

    /// Filter editing: every keystroke applies immediately, Enter/Esc just
    /// leave the mode with the filter still active.
    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.mode = AppMode::Normal,
            _ => {
                if self.input.handle_event(&Event::Key(key)).is_some() {
                    self.apply_live_filter();
                }
            }
        }
    }

    fn apply_live_filter(&mut self) {
        let text = self.input.value().to_string();
        match self.mode {
            AppMode::GlobalFilter => self.view.set_global_filter(text),
            AppMode::ColumnFilter => {
                if let Some(key) = self.selected_key() {
                    self.view.set_column_filter(key, text);
                }
            }
            _ => {}
        }
    }

    fn selected_key(&self) -> Option<String> {
        self.view
            .columns()
            .get(self.selected_column)
            .map(|spec| spec.key.clone())
    }

    /// Step the page size through the configured options
    fn cycle_page_size(&mut self, larger: bool) {
        let options = self.view.page_size_options().to_vec();
        let Some(pos) = options.iter().position(|&s| s == self.view.page_size()) else {
            return;
        };
        let next = if larger {
            if pos + 1 >= options.len() {
                return;
            }
            pos + 1
        } else {
            if pos == 0 {
                return;
            }
            pos - 1
        };
        self.view.set_page_size(options[next]);
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(f.area());

        let editing = matches!(self.mode, AppMode::GlobalFilter | AppMode::ColumnFilter);
        let (title, content) = match self.mode {
            AppMode::GlobalFilter => ("Search".to_string(), self.input.value().to_string()),
            AppMode::ColumnFilter => {
                let header = self
                    .view
                    .columns()
                    .get(self.selected_column)
                    .map_or("?", |spec| spec.header.as_str());
                (format!("Filter: {}", header), self.input.value().to_string())
            }
            _ => ("Search".to_string(), self.view.global_filter().to_string()),
        };
        TableRenderer::render_filter_line(f, chunks[0], &title, &content, editing);
        if editing {
            let x = chunks[0].x + 1 + self.input.visual_cursor() as u16;
            f.set_cursor_position((x, chunks[0].y + 1));
        }

        if self.mode == AppMode::Help {
            TableRenderer::render_help(f, chunks[1]);
        } else {
            TableRenderer::render_table(
                f,
                chunks[1],
                &self.view,
                self.selected_column,
                self.show_row_numbers,
            );
        }

        let hint = "s sort | / search | f filter | c clear | [ ] size | ? help | q quit";
        TableRenderer::render_status_line(f, chunks[2], &self.view, hint);
    }
}
