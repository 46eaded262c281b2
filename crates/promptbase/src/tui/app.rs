//! Main TUI application: the form panel, the list panel, and the
//! interaction cycle between them.
//!
//! Every mutation (insert, update, toggle, delete) and every search or sort
//! change goes through an explicit `refresh` that re-queries the store and
//! re-renders from the fresh snapshot.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, ListState},
    Frame, Terminal,
};

use promptbase_db::{Database, Prompt, SortOrder, StoreError};

use super::form::{FormField, FormState};
use super::layout::{FormLayout, LayoutMode, ListLayout, MainLayout};
use super::widgets::{prompt_list, Checkbox, TextArea, TextInput};

/// The current focus area in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Search,
    List,
}

/// Notice shown when a mutation targets a row removed since the last
/// refresh.
const STALE_ROW_NOTICE: &str = "Prompt no longer exists";

/// Classify a mutation by rows affected: zero rows means the target row
/// vanished, which is surfaced as a failure notice, not a success.
fn mutation_notice(
    affected: usize,
    success: &'static str,
) -> Result<&'static str, &'static str> {
    if affected == 0 {
        Err(STALE_ROW_NOTICE)
    } else {
        Ok(success)
    }
}

/// The main TUI application
pub struct App {
    /// The backing store, owned for the process lifetime
    db: Database,
    /// Create-or-edit form state
    form: FormState,
    /// Free-text search buffer
    search: String,
    search_cursor: usize,
    /// Two-valued sort selector
    sort: SortOrder,
    /// Current snapshot of matching prompts
    prompts: Vec<Prompt>,
    /// List selection / scroll state
    list_state: ListState,
    /// Current focus area
    focus: Focus,
    /// Success notice shown in the status line
    status_message: Option<String>,
    /// Failure notice shown in the status line
    error_message: Option<String>,
    /// Whether the app is still running
    running: bool,
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new TUI application over an opened database.
    pub fn new(db: Database) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Restore the terminal ourselves if setup fails here: App does not
        // exist yet, so its Drop cannot do it.
        let terminal = match Self::setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(err);
            }
        };

        Ok(Self {
            db,
            form: FormState::new(),
            search: String::new(),
            search_cursor: 0,
            sort: SortOrder::NewestFirst,
            prompts: Vec::new(),
            list_state: ListState::default(),
            focus: Focus::Form,
            status_message: None,
            error_message: None,
            running: true,
            terminal,
        })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        self.refresh();

        while self.running {
            self.draw()?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.cleanup_terminal()
    }

    /// Cleanup the terminal
    fn cleanup_terminal(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal
            .show_cursor()
            .context("Failed to show cursor")?;
        Ok(())
    }

    /// Re-query the store with the current search and sort and replace the
    /// rendered snapshot.
    fn refresh(&mut self) {
        match self.db.prompts().search(&self.search, self.sort) {
            Ok(prompts) => {
                tracing::debug!(count = prompts.len(), query = %self.search, "refreshed prompt list");
                self.prompts = prompts;
                if self.prompts.is_empty() {
                    self.list_state.select(None);
                } else {
                    let selected = self
                        .list_state
                        .selected()
                        .unwrap_or(0)
                        .min(self.prompts.len() - 1);
                    self.list_state.select(Some(selected));
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "search failed");
                self.error_message = Some(format!("Database error: {err}"));
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.running = false;
                    return;
                }
                KeyCode::Char('s') if self.focus == Focus::Form => {
                    self.submit_form();
                    return;
                }
                _ => {}
            }
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::Search => self.handle_search_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Esc => {
                if self.form.is_editing() {
                    self.form.clear();
                    self.status_message = Some("Edit cancelled".to_string());
                }
                self.focus = Focus::List;
            }
            _ => self.form.handle_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.focus = Focus::List;
            }
            KeyCode::Char(ch) => {
                let byte_idx = self
                    .search
                    .char_indices()
                    .nth(self.search_cursor)
                    .map(|(i, _)| i)
                    .unwrap_or(self.search.len());
                self.search.insert(byte_idx, ch);
                self.search_cursor += 1;
                self.refresh();
            }
            KeyCode::Backspace => {
                if self.search_cursor > 0 {
                    if let Some((byte_idx, _)) =
                        self.search.char_indices().nth(self.search_cursor - 1)
                    {
                        self.search.remove(byte_idx);
                        self.search_cursor -= 1;
                        self.refresh();
                    }
                }
            }
            KeyCode::Left => self.search_cursor = self.search_cursor.saturating_sub(1),
            KeyCode::Right => {
                self.search_cursor = (self.search_cursor + 1).min(self.search.chars().count())
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('o') => {
                self.sort = self.sort.toggled();
                self.refresh();
            }
            KeyCode::Char('n') | KeyCode::Tab => {
                self.form.clear();
                self.focus = Focus::Form;
            }
            KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('f') => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            _ => {}
        }
    }

    fn selected_prompt(&self) -> Option<&Prompt> {
        self.list_state.selected().and_then(|i| self.prompts.get(i))
    }

    fn select_previous(&mut self) {
        if let Some(selected) = self.list_state.selected() {
            self.list_state.select(Some(selected.saturating_sub(1)));
        }
    }

    fn select_next(&mut self) {
        if let Some(selected) = self.list_state.selected() {
            if selected + 1 < self.prompts.len() {
                self.list_state.select(Some(selected + 1));
            }
        }
    }

    /// Seed the form panel with the selected row and hand focus to it.
    fn edit_selected(&mut self) {
        if let Some(prompt) = self.selected_prompt() {
            self.form = FormState::edit(prompt);
            self.focus = Focus::Form;
        }
    }

    /// Submit the form: insert in create mode, update in edit mode.
    fn submit_form(&mut self) {
        self.status_message = None;
        self.error_message = None;

        // Validation failures leave their message on the form itself
        let Some((editing_id, input)) = self.form.submit() else {
            return;
        };

        let outcome = match editing_id {
            None => self.db.prompts().insert(&input).map(|saved| {
                tracing::info!(id = saved.id, "prompt added");
                Ok("Prompt added successfully!")
            }),
            Some(id) => self.db.prompts().update(id, &input).map(|affected| {
                tracing::info!(id, affected, "prompt updated");
                mutation_notice(affected, "Prompt updated successfully!")
            }),
        };

        match outcome {
            Ok(Ok(notice)) => {
                self.status_message = Some(notice.to_string());
                let was_editing = editing_id.is_some();
                self.form.clear();
                if was_editing {
                    self.focus = Focus::List;
                }
            }
            // The row vanished since the last refresh; keep the form
            // contents so the edit is not lost.
            Ok(Err(notice)) => self.error_message = Some(notice.to_string()),
            Err(err) => self.report_store_error(err),
        }

        self.refresh();
    }

    /// Flip the favorite flag on the selected row, then refresh.
    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_prompt().map(|p| p.id) else {
            return;
        };

        let result = self.db.prompts().toggle_favorite(id);
        match result {
            Ok(0) => self.error_message = Some(STALE_ROW_NOTICE.to_string()),
            Ok(_) => tracing::info!(id, "favorite toggled"),
            Err(err) => self.report_store_error(err),
        }

        self.refresh();
    }

    /// Delete the selected row (no confirmation), then refresh.
    fn delete_selected(&mut self) {
        let Some(id) = self.selected_prompt().map(|p| p.id) else {
            return;
        };

        let result = self.db.prompts().delete(id);
        match result {
            Ok(true) => {
                tracing::info!(id, "prompt deleted");
                self.status_message = Some("Prompt deleted".to_string());
            }
            Ok(false) => self.error_message = Some(STALE_ROW_NOTICE.to_string()),
            Err(err) => self.report_store_error(err),
        }

        self.refresh();
    }

    fn report_store_error(&mut self, err: StoreError) {
        tracing::error!(error = %err, "store operation failed");
        self.error_message = Some(format!("Database error: {err}"));
    }

    /// Draw the UI
    fn draw(&mut self) -> Result<()> {
        // Extract render state to avoid borrow issues
        let render_state = RenderState {
            form: self.form.clone(),
            search: self.search.clone(),
            search_cursor: self.search_cursor,
            sort: self.sort,
            prompts: self.prompts.clone(),
            focus: self.focus,
            status_message: self.status_message.clone(),
            error_message: self.error_message.clone(),
        };

        let mut list_state = self.list_state.clone();
        self.terminal.draw(|frame| {
            render_state.render(frame, &mut list_state);
        })?;
        self.list_state = list_state;

        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Best-effort terminal restore if we exit through an error path
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// State needed for rendering (to avoid borrow issues)
struct RenderState {
    form: FormState,
    search: String,
    search_cursor: usize,
    sort: SortOrder,
    prompts: Vec<Prompt>,
    focus: Focus,
    status_message: Option<String>,
    error_message: Option<String>,
}

impl RenderState {
    fn render(&self, frame: &mut Frame, list_state: &mut ListState) {
        let layout = MainLayout::new(frame.area());

        self.render_header(frame, layout.header);

        match layout.mode {
            LayoutMode::DualPanel => {
                self.render_form_panel(frame, layout.form_panel);
                self.render_list_panel(frame, layout.list_panel, list_state);
            }
            LayoutMode::SinglePanel => {
                if self.focus == Focus::Form {
                    self.render_form_panel(frame, layout.form_panel);
                } else {
                    self.render_list_panel(frame, layout.list_panel, list_state);
                }
            }
        }

        self.render_status(frame, layout.status);
        self.render_footer(frame, layout.footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " promptbase ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("| "),
            Span::styled(
                "A simple app to store and retrieve prompts",
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(title).block(block), area);
    }

    fn render_form_panel(&self, frame: &mut Frame, area: Rect) {
        let title = match self.form.editing_id() {
            Some(id) => format!(" Edit Prompt #{id} "),
            None => " New Prompt ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(title);

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let form_layout = FormLayout::new(inner_area);
        let form_focused = self.focus == Focus::Form;

        frame.render_widget(
            TextInput::new(&self.form.title, self.form.title_cursor)
                .title(" Title ")
                .placeholder("Title")
                .focused(form_focused && self.form.focused == FormField::Title),
            form_layout.title,
        );

        frame.render_widget(
            TextArea::new(&self.form.body, self.form.body_cursor)
                .title(" Prompt ")
                .focused(form_focused && self.form.focused == FormField::Body),
            form_layout.body,
        );

        frame.render_widget(
            Checkbox::new("♥ Favorite", self.form.is_favorite)
                .focused(form_focused && self.form.focused == FormField::Favorite),
            form_layout.favorite,
        );

        if let Some(ref error) = self.form.error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    error.as_str(),
                    Style::default().fg(Color::Red),
                )),
                form_layout.message,
            );
        }
    }

    fn render_list_panel(&self, frame: &mut Frame, area: Rect, list_state: &mut ListState) {
        let list_layout = ListLayout::new(area);

        frame.render_widget(
            TextInput::new(&self.search, self.search_cursor)
                .title(" Search prompts ")
                .placeholder("Search prompts")
                .focused(self.focus == Focus::Search),
            list_layout.search,
        );

        let sort_line = Line::from(vec![
            Span::raw(" Sort by: "),
            Span::styled(
                self.sort.label(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (o to toggle)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(sort_line), list_layout.sort);

        let list = prompt_list(
            &self.prompts,
            list_state.selected(),
            self.focus == Focus::List,
        );
        frame.render_stateful_widget(list, list_layout.rows, list_state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref error) = self.error_message {
            Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ))
        } else if let Some(ref status) = self.status_message {
            Line::from(Span::styled(
                format!(" {status}"),
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.focus {
            Focus::Form => "Tab next field · Ctrl+S save · Esc back to list",
            Focus::Search => "type to filter · Enter/Esc back to list",
            Focus::List => {
                "↑/↓ select · n new · e edit · f favorite · d delete · o sort · / search · q quit"
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))).block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rows_affected_is_a_failure_notice() {
        // A mutation on a row deleted since the last refresh must not read
        // as a success.
        assert_eq!(
            mutation_notice(0, "Prompt updated successfully!"),
            Err(STALE_ROW_NOTICE)
        );
        assert_eq!(
            mutation_notice(1, "Prompt updated successfully!"),
            Ok("Prompt updated successfully!")
        );
    }
}
