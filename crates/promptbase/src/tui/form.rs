//! Create-or-edit form state for the prompt form panel.
//!
//! The form yields nothing until the user submits; a submit with an empty
//! title or body surfaces a validation message and persists nothing.

use crossterm::event::{KeyCode, KeyEvent};
use promptbase_db::{NewPrompt, Prompt};

/// Validation message for empty required fields.
pub const VALIDATION_MESSAGE: &str = "Please fill in both the title and prompt fields.";

/// Which form field has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Body,
    Favorite,
}

/// State of the create-or-edit form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Present when editing an existing row; preserved through submit.
    editing_id: Option<i64>,
    pub title: String,
    pub title_cursor: usize,
    pub body: String,
    pub body_cursor: usize,
    pub is_favorite: bool,
    pub focused: FormField,
    /// Validation message shown inline, cleared on the next keystroke.
    pub error: Option<String>,
}

impl FormState {
    /// Empty create-mode form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit-mode form seeded from an existing row.
    pub fn edit(prompt: &Prompt) -> Self {
        Self {
            editing_id: Some(prompt.id),
            title_cursor: prompt.title.chars().count(),
            body_cursor: prompt.body.chars().count(),
            title: prompt.title.clone(),
            body: prompt.body.clone(),
            is_favorite: prompt.is_favorite,
            focused: FormField::Title,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    /// Reset to an empty create-mode form.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::Body,
            FormField::Body => FormField::Favorite,
            FormField::Favorite => FormField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::Favorite,
            FormField::Body => FormField::Title,
            FormField::Favorite => FormField::Body,
        };
    }

    /// Route a key press to the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.error = None;

        match self.focused {
            FormField::Title => match key.code {
                // Enter advances out of the single-line title field
                KeyCode::Enter => self.focused = FormField::Body,
                _ => edit_text(&mut self.title, &mut self.title_cursor, key.code),
            },
            FormField::Body => match key.code {
                KeyCode::Enter => insert_char(&mut self.body, &mut self.body_cursor, '\n'),
                _ => edit_text(&mut self.body, &mut self.body_cursor, key.code),
            },
            FormField::Favorite => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.is_favorite = !self.is_favorite;
                }
            }
        }
    }

    /// Explicit submission. Returns the populated input (plus the original
    /// id when editing), or `None` with a validation message set when a
    /// required field is empty.
    pub fn submit(&mut self) -> Option<(Option<i64>, NewPrompt)> {
        if self.title.trim().is_empty() || self.body.trim().is_empty() {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return None;
        }

        Some((
            self.editing_id,
            NewPrompt {
                title: self.title.clone(),
                body: self.body.clone(),
                is_favorite: self.is_favorite,
            },
        ))
    }
}

fn edit_text(buf: &mut String, cursor: &mut usize, code: KeyCode) {
    match code {
        KeyCode::Char(ch) => insert_char(buf, cursor, ch),
        KeyCode::Backspace => delete_char_before(buf, cursor),
        KeyCode::Left => *cursor = cursor.saturating_sub(1),
        KeyCode::Right => *cursor = (*cursor + 1).min(buf.chars().count()),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buf.chars().count(),
        _ => {}
    }
}

fn insert_char(buf: &mut String, cursor: &mut usize, ch: char) {
    let byte_idx = buf
        .char_indices()
        .nth(*cursor)
        .map(|(i, _)| i)
        .unwrap_or(buf.len());
    buf.insert(byte_idx, ch);
    *cursor += 1;
}

fn delete_char_before(buf: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    if let Some((byte_idx, _)) = buf.char_indices().nth(*cursor - 1) {
        buf.remove(byte_idx);
        *cursor -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut FormState, s: &str) {
        for ch in s.chars() {
            form.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn sample_prompt() -> Prompt {
        Prompt {
            id: 7,
            title: "Haiku".to_string(),
            body: "cherry blossoms".to_string(),
            is_favorite: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_submit_empty_fields_yields_nothing() {
        let mut form = FormState::new();
        assert!(form.submit().is_none());
        assert_eq!(form.error.as_deref(), Some(VALIDATION_MESSAGE));

        // Whitespace-only body is still empty
        type_str(&mut form, "title");
        form.next_field();
        type_str(&mut form, "   ");
        assert!(form.submit().is_none());
        assert_eq!(form.error.as_deref(), Some(VALIDATION_MESSAGE));
    }

    #[test]
    fn test_submit_valid_create_form() {
        let mut form = FormState::new();
        type_str(&mut form, "Haiku");
        form.handle_key(key(KeyCode::Enter)); // Title -> Body
        assert_eq!(form.focused, FormField::Body);
        type_str(&mut form, "cherry blossoms");

        let (id, input) = form.submit().unwrap();
        assert_eq!(id, None);
        assert_eq!(input.title, "Haiku");
        assert_eq!(input.body, "cherry blossoms");
        assert!(!input.is_favorite);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_edit_form_preserves_id() {
        let prompt = sample_prompt();
        let mut form = FormState::edit(&prompt);
        assert!(form.is_editing());

        // Change only the title
        form.handle_key(key(KeyCode::Backspace));
        type_str(&mut form, "s");

        let (id, input) = form.submit().unwrap();
        assert_eq!(id, Some(7));
        assert_eq!(input.title, "Haiks");
        assert_eq!(input.body, "cherry blossoms");
        assert!(input.is_favorite);
    }

    #[test]
    fn test_favorite_toggles_with_space() {
        let mut form = FormState::new();
        form.focused = FormField::Favorite;

        form.handle_key(key(KeyCode::Char(' ')));
        assert!(form.is_favorite);
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(!form.is_favorite);
    }

    #[test]
    fn test_body_enter_inserts_newline() {
        let mut form = FormState::new();
        form.focused = FormField::Body;
        type_str(&mut form, "ab");
        form.handle_key(key(KeyCode::Enter));
        type_str(&mut form, "cd");
        assert_eq!(form.body, "ab\ncd");
    }

    #[test]
    fn test_cursor_editing_mid_string() {
        let mut form = FormState::new();
        type_str(&mut form, "hllo");
        form.handle_key(key(KeyCode::Home));
        form.handle_key(key(KeyCode::Right));
        form.handle_key(key(KeyCode::Char('e')));
        assert_eq!(form.title, "hello");
        form.handle_key(key(KeyCode::End));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.title, "hell");
    }

    #[test]
    fn test_clear_returns_to_create_mode() {
        let mut form = FormState::edit(&sample_prompt());
        form.clear();
        assert!(!form.is_editing());
        assert!(form.title.is_empty());
        assert!(form.body.is_empty());
        assert!(!form.is_favorite);
    }

    #[test]
    fn test_field_cycling() {
        let mut form = FormState::new();
        assert_eq!(form.focused, FormField::Title);
        form.next_field();
        assert_eq!(form.focused, FormField::Body);
        form.next_field();
        assert_eq!(form.focused, FormField::Favorite);
        form.next_field();
        assert_eq!(form.focused, FormField::Title);
        form.prev_field();
        assert_eq!(form.focused, FormField::Favorite);
    }
}
