//! Input widgets for the form and search fields.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Single-line text input with cursor
pub struct TextInput<'a> {
    value: &'a str,
    cursor: usize,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self {
            value,
            cursor,
            title: " Input ",
            placeholder: "",
            focused: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Green
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(self.title);

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.value.is_empty() && !self.focused {
            let placeholder = Paragraph::new(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ));
            placeholder.render(inner_area, buf);
        } else if self.focused {
            Paragraph::new(text_with_cursor(self.value, self.cursor)).render(inner_area, buf);
        } else {
            Paragraph::new(self.value).render(inner_area, buf);
        }
    }
}

/// Multi-line text input with cursor
pub struct TextArea<'a> {
    value: &'a str,
    cursor: usize,
    title: &'a str,
    focused: bool,
}

impl<'a> TextArea<'a> {
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self {
            value,
            cursor,
            title: " Prompt ",
            focused: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Green
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(self.title);

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text = if self.focused {
            text_with_cursor(self.value, self.cursor)
        } else {
            Text::raw(self.value.to_string())
        };

        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

/// Checkbox toggle
pub struct Checkbox<'a> {
    label: &'a str,
    checked: bool,
    focused: bool,
}

impl<'a> Checkbox<'a> {
    pub fn new(label: &'a str, checked: bool) -> Self {
        Self {
            label,
            checked,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Checkbox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let marker = if self.checked { "[x]" } else { "[ ]" };
        let style = if self.focused {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let line = Line::from(vec![
            Span::styled(marker, style),
            Span::raw(" "),
            Span::styled(self.label, style),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

/// Render `value` with the character at `cursor` highlighted, preserving
/// embedded newlines. A cursor at end-of-text shows as a highlighted space.
fn text_with_cursor(value: &str, cursor: usize) -> Text<'static> {
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

    let mut lines: Vec<Line> = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut run = String::new();

    for (i, ch) in value.chars().enumerate() {
        let at_cursor = i == cursor;
        if ch == '\n' {
            if at_cursor {
                if !run.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut run)));
                }
                spans.push(Span::styled(" ".to_string(), cursor_style));
            }
            if !run.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut run)));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
        } else if at_cursor {
            if !run.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut run)));
            }
            spans.push(Span::styled(ch.to_string(), cursor_style));
        } else {
            run.push(ch);
        }
    }

    if !run.is_empty() {
        spans.push(Span::raw(run));
    }
    if cursor >= value.chars().count() {
        spans.push(Span::styled(" ".to_string(), cursor_style));
    }
    lines.push(Line::from(spans));

    Text::from(lines)
}
