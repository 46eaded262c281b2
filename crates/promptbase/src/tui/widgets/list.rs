//! List rendering for prompt rows.

use promptbase_db::Prompt;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Build the prompt list widget. The selected row (tracked by the caller's
/// `ListState`) is expanded to show the full body and favorite status; other
/// rows show a one-line preview.
pub fn prompt_list<'a>(
    prompts: &'a [Prompt],
    selected: Option<usize>,
    focused: bool,
) -> List<'a> {
    let items: Vec<ListItem> = prompts
        .iter()
        .enumerate()
        .map(|(i, p)| prompt_item(p, selected == Some(i)))
        .collect();

    let border_color = if focused {
        Color::Green
    } else {
        Color::DarkGray
    };

    List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" Prompts ({}) ", prompts.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ")
}

fn prompt_item(prompt: &Prompt, expanded: bool) -> ListItem<'_> {
    let marker = if prompt.is_favorite { "♥ " } else { "  " };

    let title_line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Red)),
        Span::styled(
            prompt.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let mut lines = vec![title_line];

    if expanded {
        for body_line in prompt.body.lines() {
            lines.push(Line::from(Span::raw(format!("    {body_line}"))));
        }
        lines.push(Line::from(Span::styled(
            format!(
                "    Favorite: {} · created {}",
                if prompt.is_favorite { "Yes" } else { "No" },
                prompt.created_at.format("%Y-%m-%d %H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let preview = prompt.body.lines().next().unwrap_or("");
        lines.push(Line::from(Span::styled(
            format!("    {preview}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}
