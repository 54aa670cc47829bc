use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

/// Footer line of `key: action` pairs.
pub fn key_hints(hints: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let spans = hints
        .iter()
        .enumerate()
        .flat_map(|(index, (key, action))| {
            let separator = if index + 1 == hints.len() { "" } else { "   " };
            [
                Span::styled(*key, key_style),
                Span::raw(format!(": {action}{separator}")),
            ]
        })
        .collect::<Vec<_>>();

    TextLine::from(spans)
}
