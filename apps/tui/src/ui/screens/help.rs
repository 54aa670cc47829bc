use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::widgets::popup::open_popup;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Overview",
        &[
            ("↑/↓ Home/End", "Select ship"),
            ("Enter", "Open ship page"),
            ("a / e / d", "Add, edit, delete ship"),
            ("i / w", "Set Idle / WIP"),
            ("1-4", "Dock, operation, personnel, danger lists"),
            ("v", "Sensor inventory"),
        ],
    ),
    (
        "Ship page",
        &[
            ("←/→ Tab", "Switch tank"),
            ("t", "Add tank"),
            ("s", "Assign sensors to tank"),
            ("k", "Acknowledge alarm"),
            ("Esc", "Back to overview"),
        ],
    ),
    (
        "Inventory",
        &[("↑/↓", "Select sensor"), ("Enter", "Sensor log"), ("Esc", "Back")],
    ),
    (
        "Everywhere",
        &[("r", "Refresh now"), ("F1 / ?", "Toggle help"), ("q", "Quit")],
    ),
];

pub fn render_help(f: &mut Frame<'_>) {
    let (area, block) = open_popup(f, 70, 80, " Help ".to_string(), Color::Cyan);

    let mut lines = Vec::new();
    for (section, keys) in SECTIONS {
        lines.push(TextLine::from(Span::styled(
            *section,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, action) in *keys {
            lines.push(TextLine::from(vec![
                Span::styled(
                    format!("  {key:<16}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ]));
        }
        lines.push(TextLine::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
