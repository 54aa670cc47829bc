// UI module for the fleet console
// Paints view models onto the terminal frame

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use crate::ui::widgets::hints::key_hints;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(app, f, chunks[0]);

    match app.screen {
        AppScreen::Overview => screens::overview::render_overview(app, f, chunks[1]),
        AppScreen::ShipDetail => screens::ship::render_ship(app, f, chunks[1]),
        AppScreen::Inventory => screens::inventory::render_inventory(app, f, chunks[1]),
    }

    render_status_bar(app, f, chunks[2]);
    render_shortcuts(app, f, chunks[3]);

    if let Some(modal) = &app.modal {
        widgets::modal::render_modal(app, modal, f);
    }
    if app.show_help {
        screens::help::render_help(f);
    }
    if let Some(notice) = &app.notice {
        widgets::modal::render_notice(notice, f);
    }
}

const fn screen_title(screen: AppScreen) -> &'static str {
    match screen {
        AppScreen::Overview => "Fleet Overview",
        AppScreen::ShipDetail => "Ship Detail",
        AppScreen::Inventory => "Sensor Inventory",
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let title = TextLine::from(vec![
        Span::styled(
            " Fleet Console ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", screen_title(app.screen)),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(title), halves[0]);
    f.render_widget(
        Paragraph::new(app.clock.clone()).alignment(Alignment::Right),
        halves[1],
    );
}

fn render_status_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let refreshed = match (app.store.last_refreshed(), app.store.last_error()) {
        (_, Some(error)) => Span::styled(
            format!("stale: {error}"),
            Style::default().fg(Color::Red),
        ),
        (Some(at), None) => Span::styled(
            format!("updated {}", at.format("%H:%M:%S UTC")),
            Style::default().fg(Color::DarkGray),
        ),
        (None, None) => Span::styled("waiting for data", Style::default().fg(Color::DarkGray)),
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(48)])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Green),
        )),
        halves[0],
    );
    f.render_widget(
        Paragraph::new(refreshed).alignment(Alignment::Right),
        halves[1],
    );
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let hints = match app.screen {
        AppScreen::Overview => key_hints(&[
            ("↑/↓", "Select"),
            ("Enter", "Open"),
            ("a/e/d", "Add/Edit/Delete"),
            ("i/w", "Idle/WIP"),
            ("1-4", "Lists"),
            ("v", "Inventory"),
            ("F1", "Help"),
            ("q", "Quit"),
        ]),
        AppScreen::ShipDetail => key_hints(&[
            ("←/→", "Tank"),
            ("t", "Add tank"),
            ("s", "Assign sensors"),
            ("k", "Acknowledge"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ]),
        AppScreen::Inventory => key_hints(&[
            ("↑/↓", "Select"),
            ("Enter", "Sensor log"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ]),
    };

    f.render_widget(
        Paragraph::new(hints)
            .block(Block::default().borders(Borders::TOP))
            .alignment(Alignment::Center),
        area,
    );
}
