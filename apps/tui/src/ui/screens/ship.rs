use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, ShipPage};
use crate::ui::widgets::badge::badge_span;
use crate::view::ship::SensorTile;
use crate::view::{ship_view, ShipView, TankPanel};

const TILE_WIDTH: u16 = 24;
const TILE_HEIGHT: u16 = 5;

pub fn render_ship(app: &App, f: &mut Frame<'_>, area: Rect) {
    let snapshot = app.snapshot();
    let ship = app
        .ship_page
        .as_ref()
        .and_then(|page| snapshot.ship(&page.ship_id).map(|ship| (page, ship)));

    let Some((page, ship)) = ship else {
        let message = if app.store.generation() == 0 {
            "Loading fleet data..."
        } else {
            "Ship not found!"
        };
        let paragraph = Paragraph::new(message)
            .block(Block::default().title(" Ship ").borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    let view = ship_view(ship, &snapshot, &page.selection);

    let banner_height = if view.in_danger { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(6),
            Constraint::Length(8),
        ])
        .split(area);

    render_header(&view, f, rows[0]);
    if view.in_danger {
        render_danger_banner(f, rows[1]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(rows[2]);
    render_tank_nav(&view, f, body[0]);
    render_tank_panel(&view.panel, f, body[1]);
    render_alarm_log(page, f, rows[3]);
}

fn render_header(view: &ShipView, f: &mut Frame<'_>, area: Rect) {
    let line = TextLine::from(vec![
        Span::styled(
            view.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Total personnel: "),
        Span::styled(
            view.total_personnel.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        badge_span(&view.status),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_danger_banner(f: &mut Frame<'_>, area: Rect) {
    let line = TextLine::from(vec![
        Span::styled(
            " ⚠ In Danger ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        ),
        Span::raw("  Press "),
        Span::styled(
            "k",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to acknowledge the alarm."),
    ]);
    f.render_widget(
        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center),
        area,
    );
}

fn render_tank_nav(view: &ShipView, f: &mut Frame<'_>, area: Rect) {
    let items: Vec<ListItem<'static>> = view
        .tanks
        .iter()
        .map(|tank| {
            let style = if tank.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(tank.label.clone(), style))
        })
        .collect();

    f.render_widget(
        List::new(items).block(Block::default().title(" Tanks ").borders(Borders::ALL)),
        area,
    );
}

fn render_tank_panel(panel: &TankPanel, f: &mut Frame<'_>, area: Rect) {
    match panel {
        TankPanel::NoTanks { title, hint } => {
            let lines = vec![
                TextLine::from(Span::styled(
                    *title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                TextLine::from(Span::styled(*hint, Style::default().fg(Color::Gray))),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        TankPanel::Tank {
            title,
            sensors,
            empty_message,
            ..
        } => {
            let block = Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            if let Some(message) = empty_message {
                f.render_widget(
                    Paragraph::new(*message).alignment(Alignment::Center),
                    inner,
                );
                return;
            }
            render_sensor_tiles(sensors, f, inner);
        }
    }
}

/// Lays the tiles out left to right, wrapping rows; tiles past the bottom
/// edge are not drawn.
fn render_sensor_tiles(sensors: &[SensorTile], f: &mut Frame<'_>, area: Rect) {
    let per_row = (area.width / TILE_WIDTH).max(1);

    for (index, sensor) in (0u16..).zip(sensors) {
        let x = area.x + (index % per_row) * TILE_WIDTH;
        let y = area.y + (index / per_row) * TILE_HEIGHT;
        if y + TILE_HEIGHT > area.y + area.height {
            break;
        }
        let tile = Rect::new(x, y, TILE_WIDTH.min(area.width), TILE_HEIGHT);

        let lines = vec![
            TextLine::from(vec![
                Span::styled(
                    sensor.id.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled("OK", Style::default().fg(Color::Green)),
            ]),
            TextLine::from(Span::styled(
                sensor.sensor_type.clone(),
                Style::default().fg(Color::Gray),
            )),
            TextLine::from(format!("Bat: {}%", sensor.battery)),
        ];
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            ),
            tile,
        );
    }
}

fn render_alarm_log(page: &ShipPage, f: &mut Frame<'_>, area: Rect) {
    let lines: Vec<TextLine<'static>> = page
        .alarm_log
        .iter()
        .map(|entry| TextLine::from(entry.clone()))
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(Block::default().title(" Alarm Log ").borders(Borders::ALL)),
        area,
    );
}
