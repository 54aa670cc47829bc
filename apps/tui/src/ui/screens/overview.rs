use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::domain::Drilldown;
use crate::ui::widgets::badge::badge_span;
use crate::ui::widgets::tables::{header_style, scroll_offset, selected_row_style};
use crate::view::overview::StatusControl;
use crate::view::{overview_view, OverviewView};

pub fn render_overview(app: &App, f: &mut Frame<'_>, area: Rect) {
    let view = overview_view(&app.snapshot(), &app.ship_cursor);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    render_stat_tiles(&view, f, chunks[0]);
    render_status_strip(&view, f, chunks[1]);
    render_ship_table(&view, f, chunks[2]);
}

fn render_stat_tiles(view: &OverviewView, f: &mut Frame<'_>, area: Rect) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let values = [
        (Drilldown::Dock, view.stats.ships_at_dock.to_string(), Color::Cyan),
        (
            Drilldown::UnderOperation,
            view.stats.ships_under_operation.to_string(),
            Color::Green,
        ),
        (
            Drilldown::Personnel,
            view.stats.total_personnel.to_string(),
            Color::Blue,
        ),
        (
            Drilldown::Danger,
            view.stats.spaces_in_danger.to_string(),
            Color::Red,
        ),
    ];

    for (index, (kind, value, color)) in values.into_iter().enumerate() {
        let block = Block::default()
            .title(format!(" [{}] {} ", index + 1, kind.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let paragraph = Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(paragraph, tiles[index]);
    }
}

fn render_status_strip(view: &OverviewView, f: &mut Frame<'_>, area: Rect) {
    let spans: Vec<Span<'static>> = view
        .cards
        .iter()
        .flat_map(|card| {
            [
                Span::styled(
                    format!("{} ", card.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                badge_span(&card.badge),
                Span::raw("   "),
            ]
        })
        .collect();

    let paragraph = Paragraph::new(TextLine::from(spans))
        .block(Block::default().title(" Fleet Status ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn control_span(control: &StatusControl) -> Span<'static> {
    let label = format!("[{}]", control.status.label());
    let style = if control.disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if control.active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Span::styled(label, style)
}

fn render_ship_table(view: &OverviewView, f: &mut Frame<'_>, area: Rect) {
    if let Some(message) = view.empty_message {
        let paragraph = Paragraph::new(message)
            .block(
                Block::default()
                    .title(" Ships ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Last Port"),
        Cell::from("Arrived"),
        Cell::from("Status"),
        Cell::from("Set Status"),
    ])
    .style(header_style());

    let selected = view.selected.unwrap_or_default();
    let total_rows = view.rows.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, selected);

    let rows = view
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, row)| {
            let controls = TextLine::from(vec![
                control_span(&row.controls[0]),
                Span::raw(" "),
                control_span(&row.controls[1]),
            ]);
            let style = if view.selected == Some(index) {
                selected_row_style()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(row.last_port.clone()),
                Cell::from(row.arrived.clone()),
                Cell::from(TextLine::from(badge_span(&row.status))),
                Cell::from(controls),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(13),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Ships ({} of {}) ", selected + 1, total_rows))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
