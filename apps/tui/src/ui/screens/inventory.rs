use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::ui::widgets::tables::{header_style, scroll_offset, selected_row_style};
use crate::view::inventory_view;

pub fn render_inventory(app: &App, f: &mut Frame<'_>, area: Rect) {
    let view = inventory_view(&app.snapshot(), &app.sensor_cursor);

    if let Some(message) = view.empty_message {
        let paragraph = Paragraph::new(message)
            .block(
                Block::default()
                    .title(" Sensor Inventory ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Sensor ID"),
        Cell::from("Type"),
        Cell::from("Status"),
        Cell::from("Battery"),
        Cell::from("Last Calibrated"),
        Cell::from("Ship"),
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
            let style = if view.selected == Some(index) {
                selected_row_style()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.id.clone()),
                Cell::from(row.sensor_type.clone()),
                Cell::from(row.status.clone()),
                Cell::from(row.battery.clone()),
                Cell::from(row.last_calibrated.clone()),
                Cell::from(row.ship.clone()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Sensor Inventory ({} of {}) ",
                    selected + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
