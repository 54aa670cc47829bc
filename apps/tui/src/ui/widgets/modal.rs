use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::api::Sensor;
use crate::app::{App, Modal, Notice, ShipForm, TankField, TankForm};
use crate::domain::Drilldown;
use crate::store::Snapshot;
use crate::ui::widgets::badge::badge_span;
use crate::ui::widgets::hints::key_hints;
use crate::ui::widgets::popup::open_popup;
use crate::ui::widgets::tables::header_style;
use crate::view::overview::DrilldownValue;
use crate::view::{drilldown_view, sensor_log_view};

pub fn render_modal(app: &App, modal: &Modal, f: &mut Frame<'_>) {
    let snapshot = app.snapshot();
    match modal {
        Modal::AddShip(form) => render_ship_form(f, "Add Ship", form),
        Modal::EditShip { form, .. } => render_ship_form(f, "Edit Ship", form),
        Modal::ConfirmDelete { name, .. } => render_confirm_delete(f, name),
        Modal::Drilldown(kind) => render_drilldown(f, &snapshot, *kind),
        Modal::AddTank(form) => render_tank_form(f, &snapshot, form),
        Modal::AssignSensors { tank_id, input } => render_assign_sensors(f, tank_id, input),
        Modal::SensorLog { sensor_id, detail } => match detail {
            Some(sensor) => render_sensor_log(f, sensor),
            None => render_loading(f, sensor_id),
        },
    }
}

pub fn render_notice(notice: &Notice, f: &mut Frame<'_>) {
    let (area, block) = open_popup(f, 50, 25, format!(" {} ", notice.title), Color::Red);
    let text = Text::from(vec![
        TextLine::from(notice.message.clone()),
        TextLine::from(""),
        key_hints(&[("Enter/Esc", "Dismiss")]),
    ]);
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn field_line(label: &str, value: &str, focused: bool) -> TextLine<'static> {
    let (marker, style) = if focused {
        (
            "> ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(Color::White))
    };
    let cursor = if focused { "_" } else { "" };

    TextLine::from(vec![
        Span::styled(format!("{marker}{label:<12}"), style),
        Span::raw(" "),
        Span::raw(format!("{value}{cursor}")),
    ])
}

fn render_ship_form(f: &mut Frame<'_>, title: &str, form: &ShipForm) {
    let (area, block) = open_popup(f, 60, 40, format!(" {title} "), Color::Cyan);

    let mut lines: Vec<TextLine<'static>> = ShipForm::fields()
        .iter()
        .map(|field| field_line(field.label(), form.value(*field), form.focus == *field))
        .collect();
    lines.push(TextLine::from(""));
    lines.push(key_hints(&[
        ("Tab/↑↓", "Field"),
        ("Enter", "Save"),
        ("Esc", "Cancel"),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_confirm_delete(f: &mut Frame<'_>, name: &str) {
    let (area, block) = open_popup(f, 50, 25, " Delete Ship ".to_string(), Color::Red);
    let text = Text::from(vec![
        TextLine::from(format!("Are you sure you want to delete ship: {name}?")),
        TextLine::from(""),
        key_hints(&[("y/Enter", "Delete"), ("n/Esc", "Cancel")]),
    ]);
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_drilldown(f: &mut Frame<'_>, snapshot: &Snapshot, kind: Drilldown) {
    let view = drilldown_view(snapshot, kind);
    let (area, block) = open_popup(f, 60, 60, format!(" {} ", view.title), Color::Cyan);

    let chunks = split_with_footer(block.inner(area));
    f.render_widget(block, area);

    if let Some(message) = view.empty_message {
        f.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            chunks[0],
        );
    } else {
        let lines: Vec<TextLine<'static>> = view
            .entries
            .iter()
            .map(|entry| {
                let value = match &entry.value {
                    DrilldownValue::Status(badge) => badge_span(badge),
                    DrilldownValue::Personnel(count) => {
                        Span::styled(format!("{count} personnel"), Style::default().fg(Color::Cyan))
                    }
                };
                TextLine::from(vec![Span::raw(format!("{:<30} ", entry.name)), value])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[0]);
    }

    f.render_widget(
        Paragraph::new(key_hints(&[("1-4", "Switch list"), ("Esc", "Close")]))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_tank_form(f: &mut Frame<'_>, snapshot: &Snapshot, form: &TankForm) {
    let (area, block) = open_popup(f, 60, 35, " Add Tank ".to_string(), Color::Cyan);

    let tank_type = form
        .selected_type(&snapshot.tank_types)
        .map_or_else(|| "(no tank types)".to_string(), |kind| format!("◀ {} ▶", kind.name));

    let lines = vec![
        field_line("Tank id", &form.id, form.focus == TankField::Id),
        field_line("Type", &tank_type, form.focus == TankField::Type),
        TextLine::from(""),
        key_hints(&[
            ("Tab", "Field"),
            ("←/→", "Type"),
            ("Enter", "Add"),
            ("Esc", "Cancel"),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_assign_sensors(f: &mut Frame<'_>, tank_id: &str, input: &str) {
    let (area, block) = open_popup(
        f,
        60,
        35,
        format!(" Assign Sensors to Tank: {tank_id} "),
        Color::Cyan,
    );

    let lines = vec![
        TextLine::from(Span::styled(
            "Sensor ids, separated by commas:",
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(format!("{input}_")),
        TextLine::from(""),
        key_hints(&[("Enter", "Assign"), ("Esc", "Cancel")]),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_loading(f: &mut Frame<'_>, sensor_id: &str) {
    let (area, block) = open_popup(f, 50, 20, format!(" Sensor Log: {sensor_id} "), Color::Cyan);
    f.render_widget(
        Paragraph::new("Loading sensor details...")
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_sensor_log(f: &mut Frame<'_>, sensor: &Sensor) {
    let view = sensor_log_view(sensor);
    let (area, block) = open_popup(f, 80, 70, format!(" {} ", view.title), Color::Cyan);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let summary = TextLine::from(vec![
        Span::styled("Type: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}   ", view.sensor_type)),
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}   ", view.status)),
        Span::styled("Battery: ", Style::default().fg(Color::Gray)),
        Span::raw(view.battery.clone()),
    ]);
    f.render_widget(Paragraph::new(summary), chunks[0]);

    if let Some(message) = view.empty_message {
        f.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            chunks[1],
        );
    } else {
        let header = Row::new(vec![
            Cell::from("Event"),
            Cell::from("Timestamp"),
            Cell::from("Details"),
        ])
        .style(header_style());
        let rows = view.entries.iter().map(|entry| {
            Row::new(vec![
                Cell::from(entry.event.clone()),
                Cell::from(entry.timestamp.clone()),
                Cell::from(entry.details.clone()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(18),
                Constraint::Length(20),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::TOP))
        .column_spacing(1);
        f.render_widget(table, chunks[1]);
    }

    f.render_widget(
        Paragraph::new(key_hints(&[("Esc", "Close")])).alignment(Alignment::Center),
        chunks[2],
    );
}

fn split_with_footer(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area)
        .to_vec()
}
