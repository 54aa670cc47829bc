use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::domain::BadgeClass;
use crate::view::Badge;

pub const fn badge_color(class: BadgeClass) -> Color {
    match class {
        BadgeClass::Danger => Color::Red,
        BadgeClass::Ok => Color::Green,
        BadgeClass::Gray => Color::Gray,
    }
}

pub fn badge_span(badge: &Badge) -> Span<'static> {
    Span::styled(
        format!(" {} ", badge.label),
        Style::default()
            .fg(Color::Black)
            .bg(badge_color(badge.class))
            .add_modifier(Modifier::BOLD),
    )
}
