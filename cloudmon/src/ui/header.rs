//! Top header: title, time of the last snapshot and the theme checkbox.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::types::Snapshot;
use crate::ui::theme::Theme;
use crate::ui::util::clock;

pub const TITLE: &str = "Cloud Native Monitoring Dashboard";

pub fn last_updated(m: Option<&Snapshot>) -> String {
    match m.and_then(|s| s.timestamp).and_then(clock) {
        Some(t) => format!("Last: {t}"),
        None => "Loading...".into(),
    }
}

pub fn theme_checkbox(theme: Theme) -> &'static str {
    if theme.is_checked() { "[x] Dark" } else { "[ ] Dark" }
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, m: Option<&Snapshot>, theme: Theme) {
    let p = theme.palette();
    f.render_widget(Block::default().borders(Borders::BOTTOM).border_style(p.border()), area);

    let right = format!("{}  {}", last_updated(m), theme_checkbox(theme));
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.chars().count() as u16 + 1)])
        .split(area);

    let title = Line::from(Span::styled(TITLE, Style::default().fg(p.fg).add_modifier(Modifier::BOLD)));
    f.render_widget(Paragraph::new(title), cols[0]);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(right, Style::default().fg(p.muted)))).right_aligned(),
        cols[1],
    );
}
