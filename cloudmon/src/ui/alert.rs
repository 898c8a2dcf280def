//! Alert banner for the service-provided message/severity pair.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::types::{Severity, Snapshot};
use crate::ui::theme::Palette;

fn severity_label(s: Option<Severity>) -> &'static str {
    match s {
        Some(Severity::Critical) => "critical",
        Some(Severity::Warning) => "warning",
        Some(Severity::Info) => "info",
        Some(Severity::Unknown) | None => "alert",
    }
}

/// Draws nothing unless the snapshot carries a non-empty message.
pub fn draw_alert(f: &mut ratatui::Frame<'_>, area: Rect, m: Option<&Snapshot>, p: &Palette) {
    let Some(snap) = m else { return };
    let Some(msg) = snap.alert() else { return };

    let color = p.severity(snap.severity);
    let banner = Paragraph::new(msg.to_string())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(severity_label(snap.severity)),
        );
    f.render_widget(banner, area);
}
