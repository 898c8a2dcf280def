//! Overview cards: CPU, memory and disk gauges plus the network rate.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::types::Snapshot;
use crate::ui::theme::Palette;

/// The fetched value as-is, followed by '%'.
pub fn pct_label(v: f64) -> String {
    format!("{v}%")
}

pub fn draw_gauges(f: &mut ratatui::Frame<'_>, area: Rect, m: &Snapshot, p: &Palette) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    draw_pct_card(f, cols[0], "CPU", m.cpu, p.cpu, p);
    draw_pct_card(f, cols[1], "Memory", m.memory, p.mem, p);
    draw_pct_card(f, cols[2], "Disk", m.disk, p.disk, p);

    let net = Paragraph::new(m.network.to_string())
        .centered()
        .style(Style::default().fg(p.net).add_modifier(Modifier::BOLD))
        .block(card("Network (MB/s)", p));
    f.render_widget(net, cols[3]);
}

fn draw_pct_card(f: &mut ratatui::Frame<'_>, area: Rect, title: &str, v: f64, color: Color, p: &Palette) {
    // only the bar fill is bounded; the label shows the raw value
    let g = Gauge::default()
        .block(card(title, p))
        .gauge_style(Style::default().fg(color).bg(p.bg))
        .ratio((v / 100.0).clamp(0.0, 1.0))
        .label(pct_label(v));
    f.render_widget(g, area);
}

fn card<'a>(title: &'a str, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(p.border())
        .title(title)
}
