//! Per-interface grouped bars of cumulative sent/received MB.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::dashboard::InterfaceSummary;
use crate::ui::theme::Palette;
use crate::ui::util::truncate_middle;

pub const NO_INTERFACES: &str = "No network interfaces";

const BAR_WIDTH: u16 = 5;

pub fn draw_interfaces(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    ifaces: &[InterfaceSummary],
    p: &Palette,
) {
    let title = Line::from(vec![
        Span::raw("Network Interfaces  "),
        Span::styled("■ Sent (MB) ", Style::default().fg(p.sent)),
        Span::styled("■ Recv (MB)", Style::default().fg(p.recv)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border())
        .title(title);

    if ifaces.is_empty() {
        f.render_widget(
            Paragraph::new(NO_INTERFACES).style(Style::default().fg(p.muted)).block(block),
            area,
        );
        return;
    }

    let label_w = (BAR_WIDTH * 2) as usize;
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(BAR_WIDTH)
        .bar_gap(0)
        .group_gap(2)
        .value_style(Style::default().fg(p.bg).bg(p.fg));
    for s in ifaces {
        let bars = [
            Bar::default()
                .value(s.sent_mb)
                .style(Style::default().fg(p.sent)),
            Bar::default()
                .value(s.recv_mb)
                .style(Style::default().fg(p.recv)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate_middle(&s.name, label_w)))
                .bars(&bars),
        );
    }
    f.render_widget(chart, area);
}
