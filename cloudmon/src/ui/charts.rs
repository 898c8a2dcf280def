//! Historical line charts: CPU + memory and disk + network.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::types::HistoryWindow;
use crate::ui::theme::Palette;
use crate::ui::util::short_time;

/// Chart-ready points, all series of equal length.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HistorySeries {
    pub cpu: Vec<(f64, f64)>,
    pub memory: Vec<(f64, f64)>,
    pub disk: Vec<(f64, f64)>,
    pub network: Vec<(f64, f64)>,
    pub first: String,
    pub last: String,
}

impl HistorySeries {
    pub fn len(&self) -> usize {
        self.cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }
}

pub fn history_series(h: &HistoryWindow) -> HistorySeries {
    let a = h.aligned();
    let pts = |ys: &[f64]| -> Vec<(f64, f64)> {
        ys.iter().enumerate().map(|(i, y)| (i as f64, *y)).collect()
    };
    HistorySeries {
        cpu: pts(a.cpu),
        memory: pts(a.memory),
        disk: pts(a.disk),
        network: pts(a.network),
        first: a.timestamps.first().map(|t| short_time(t)).unwrap_or_default(),
        last: a.timestamps.last().map(|t| short_time(t)).unwrap_or_default(),
    }
}

pub fn draw_history(f: &mut ratatui::Frame<'_>, area: Rect, h: Option<&HistoryWindow>, p: &Palette) {
    let series = h.map(history_series).unwrap_or_default();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_pair(
        f,
        rows[0],
        "CPU & Memory",
        &series,
        [("CPU (%)", &series.cpu, p.cpu), ("Memory (%)", &series.memory, p.mem)],
        p,
    );
    draw_pair(
        f,
        rows[1],
        "Disk & Network",
        &series,
        [("Disk (%)", &series.disk, p.disk), ("Network (MB/s)", &series.network, p.net)],
        p,
    );
}

fn draw_pair(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    series: &HistorySeries,
    lines: [(&str, &Vec<(f64, f64)>, ratatui::style::Color); 2],
    p: &Palette,
) {
    let y_max = lines
        .iter()
        .flat_map(|(_, pts, _)| pts.iter().map(|(_, y)| *y))
        .fold(100.0_f64, f64::max);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let datasets = lines
        .iter()
        .map(|(name, pts, color)| {
            Dataset::default()
                .name(name.to_string())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(pts)
        })
        .collect::<Vec<_>>();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(p.border())
                .title(title.to_string()),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(p.muted))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(series.first.clone()), Span::raw(series.last.clone())]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(p.muted))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );
    f.render_widget(chart, area);
}
