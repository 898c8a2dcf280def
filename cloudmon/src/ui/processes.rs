//! Top processes table, in the order the service ranked them.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::types::ProcessRow;
use crate::ui::theme::Palette;

const COLS: [Constraint; 4] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(50), // Name
    Constraint::Length(8),      // CPU %
    Constraint::Length(10),     // Memory %
];

pub fn draw_processes(f: &mut ratatui::Frame<'_>, area: Rect, rows: &[ProcessRow], p: &Palette) {
    let peak_cpu = rows
        .iter()
        .map(|r| r.cpu_percent)
        .fold(f64::NEG_INFINITY, f64::max);

    let body = rows.iter().enumerate().map(|(i, r)| {
        let emphasis = if r.cpu_percent == peak_cpu {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        // zebra striping
        let bg = if i % 2 == 1 { Style::default().add_modifier(Modifier::DIM) } else { Style::default() };

        Row::new(vec![
            Cell::from(r.pid.to_string()).style(Style::default().fg(p.muted)),
            Cell::from(r.name.clone().unwrap_or_default()),
            Cell::from(r.cpu_percent.to_string()).style(Style::default().fg(p.load(r.cpu_percent))),
            Cell::from(r.memory_percent.to_string()),
        ])
        .style(emphasis.patch(bg))
    });

    let header = Row::new(vec!["PID", "Name", "CPU %", "Memory %"])
        .style(Style::default().fg(p.cpu).add_modifier(Modifier::BOLD));

    let table = Table::new(body, COLS)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(p.border())
                .title("Top Processes"),
        );
    f.render_widget(table, area);
}
