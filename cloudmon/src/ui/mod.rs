//! UI module root: the dashboard layout and the individual panels.

pub mod alert;
pub mod charts;
pub mod disks;
pub mod footer;
pub mod gauges;
pub mod header;
pub mod net;
pub mod processes;
pub mod theme;
pub mod util;


use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

use crate::dashboard::Dashboard;
use crate::types::Snapshot;
use footer::FooterInfo;

/// Render the whole dashboard from the current view model.
pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, d: &Dashboard, info: &FooterInfo) {
    let area = f.area();
    let theme = d.theme();
    let p = theme.palette();
    f.render_widget(Block::default().style(p.base()), area);

    let snap = d.snapshot();
    let alert_h = if snap.and_then(Snapshot::alert).is_some() { 3 } else { 0 };
    // table rows plus borders and header, capped at what a terminal can hold
    let procs_h = u16::try_from(d.processes().len().max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(3);

    // Root rows: header, alert, gauges, charts, processes, footer
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(alert_h),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(procs_h),
            Constraint::Length(1),
        ])
        .split(area);

    header::draw_header(f, rows[0], snap, theme);
    alert::draw_alert(f, rows[1], snap, &p);

    // before the first snapshot the cards read zero
    let zero = Snapshot::default();
    gauges::draw_gauges(f, rows[2], snap.unwrap_or(&zero), &p);

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[3]);
    charts::draw_history(f, mid[0], d.history(), &p);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(mid[1]);
    disks::draw_drives(f, right[0], snap.map(|s| s.per_drive.as_slice()).unwrap_or(&[]), &p);
    net::draw_interfaces(f, right[1], d.interfaces(), &p);

    processes::draw_processes(f, rows[4], d.processes(), &p);
    footer::draw_footer(f, rows[5], info, theme);
}
