//! Drive breakdown: a proportional share bar of used space per mount plus the list.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::types::DriveUsage;
use crate::ui::theme::Palette;
use crate::ui::util::truncate_middle;

pub const NO_DRIVES: &str = "No drives found";

#[derive(Debug, Clone, PartialEq)]
pub struct DriveSlice<'a> {
    pub mount: &'a str,
    /// Fraction of the summed `used_mb`, 0..=1.
    pub share: f64,
}

/// Slices of the share chart; `None` when there is nothing to chart.
pub fn drive_slices(drives: &[DriveUsage]) -> Option<Vec<DriveSlice<'_>>> {
    if drives.is_empty() {
        return None;
    }
    let total: f64 = drives.iter().map(|d| d.used_mb.max(0.0)).sum();
    Some(
        drives
            .iter()
            .map(|d| DriveSlice {
                mount: &d.mount,
                share: if total > 0.0 { d.used_mb.max(0.0) / total } else { 0.0 },
            })
            .collect(),
    )
}

pub fn drive_line(d: &DriveUsage) -> String {
    format!("{} — {}% ({}/{} MB)", d.mount, d.percent, d.used_mb, d.total_mb)
}

pub fn draw_drives(f: &mut ratatui::Frame<'_>, area: Rect, drives: &[DriveUsage], p: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(p.border())
        .title("Disk Usage Breakdown");

    let Some(slices) = drive_slices(drives) else {
        f.render_widget(
            Paragraph::new(NO_DRIVES).style(Style::default().fg(p.muted)).block(block),
            area,
        );
        return;
    };

    let width = area.width.saturating_sub(2) as usize;
    let mut bar: Vec<Span> = Vec::with_capacity(slices.len());
    for (i, s) in slices.iter().enumerate() {
        let cells = (s.share * width as f64).round() as usize;
        bar.push(Span::styled("█".repeat(cells), Style::default().fg(p.slices[i % p.slices.len()])));
    }

    let mut lines = vec![Line::from(bar), Line::default()];
    for (i, (d, s)) in drives.iter().zip(&slices).enumerate() {
        let color = p.slices[i % p.slices.len()];
        let text = format!("{} ({:.1}% of used)", drive_line(d), s.share * 100.0);
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::raw(truncate_middle(&text, width.saturating_sub(2))),
        ]));
    }
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(mount: &str, used: f64, total: f64) -> DriveUsage {
        DriveUsage {
            mount: mount.into(),
            used_mb: used,
            total_mb: total,
            percent: used / total * 100.0,
            free_mb: None,
        }
    }

    #[test]
    fn no_slices_without_drives() {
        assert!(drive_slices(&[]).is_none());
    }

    #[test]
    fn shares_sum_to_one() {
        let d = [drive("/", 300.0, 1000.0), drive("/home", 100.0, 1000.0)];
        let s = drive_slices(&d).unwrap();
        assert_eq!(s[0].mount, "/");
        assert!((s[0].share - 0.75).abs() < 1e-9);
        assert!((s.iter().map(|x| x.share).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_usage_does_not_divide_by_zero() {
        let d = [drive("/", 0.0, 10.0)];
        assert_eq!(drive_slices(&d).unwrap()[0].share, 0.0);
    }

    #[test]
    fn list_line_shows_raw_values() {
        assert_eq!(drive_line(&drive("/", 512.5, 1025.0)), "/ — 50% (512.5/1025 MB)");
    }
}
