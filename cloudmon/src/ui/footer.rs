//! Bottom status line.

use std::time::Duration;

use ratatui::{layout::Rect, style::Style, widgets::Paragraph};

use crate::ui::theme::Theme;
use crate::ui::util::cadence;

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub backend: String,
    pub snapshot_every: Duration,
}

pub fn footer_text(info: &FooterInfo, theme: Theme) -> String {
    format!(
        "Live updates every {} • Backend: {} • Theme: {} • t: toggle theme • q: quit",
        cadence(info.snapshot_every),
        info.backend,
        theme.name()
    )
}

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, info: &FooterInfo, theme: Theme) {
    let p = theme.palette();
    f.render_widget(
        Paragraph::new(footer_text(info, theme)).style(Style::default().fg(p.muted)),
        area,
    );
}
