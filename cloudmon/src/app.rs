//! App main loop: terminal setup/teardown, input handling and redraws.

use std::{io, time::Duration};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::dashboard::Dashboard;
use crate::ui::{draw_dashboard, footer::FooterInfo};

// how often published poller results are picked up
const REDRAW_EVERY: Duration = Duration::from_millis(250);

pub struct App {
    dashboard: Dashboard,
    footer: FooterInfo,
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, footer: FooterInfo) -> Self {
        Self {
            dashboard,
            footer,
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut redraw = tokio::time::interval(REDRAW_EVERY);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

        terminal.draw(|f| self.draw(f))?;
        loop {
            let dirty = tokio::select! {
                ev = events.next() => match ev {
                    Some(Ok(Event::Key(k))) => {
                        self.handle_key(k);
                        true
                    }
                    Some(Ok(Event::Resize(_, _))) => true,
                    Some(Ok(_)) => false,
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        debug!("input stream closed");
                        self.should_quit = true;
                        false
                    }
                },
                _ = redraw.tick() => self.dashboard.sync(),
            };
            if self.should_quit {
                break;
            }
            if dirty {
                terminal.draw(|f| self.draw(f))?;
            }
        }
        Ok(())
    }

    /// Keyboard: `q`/`Esc`/`Ctrl-C` quit, `t` flips the dark-theme checkbox.
    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.kind != KeyEventKind::Press {
            return;
        }
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.dashboard.toggle_theme();
                debug!(theme = self.dashboard.theme().name(), "theme toggled");
            }
            _ => {}
        }
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        draw_dashboard(f, &self.dashboard, &self.footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio_util::sync::CancellationToken;

    use crate::dashboard::Slots;
    use crate::poller::spawn_poller;
    use crate::types::Snapshot;
    use crate::ui::theme::Theme;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn app(slots: &Slots) -> App {
        App::new(
            Dashboard::new(slots, Theme::Light),
            FooterInfo {
                backend: "http://127.0.0.1:5000/".into(),
                snapshot_every: Duration::from_millis(2000),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn theme_toggle_does_not_fetch() {
        let slots = Slots::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let root = CancellationToken::new();
        let _h = spawn_poller(
            "snapshot",
            Duration::from_millis(2000),
            slots.snapshot.clone(),
            &root,
            move || {
                c.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Ok(Arc::new(Snapshot::default())))
            },
        );
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut a = app(&slots);
        a.handle_key(key('t'));
        assert_eq!(a.dashboard().theme(), Theme::Dark);
        a.handle_key(key('t'));
        assert_eq!(a.dashboard().theme(), Theme::Light);
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn quit_keys() {
        let slots = Slots::default();
        let mut a = app(&slots);
        a.handle_key(key('x'));
        assert!(!a.should_quit());
        a.handle_key(key('q'));
        assert!(a.should_quit());

        let mut a = app(&slots);
        a.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(a.should_quit());
    }
}
