//! View model: the three state slots fed by the pollers, the theme, and the one
//! piece of derived state (the per-interface summary).

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::client::{MetricsClient, SortKey};
use crate::poller::{spawn_poller, Latest, PollerHandle, Slot};
use crate::types::{HistoryWindow, NetworkCounters, ProcessRow, Snapshot};
use crate::ui::theme::Theme;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Cadences and query parameters of the three pollers.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub snapshot_every: Duration,
    pub history_every: Duration,
    pub processes_every: Duration,
    pub history_points: usize,
    pub top_n: usize,
    pub sort: SortKey,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            snapshot_every: Duration::from_millis(2000),
            history_every: Duration::from_millis(5000),
            processes_every: Duration::from_millis(3000),
            history_points: 60,
            top_n: 6,
            sort: SortKey::Cpu,
        }
    }
}

#[derive(Debug, Default)]
pub struct Slots {
    pub snapshot: Arc<Slot<Arc<Snapshot>>>,
    pub history: Arc<Slot<Arc<HistoryWindow>>>,
    pub processes: Arc<Slot<Arc<Vec<ProcessRow>>>>,
}

/// The running pollers. Dropping this cancels all of them.
pub struct Pollers {
    handles: Vec<PollerHandle>,
}

impl Pollers {
    pub async fn shutdown(self) {
        for h in self.handles {
            h.shutdown().await;
        }
    }
}

impl Slots {
    pub fn start(
        &self,
        client: &MetricsClient,
        settings: &PollSettings,
        cancel: &CancellationToken,
    ) -> Pollers {
        let c = client.clone();
        let snapshot = spawn_poller(
            "snapshot",
            settings.snapshot_every,
            self.snapshot.clone(),
            cancel,
            move || {
                let c = c.clone();
                async move { c.fetch_snapshot().await.map(Arc::new) }
            },
        );

        let c = client.clone();
        let points = settings.history_points;
        let history = spawn_poller(
            "history",
            settings.history_every,
            self.history.clone(),
            cancel,
            move || {
                let c = c.clone();
                async move { c.fetch_history(points).await.map(Arc::new) }
            },
        );

        let c = client.clone();
        let (n, sort) = (settings.top_n, settings.sort);
        let processes = spawn_poller(
            "processes",
            settings.processes_every,
            self.processes.clone(),
            cancel,
            move || {
                let c = c.clone();
                async move { c.fetch_processes(n, sort).await.map(Arc::new) }
            },
        );

        Pollers {
            handles: vec![snapshot, history, processes],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSummary {
    pub name: String,
    pub sent_mb: u64,
    pub recv_mb: u64,
}

/// Cumulative byte counter to whole MB, rounded half up.
pub fn bytes_to_mb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_MB).round() as u64
}

pub fn interface_summaries(per_interface: &IndexMap<String, NetworkCounters>) -> Vec<InterfaceSummary> {
    per_interface
        .iter()
        .map(|(name, c)| InterfaceSummary {
            name: name.clone(),
            sent_mb: bytes_to_mb(c.bytes_sent),
            recv_mb: bytes_to_mb(c.bytes_recv),
        })
        .collect()
}

pub struct Dashboard {
    snapshot_rx: watch::Receiver<Latest<Arc<Snapshot>>>,
    history_rx: watch::Receiver<Latest<Arc<HistoryWindow>>>,
    processes_rx: watch::Receiver<Latest<Arc<Vec<ProcessRow>>>>,

    snapshot: Option<Arc<Snapshot>>,
    history: Option<Arc<HistoryWindow>>,
    processes: Option<Arc<Vec<ProcessRow>>>,

    interfaces: Vec<InterfaceSummary>,
    interfaces_src: Option<Arc<Snapshot>>,
    interface_rebuilds: usize,

    theme: Theme,
}

impl Dashboard {
    pub fn new(slots: &Slots, theme: Theme) -> Self {
        let mut d = Self {
            snapshot_rx: slots.snapshot.subscribe(),
            history_rx: slots.history.subscribe(),
            processes_rx: slots.processes.subscribe(),
            snapshot: None,
            history: None,
            processes: None,
            interfaces: Vec::new(),
            interfaces_src: None,
            interface_rebuilds: 0,
            theme,
        };
        d.sync();
        d
    }

    /// Pull whatever the pollers published since the last call.
    /// Returns true if any of the three values changed.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        if self.snapshot_rx.has_changed().unwrap_or(false) || self.snapshot.is_none() {
            let next = self.snapshot_rx.borrow_and_update().value.clone();
            changed |= next.is_some() && !same(&self.snapshot, &next);
            self.snapshot = next;
        }
        if self.history_rx.has_changed().unwrap_or(false) || self.history.is_none() {
            let next = self.history_rx.borrow_and_update().value.clone();
            changed |= next.is_some() && !same(&self.history, &next);
            self.history = next;
        }
        if self.processes_rx.has_changed().unwrap_or(false) || self.processes.is_none() {
            let next = self.processes_rx.borrow_and_update().value.clone();
            changed |= next.is_some() && !same(&self.processes, &next);
            self.processes = next;
        }
        self.refresh_interfaces();
        changed
    }

    fn refresh_interfaces(&mut self) {
        let Some(snap) = self.snapshot.as_ref() else {
            return;
        };
        if let Some(prev) = self.interfaces_src.as_ref() {
            // order matters for the chart, so compare entry by entry
            if Arc::ptr_eq(prev, snap) || prev.per_interface.iter().eq(snap.per_interface.iter()) {
                self.interfaces_src = Some(snap.clone());
                return;
            }
        }
        self.interfaces = interface_summaries(&snap.per_interface);
        self.interfaces_src = Some(snap.clone());
        self.interface_rebuilds += 1;
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_deref()
    }

    pub fn history(&self) -> Option<&HistoryWindow> {
        self.history.as_deref()
    }

    pub fn processes(&self) -> &[ProcessRow] {
        self.processes.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn interfaces(&self) -> &[InterfaceSummary] {
        &self.interfaces
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme_checked(&mut self, checked: bool) {
        self.theme = Theme::from_checked(checked);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(sent: u64, recv: u64) -> NetworkCounters {
        NetworkCounters {
            bytes_sent: sent,
            bytes_recv: recv,
        }
    }

    fn snap_with(ifaces: &[(&str, u64, u64)]) -> Arc<Snapshot> {
        Arc::new(Snapshot {
            per_interface: ifaces
                .iter()
                .map(|(n, s, r)| (n.to_string(), counters(*s, *r)))
                .collect(),
            ..Snapshot::default()
        })
    }

    #[test]
    fn five_mib_is_five_mb() {
        assert_eq!(bytes_to_mb(5_242_880), 5);
        assert_eq!(bytes_to_mb(0), 0);
        // 1.5 MiB rounds half up
        assert_eq!(bytes_to_mb(1_572_864), 2);
        assert_eq!(bytes_to_mb(1_000_000), 1);
    }

    #[test]
    fn summaries_follow_interface_map() {
        let s = snap_with(&[("eth0", 5_242_880, 10_485_760), ("lo", 0, 0)]);
        let out = interface_summaries(&s.per_interface);
        assert_eq!(
            out,
            vec![
                InterfaceSummary { name: "eth0".into(), sent_mb: 5, recv_mb: 10 },
                InterfaceSummary { name: "lo".into(), sent_mb: 0, recv_mb: 0 },
            ]
        );
    }

    #[test]
    fn summaries_keep_service_order() {
        let s = snap_with(&[("wlan0", 0, 0), ("eth0", 0, 0), ("lo", 0, 0)]);
        let names: Vec<_> = interface_summaries(&s.per_interface)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["wlan0", "eth0", "lo"]);
    }

    #[test]
    fn sync_replaces_state_wholesale() {
        let slots = Slots::default();
        let cancel = CancellationToken::new();
        let mut d = Dashboard::new(&slots, Theme::Light);
        assert!(d.snapshot().is_none());
        assert!(d.processes().is_empty());

        let snap = Snapshot {
            cpu: 42.5,
            ..Snapshot::default()
        };
        slots.snapshot.publish(1, Arc::new(snap.clone()), &cancel);
        assert!(d.sync());
        assert_eq!(d.snapshot(), Some(&snap));
        assert!(!d.sync());
    }

    #[test]
    fn interface_summary_recomputed_only_on_change() {
        let slots = Slots::default();
        let cancel = CancellationToken::new();
        let mut d = Dashboard::new(&slots, Theme::Light);

        slots.snapshot.publish(1, snap_with(&[("eth0", 1, 1)]), &cancel);
        d.sync();
        assert_eq!(d.interface_rebuilds, 1);

        // new snapshot, same counters
        slots.snapshot.publish(2, snap_with(&[("eth0", 1, 1)]), &cancel);
        d.sync();
        assert_eq!(d.interface_rebuilds, 1);

        slots.snapshot.publish(3, snap_with(&[("eth0", 5_242_880, 1)]), &cancel);
        d.sync();
        assert_eq!(d.interface_rebuilds, 2);
        assert_eq!(d.interfaces()[0].sent_mb, 5);

        // same counters, new order
        slots.snapshot.publish(4, snap_with(&[("lo", 0, 0), ("eth0", 5_242_880, 1)]), &cancel);
        d.sync();
        slots.snapshot.publish(5, snap_with(&[("eth0", 5_242_880, 1), ("lo", 0, 0)]), &cancel);
        d.sync();
        assert_eq!(d.interface_rebuilds, 4);
        assert_eq!(d.interfaces()[0].name, "eth0");
    }

    #[test]
    fn theme_checkbox_round_trip() {
        let slots = Slots::default();
        let mut d = Dashboard::new(&slots, Theme::Light);
        d.set_theme_checked(true);
        assert_eq!(d.theme(), Theme::Dark);
        d.set_theme_checked(false);
        assert_eq!(d.theme(), Theme::Light);
        d.toggle_theme();
        assert_eq!(d.theme(), Theme::Dark);
    }
}
