//! Types that mirror the metrics service's JSON schema.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DriveUsage {
    pub mount: String,
    pub used_mb: f64,
    pub total_mb: f64,
    pub percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_mb: Option<f64>,
}

// cumulative totals as reported by the service, not deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct NetworkCounters {
    #[serde(default)]
    pub bytes_sent: u64,
    #[serde(default)]
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Snapshot {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    /// MB/s across all interfaces.
    pub network: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Epoch seconds.
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub per_drive: Vec<DriveUsage>,
    /// Keeps the service's key order; the interface chart follows it.
    #[serde(default)]
    pub per_interface: IndexMap<String, NetworkCounters>,
}

impl Snapshot {
    /// The alert text, if the service attached a non-empty one.
    pub fn alert(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        let mut seen = HashSet::with_capacity(self.per_drive.len());
        for d in &self.per_drive {
            if !seen.insert(d.mount.as_str()) {
                return Err(FetchError::Invalid(format!(
                    "duplicate drive mount {:?}",
                    d.mount
                )));
            }
        }
        Ok(())
    }
}

/// Parallel series aligned by index to `timestamps`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HistoryWindow {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub cpu: Vec<f64>,
    #[serde(default)]
    pub memory: Vec<f64>,
    #[serde(default)]
    pub disk: Vec<f64>,
    #[serde(default)]
    pub network: Vec<f64>,
}

impl HistoryWindow {
    /// Length of the prefix that every series covers.
    pub fn aligned_len(&self) -> usize {
        [
            self.timestamps.len(),
            self.cpu.len(),
            self.memory.len(),
            self.disk.len(),
            self.network.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.timestamps.len();
        self.cpu.len() == n && self.memory.len() == n && self.disk.len() == n && self.network.len() == n
    }

    /// Borrow all five series truncated to the common length.
    pub fn aligned(&self) -> AlignedHistory<'_> {
        let n = self.aligned_len();
        AlignedHistory {
            timestamps: &self.timestamps[..n],
            cpu: &self.cpu[..n],
            memory: &self.memory[..n],
            disk: &self.disk[..n],
            network: &self.network[..n],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlignedHistory<'a> {
    pub timestamps: &'a [String],
    pub cpu: &'a [f64],
    pub memory: &'a [f64],
    pub disk: &'a [f64],
    pub network: &'a [f64],
}

impl AlignedHistory<'_> {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessRow {
    pub pid: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

pub fn validate_processes(rows: &[ProcessRow]) -> Result<(), FetchError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for r in rows {
        if !seen.insert(r.pid) {
            return Err(FetchError::Invalid(format!("duplicate pid {}", r.pid)));
        }
    }
    Ok(())
}
