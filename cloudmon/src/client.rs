//! HTTP client for the metrics service: one GET per endpoint, decoded into the
//! strict types in [`crate::types`].

use std::time::Duration;

use clap::ValueEnum;
use reqwest::{Certificate, Client};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::types::{validate_processes, HistoryWindow, ProcessRow, Snapshot};

pub const METRICS_PATH: &str = "metrics";
pub const HISTORY_PATH: &str = "metrics/history";
pub const PROCESSES_PATH: &str = "processes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
}

impl SortKey {
    pub fn as_query(self) -> &'static str {
        match self {
            SortKey::Cpu => "cpu",
            SortKey::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: Client,
    base: Url,
}

impl MetricsClient {
    /// `tls_ca` is a PEM bundle added to the trusted roots for https origins.
    pub fn new(base: &str, timeout: Duration, tls_ca: Option<&[u8]>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(pem) = tls_ca {
            builder = builder.add_root_certificate(Certificate::from_pem(pem)?);
        }
        Ok(Self {
            http: builder.build()?,
            base: normalize_base(base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn snapshot_url(&self) -> Result<Url, FetchError> {
        Ok(self.base.join(METRICS_PATH)?)
    }

    pub fn history_url(&self, points: usize) -> Result<Url, FetchError> {
        let mut u = self.base.join(HISTORY_PATH)?;
        u.query_pairs_mut().append_pair("points", &points.to_string());
        Ok(u)
    }

    pub fn processes_url(&self, n: usize, sort: SortKey) -> Result<Url, FetchError> {
        let mut u = self.base.join(PROCESSES_PATH)?;
        u.query_pairs_mut()
            .append_pair("n", &n.to_string())
            .append_pair("sort", sort.as_query());
        Ok(u)
    }

    pub async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let snap: Snapshot = self.get_json(self.snapshot_url()?).await?;
        snap.validate()?;
        Ok(snap)
    }

    pub async fn fetch_history(&self, points: usize) -> Result<HistoryWindow, FetchError> {
        self.get_json(self.history_url(points)?).await
    }

    pub async fn fetch_processes(
        &self,
        n: usize,
        sort: SortKey,
    ) -> Result<Vec<ProcessRow>, FetchError> {
        let rows: Vec<ProcessRow> = self.get_json(self.processes_url(n, sort)?).await?;
        validate_processes(&rows)?;
        Ok(rows)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// Url::join drops the last path segment unless it ends in '/'
fn normalize_base(base: &str) -> Result<Url, FetchError> {
    let mut u = Url::parse(base)?;
    if !u.path().ends_with('/') {
        let p = format!("{}/", u.path());
        u.set_path(&p);
    }
    u.set_query(None);
    Ok(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> MetricsClient {
        MetricsClient::new(base, Duration::from_secs(1), None).unwrap()
    }

    #[test]
    fn endpoint_paths_match_service() {
        let c = client("http://127.0.0.1:5000");
        assert_eq!(c.snapshot_url().unwrap().as_str(), "http://127.0.0.1:5000/metrics");
        assert_eq!(
            c.history_url(60).unwrap().as_str(),
            "http://127.0.0.1:5000/metrics/history?points=60"
        );
        assert_eq!(
            c.processes_url(6, SortKey::Cpu).unwrap().as_str(),
            "http://127.0.0.1:5000/processes?n=6&sort=cpu"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let c = client("https://example.com/monitor");
        assert_eq!(
            c.snapshot_url().unwrap().as_str(),
            "https://example.com/monitor/metrics"
        );
        let c = client("https://example.com/monitor/");
        assert_eq!(
            c.processes_url(3, SortKey::Memory).unwrap().as_str(),
            "https://example.com/monitor/processes?n=3&sort=memory"
        );
    }

    #[test]
    fn rejects_garbage_base() {
        assert!(matches!(
            MetricsClient::new("not a url", Duration::from_secs(1), None),
            Err(FetchError::Url(_))
        ));
    }
}
