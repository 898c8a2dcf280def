//! cloudmon: terminal dashboard for a remote HTTP system metrics service.
//!
//! Three pollers ([`poller`]) fetch the latest snapshot, the history window and
//! the top processes from the service ([`client`]) and publish them into the view
//! model ([`dashboard`]), which the [`ui`] renders.

pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod poller;
pub mod profiles;
pub mod types;
pub mod ui;
