//! Entry point for the cloudmon TUI. Parses args, resolves the target and runs the App.

use anyhow::{bail, Context};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cloudmon::app::App;
use cloudmon::client::MetricsClient;
use cloudmon::config::{Args, DEFAULT_URL};
use cloudmon::dashboard::{Dashboard, Slots};
use cloudmon::logging::{default_log_path, init_tracing, LogTarget};
use cloudmon::profiles::{load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile};
use cloudmon::ui::footer::FooterInfo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let target = if args.dry_run {
        LogTarget::Stderr
    } else {
        LogTarget::File(args.log_file.clone().unwrap_or_else(default_log_path))
    };
    init_tracing(target)?;

    let (url, tls_ca) = resolve_target(&args)?;
    let pem = match tls_ca.as_deref() {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("reading TLS CA bundle {path}"))?,
        ),
        None => None,
    };
    let client = MetricsClient::new(&url, args.timeout(), pem.as_deref())
        .with_context(|| format!("invalid service URL {url}"))?;
    let settings = args.poll_settings();

    if args.dry_run {
        println!("snapshot:  {}", client.snapshot_url()?);
        println!("history:   {}", client.history_url(settings.history_points)?);
        println!("processes: {}", client.processes_url(settings.top_n, settings.sort)?);
        return Ok(());
    }

    info!(base = %client.base(), ?settings, "starting dashboard");
    let cancel = CancellationToken::new();
    let slots = Slots::default();
    let pollers = slots.start(&client, &settings, &cancel);

    let mut app = App::new(
        Dashboard::new(&slots, args.theme),
        FooterInfo {
            backend: client.base().to_string(),
            snapshot_every: settings.snapshot_every,
        },
    );
    let res = app.run().await;

    cancel.cancel();
    pollers.shutdown().await;
    info!("dashboard closed");
    res
}

/// Resolve URL and CA from the arguments and the profiles file, persisting
/// profile changes the same way on every run.
fn resolve_target(args: &Args) -> anyhow::Result<(String, Option<String>)> {
    let mut profiles = load_profiles();
    let req = ProfileRequest {
        profile_name: args.profile.clone(),
        url: args.url.clone(),
        tls_ca: args.tls_ca.clone(),
    };
    match req.resolve(&profiles) {
        ResolveProfile::Direct(url, tls_ca) => {
            if let Some(name) = args.profile.as_deref() {
                let entry = ProfileEntry {
                    url: url.clone(),
                    tls_ca: tls_ca.clone(),
                };
                if profiles.remember(name, entry, args.save) {
                    if let Err(e) = save_profiles(&profiles) {
                        warn!(profile = name, "could not save profiles: {e}");
                    }
                }
            }
            Ok((url, tls_ca))
        }
        ResolveProfile::Loaded(url, tls_ca) => Ok((url, tls_ca)),
        ResolveProfile::Missing(name) => {
            bail!("profile '{name}' does not exist; pass a URL to create it")
        }
        ResolveProfile::Default => Ok((DEFAULT_URL.to_string(), args.tls_ca.clone())),
    }
}
