//! CLI arg parsing tests for cloudmon
use assert_cmd::Command;

#[test]
fn test_help_mentions_short_and_long_flags() {
    let output = Command::cargo_bin("cloudmon")
        .unwrap()
        .arg("--help")
        .output()
        .expect("run cloudmon --help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for flag in ["--tls-ca", "-t", "--profile", "-P", "--snapshot-ms", "--dry-run", "--theme"] {
        assert!(text.contains(flag), "help text missing {flag}\n{text}");
    }
}

#[test]
fn test_dry_run_prints_endpoints_for_default_target() {
    let td = tempfile::tempdir().unwrap();
    let output = Command::cargo_bin("cloudmon")
        .unwrap()
        .env("XDG_CONFIG_HOME", td.path())
        .arg("--dry-run")
        .output()
        .expect("run cloudmon --dry-run");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("http://127.0.0.1:5000/metrics\n"), "{text}");
    assert!(text.contains("http://127.0.0.1:5000/metrics/history?points=60"), "{text}");
    assert!(text.contains("http://127.0.0.1:5000/processes?n=6&sort=cpu"), "{text}");
}

#[test]
fn test_dry_run_honours_query_flags() {
    let td = tempfile::tempdir().unwrap();
    let output = Command::cargo_bin("cloudmon")
        .unwrap()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--dry-run", "--top", "10", "--sort", "memory", "--history-points", "120"])
        .arg("https://mon.example.com/api")
        .output()
        .expect("run cloudmon");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("https://mon.example.com/api/metrics/history?points=120"), "{text}");
    assert!(text.contains("https://mon.example.com/api/processes?n=10&sort=memory"), "{text}");
}

#[test]
fn test_bad_url_fails() {
    let td = tempfile::tempdir().unwrap();
    Command::cargo_bin("cloudmon")
        .unwrap()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--dry-run", "not a url"])
        .assert()
        .failure();
}

#[test]
fn test_zero_interval_rejected() {
    Command::cargo_bin("cloudmon")
        .unwrap()
        .args(["--dry-run", "--history-ms", "0"])
        .assert()
        .failure();
}
