//! Connection profiles: load/save simple JSON mapping of profile name -> { url, tls_ca }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/cloudmon/profiles.json (fallback ~/.config/cloudmon/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("cloudmon")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cloudmon")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(path = %path.display(), "ignoring unreadable profiles file: {e}");
            ProfilesFile::default()
        }),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(path, data)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveProfile {
    /// Use the provided runtime inputs (maybe persisted by the caller). (url, tls_ca)
    Direct(String, Option<String>),
    /// Loaded from existing profile entry (url, tls_ca)
    Loaded(String, Option<String>),
    /// A profile name without URL that is not on file
    Missing(String),
    /// Nothing given; fall back to the default service URL
    Default,
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
    pub tls_ca: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        match (self.profile_name, self.url) {
            (_, Some(u)) => ResolveProfile::Direct(u, self.tls_ca),
            (Some(name), None) => match pf.profiles.get(&name) {
                Some(entry) => ResolveProfile::Loaded(
                    entry.url.clone(),
                    self.tls_ca.or_else(|| entry.tls_ca.clone()),
                ),
                None => ResolveProfile::Missing(name),
            },
            (None, None) => ResolveProfile::Default,
        }
    }
}

impl ProfilesFile {
    /// Record `entry` under `name`. New names are always stored; a differing
    /// existing entry is replaced only when `overwrite` is set.
    /// Returns true if the file needs saving.
    pub fn remember(&mut self, name: &str, entry: ProfileEntry, overwrite: bool) -> bool {
        match self.profiles.get(name) {
            None => {
                self.profiles.insert(name.to_string(), entry);
                true
            }
            Some(existing) if *existing == entry => false,
            Some(_) if overwrite => {
                self.profiles.insert(name.to_string(), entry);
                true
            }
            Some(_) => {
                warn!(profile = name, "profile differs from arguments; pass --save to overwrite");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> ProfileEntry {
        ProfileEntry {
            url: url.into(),
            tls_ca: None,
        }
    }

    #[test]
    fn resolve_paths() {
        let mut pf = ProfilesFile::default();
        pf.profiles.insert("prod".into(), entry("https://prod"));

        let req = |name: Option<&str>, url: Option<&str>| ProfileRequest {
            profile_name: name.map(Into::into),
            url: url.map(Into::into),
            tls_ca: None,
        };
        assert_eq!(
            req(Some("prod"), None).resolve(&pf),
            ResolveProfile::Loaded("https://prod".into(), None)
        );
        assert_eq!(
            req(Some("dev"), None).resolve(&pf),
            ResolveProfile::Missing("dev".into())
        );
        assert_eq!(
            req(Some("prod"), Some("http://x")).resolve(&pf),
            ResolveProfile::Direct("http://x".into(), None)
        );
        assert_eq!(req(None, None).resolve(&pf), ResolveProfile::Default);
    }

    #[test]
    fn remember_only_overwrites_when_asked() {
        let mut pf = ProfilesFile::default();
        assert!(pf.remember("a", entry("http://one"), false));
        assert!(!pf.remember("a", entry("http://one"), false));
        assert!(!pf.remember("a", entry("http://two"), false));
        assert_eq!(pf.profiles["a"].url, "http://one");
        assert!(pf.remember("a", entry("http://two"), true));
        assert_eq!(pf.profiles["a"].url, "http://two");
    }
}
