//! playctl-osc/src/config.rs
//!
//! Listener configuration. The host keeps it in a JSON file whose keys are
//! either plain values or typed entries (`{"type": "number", "value": 9001}`);
//! both spellings are accepted. Nothing here ever writes the file back.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{OscError, Result};

pub const DEFAULT_PORT: u16 = 9001;
pub const DEFAULT_PREFIX: &str = "volumio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OscConfig {
    pub osc_udp_local_port: u16,
    pub osc_body_prefix: String,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            osc_udp_local_port: DEFAULT_PORT,
            osc_body_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// A partial configuration change, e.g. what a settings page submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub osc_udp_local_port: Option<u16>,
    #[serde(default)]
    pub osc_body_prefix: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigEntry<T> {
    Typed { value: T },
    Plain(T),
}

impl<T> ConfigEntry<T> {
    fn into_value(self) -> T {
        match self {
            ConfigEntry::Typed { value } => value,
            ConfigEntry::Plain(v) => v,
        }
    }
}

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    osc_udp_local_port: Option<ConfigEntry<u16>>,
    #[serde(default)]
    osc_body_prefix: Option<ConfigEntry<String>>,
}

impl OscConfig {
    pub fn new(port: u16, prefix: &str) -> Result<Self> {
        let cfg = Self {
            osc_udp_local_port: port,
            osc_body_prefix: normalize_prefix(prefix),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// `<config dir>/playctl/config.json`, e.g. `~/.config/playctl/config.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("playctl").join("config.json"))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)
            .map_err(|e| OscError::Config(format!("JSON parse error: {e}")))?;

        let mut cfg = OscConfig::default();
        if let Some(port) = raw.osc_udp_local_port {
            cfg.osc_udp_local_port = port.into_value();
        }
        if let Some(prefix) = raw.osc_body_prefix {
            cfg.osc_body_prefix = normalize_prefix(&prefix.into_value());
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let text = fs::read_to_string(p).map_err(|e| {
            OscError::Config(format!("Could not read {}: {e}", p.display()))
        })?;
        Self::from_json_str(&text).map_err(|e| match e {
            OscError::Config(msg) => OscError::Config(format!("{}: {msg}", p.display())),
            other => other,
        })
    }

    /// Like `load`, but a file that does not exist yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        if !p.exists() {
            tracing::debug!("No config at {}, using defaults", p.display());
            return Ok(Self::default());
        }
        Self::load(p)
    }

    pub fn validate(&self) -> Result<()> {
        if self.osc_body_prefix.is_empty() {
            return Err(OscError::Config("osc_body_prefix must not be empty".into()));
        }
        if self.osc_body_prefix.contains('/') {
            return Err(OscError::Config(format!(
                "osc_body_prefix must be a single path segment, got '{}'",
                self.osc_body_prefix
            )));
        }
        Ok(())
    }

    /// Merge `update` into a copy of this config. `self` is left untouched if
    /// the result does not validate.
    pub fn apply(&self, update: &ConfigUpdate) -> Result<Self> {
        let mut next = self.clone();
        if let Some(port) = update.osc_udp_local_port {
            next.osc_udp_local_port = port;
        }
        if let Some(prefix) = &update.osc_body_prefix {
            next.osc_body_prefix = normalize_prefix(prefix);
        }
        next.validate()?;
        Ok(next)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim();
    trimmed.strip_prefix('/').unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_values() {
        let cfg = OscConfig::from_json_str(
            r#"{"osc_udp_local_port": 7000, "osc_body_prefix": "vol"}"#,
        ).unwrap();
        assert_eq!(cfg.osc_udp_local_port, 7000);
        assert_eq!(cfg.osc_body_prefix, "vol");
    }

    #[test]
    fn test_typed_entries() {
        let cfg = OscConfig::from_json_str(r#"{
            "osc_udp_local_port": {"type": "number", "value": 7001},
            "osc_body_prefix": {"type": "string", "value": "/vol"}
        }"#).unwrap();
        assert_eq!(cfg.osc_udp_local_port, 7001);
        assert_eq!(cfg.osc_body_prefix, "vol");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let cfg = OscConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, OscConfig::default());
    }

    #[test]
    fn test_rejects_bad_prefix() {
        assert!(matches!(OscConfig::new(9000, ""), Err(OscError::Config(_))));
        assert!(matches!(OscConfig::new(9000, "a/b"), Err(OscError::Config(_))));
        assert_eq!(OscConfig::new(9000, "/vol").unwrap().osc_body_prefix, "vol");
    }

    #[test]
    fn test_rejects_out_of_range_port() {
        let res = OscConfig::from_json_str(r#"{"osc_udp_local_port": 70000}"#);
        assert!(matches!(res, Err(OscError::Config(_))));
    }

    #[test]
    fn test_apply_update() {
        let cfg = OscConfig::default();
        let next = cfg.apply(&ConfigUpdate {
            osc_udp_local_port: Some(8123),
            osc_body_prefix: None,
        }).unwrap();
        assert_eq!(next.osc_udp_local_port, 8123);
        assert_eq!(next.osc_body_prefix, DEFAULT_PREFIX);

        let bad = cfg.apply(&ConfigUpdate {
            osc_udp_local_port: None,
            osc_body_prefix: Some(String::new()),
        });
        assert!(bad.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"osc_udp_local_port": 9100}}"#).unwrap();
        let cfg = OscConfig::load(file.path()).unwrap();
        assert_eq!(cfg.osc_udp_local_port, 9100);
        assert_eq!(cfg.osc_body_prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn test_load_malformed_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        match OscConfig::load(file.path()) {
            Err(OscError::Config(msg)) => {
                assert!(msg.contains(&file.path().display().to_string()));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = OscConfig::load_or_default(dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, OscConfig::default());
    }
}
