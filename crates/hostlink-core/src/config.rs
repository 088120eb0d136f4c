// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Settings read once before onStart. Never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Shared-library file name appended to the native library directory to
    /// form the executable path reported to the engine.
    pub engine_library: String,
    /// Cache path reported when the host exposes no cache directory.
    pub cache_dir_sentinel: String,
    /// Request fullscreen/immersive presentation during onStart.
    pub immersive: bool,
    /// Default tracing filter directive (overridden by `RUST_LOG`).
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            engine_library: "libengine.so".into(),
            cache_dir_sentinel: "none".into(),
            immersive: true,
            log_filter: "info".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Load from a JSON file, falling back to defaults if it is missing or
    /// unusable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using default bridge config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.engine_library.trim().is_empty() {
            return Err(BridgeError::Config("engine_library is empty".into()));
        }
        if self.engine_library.contains(['/', '\\']) {
            return Err(BridgeError::Config(format!(
                "engine_library `{}` must be a bare file name",
                self.engine_library
            )));
        }
        if self.cache_dir_sentinel.is_empty() {
            return Err(BridgeError::Config("cache_dir_sentinel is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.engine_library, "libengine.so");
        assert_eq!(config.cache_dir_sentinel, "none");
        assert!(config.immersive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BridgeConfig::from_json_str(r#"{ "immersive": false }"#).unwrap();
        assert!(!config.immersive);
        assert_eq!(config.engine_library, "libengine.so");
    }

    #[test]
    fn library_with_path_rejected() {
        let err = BridgeConfig::from_json_str(r#"{ "engine_library": "lib/libgame.so" }"#)
            .unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn empty_sentinel_rejected() {
        let config = BridgeConfig {
            cache_dir_sentinel: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "engine_library": "libgame.so", "log_filter": "debug" }}"#).unwrap();
        let config = BridgeConfig::load(file.path()).unwrap();
        assert_eq!(config.engine_library, "libgame.so");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn malformed_file_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = BridgeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, BridgeError::Serialization(_)));
    }
}
