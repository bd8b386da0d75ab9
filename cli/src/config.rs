use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ServeConfig {
    /// Address the HTTP listener binds to.
    pub bind: String,
    /// Worker threads pulling requests off the listener.
    pub workers: usize,
    pub log_level: String,
    /// Pretty-print response bodies.
    pub pretty: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            workers: 4,
            log_level: "info".to_string(),
            pretty: false,
        }
    }
}

impl ServeConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: ServeConfig = serde_yaml::from_str(text).context("invalid serve config")?;
        if cfg.workers == 0 {
            anyhow::bail!("serve config: workers must be at least 1");
        }
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read serve config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = ServeConfig::from_yaml("bind: 0.0.0.0:9000\n").unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.pretty);
    }

    #[test]
    fn full_config_parses() {
        let cfg =
            ServeConfig::from_yaml("bind: 127.0.0.1:1\nworkers: 2\nlog_level: debug\npretty: true\n")
                .unwrap();
        assert_eq!(
            cfg,
            ServeConfig {
                bind: "127.0.0.1:1".into(),
                workers: 2,
                log_level: "debug".into(),
                pretty: true,
            }
        );
    }

    #[test]
    fn zero_workers_and_unknown_keys_are_rejected() {
        assert!(ServeConfig::from_yaml("workers: 0\n").is_err());
        assert!(ServeConfig::from_yaml("threads: 3\n").is_err());
    }
}
