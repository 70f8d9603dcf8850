use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Configuration for enabling/disabling individual checks plus per-check
/// options and fixit settings.
///
/// Passed explicitly into every check at construction; there is no global
/// registry. Options are looked up by fully qualified name
/// (`<check>-<option>`), the qualification being the caller's job.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Per-check enablement; absent checks are enabled.
    pub checks: HashMap<String, bool>,
    /// Qualified boolean options; absent options are unset.
    pub options: HashMap<String, bool>,
    /// Startup fixit bitmask per check; absent checks start with no fixits.
    pub fixits: HashMap<String, u32>,
    /// Process-wide override that enables every fixit of every check.
    pub all_fixits_enabled: bool,
}

impl CheckConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn check_enabled(&self, check_name: &str) -> bool {
        self.checks.get(check_name).copied().unwrap_or(true)
    }

    pub fn is_option_set(&self, qualified_name: &str) -> bool {
        self.options.get(qualified_name).copied().unwrap_or(false)
    }

    pub fn fixit_mask(&self, check_name: &str) -> u32 {
        self.fixits.get(check_name).copied().unwrap_or(0)
    }
}
