use crate::aggregate::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LEAGUE_ID: u64 = 148_968;

/// Runner and pipeline settings. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Length of the top-scorer ranking.
    pub top_n: usize,
    pub league_id: u64,
    /// Payload file names, relative to the data directory.
    /// `{league_id}` is substituted.
    pub bootstrap_file: String,
    pub details_file: String,
    pub choices_file: String,
    pub transactions_file: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            league_id: DEFAULT_LEAGUE_ID,
            bootstrap_file: "bootstrap-static.json".into(),
            details_file: "league_{league_id}_details.json".into(),
            choices_file: "league_{league_id}_choices.json".into(),
            transactions_file: "league_{league_id}_transactions.json".into(),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Missing keys fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        if config.top_n == 0 {
            anyhow::bail!("top_n must be at least 1 in {}", path.display());
        }
        Ok(config)
    }

    pub fn bootstrap_path(&self) -> String { self.bootstrap_file.clone() }
    pub fn details_path(&self) -> String { self.expand(&self.details_file) }
    pub fn choices_path(&self) -> String { self.expand(&self.choices_file) }
    pub fn transactions_path(&self) -> String { self.expand(&self.transactions_file) }

    fn expand(&self, template: &str) -> String {
        template.replace("{league_id}", &self.league_id.to_string())
    }
}
