use crate::error::Result;
use crate::io::atomic_write;
use crate::paths::{self, DEFAULT_AGENTS_DIR, DEFAULT_RULES_DIR};
use crate::policy::{CategoryOverride, Policy};
use crate::types::TaskCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PolicyConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub categories: BTreeMap<TaskCategory, CategoryOverride>,
}

impl PolicyConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Contents of `steer.yaml`. Every field is optional; a workspace without
/// the file gets [`Config::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,
    #[serde(default = "default_agents_dir")]
    pub agents_dir: PathBuf,
    #[serde(default, skip_serializing_if = "PolicyConfig::is_empty")]
    pub policy: PolicyConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RULES_DIR)
}

fn default_agents_dir() -> PathBuf {
    PathBuf::from(DEFAULT_AGENTS_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            rules_dir: default_rules_dir(),
            agents_dir: default_agents_dir(),
            policy: PolicyConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        atomic_write(&paths::config_path(root), data.as_bytes())
    }

    pub fn rules_root(&self, root: &Path) -> PathBuf {
        root.join(&self.rules_dir)
    }

    pub fn agents_root(&self, root: &Path) -> PathBuf {
        root.join(&self.agents_dir)
    }

    /// Built-in policy with this config's overrides applied.
    pub fn policy(&self) -> Policy {
        Policy::with_overrides(&self.policy.categories)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut push = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message })
        };

        if self.version != CONFIG_VERSION {
            push(
                WarnLevel::Error,
                format!(
                    "unsupported config version {} (expected {CONFIG_VERSION})",
                    self.version
                ),
            );
        }

        if self.rules_dir == self.agents_dir {
            push(
                WarnLevel::Error,
                format!(
                    "rules_dir and agents_dir both point at '{}'",
                    self.rules_dir.display()
                ),
            );
        }

        for (category, ov) in &self.policy.categories {
            if let Some(topics) = &ov.topics {
                let mut seen = HashSet::new();
                for topic in topics {
                    if topic.trim().is_empty() {
                        push(
                            WarnLevel::Warning,
                            format!("blank topic for {category} can never match a rule file"),
                        );
                    }
                    if !seen.insert(topic.trim()) {
                        push(
                            WarnLevel::Warning,
                            format!("topic '{topic}' listed more than once for {category}"),
                        );
                    }
                }
            }

            if let Some(keywords) = &ov.keywords {
                if keywords.iter().any(|k| k.trim().is_empty()) {
                    push(
                        WarnLevel::Warning,
                        format!("blank keyword in {category} is ignored"),
                    );
                }
                if keywords.iter().all(|k| k.trim().is_empty()) {
                    push(
                        WarnLevel::Warning,
                        format!("{category} has no keywords; no agent will ever be selected for it"),
                    );
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
