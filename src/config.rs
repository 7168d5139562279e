use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GRAMMAR_ENDPOINT: &str = "https://api.languagetool.org/v2/check";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Master switch; when false the engine reports no matches at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Language hint sent to the grammar service ("auto" lets it detect).
    #[serde(default = "default_language")]
    pub language: String,

    /// Translation target, or "none" to disable translation.
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Apply the top suggestion of every match without asking.
    #[serde(default)]
    pub auto_replace: bool,

    #[serde(default = "default_grammar_endpoint")]
    pub grammar_endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Regexes matched against a match's rule id or message; hits are
    /// excluded from every output.
    #[serde(default)]
    pub ignore_rules: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    crate::services::translate::NO_TRANSLATION.to_string()
}

fn default_grammar_endpoint() -> String {
    DEFAULT_GRAMMAR_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            language: default_language(),
            target_language: default_target_language(),
            auto_replace: false,
            grammar_endpoint: default_grammar_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_suggestions: default_max_suggestions(),
            ignore_rules: Vec::new(),
        }
    }
}

/// CLI-provided overrides applied on top of the file-based configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub target_language: Option<String>,
    pub grammar_endpoint: Option<String>,
    pub ignore_rules: Vec<String>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".gramfix.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(language) = overrides.language {
            config.language = language;
        }
        if let Some(target) = overrides.target_language {
            config.target_language = target;
        }
        if let Some(endpoint) = overrides.grammar_endpoint {
            config.grammar_endpoint = endpoint;
        }
        config.ignore_rules.extend(overrides.ignore_rules);

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        self.enabled = other.enabled;
        self.auto_replace = other.auto_replace;
        if other.language != default_language() {
            self.language = other.language;
        }
        if other.target_language != default_target_language() {
            self.target_language = other.target_language;
        }
        if other.grammar_endpoint != default_grammar_endpoint() {
            self.grammar_endpoint = other.grammar_endpoint;
        }
        if other.timeout_secs != default_timeout_secs() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.max_suggestions != default_max_suggestions() {
            self.max_suggestions = other.max_suggestions;
        }
        if !other.ignore_rules.is_empty() {
            self.ignore_rules = other.ignore_rules;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gramfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
