use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::advice::ollama;
use crate::provider::Provider;

pub const DEFAULT_GREETING: &str =
    "أهلاً بك في E4All Academy! كيف يمكنني مساعدتك في اختيار الدورة المناسبة اليوم؟";
pub const DEFAULT_FALLBACK: &str = "عذراً، حدث خطأ ما. يرجى المحاولة مرة أخرى.";

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub ollama_url: Option<String>,
    pub greeting: Option<String>,
    pub fallback_text: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            provider: Some(Provider::Gemini.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("e4all").join("config.json"))
    }

    pub fn provider(&self) -> Result<Provider> {
        match self.provider.as_deref() {
            None => Ok(Provider::Gemini),
            Some(name) => {
                Provider::parse(name).ok_or_else(|| anyhow!("unknown provider '{name}' in config"))
            }
        }
    }

    pub fn model_for(&self, provider: Provider) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string())
    }

    /// Environment variables win over the file
    pub fn gemini_api_key(&self) -> Option<String> {
        API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .or_else(|| self.gemini_api_key.clone())
    }

    pub fn ollama_url(&self) -> &str {
        self.ollama_url.as_deref().unwrap_or(ollama::DEFAULT_URL)
    }

    pub fn greeting(&self) -> &str {
        self.greeting.as_deref().unwrap_or(DEFAULT_GREETING)
    }

    pub fn fallback_text(&self) -> &str {
        self.fallback_text.as_deref().unwrap_or(DEFAULT_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::new());
        assert_eq!(config.provider().unwrap(), Provider::Gemini);
        assert_eq!(config.greeting(), DEFAULT_GREETING);
        assert_eq!(config.fallback_text(), DEFAULT_FALLBACK);
        assert_eq!(config.ollama_url(), "http://localhost:11434");
    }

    #[test]
    fn save_then_load_keeps_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            provider: Some("ollama".into()),
            model: Some("qwen2.5:7b".into()),
            greeting: Some("Welcome!".into()),
            fallback_text: Some("Please try again.".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.provider().unwrap(), Provider::Ollama);
        assert_eq!(loaded.model_for(Provider::Ollama), "qwen2.5:7b");
        assert_eq!(loaded.greeting(), "Welcome!");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "ollama_url": "http://box:11434" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ollama_url(), "http://box:11434");
        assert_eq!(config.provider().unwrap(), Provider::Gemini);
        assert_eq!(config.model_for(Provider::Gemini), "gemini-2.5-flash");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let config = Config {
            provider: Some("carrier-pigeon".into()),
            ..Config::default()
        };
        assert!(config.provider().is_err());
    }
}
