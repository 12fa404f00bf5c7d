use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const CURRENCY_ENV: &str = "TRIP_PLANNER_CURRENCY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_currency: String,
    pub default_budget: f64,
    pub generation_delay_ms: u64,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: "USD".into(),
            default_budget: 1000.0,
            generation_delay_ms: 2000, // 生成APIの待ち時間を模擬
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("設定を読み込み: {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlannerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("trip-planner").join("config.json"))
    }

    pub fn currency(&self) -> String {
        // 環境変数を優先
        if let Ok(currency) = std::env::var(CURRENCY_ENV) {
            if !currency.trim().is_empty() {
                return currency.trim().to_uppercase();
            }
        }

        self.default_currency.clone()
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn set_currency(&mut self, currency: &str) -> Result<()> {
        let currency = currency.trim().to_uppercase();
        if currency.is_empty() {
            return Err(PlannerError::Config("通貨コードが空です".into()));
        }
        self.default_currency = currency;
        Ok(())
    }

    pub fn set_budget(&mut self, budget: f64) -> Result<()> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(PlannerError::Config(format!("予算が不正です: {}", budget)));
        }
        self.default_budget = budget;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.generation_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set_currency("jpy").unwrap();
        config.set_budget(50000.0).unwrap();
        config.generation_delay_ms = 10;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_currency, "JPY");
        assert_eq!(loaded.default_budget, 50000.0);
        assert_eq!(loaded.generation_delay_ms, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_currency":"EUR"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_currency, "EUR");
        assert_eq!(loaded.generation_delay_ms, 2000);
    }

    #[test]
    fn test_rejects_negative_budget() {
        let mut config = Config::default();
        assert!(config.set_budget(-5.0).is_err());
        assert!(config.set_currency("  ").is_err());
    }
}
