//! Runtime configuration handed over by the host page as JSON.

use crate::error::ConfigError;
use crate::services::transport::StatusPolicy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    /// Prefix for every resource URL; empty means same origin
    pub api_base_url: String,
    pub container_selector: String,
    /// Looked up inside the container
    pub content_selector: String,
    /// Looked up in the whole document
    pub title_selector: String,
    pub status_policy: StatusPolicy,
    pub log_level: String,
    pub page: PageSettings,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            container_selector: ".content-wrapper".to_string(),
            content_selector: ".content".to_string(),
            title_selector: ".content-title".to_string(),
            status_policy: StatusPolicy::default(),
            log_level: "info".to_string(),
            page: PageSettings::default(),
        }
    }
}

impl FinanceConfig {
    /// Parse the host-supplied JSON; `None` or a blank string yields the defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => Ok(serde_json::from_str(json)?),
        }
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

/// Texts and behaviour switches of the transactions page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub placeholder_title: String,
    pub confirm_remove_account: String,
    pub confirm_remove_transaction: String,
    /// Blank the page as soon as an account deletion is confirmed, before
    /// the server has answered. When false the page is cleared only after
    /// a successful deletion.
    pub clear_on_confirmed_account_delete: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            placeholder_title: "Название счёта".to_string(),
            confirm_remove_account: "Вы действительно хотите удалить счёт?".to_string(),
            confirm_remove_transaction: "Вы действительно хотите удалить эту транзакцию?"
                .to_string(),
            clear_on_confirmed_account_delete: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_config_uses_defaults() {
        assert_eq!(FinanceConfig::from_json(None).unwrap(), FinanceConfig::default());
        assert_eq!(FinanceConfig::from_json(Some("  ")).unwrap(), FinanceConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = FinanceConfig::from_json(Some(
            r#"{
                "api_base_url": "https://bank.example",
                "status_policy": "contains_twenty",
                "page": { "clear_on_confirmed_account_delete": false }
            }"#,
        ))
        .unwrap();

        assert_eq!(config.api_base_url, "https://bank.example");
        assert_eq!(config.status_policy, StatusPolicy::ContainsTwenty);
        assert!(!config.page.clear_on_confirmed_account_delete);
        assert_eq!(config.page.placeholder_title, "Название счёта");
        assert_eq!(config.content_selector, ".content");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            FinanceConfig::from_json(Some("{not json")),
            Err(ConfigError::Parse(_))
        ));

        let config = FinanceConfig {
            log_level: "loud".to_string(),
            ..FinanceConfig::default()
        };
        assert!(matches!(config.log_level_filter(), Err(ConfigError::LogLevel(_))));
        assert_eq!(
            FinanceConfig::default().log_level_filter().unwrap(),
            LevelFilter::Info
        );
    }
}
