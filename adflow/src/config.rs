//! Configuration types for deployments and client connections.

use crate::errors::{ConfigError, ConnectionError};
use crate::pipeline::MAX_OPERATIONS_PER_CALL;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Maximum operations per bulk mutate call.
    #[serde(default = "default_batch_chunk_size")]
    pub batch_chunk_size: usize,
    /// Default max CPC bid for new ad groups, in micros.
    #[serde(default = "default_cpc_bid_micros")]
    pub default_cpc_bid_micros: i64,
    /// Log unresolved child rows as failures instead of dropping them silently.
    #[serde(default)]
    pub report_unresolved: bool,
    /// Separator between the campaign name and the uniqueness suffix of a
    /// budget name.
    #[serde(default = "default_budget_name_separator")]
    pub budget_name_separator: String,
}

fn default_batch_chunk_size() -> usize {
    MAX_OPERATIONS_PER_CALL
}

fn default_cpc_bid_micros() -> i64 {
    2_000_000
}

fn default_budget_name_separator() -> String {
    " - ".to_string()
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            batch_chunk_size: default_batch_chunk_size(),
            default_cpc_bid_micros: default_cpc_bid_micros(),
            report_unresolved: false,
            budget_name_separator: default_budget_name_separator(),
        }
    }
}

impl DeployConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_chunk_size == 0 || self.batch_chunk_size > MAX_OPERATIONS_PER_CALL {
            return Err(ConfigError::invalid(
                "batch_chunk_size",
                format!("must be between 1 and {MAX_OPERATIONS_PER_CALL}"),
            ));
        }
        if self.default_cpc_bid_micros <= 0 {
            return Err(ConfigError::invalid(
                "default_cpc_bid_micros",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Sets the batch chunk size.
    #[must_use]
    pub fn with_batch_chunk_size(mut self, size: usize) -> Self {
        self.batch_chunk_size = size;
        self
    }

    /// Sets the default ad group bid.
    #[must_use]
    pub fn with_default_cpc_bid_micros(mut self, micros: i64) -> Self {
        self.default_cpc_bid_micros = micros;
        self
    }

    /// Enables or disables reporting of unresolved child rows.
    #[must_use]
    pub fn with_report_unresolved(mut self, enabled: bool) -> Self {
        self.report_unresolved = enabled;
        self
    }
}

/// Connection parameters handed over by the credential collaborator.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Platform developer token.
    #[serde(default)]
    pub developer_token: String,
    /// OAuth client id.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,
    /// OAuth refresh token.
    #[serde(default)]
    pub refresh_token: String,
    /// Manager account the calls are made through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_customer_id: Option<String>,
    /// Target advertiser account, dashes allowed.
    #[serde(default)]
    pub customer_id: String,
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("has_developer_token", &!self.developer_token.is_empty())
            .field("has_client_id", &!self.client_id.is_empty())
            .field("has_client_secret", &!self.client_secret.is_empty())
            .field("has_refresh_token", &!self.refresh_token.is_empty())
            .field("login_customer_id", &self.login_customer_id)
            .field("customer_id", &self.customer_id)
            .finish()
    }
}

impl ClientSettings {
    /// Creates settings with a developer token and target customer.
    #[must_use]
    pub fn new(developer_token: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            developer_token: developer_token.into(),
            customer_id: customer_id.into(),
            ..Self::default()
        }
    }

    /// Sets the OAuth credentials.
    #[must_use]
    pub fn with_oauth(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self.refresh_token = refresh_token.into();
        self
    }

    /// Sets the manager account. Empty values are ignored.
    #[must_use]
    pub fn with_login_customer_id(mut self, login_customer_id: impl Into<String>) -> Self {
        let login_customer_id = login_customer_id.into();
        if !login_customer_id.trim().is_empty() {
            self.login_customer_id = Some(login_customer_id);
        }
        self
    }

    /// Checks that the settings needed to connect are present.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.developer_token.trim().is_empty() {
            return Err(ConnectionError::missing("developer_token"));
        }
        if self.customer_id.trim().is_empty() {
            return Err(ConnectionError::missing("customer_id"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_deploy_config_defaults() {
        let config = DeployConfig::default();
        assert_eq!(config.batch_chunk_size, 500);
        assert_eq!(config.default_cpc_bid_micros, 2_000_000);
        assert!(!config.report_unresolved);
        assert_eq!(config.budget_name_separator, " - ");
    }

    #[test]
    fn test_deploy_config_partial_json() {
        let config = DeployConfig::from_json(r#"{"report_unresolved": true}"#).unwrap();
        assert!(config.report_unresolved);
        assert_eq!(config.batch_chunk_size, 500);
    }

    #[test]
    fn test_deploy_config_rejects_zero_chunk() {
        let err = DeployConfig::from_json(r#"{"batch_chunk_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "batch_chunk_size"));
    }

    #[test]
    fn test_deploy_config_rejects_oversized_chunk() {
        let config = DeployConfig::new().with_batch_chunk_size(501);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deploy_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"batch_chunk_size": 100, "default_cpc_bid_micros": 750000}}"#).unwrap();

        let config = DeployConfig::from_file(file.path()).unwrap();
        assert_eq!(config.batch_chunk_size, 100);
        assert_eq!(config.default_cpc_bid_micros, 750_000);
    }

    #[test]
    fn test_deploy_config_missing_file() {
        let err = DeployConfig::from_file("/nonexistent/adflow.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_client_settings_validate() {
        assert!(ClientSettings::new("token", "123-456-7890").validate().is_ok());
        assert_eq!(
            ClientSettings::new("", "123").validate().unwrap_err(),
            ConnectionError::missing("developer_token")
        );
        assert_eq!(
            ClientSettings::new("token", "  ").validate().unwrap_err(),
            ConnectionError::missing("customer_id")
        );
    }

    #[test]
    fn test_client_settings_ignores_blank_login_customer() {
        let settings = ClientSettings::new("token", "1").with_login_customer_id("");
        assert!(settings.login_customer_id.is_none());
    }

    #[test]
    fn test_client_settings_debug_hides_secrets() {
        let settings = ClientSettings::new("super-secret", "1").with_oauth("id", "shh", "refresh");
        let debug = format!("{settings:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("shh"));
    }
}
