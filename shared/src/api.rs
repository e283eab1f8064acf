//! Client-side API endpoint configuration

use serde::{Deserialize, Serialize};

/// Base URL used when none is supplied at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Collection path of the inventory resource
pub const MEDICATIONS_PATH: &str = "medicamentos";

/// Where the dashboard finds the inventory API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Use the supplied base URL, falling back to the local default when
    /// absent or blank
    pub fn from_base_url(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self {
                base_url: url.trim_end_matches('/').to_string(),
            },
            None => Self::default(),
        }
    }

    pub fn medications_url(&self) -> String {
        format!("{}/{}", self.base_url, MEDICATIONS_PATH)
    }

    pub fn medication_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, MEDICATIONS_PATH, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = ApiConfig::from_base_url(None);
        assert_eq!(config.medications_url(), "http://localhost:3001/api/medicamentos");
        assert_eq!(ApiConfig::from_base_url(Some("  ")), config);
    }

    #[test]
    fn test_supplied_base_url_trims_trailing_slash() {
        let config = ApiConfig::from_base_url(Some("https://pharma.example.com/api/"));
        assert_eq!(
            config.medication_url("abc"),
            "https://pharma.example.com/api/medicamentos/abc"
        );
    }
}
