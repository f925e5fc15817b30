use crate::detection::DetectionConfig;
use serde::{Deserialize, Serialize};

/// App configuration. Everything is optional; the only value the core
/// consumes is the detection API key (and an endpoint override for
/// self-hosted deployments).
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Detection client configuration, with the `ROBOFLOW_API_KEY`
    /// environment variable as the fallback when the file omits the key.
    pub fn detection(&self) -> DetectionConfig {
        let mut config = DetectionConfig::new(self.api_key.clone());
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        config
    }
}
