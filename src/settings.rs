//! Process configuration, read from `PIPELINE_*` environment variables.

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::codec::Codec;

const ENV_PREFIX: &str = "PIPELINE";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Logical channel messages are published on and consumed from
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Envelope codec (json, bitcode)
    #[serde(default)]
    pub codec: Codec,

    /// Address the producer HTTP server binds to
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// How long a consumer poll waits for a frame, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_channel() -> String {
    "messages".to_string()
}

fn default_http_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            codec: Codec::default(),
            http_addr: default_http_addr(),
            poll_interval_ms: default_poll_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl PipelineConfig {
    /// Load from the process environment, e.g. `PIPELINE_CHANNEL=orders`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder().add_source(env).build()?;
        config.try_deserialize()
    }

    #[cfg(feature = "bus")]
    pub fn publisher_config(&self) -> crate::publisher::PublisherConfig {
        crate::publisher::PublisherConfig::new(self.channel.clone()).with_codec(self.codec)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
