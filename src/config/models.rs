use crate::constants;
use serde::{Deserialize, Serialize};

/// Policy knobs the compiler reads instead of process-wide state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompilerConfig {
    /// Request-body media types in order of preference
    #[serde(default = "default_content_types")]
    pub content_types: Vec<String>,
    #[serde(default = "default_timeout_secs_value")]
    pub default_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub default_log_level: String,
    #[serde(default = "default_output_format")]
    pub default_output_format: String,
    #[serde(default = "default_output_style")]
    pub default_output_style: String,
    /// Layout entry the command tree starts from
    #[serde(default = "default_start")]
    pub start: String,
}

fn default_content_types() -> Vec<String> {
    vec![constants::CONTENT_TYPE_JSON.to_string()]
}

const fn default_timeout_secs_value() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    constants::DEFAULT_LOG_LEVEL.to_string()
}

fn default_output_format() -> String {
    constants::DEFAULT_OUTPUT_FORMAT.to_string()
}

fn default_output_style() -> String {
    constants::DEFAULT_OUTPUT_STYLE.to_string()
}

fn default_start() -> String {
    constants::DEFAULT_START.to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            content_types: default_content_types(),
            default_timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            default_log_level: default_log_level(),
            default_output_format: default_output_format(),
            default_output_style: default_output_style(),
            start: default_start(),
        }
    }
}

impl CompilerConfig {
    /// Replaces the media-type preference list
    #[must_use]
    pub fn with_content_types<I, S>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_types = content_types.into_iter().map(Into::into).collect();
        self
    }
}
