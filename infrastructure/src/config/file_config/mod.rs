//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and resolved into domain types at the
//! composition root.

mod council;
mod invoker;
mod output;
mod storage;

pub use council::FileCouncilConfig;
pub use invoker::FileInvokerConfig;
pub use output::FileOutputConfig;
pub use storage::FileStorageConfig;

use council_application::config::{CouncilParams, MIN_RESPONSE_QUORUM};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format names the CLI understands
pub const VALID_OUTPUT_FORMATS: [&str; 3] = ["full", "final", "json"];

/// How serious a configuration problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found while validating a configuration
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `council.members[2]`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council composition
    pub council: FileCouncilConfig,
    /// OpenRouter endpoint and call settings
    pub invoker: FileInvokerConfig,
    /// Conversation persistence settings
    pub storage: FileStorageConfig,
    /// Terminal output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the run unusable; warnings are reported and papered
    /// over with defaults.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (index, member) in self.council.members.iter().enumerate() {
            if member.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    field: format!("council.members[{}]", index),
                    message: "model name cannot be empty".to_string(),
                });
            }
        }

        if let Some(chairman) = &self.council.chairman {
            if chairman.trim().is_empty() {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    field: "council.chairman".to_string(),
                    message: "model name cannot be empty".to_string(),
                });
            }
        }

        if self.council.response_quorum < MIN_RESPONSE_QUORUM {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                field: "council.response_quorum".to_string(),
                message: format!(
                    "a quorum below {} cannot rank anything; raising to {}",
                    MIN_RESPONSE_QUORUM, MIN_RESPONSE_QUORUM
                ),
            });
        }

        if let Some(format) = &self.output.format {
            if !VALID_OUTPUT_FORMATS.contains(&format.to_lowercase().as_str()) {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    field: "output.format".to_string(),
                    message: format!("unknown value '{}', falling back to 'full'", format),
                });
            }
        }

        if self.invoker.timeout_secs == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "invoker.timeout_secs".to_string(),
                message: "timeout must be at least 1 second".to_string(),
            });
        }

        issues
    }

    /// Resolve run parameters from the config
    pub fn to_params(&self) -> CouncilParams {
        CouncilParams::default()
            .with_call_timeout(Duration::from_secs(self.invoker.timeout_secs))
            .with_response_quorum(self.council.response_quorum)
    }
}
