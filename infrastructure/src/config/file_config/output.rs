//! Output settings from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Terminal output settings
///
/// # Example
///
/// ```toml
/// [output]
/// format = "full"    # or "final", "json"
/// color = true
/// progress = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format: "full", "final", or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
    /// Show per-stage progress while the council runs
    pub progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_deserialize() {
        let toml_str = r#"
[output]
format = "json"
color = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert!(!config.output.color);
        assert!(config.output.progress);
    }
}
