//! Storage settings from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Conversation persistence settings
///
/// # Example
///
/// ```toml
/// [storage]
/// data_dir = "~/council-data"
/// persist = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Where conversations live; absent means the platform data dir
    pub data_dir: Option<String>,
    /// Whether turns are written to disk at all
    pub persist: bool,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            persist: true,
        }
    }
}

impl FileStorageConfig {
    /// Resolve the data directory this store writes under
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("llm-council"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = FileStorageConfig::default();
        assert!(config.persist);
        assert!(
            config
                .resolve_data_dir()
                .to_string_lossy()
                .contains("llm-council")
        );
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let toml_str = r#"
[storage]
data_dir = "/tmp/council-test"
persist = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.storage.resolve_data_dir(),
            PathBuf::from("/tmp/council-test")
        );
        assert!(!config.storage.persist);
    }
}
