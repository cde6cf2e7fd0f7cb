//! Council composition from TOML (`[council]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [council]
//! members = [
//!     "openai/gpt-oss-20b:free",
//!     "google/gemma-3-27b-it:free",
//!     "meta-llama/llama-3.3-70b-instruct:free",
//! ]
//! chairman = "google/gemini-3-pro-preview"
//! response_quorum = 2
//! ```

use council_application::config::DEFAULT_RESPONSE_QUORUM;
use council_domain::{CouncilRoster, ModelId};
use serde::{Deserialize, Serialize};

/// Council composition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Member models; empty means the stock lineup
    pub members: Vec<String>,
    /// Chairman model for synthesis; absent means the stock chairman
    pub chairman: Option<String>,
    /// Minimum usable first-stage responses required to continue
    pub response_quorum: usize,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            chairman: None,
            response_quorum: DEFAULT_RESPONSE_QUORUM,
        }
    }
}

impl FileCouncilConfig {
    /// Resolve the configured roster, falling back to the stock lineup
    pub fn to_roster(&self) -> CouncilRoster {
        let stock = CouncilRoster::stock();
        let members: Vec<ModelId> = if self.members.is_empty() {
            stock.members().to_vec()
        } else {
            self.members
                .iter()
                .map(|m| ModelId::from(m.as_str()))
                .collect()
        };
        let chairman = match &self.chairman {
            Some(name) => ModelId::from(name.as_str()),
            None => stock.chairman().clone(),
        };
        CouncilRoster::new(members, chairman)
    }
}
