//! JSON file store for council conversations.
//!
//! One conversation per file under `{data_dir}/conversations/{id}.json`,
//! pretty-printed so transcripts stay readable and diffable. Writes go
//! through a read-modify-write cycle guarded by a mutex.

use council_application::ports::conversation_store::{ConversationStore, StoreError};
use council_domain::{Conversation, ConversationSummary, ConversationTurn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Conversation store writing one pretty-printed JSON file per conversation
pub struct JsonConversationStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on conversation files
    write_guard: Mutex<()>,
}

impl JsonConversationStore {
    /// Open a store rooted at `data_dir`, creating `conversations/` under it
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref().join("conversations");
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_guard: Mutex::new(()),
        })
    }

    /// Directory the conversation files live in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn conversation_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn read(&self, id: &str) -> Result<Conversation, StoreError> {
        let path = self.conversation_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let path = self.conversation_path(&conversation.id);
        let content = serde_json::to_string_pretty(conversation)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

impl ConversationStore for JsonConversationStore {
    fn create(&self) -> Result<Conversation, StoreError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let conversation = Conversation::new(id, created_at);
        self.write(&conversation)?;
        debug!("Created conversation {}", conversation.id);
        Ok(conversation)
    }

    fn load(&self, id: &str) -> Result<Conversation, StoreError> {
        self.read(id)
    }

    fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<Conversation>(&content) {
                Ok(conversation) => summaries.push(ConversationSummary::from(&conversation)),
                Err(e) => {
                    warn!("Skipping unreadable conversation {}: {}", path.display(), e);
                }
            }
        }
        // Newest first
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    fn record_turn(&self, id: &str, turn: ConversationTurn) -> Result<(), StoreError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut conversation = self.read(id)?;
        conversation.add_turn(turn);
        self.write(&conversation)
    }

    fn set_title(&self, id: &str, title: &str) -> Result<(), StoreError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut conversation = self.read(id)?;
        conversation.title = title.to_string();
        self.write(&conversation)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let path = self.conversation_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(&path)?;
        debug!("Deleted conversation {}", id);
        Ok(())
    }
}
