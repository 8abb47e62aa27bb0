//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chat_search::models::{Attachment, Conversation, Message, Role};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// Fixed base time so ordering assertions are deterministic
pub fn ts(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// Builder for in-memory conversations
pub struct ConversationBuilder {
    conversation: Conversation,
}

impl ConversationBuilder {
    pub fn new(id: &str, title: &str) -> Self {
        let mut conversation = Conversation::new(title, "gpt-4");
        conversation.id = id.to_string();
        conversation.created_at = ts(0);
        conversation.updated_at = ts(0);
        Self { conversation }
    }

    pub fn model(mut self, model: &str) -> Self {
        self.conversation.model = model.to_string();
        self
    }

    /// Append a message with a stable id `<conversation>-<index>`
    pub fn message(self, role: Role, content: &str, minutes: i64) -> Self {
        self.message_with(role, content, minutes, |_| {})
    }

    pub fn message_with(
        mut self,
        role: Role,
        content: &str,
        minutes: i64,
        customize: impl FnOnce(&mut Message),
    ) -> Self {
        let mut message = Message::new(role, content);
        message.id = format!("{}-{}", self.conversation.id, self.conversation.messages.len());
        message.timestamp = ts(minutes);
        customize(&mut message);
        self.conversation.updated_at = self.conversation.updated_at.max(message.timestamp);
        self.conversation.messages.push(message);
        self
    }

    pub fn user(self, content: &str, minutes: i64) -> Self {
        self.message(Role::User, content, minutes)
    }

    pub fn assistant(self, content: &str, minutes: i64) -> Self {
        self.message(Role::Assistant, content, minutes)
    }

    pub fn build(self) -> Conversation {
        self.conversation
    }
}

pub fn attachment(name: &str) -> Attachment {
    Attachment { name: name.to_string(), mime_type: None, size: None }
}

/// Builder for export files on disk
pub struct ExportDirBuilder {
    temp_dir: TempDir,
}

impl ExportDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write conversations as a JSON array export
    pub fn with_export(self, name: &str, conversations: &[Conversation]) -> Self {
        let json = serde_json::to_string_pretty(conversations).expect("Failed to encode export");
        self.with_raw(name, &json)
    }

    pub fn with_raw(self, name: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create export dir");
        }
        fs::write(path, content).expect("Failed to write export");
        self
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ExportDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Small mixed corpus used across tests
pub fn sample_conversations() -> Vec<Conversation> {
    vec![
        ConversationBuilder::new("rust", "Rust errors")
            .user("How do I handle errors in Rust?", 0)
            .assistant("Use the Result type and the ? operator for error handling.", 1)
            .user("What about panics?", 2)
            .build(),
        ConversationBuilder::new("py", "Python tips")
            .model("claude-3")
            .user("Show me python error handling with try and except", 10)
            .message_with(Role::Assistant, "Wrap the call in try/except ValueError.", 11, |m| {
                m.attachments.push(attachment("example.py"));
            })
            .build(),
    ]
}
