//! A2A message types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message in the A2A protocol
///
/// Messages are the unit of conversation between a client and the agent.
/// Each message has a role (user or agent) and one or more parts; this agent
/// consumes the text parts only, but file and data parts remain representable
/// on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,

    /// Message content parts (at least one required)
    pub parts: Vec<MessagePart>,

    /// Optional message identifier
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Optional task identifier (for associating message with a task)
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Optional context identifier (for grouping related turns)
    #[serde(rename = "contextId", skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Optional metadata for the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Message {
    /// Create a new message with text content
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![MessagePart::Text { text: text.into() }],
            message_id: None,
            task_id: None,
            context_id: None,
            metadata: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Create a new message builder
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Add a message part
    pub fn with_part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Concatenated text content of the message
    ///
    /// Joins all text parts with newlines; file and data parts are skipped.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text { text } => Some(text.as_str()),
                MessagePart::File { .. } | MessagePart::Data { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builder for constructing Message instances
#[derive(Debug, Default)]
pub struct MessageBuilder {
    role: Option<Role>,
    parts: Vec<MessagePart>,
    message_id: Option<String>,
    task_id: Option<String>,
    context_id: Option<String>,
    metadata: Option<HashMap<String, Value>>,
}

impl MessageBuilder {
    /// Create a new message builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role of the message
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the message parts
    pub fn parts(mut self, parts: Vec<MessagePart>) -> Self {
        self.parts = parts;
        self
    }

    /// Add a single part to the message
    pub fn part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Set the message ID
    pub fn message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// Set the task ID
    pub fn task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    /// Set the context ID
    pub fn context_id(mut self, id: impl Into<String>) -> Self {
        self.context_id = Some(id.into());
        self
    }

    /// Add a metadata field
    pub fn metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Build the message
    ///
    /// # Panics
    ///
    /// Panics if role is not set or if parts are empty
    pub fn build(self) -> Message {
        let role = self.role.expect("Message role is required");
        assert!(
            !self.parts.is_empty(),
            "Message must have at least one part"
        );

        Message {
            role,
            parts: self.parts,
            message_id: self.message_id,
            task_id: self.task_id,
            context_id: self.context_id,
            metadata: self.metadata,
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from the agent
    Agent,
}

/// File content for file parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Name of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type of the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Base64-encoded file content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,

    /// URI reference to the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A part of a message
///
/// According to the A2A spec: "A Part MUST contain exactly one of the following: text, file, data"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessagePart {
    /// Text content
    Text {
        /// The text content
        text: String,
    },

    /// File reference
    File {
        /// File content, by URI or inline bytes
        file: FileContent,
    },

    /// Structured data
    Data {
        /// The structured data
        data: Value,
    },
}

impl MessagePart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a file part with URI reference
    pub fn file_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::File {
            file: FileContent {
                name: Some(name.into()),
                mime_type: None,
                bytes: None,
                uri: Some(uri.into()),
            },
        }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Self::Data { data }
    }
}
