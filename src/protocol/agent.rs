//! Agent discovery and capability types

use serde::{Deserialize, Serialize};

/// Agent Card for agent discovery
///
/// The Agent Card is published at `/.well-known/agent-card.json` and describes
/// the agent's identity, endpoint URL, capabilities, and skills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCard {
    /// Name of the agent
    pub name: String,

    /// Human-readable description of the agent
    pub description: String,

    /// URL where the agent's JSON-RPC endpoint is served
    pub url: String,

    /// Agent version
    pub version: String,

    /// A2A protocol version spoken by the agent
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,

    /// Input modes accepted by default (e.g. "text")
    #[serde(rename = "defaultInputModes")]
    pub default_input_modes: Vec<String>,

    /// Output modes produced by default (e.g. "text")
    #[serde(rename = "defaultOutputModes")]
    pub default_output_modes: Vec<String>,

    /// Agent capabilities
    pub capabilities: AgentCapabilities,

    /// Skills offered by the agent
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Create a new agent card builder
    pub fn builder() -> AgentCardBuilder {
        AgentCardBuilder::default()
    }
}

/// Builder for constructing AgentCard instances
#[derive(Debug, Default)]
pub struct AgentCardBuilder {
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
    version: Option<String>,
    default_input_modes: Vec<String>,
    default_output_modes: Vec<String>,
    capabilities: Option<AgentCapabilities>,
    skills: Vec<AgentSkill>,
}

impl AgentCardBuilder {
    /// Set the agent name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the agent description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the advertised endpoint URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the agent version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the default input modes
    pub fn default_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the default output modes
    pub fn default_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }

    /// Set the capability flags
    pub fn capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Add a skill
    pub fn skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Build the agent card
    ///
    /// # Panics
    ///
    /// Panics if name or url is not set
    pub fn build(self) -> AgentCard {
        AgentCard {
            name: self.name.expect("Agent card name is required"),
            description: self.description.unwrap_or_default(),
            url: self.url.expect("Agent card url is required"),
            version: self.version.unwrap_or_else(|| "1.0.0".to_string()),
            protocol_version: "0.3.0".to_string(),
            default_input_modes: self.default_input_modes,
            default_output_modes: self.default_output_modes,
            capabilities: self.capabilities.unwrap_or_default(),
            skills: self.skills,
        }
    }
}

/// Agent capabilities
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCapabilities {
    /// Supports streaming responses via message/stream
    #[serde(default)]
    pub streaming: bool,

    /// Supports push notifications via webhooks
    #[serde(rename = "pushNotifications", default)]
    pub push_notifications: bool,

    /// Exposes status transition history on tasks
    #[serde(rename = "stateTransitionHistory", default)]
    pub state_transition_history: bool,
}

impl AgentCapabilities {
    /// Create capabilities with default values (all false)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Enable push notifications
    pub fn with_push_notifications(mut self) -> Self {
        self.push_notifications = true;
        self
    }

    /// Enable state transition history
    pub fn with_state_transition_history(mut self) -> Self {
        self.state_transition_history = true;
        self
    }
}

/// A skill record advertised on the agent card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSkill {
    /// Stable skill identifier
    pub id: String,

    /// Human-readable skill name
    pub name: String,

    /// What the skill does
    pub description: String,

    /// Search/discovery tags
    pub tags: Vec<String>,

    /// Example prompts exercising the skill
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
}

impl AgentSkill {
    /// Create a new skill record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the examples
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }
}
