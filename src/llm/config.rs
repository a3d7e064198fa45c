//! Completion endpoint configuration

/// Default OpenAI-compatible endpoint (DashScope compatible mode)
pub const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Model identifier used for every completion call
pub const DEFAULT_MODEL: &str = "qwen-turbo-latest";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

/// System prompt sent with every completion request
pub const SYSTEM_PROMPT: &str = "\
You are an intelligent AI assistant answering questions over the A2A protocol.

Your capabilities include:
- Answering questions accurately and comprehensively
- Providing helpful explanations and analysis
- Assisting with various tasks including coding, writing, and problem-solving

Please provide clear, well-structured responses. If you're unsure about \
something, acknowledge the uncertainty rather than making up information.";

/// Configuration for the completion client
///
/// Built once at startup and passed to the client by value; nothing mutates it
/// afterwards.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API credential for the completion endpoint
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// System prompt prepended to every request
    pub system_prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Response length cap
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Create a configuration with the default endpoint, model, and sampling
    /// parameters
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }

    /// Read the API credential from the process environment
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var(API_KEY_ENV)?;
        Ok(Self::new(api_key))
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
