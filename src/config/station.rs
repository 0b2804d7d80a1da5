use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file or directory (defaults next to the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// Number of rotated log files to keep (0 keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    /// Content generators, queried in this order
    #[serde(default = "default_stations")]
    pub stations: Vec<Station>,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub video: VideoSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
            stations: default_stations(),
            search: SearchSettings::default(),
            video: VideoSettings::default(),
        }
    }
}

fn default_stations() -> Vec<Station> {
    vec![
        Station {
            id: "openai".to_string(),
            label: "OpenAI-GPT4".to_string(),
            provider: Provider::OpenAI,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_base: None,
            model: "gpt-4-turbo".to_string(),
            max_tokens: Some(4000),
            temperature: Some(0.3),
            prompt_template: "Create detailed documentation about: {topic}".to_string(),
            timeout_secs: None,
        },
        Station {
            id: "anthropic".to_string(),
            label: "Claude-3.5-Sonnet".to_string(),
            provider: Provider::Anthropic,
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_base: None,
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: Some(4000),
            temperature: None,
            prompt_template: "Generate comprehensive documentation about: {topic}".to_string(),
            timeout_secs: None,
        },
    ]
}

/// A "station" is one LLM endpoint used to draft documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Unique identifier for this station
    pub id: String,

    /// Label shown next to generated documents
    pub label: String,

    /// Provider type
    pub provider: Provider,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Optional custom API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Model identifier
    pub model: String,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Prompt sent to the model; `{topic}` is replaced with the user's topic
    pub prompt_template: String,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Station {
    pub const DEFAULT_MAX_TOKENS: u32 = 4000;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(Self::DEFAULT_MAX_TOKENS)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS)
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => "https://api.anthropic.com",
            Provider::OpenAI => "https://api.openai.com",
        }
    }
}

/// Web search providers and result limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub tavily_api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tavily_api_base: Option<String>,
    pub serper_api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serper_api_base: Option<String>,
    /// Results requested from each provider
    pub per_provider: usize,
    /// Results kept after deduplication
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            tavily_api_key_env: "TAVILY_API_KEY".to_string(),
            tavily_api_base: None,
            serper_api_key_env: "SERPER_API_KEY".to_string(),
            serper_api_base: None,
            per_provider: 5,
            max_results: 10,
            timeout_secs: 10,
        }
    }
}

/// Video search limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Candidates requested from the provider
    pub candidates: usize,
    /// Videos kept after normalization
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            api_base: None,
            candidates: 10,
            max_results: 5,
            timeout_secs: 10,
        }
    }
}

/// How the debug log file is rotated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Append to a single file
    None,
    /// One file per run
    Session,
    /// One file per day
    Daily,
}
