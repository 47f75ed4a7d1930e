//! Process-wide settings, read from the environment once at startup.

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";
pub const DEFAULT_PORT: u16 = 8080;

/// Fixed output resolution for every sticker.
pub const IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Bearer credential for the image API. `None` is reported per request.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Only sent upstream when set; `gpt-image-1` always answers base64.
    pub response_format: Option<String>,
    /// Include the generated prompt in success bodies.
    pub echo_prompt: bool,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            response_format: None,
            echo_prompt: false,
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            api_key: get("OPENAI_API_KEY"),
            api_base: get("OPENAI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            model: get("OPENAI_IMAGE_MODEL").unwrap_or(defaults.model),
            response_format: get("OPENAI_RESPONSE_FORMAT"),
            echo_prompt: get("STICKER_ECHO_PROMPT")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.echo_prompt),
            port: get("PORT").and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
        }
    }

    /// Key prefix safe to print in logs.
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            Some(key) => format!("{}...", key.chars().take(6).collect::<String>()),
            None => "<unset>".to_string(),
        }
    }
}
