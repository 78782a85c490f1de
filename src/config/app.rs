use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub ai: AiConfig,
}

/// Settings for the OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());

        Ok(AppConfig {
            host,
            port,
            environment,
            jwt_secret,
            ai: AiConfig::from_env()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        Ok(AiConfig {
            base_url: env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.studio.nebius.com/v1".to_string()),
            api_key: env::var("AI_API_KEY").unwrap_or_default(),
            model: env::var("AI_MODEL").unwrap_or_else(|_| "microsoft/phi-4".to_string()),
        })
    }
}
