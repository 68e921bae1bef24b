use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at
/// startup, immutable afterward, and shared through the application state
/// via FromRef.
#[derive(Clone)]
pub struct AppConfig {
    // TCP port the HTTP server binds to.
    pub port: u16,
    // Secret used to derive the session-cookie signing key. Must be at
    // least 32 bytes.
    pub session_secret: String,
    // API key sent as the bearer token to the chat-completion provider.
    pub chat_api_key: String,
    // Chat-completions endpoint URL.
    pub chat_api_url: String,
    // Model name forwarded to the chat-completion provider.
    pub chat_model: String,
    // Runtime environment marker. Controls cookie security attributes and
    // the logging format.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context. Local keeps cookies usable over plain HTTP
/// and logs pretty-printed; Production requires real secrets, marks the
/// session cookie `Secure`, and logs JSON.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_SESSION_SECRET: &str = "campus-portal-local-session-secret-0123456789abcdef";
const DEFAULT_CHAT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup, without touching environment variables.
    fn default() -> Self {
        Self {
            port: 3000,
            session_secret: LOCAL_SESSION_SECRET.to_string(),
            chat_api_key: "test-chat-key".to_string(),
            chat_api_url: DEFAULT_CHAT_API_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration
    /// at startup. Reads all parameters from environment variables and
    /// fails fast on anything a production process cannot run without.
    ///
    /// # Panics
    /// Panics if `SESSION_SECRET` or `CHAT_API_KEY` is missing in
    /// production, if `SESSION_SECRET` is shorter than 32 bytes, or if
    /// `PORT` is set but not a valid port number.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("FATAL: PORT must be a valid port number");

        // Session Secret Resolution
        // The production secret is mandatory and must be explicitly set.
        let session_secret = match env {
            Env::Production => env::var("SESSION_SECRET")
                .expect("FATAL: SESSION_SECRET must be set in production."),
            _ => env::var("SESSION_SECRET").unwrap_or_else(|_| LOCAL_SESSION_SECRET.to_string()),
        };
        // The cookie signing key is HKDF-derived from this value and needs
        // at least 256 bits of input.
        assert!(
            session_secret.len() >= 32,
            "FATAL: SESSION_SECRET must be at least 32 bytes"
        );

        let chat_api_key = match env {
            Env::Production => {
                env::var("CHAT_API_KEY").expect("FATAL: CHAT_API_KEY must be set in production.")
            }
            _ => env::var("CHAT_API_KEY").unwrap_or_else(|_| "local-dev-chat-key".to_string()),
        };

        Self {
            port,
            session_secret,
            chat_api_key,
            chat_api_url: env::var("CHAT_API_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_API_URL.to_string()),
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            env,
        }
    }
}
