use std::env;
use std::path::PathBuf;

use secrecy::SecretString;

const DEFAULT_AUTH_SECRET: &str = "dev_auth_secret_change_in_production";
const DEFAULT_GATEWAY_KEY: &str = "gateway_api_key";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    /// Signing secret shared with the hosted auth provider.
    pub auth_jwt_secret: SecretString,
    pub auth_jwt_audience: String,
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: SecretString,
    pub ai_model: String,
    pub local_history_path: PathBuf,
    pub local_history_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "sahayak-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            auth_jwt_secret: SecretString::from(
                env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| DEFAULT_AUTH_SECRET.to_string()),
            ),
            auth_jwt_audience: env::var("AUTH_JWT_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".to_string()),
            ai_gateway_url: env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| "https://ai.gateway.lovable.dev/v1".to_string()),
            ai_gateway_api_key: SecretString::from(
                env::var("AI_GATEWAY_API_KEY").unwrap_or_else(|_| DEFAULT_GATEWAY_KEY.to_string()),
            ),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "google/gemini-2.5-flash".to_string()),
            local_history_path: env::var("LOCAL_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/local_lesson_plans.json")),
            local_history_capacity: env::var("LOCAL_HISTORY_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(50),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let auth_secret = self.auth_jwt_secret.expose_secret();
        let gateway_key = self.ai_gateway_api_key.expose_secret();

        if auth_secret == DEFAULT_AUTH_SECRET {
            panic!(
                "FATAL: AUTH_JWT_SECRET is using default value! Set it to the auth provider's JWT secret."
            );
        }

        if auth_secret.len() < 32 {
            panic!(
                "FATAL: AUTH_JWT_SECRET is too short ({}). Must be at least 32 characters.",
                auth_secret.len()
            );
        }

        if gateway_key == DEFAULT_GATEWAY_KEY {
            panic!("FATAL: AI_GATEWAY_API_KEY is using default value! Set AI_GATEWAY_API_KEY.");
        }

        if self.local_history_capacity == 0 {
            panic!("FATAL: LOCAL_HISTORY_CAPACITY must be greater than zero.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "sahayak-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            auth_jwt_secret: SecretString::from("test_auth_secret_key".to_string()),
            auth_jwt_audience: "authenticated".to_string(),
            ai_gateway_url: "http://localhost:9999/v1".to_string(),
            ai_gateway_api_key: SecretString::from("test_gateway_key".to_string()),
            ai_model: "test-model".to_string(),
            local_history_path: env::temp_dir().join("sahayak-test-history.json"),
            local_history_capacity: 50,
        }
    }
}
