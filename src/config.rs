use secrecy::SecretString;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub llm_api_base: String,
    pub llm_api_key: SecretString,
    pub llm_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub seed_admin_password: SecretString,
    pub seed_score_viewer_password: SecretString,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            llm_api_key: SecretString::from(env::var("LLM_API_KEY").unwrap_or_default()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "llama3-70b-8192".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            seed_admin_password: SecretString::from(
                env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "12345678".to_string()),
            ),
            seed_score_viewer_password: SecretString::from(
                env::var("SEED_SCORE_VIEWER_PASSWORD").unwrap_or_else(|_| "12345678".to_string()),
            ),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.llm_api_key.expose_secret().is_empty() {
            panic!("FATAL: LLM_API_KEY is not set! SOP package and quiz generation will fail.");
        }

        if self.seed_admin_password.expose_secret() == "12345678" {
            panic!(
                "FATAL: SEED_ADMIN_PASSWORD is using default value! Set SEED_ADMIN_PASSWORD environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            data_dir: PathBuf::from("target/test-data"),
            llm_api_base: "http://localhost:9/v1".to_string(),
            llm_api_key: SecretString::from("test_api_key".to_string()),
            llm_model: "llama3-70b-8192".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            seed_admin_password: SecretString::from("test_admin_pw".to_string()),
            seed_score_viewer_password: SecretString::from("test_viewer_pw".to_string()),
        }
    }
}
