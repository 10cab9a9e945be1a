use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub exa_api_key: SecretString,
    pub openai_api_key: SecretString,
    pub generation_model: String,
    pub generation_timeout_secs: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizfeed-local".to_string()),
            exa_api_key: SecretString::from(
                env::var("QF_EXA_API_KEY").unwrap_or_else(|_| "exa_api_key".to_string()),
            ),
            openai_api_key: SecretString::from(
                env::var("QF_OPENAI_API_KEY").unwrap_or_else(|_| "openai_api_key".to_string()),
            ),
            generation_model: env::var("QF_GENERATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            generation_timeout_secs: env::var("QF_GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.exa_api_key.expose_secret() == "exa_api_key" {
            panic!("FATAL: QF_EXA_API_KEY is using default value! Set QF_EXA_API_KEY environment variable.");
        }

        if self.openai_api_key.expose_secret() == "openai_api_key" {
            panic!("FATAL: QF_OPENAI_API_KEY is using default value! Set QF_OPENAI_API_KEY environment variable.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizfeed-test".to_string(),
            exa_api_key: SecretString::from("test exa key".to_string()),
            openai_api_key: SecretString::from("test openai key".to_string()),
            generation_model: "gpt-4o".to_string(),
            generation_timeout_secs: 5,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
