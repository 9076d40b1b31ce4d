/// Pair service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PairConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3214). Env var: `PAIR_PORT`.
    pub pair_port: u16,
    /// Base URL of the question-generation service (default
    /// "http://localhost:11434"). Env var: `GENERATOR_URL`.
    pub generator_url: String,
    /// Model name passed to the generator (default "llama3.2:3b").
    pub generator_model: String,
    /// Request timeout for the generator call in seconds (default 30).
    pub generator_timeout_secs: u64,
    /// Push gateway endpoint. Absent disables push dispatch.
    pub push_url: Option<String>,
}

impl PairConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            pair_port: std::env::var("PAIR_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3214),
            generator_url: std::env::var("GENERATOR_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_owned()),
            generator_model: std::env::var("GENERATOR_MODEL")
                .unwrap_or_else(|_| "llama3.2:3b".to_owned()),
            generator_timeout_secs: std::env::var("GENERATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            push_url: std::env::var("PUSH_URL").ok(),
        }
    }
}
