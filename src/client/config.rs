use std::env;

/// Client-side settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Lost & Found API, without a trailing slash.
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let api_url = env::var("LNF_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();
        Self { api_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        std::env::set_var("LNF_API_URL", "http://api.example.com/");
        let cfg = ClientConfig::from_env();
        assert_eq!(cfg.api_url, "http://api.example.com");
        std::env::remove_var("LNF_API_URL");
    }
}
