use std::env;
use tracing::warn;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// `APP_PORT` wins over `PORT`; both fall back to 3000.
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|s| {
                let parsed = s.parse().ok();
                if parsed.is_none() {
                    warn!("Ignoring invalid port value: {}", s);
                }
                parsed
            })
            .unwrap_or(3000);
        AppConfig { host, port }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { host: "0.0.0.0".to_string(), port: 3000 }
    }
}
