use crate::shared::config::AppConfig;

pub const ALLOWED_ORIGIN: &str = "https://app.example";

pub fn test_config() -> AppConfig {
    AppConfig {
        node_env: "test".into(),
        cors_allow: vec![ALLOWED_ORIGIN.into()],
        ..AppConfig::default()
    }
}
