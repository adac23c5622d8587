use serde::Deserialize;

/// Настройки приложения
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub users: UsersStoreOptions,
    pub mock: MockServiceOptions,
}

/// Настройки стора пользователей
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UsersStoreOptions {
    pub endpoint: String,
    pub init_page_size: usize,
}

impl Default for UsersStoreOptions {
    fn default() -> Self {
        Self {
            endpoint: "/api/users".to_string(),
            init_page_size: 10,
        }
    }
}

/// Настройки мок-сервиса: объём данных и задержки ответов (мс)
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MockServiceOptions {
    pub users_count: usize,
    pub get_delay_ms: u32,
    pub add_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub delete_many_delay_ms: u32,
    pub update_delay_ms: u32,
}

impl Default for MockServiceOptions {
    fn default() -> Self {
        Self {
            users_count: 100,
            get_delay_ms: 1000,
            add_delay_ms: 1000,
            delete_delay_ms: 300,
            delete_many_delay_ms: 500,
            update_delay_ms: 500,
        }
    }
}

impl MockServiceOptions {
    /// Те же настройки без искусственных задержек
    pub fn without_latency(self) -> Self {
        Self {
            get_delay_ms: 0,
            add_delay_ms: 0,
            delete_delay_ms: 0,
            delete_many_delay_ms: 0,
            update_delay_ms: 0,
            ..self
        }
    }
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[users]
endpoint = "/api/users"
init_page_size = 10

[mock]
users_count = 100
get_delay_ms = 1000
add_delay_ms = 1000
delete_delay_ms = 300
delete_many_delay_ms = 500
update_delay_ms = 500
"#;

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load the embedded configuration, falling back to defaults on parse errors
pub fn load_config() -> AppConfig {
    match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to parse embedded config, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.users.endpoint, "/api/users");
        assert_eq!(config.mock.get_delay_ms, 1000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[users]\ninit_page_size = 50\n").unwrap();
        assert_eq!(config.users.init_page_size, 50);
        assert_eq!(config.users.endpoint, "/api/users");
        assert_eq!(config.mock.users_count, 100);
    }

    #[test]
    fn test_without_latency() {
        let options = MockServiceOptions::default().without_latency();
        assert_eq!(options.users_count, 100);
        assert_eq!(options.get_delay_ms, 0);
        assert_eq!(options.update_delay_ms, 0);
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(parse_config("[users]\ninit_page_size = \"ten\"\n").is_err());
    }
}
