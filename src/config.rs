use anyhow::Context;
use serde::Deserialize;

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_database_path() -> String { "data/catalog.db".to_string() }
fn default_expose_error_details() -> bool { true }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Directory with the browser form, served for any non-API path
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Include internal error messages in 500 responses. Disable in production.
    #[serde(default = "default_expose_error_details")]
    pub expose_error_details: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_database_path() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            static_dir: None,
            expose_error_details: default_expose_error_details(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        let config = Self::parse(&content).with_context(|| format!("failed to parse {path}"))?;
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = serde_json::from_str(content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `PORT` and `CATALOG_DATABASE` take precedence over the file.
    pub fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(port) = var("PORT") {
            self.server.port = port.parse().with_context(|| format!("invalid PORT: {port}"))?;
        }
        if let Some(path) = var("CATALOG_DATABASE") {
            self.database.path = path;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_a_default() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "data/catalog.db");
        assert!(config.static_dir.is_none());
        assert!(config.expose_error_details);
    }

    #[test]
    fn file_values_are_used() {
        let config: Config = serde_json::from_str(
            r#"{
                "server": {"port": 8080},
                "static_dir": "frontend",
                "expose_error_details": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.static_dir.as_deref(), Some("frontend"));
        assert!(!config.expose_error_details);
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| match key {
                "PORT" => Some("4100".to_string()),
                "CATALOG_DATABASE" => Some("/tmp/other.db".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.database.path, "/tmp/other.db");
    }

    #[test]
    fn rejects_invalid_port_override() {
        let mut config = Config::default();
        let err = config.apply_env_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(err.is_err());
    }
}
