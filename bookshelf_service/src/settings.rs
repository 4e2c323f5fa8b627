use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
/// Runtime settings of the service.
/// Read from defaults, then an optional `bookshelf` config file, then `BOOKSHELF_*` env variables.
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Used when `RUST_LOG` is not set
    pub log_level: String,
    pub service_name: String,
    pub jaeger_enabled: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("bookshelf").required(false))
            .add_source(Environment::with_prefix("BOOKSHELF"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("log_level", "info")?
            .set_default("service_name", "bookshelf_service")?
            .set_default("jaeger_enabled", false)
    }
}

#[cfg(test)]
mod settings_tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(
            settings,
            Settings {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                service_name: "bookshelf_service".to_string(),
                jaeger_enabled: false,
            }
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .add_source(File::from_str(
                "port = 9090\njaeger_enabled = true",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.port, 9090);
        assert!(settings.jaeger_enabled);
        assert_eq!(settings.host, "0.0.0.0");
    }
}
