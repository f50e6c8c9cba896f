mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{AuthSettings, ServerSettings, Settings, parse_machine_list};

/// Loads the configuration from `config/default` and environment variables.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Loads the configuration from the file at `base` (extension optional) and
/// environment variables, then merges it with default values.
///
/// Nested keys come from `SECTION__KEY` variables, e.g. `SERVER__PORT`.
/// A missing or empty shared secret is an error.
pub fn load_config_from(base: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(base).required(false))
        .add_source(Environment::default().separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let shared_secret = partial
        .shared_secret
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::NotFound("shared_secret".to_string()))?;

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        auth: AuthSettings {
            shared_secret,
            admin_api_key: partial.admin_api_key.filter(|k| !k.is_empty()),
            allowed_machines: partial
                .allowed_machines
                .as_deref()
                .map(parse_machine_list)
                .unwrap_or_default(),
        },
        log_level: partial.log_level.unwrap_or(default.log_level),
    })
}
