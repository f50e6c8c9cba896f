use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the HTTP server and for message authentication.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub log_level: String,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Secrets and access rules.
///
/// `shared_secret` keys every signature. An unset `admin_api_key` disables
/// the admin check; an empty `allowed_machines` accepts every machine.
#[derive(Deserialize, Clone, Default)]
pub struct AuthSettings {
    pub shared_secret: String,
    pub admin_api_key: Option<String>,
    pub allowed_machines: Vec<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("shared_secret", &"<redacted>")
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "<redacted>"))
            .field("allowed_machines", &self.allowed_machines)
            .finish()
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// The auth keys sit at the top level so the plain `SHARED_SECRET`,
/// `ADMIN_API_KEY` and `ALLOWED_MACHINES` variables map onto them.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub shared_secret: Option<String>,
    pub admin_api_key: Option<String>,
    pub allowed_machines: Option<String>,
    pub log_level: Option<String>,
}

/// Partial server settings.
///
/// Used when loading server configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Splits a comma-separated machine list, trimming entries and dropping blanks.
pub fn parse_machine_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Provides default values for `Settings`.
///
/// The shared secret has no default; loading fails without one.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            auth: AuthSettings::default(),
            log_level: "info".to_string(),
        }
    }
}
