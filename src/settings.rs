use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SuiteSettings {
    pub application: ApplicationSettings,
    pub generation: GenerationSettings,
    pub identity: IdentitySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

/// Settings for the hosted generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub api_version: String,
    /// Per-attempt timeout in seconds. 0 disables the timeout.
    pub request_timeout_secs: u64,
    /// Retries after the first attempt for transient failures. 0 disables retrying.
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub error_mapping: ErrorMapping,
}

/// Settings for the trusted identity-verification service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySettings {
    pub verify_url: String,
    pub api_key: Option<String>,
    pub cookie_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

/// How generation failures are mapped to HTTP status codes
///
/// `Coarse` sends every adapter failure to 500. `Refined` separates upstream
/// failures (502) from unusable model output (422).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMapping {
    #[default]
    Coarse,
    Refined,
}

impl FromStr for ErrorMapping {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "coarse" => Ok(Self::Coarse),
            "refined" => Ok(Self::Refined),
            other => Err(format!("unknown error mapping '{other}'")),
        }
    }
}

impl fmt::Display for ErrorMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coarse => write!(f, "coarse"),
            Self::Refined => write!(f, "refined"),
        }
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
            api_version: "v1beta".to_string(),
            request_timeout_secs: 0,
            max_retries: 0,
            retry_base_delay_ms: 250,
            error_mapping: ErrorMapping::Coarse,
        }
    }
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            verify_url: "http://localhost:9099/session/verify".to_string(),
            api_key: None,
            cookie_name: "session".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GenerationSettings {
    /// Per-attempt timeout, if one is configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    #[must_use]
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

impl SuiteSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - Logger initialization fails
    pub fn load() -> anyhow::Result<Self> {
        Self::load_env_file();

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);

        Self::initialize_logging(&settings.logging)?;
        Ok(settings)
    }

    /// Initialize the global logger using the configured level as the default filter
    ///
    /// # Errors
    ///
    /// Returns an error if a logger has already been installed
    fn initialize_logging(logging: &LoggingSettings) -> anyhow::Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(logging.level.as_str()),
        )
        .try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `SUITEGATE_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or parsed
    fn load_base_settings() -> anyhow::Result<Self> {
        let mut settings = Self::default();

        if let Some(base) = Self::read_settings_file(Path::new("Settings.toml"))? {
            println!("✓ Loaded base settings from Settings.toml");
            settings = base;
        }

        if let Ok(secrets_dir) = std::env::var("SUITEGATE_SECRETS_DIR") {
            let secrets_path = Path::new(&secrets_dir).join("Settings.toml");
            if let Some(secrets_settings) = Self::read_settings_file(&secrets_path)? {
                println!("✓ Overriding settings from {}", secrets_path.display());
                settings = secrets_settings;
            } else {
                println!(
                    "ℹ SUITEGATE_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a settings file, returning `None` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid TOML
    pub fn read_settings_file(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let settings = basic_toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", path.display()))?;
        Ok(Some(settings))
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_generation_env_overrides(&mut settings.generation);
        Self::apply_identity_env_overrides(&mut settings.identity);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    /// Apply environment overrides for the generative model settings
    pub fn apply_generation_env_overrides(generation: &mut GenerationSettings) {
        if let Ok(api_key) = std::env::var("GENAI_API_KEY") {
            generation.api_key = api_key;
        }
        if let Ok(model) = std::env::var("GENAI_MODEL") {
            generation.model = model;
        }
        if let Ok(base_url) = std::env::var("GENAI_BASE_URL") {
            generation.base_url = base_url;
        }
        Self::apply_numeric_env_override("GENAI_TIMEOUT_SECS", &mut generation.request_timeout_secs);
        Self::apply_numeric_env_override("GENAI_RETRY_BASE_MS", &mut generation.retry_base_delay_ms);
        if let Ok(value) = std::env::var("GENAI_MAX_RETRIES") {
            if let Ok(retries) = value.parse::<u32>() {
                generation.max_retries = retries;
            }
        }
        if let Ok(value) = std::env::var("GENAI_ERROR_MAPPING") {
            match value.parse::<ErrorMapping>() {
                Ok(mapping) => generation.error_mapping = mapping,
                Err(e) => eprintln!("⚠️  Ignoring GENAI_ERROR_MAPPING: {e}"),
            }
        }
    }

    fn apply_identity_env_overrides(identity: &mut IdentitySettings) {
        if let Ok(verify_url) = std::env::var("IDENTITY_VERIFY_URL") {
            identity.verify_url = verify_url;
        }
        if let Ok(api_key) = std::env::var("IDENTITY_API_KEY") {
            identity.api_key = (!api_key.is_empty()).then_some(api_key);
        }
        if let Ok(cookie_name) = std::env::var("SESSION_COOKIE_NAME") {
            if !cookie_name.is_empty() {
                identity.cookie_name = cookie_name;
            }
        }
    }

    fn apply_numeric_env_override(env_var: &str, target: &mut u64) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.parse::<u64>() {
                *target = value;
            }
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clean_env_vars() {
        for var in [
            "GENAI_API_KEY",
            "GENAI_MODEL",
            "GENAI_BASE_URL",
            "GENAI_TIMEOUT_SECS",
            "GENAI_MAX_RETRIES",
            "GENAI_RETRY_BASE_MS",
            "GENAI_ERROR_MAPPING",
            "IDENTITY_VERIFY_URL",
            "IDENTITY_API_KEY",
            "SESSION_COOKIE_NAME",
            "SUITEGATE_SECRETS_DIR",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_preserve_single_shot_generation() {
        let settings = SuiteSettings::default();
        assert_eq!(settings.generation.max_retries, 0);
        assert_eq!(settings.generation.request_timeout(), None);
        assert_eq!(settings.generation.error_mapping, ErrorMapping::Coarse);
        assert_eq!(settings.identity.cookie_name, "session");
    }

    #[test]
    #[serial]
    fn test_generation_env_overrides() {
        clean_env_vars();
        std::env::set_var("GENAI_API_KEY", "key-from-env");
        std::env::set_var("GENAI_TIMEOUT_SECS", "15");
        std::env::set_var("GENAI_MAX_RETRIES", "1");
        std::env::set_var("GENAI_ERROR_MAPPING", "refined");

        let mut generation = GenerationSettings::default();
        SuiteSettings::apply_generation_env_overrides(&mut generation);

        assert_eq!(generation.api_key, "key-from-env");
        assert_eq!(generation.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(generation.max_retries, 1);
        assert_eq!(generation.error_mapping, ErrorMapping::Refined);

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_numeric_env_is_ignored() {
        clean_env_vars();
        std::env::set_var("GENAI_MAX_RETRIES", "many");
        std::env::set_var("GENAI_ERROR_MAPPING", "sometimes");

        let mut generation = GenerationSettings::default();
        SuiteSettings::apply_generation_env_overrides(&mut generation);

        assert_eq!(generation.max_retries, 0);
        assert_eq!(generation.error_mapping, ErrorMapping::Coarse);

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_identity_env_overrides() {
        clean_env_vars();
        std::env::set_var("IDENTITY_VERIFY_URL", "https://identity.internal/verify");
        std::env::set_var("SESSION_COOKIE_NAME", "__session");

        let mut settings = SuiteSettings::default();
        SuiteSettings::apply_env_overrides(&mut settings);

        assert_eq!(settings.identity.verify_url, "https://identity.internal/verify");
        assert_eq!(settings.identity.cookie_name, "__session");

        clean_env_vars();
    }

    #[test]
    fn test_read_partial_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Settings.toml");
        std::fs::write(
            &path,
            r#"
[application]
port = 9000

[generation]
model = "gemini-2.0-flash"
error_mapping = "refined"
"#,
        )
        .unwrap();

        let settings = SuiteSettings::read_settings_file(&path).unwrap().unwrap();
        assert_eq!(settings.application.port, 9000);
        assert_eq!(settings.application.host, "0.0.0.0");
        assert_eq!(settings.generation.model, "gemini-2.0-flash");
        assert_eq!(settings.generation.error_mapping, ErrorMapping::Refined);
        assert_eq!(settings.identity.cookie_name, "session");
    }

    #[test]
    fn test_missing_settings_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SuiteSettings::read_settings_file(&dir.path().join("Settings.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Settings.toml");
        std::fs::write(&path, "[application\nport = ").unwrap();
        assert!(SuiteSettings::read_settings_file(&path).is_err());
    }

    #[test]
    fn test_cors_origins_split() {
        let mut settings = SuiteSettings::default();
        settings.application.cors_origins = "http://a.test, http://b.test,".to_string();
        assert_eq!(
            settings.get_cors_origins(),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
