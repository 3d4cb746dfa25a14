// Centralized logging helpers so per-request log lines stay consistent
use log::{debug, error, info, warn};

use crate::models::GenerationVariant;
use crate::settings::SuiteSettings;

/// Number of leading token characters kept when a credential is logged
const VISIBLE_TOKEN_PREFIX: usize = 6;

/// Shorten a secret so it can appear in logs without being replayable
#[must_use]
pub fn redact_token(token: &str) -> String {
    let visible: String = token.chars().take(VISIBLE_TOKEN_PREFIX).collect();
    if token.chars().count() <= VISIBLE_TOKEN_PREFIX {
        "***".to_string()
    } else {
        format!("{visible}…")
    }
}

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the effective configuration once at start-up (secrets omitted)
    pub fn log_settings_summary(settings: &SuiteSettings) {
        info!(
            "🔧 Generation model: {} ({}), timeout: {}, retries: {}, error mapping: {}",
            settings.generation.model,
            settings.generation.api_version,
            settings
                .generation
                .request_timeout()
                .map_or_else(|| "none".to_string(), |d| format!("{}s", d.as_secs())),
            settings.generation.max_retries,
            settings.generation.error_mapping,
        );
        if settings.generation.api_key.is_empty() {
            warn!("⚠️  GENAI_API_KEY is not set - generation requests will be rejected upstream");
        }
        info!(
            "🔧 Identity verification via {} (cookie '{}')",
            settings.identity.verify_url, settings.identity.cookie_name
        );
    }

    pub fn log_generation_start(variant: GenerationVariant, prompt_len: usize) {
        debug!(
            "🔄 Invoking model for {variant} generation (temperature {}, prompt {prompt_len} chars)",
            variant.temperature()
        );
    }

    pub fn log_generation_success(variant: GenerationVariant, keys: usize) {
        debug!("✅ {variant} generation returned an object with {keys} top-level keys");
    }

    pub fn log_generation_failure(variant: GenerationVariant, message: &str) {
        error!("❌ {variant} generation failed: {message}");
    }

    pub fn log_generation_retry(attempt: u32, max_retries: u32, delay_ms: u128, message: &str) {
        warn!("🔁 Model call failed ({message}); retry {attempt}/{max_retries} in {delay_ms}ms");
    }

    pub fn log_identity_verified(uid: &str) {
        debug!("Resolved session to uid {uid}");
    }

    pub fn log_identity_failure(token: &str, reason: &str) {
        warn!(
            "Session verification failed for token {}: {reason}",
            redact_token(token)
        );
    }

    pub fn log_validation_rejected(route: &str, message: &str) {
        debug!("Rejected {route} request: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_token_keeps_prefix_only() {
        assert_eq!(redact_token("abcdefghijkl"), "abcdef…");
        assert_eq!(redact_token("short"), "***");
        assert_eq!(redact_token(""), "***");
    }
}
