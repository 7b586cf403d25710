use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Untangle.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum UntangleError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Classifier ──────────────────────────────────────────────────────
    #[error("classifier: {0}")]
    Classifier(#[from] ClassifierError),

    // ── Archive ─────────────────────────────────────────────────────────
    #[error("archive: {0}")]
    Archive(#[from] ArchiveError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Classifier errors ──────────────────────────────────────────────────────

/// Failures of the external classification call. None of these are retried;
/// they propagate to the view flow, which maps them all to one generic
/// user-facing message.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// No credential available. A hard precondition, checked before any
    /// network call is made.
    #[error("no Gemini API key configured (set GEMINI_API_KEY, or api_key in config.toml)")]
    MissingApiKey,

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier request failed: {0}")]
    Request(String),

    /// The service answered but produced no text payload.
    #[error("classifier returned an empty response")]
    EmptyResponse,

    /// The payload is not valid JSON, or does not satisfy the declared
    /// schema (missing field, wrong type, domain literal outside the set).
    #[error("classifier returned a malformed payload: {0}")]
    Malformed(String),
}

// ─── Archive errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The persisted blob is unreadable. Recovered locally by starting from
    /// an empty archive; logged, never surfaced to the user.
    #[error("archive blob unreadable: {0}")]
    Parse(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, UntangleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = UntangleError::Config(ConfigError::Validation("bad temperature".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn missing_api_key_names_the_env_var() {
        let err = UntangleError::Classifier(ClassifierError::MissingApiKey);
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: UntangleError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn malformed_carries_detail() {
        let err = UntangleError::Classifier(ClassifierError::Malformed(
            "unknown variant `unknown`".into(),
        ));
        assert!(err.to_string().contains("unknown variant"));
    }
}
