use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `essaycoach`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum CoachError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Feedback / grading provider ─────────────────────────────────────
    #[error("feedback: {0}")]
    Feedback(#[from] FeedbackError),

    // ── Editor session ──────────────────────────────────────────────────
    #[error("session: {0}")]
    Session(#[from] SessionError),

    // ── Transport (client ↔ gateway) ────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to save config: {0}")]
    Save(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Feedback / grading provider errors ─────────────────────────────────────

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("essay content is required")]
    EmptyContent,

    #[error("grading provider request failed: {0}")]
    Upstream(String),

    #[error("grading provider returned malformed output: {0}")]
    Malformed(String),
}

// ─── Editor session errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("topic must not be empty")]
    TopicRequired,

    #[error("at least {required} words are needed ({actual} so far)")]
    BelowWordCount { required: usize, actual: usize },

    #[error("a feedback request is already in flight")]
    RequestInFlight,

    #[error("essay already submitted — the session is read-only")]
    SessionLocked,

    #[error("action not available in the {step} step")]
    InvalidStep { step: &'static str },
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("gateway returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, CoachError>;
