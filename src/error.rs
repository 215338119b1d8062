use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `gritpost`.
///
/// Each subsystem defines its own error variant. The pipeline matches on these
/// to decide what to record and which exit code to surface; provider internals
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum BotError {
    // ── Config / startup ─────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── State store ──────────────────────────────────────────────────────
    #[error("state: {0}")]
    State(#[from] StateError),

    // ── Upstream generation APIs ─────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Typography compositor ────────────────────────────────────────────
    #[error("compose: {0}")]
    Compose(#[from] ComposeError),

    // ── Page-feed publisher ──────────────────────────────────────────────
    #[error("publish: {0}")]
    Publish(#[from] PublishError),

    // ── Generic fallthrough (wraps anyhow for interop) ───────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BotError {
    /// Exit code for the external scheduler: configuration problems are `2`
    /// (fix the deployment), everything else is `1` (genuine run failure).
    /// Gate denials never reach this path; they exit `0`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("unknown timezone: {0}")]
    Timezone(String),

    #[error("invalid posting window '{0}' (expected START-END in 0-24 hours)")]
    Window(String),

    #[error("font file not found: {0}")]
    FontMissing(String),
}

// ─── State store errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StateError {
    #[error("io on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt state file {path}: {message}")]
    Corrupt { path: String, message: String },
}

// ─── Upstream API errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("image generation failed: {0}")]
    ImageRequest(String),

    #[error("image API returned no usable image")]
    EmptyImage,

    #[error("chat directive request failed: {0}")]
    ChatRequest(String),

    #[error("malformed directive: {0}")]
    MalformedResponse(String),
}

// ─── Compositor errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to load font {path}: {message}")]
    Font { path: String, message: String },

    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),
}

// ─── Publisher errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("page feed returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("page feed transport error: {0}")]
    Transport(String),

    #[error("token health probe failed: {0}")]
    Probe(String),
}

// ─── Convenience re-exports ──────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, BotError>;
