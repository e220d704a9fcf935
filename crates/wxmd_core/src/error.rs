//! Errors raised while building a renderer.
//!
//! Rendering itself never fails, these only surface at construction time.

/// Error type for renderer construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The TOML configuration could not be parsed.
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The configured highlight theme is not bundled with syntect.
    #[error("Unknown highlight theme: {0}")]
    UnknownTheme(String),
}
