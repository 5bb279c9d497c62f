//! Error types for the folio terminal.
//!
//! Command resolution is total and never fails; these errors only come
//! from loading configuration and talking to the host.

use std::io;

/// Errors produced at the configuration and I/O boundary.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;
