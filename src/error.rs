use std::path::PathBuf;
use thiserror::Error;

/// Problems with the phrase table or the config file. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate source phrase {0:?}")]
    DuplicatePhrase(String),

    #[error("empty source phrase (target {0:?})")]
    EmptyPhrase(String),

    /// Applying the map to its own output would substitute again.
    #[error("target {target:?} of {source_phrase:?} contains source phrase {contained:?}")]
    ConflictingTarget {
        source_phrase: String,
        target: String,
        contained: String,
    },

    /// The target joined with neighbouring text can spell another source.
    #[error("target {target:?} of {source_phrase:?} can form source phrase {overlapping:?} with adjacent text")]
    OverlappingTarget {
        source_phrase: String,
        target: String,
        overlapping: String,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Failures reading or writing a single document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("document task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
