//! Apply English-to-Japanese phrase tables to documentation text.

pub mod config;
pub mod document;
pub mod error;
pub mod map;
pub mod text;

pub use error::{ConfigError, DocumentError};
pub use map::{Table, TranslationMap};
pub use text::{TranslatedDocument, apply};
