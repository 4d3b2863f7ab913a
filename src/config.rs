use crate::error::ConfigError;
use crate::map::{Table, TranslationMap};
use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Phrase {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub table: Table,
    #[serde(default = "default_true")]
    pub use_builtin_table: bool,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub phrases: Vec<Phrase>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: Table::default(),
            use_builtin_table: true,
            extensions: default_extensions(),
            phrases: Vec::new(),
        }
    }
}

impl Config {
    /// Build the map this config describes: built-in table with the user
    /// phrases layered on top, or the user phrases alone.
    pub fn translation_map(&self) -> Result<TranslationMap, ConfigError> {
        let user = self
            .phrases
            .iter()
            .map(|p| (p.source.clone(), p.target.clone()));
        if self.use_builtin_table {
            TranslationMap::builtin(self.table).with_overrides(user)
        } else {
            TranslationMap::new(user)
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("phrasemap.toml")
}

fn default_true() -> bool {
    true
}

pub fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

pub fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `path` (or the default location). A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    let mut config = match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {path:?}, using defaults");
            Config::default()
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    // Allow env var to override the table
    if let Ok(name) = std::env::var("PHRASEMAP_TABLE") {
        match Table::parse(&name) {
            Some(table) => config.table = table,
            None => warn!("ignoring unknown PHRASEMAP_TABLE={name:?}"),
        }
    }

    debug!(
        "table={:?} builtin={} phrases={}",
        config.table,
        config.use_builtin_table,
        config.phrases.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Config, ConfigError> {
        parse_config(content, Path::new("phrasemap.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let config = parse(
            r#"
            table = "glossary"
            use_builtin_table = false
            extensions = ["md", "txt"]

            [[phrases]]
            source = "Mixin"
            target = "ミックスイン"
            "#,
        )
        .unwrap();
        assert_eq!(config.table, Table::Glossary);
        assert!(!config.use_builtin_table);
        assert_eq!(config.extensions, vec!["md", "txt"]);

        let map = config.translation_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Mixin"), Some("ミックスイン"));
    }

    #[test]
    fn user_phrases_layer_over_builtin() {
        let config = parse(
            r#"
            table = "glossary"

            [[phrases]]
            source = "Examples"
            target = "サンプル"
            "#,
        )
        .unwrap();
        let map = config.translation_map().unwrap();
        assert_eq!(map.get("Examples"), Some("サンプル"));
        assert_eq!(map.len(), TranslationMap::builtin(Table::Glossary).len());
    }

    #[test]
    fn duplicate_user_phrases_are_fatal() {
        let config = parse(
            r#"
            [[phrases]]
            source = "Java"
            target = "A"

            [[phrases]]
            source = "Java"
            target = "B"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.translation_map(),
            Err(ConfigError::DuplicatePhrase(_))
        ));
    }

    #[test]
    fn unknown_table_is_a_parse_error() {
        assert!(matches!(
            parse(r#"table = "klingon""#),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/phrasemap.toml"))).unwrap();
        assert!(config.use_builtin_table);
        assert_eq!(config.extensions, vec!["md"]);
    }
}
