//! Restricted YAML loading.
//!
//! # Responsibilities
//! - Parse YAML into any `DeserializeOwned` type
//! - Refuse explicitly tagged nodes unless tags are allowed by config
//!
//! # Design Decisions
//! - The document is parsed into a `serde_yaml::Value` first, then checked,
//!   then converted; a tagged node never reaches the target type
//! - The first offending tag is reported together with its location

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use thiserror::Error;

use crate::config::YamlConfig;

/// Errors produced while loading YAML.
#[derive(Debug, Error)]
pub enum YamlError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("refusing to construct tagged node {tag} at {path}")]
    UnsafeTag { tag: String, path: String },
}

/// YAML loader carrying the configured tag policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlLoader {
    allow_tags: bool,
}

impl YamlLoader {
    pub fn from_config(config: &YamlConfig) -> Self {
        Self {
            allow_tags: config.allow_tags,
        }
    }

    /// Whether this loader refuses tagged nodes.
    pub fn is_safe(&self) -> bool {
        !self.allow_tags
    }

    /// Load a YAML document into `T`.
    pub fn load<T: DeserializeOwned>(&self, input: &str) -> Result<T, YamlError> {
        let value: Value = serde_yaml::from_str(input)?;
        if !self.allow_tags {
            reject_tags(&value, "$")?;
        }
        Ok(serde_yaml::from_value(value)?)
    }
}

fn reject_tags(value: &Value, path: &str) -> Result<(), YamlError> {
    match value {
        Value::Tagged(tagged) => Err(YamlError::UnsafeTag {
            tag: tagged.tag.to_string(),
            path: path.to_string(),
        }),
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                reject_tags(item, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }
        Value::Mapping(mapping) => {
            for (key, item) in mapping {
                let key_path = match key {
                    Value::String(s) => format!("{}.{}", path, s),
                    _ => format!("{}.<key>", path),
                };
                reject_tags(key, &key_path)?;
                reject_tags(item, &key_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Settings {
        name: String,
        replicas: u32,
        tags: Vec<String>,
    }

    #[test]
    fn test_plain_document_loads() {
        let loader = YamlLoader::default();
        let settings: Settings = loader
            .load("name: web\nreplicas: 3\ntags: [a, b]\n")
            .unwrap();
        assert_eq!(
            settings,
            Settings {
                name: "web".into(),
                replicas: 3,
                tags: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn test_object_construction_tag_is_refused() {
        let loader = YamlLoader::default();
        let result: Result<BTreeMap<String, Value>, _> =
            loader.load("cmd: !!python/object/apply:os.system ['echo pwned']\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_local_tag_reports_location() {
        let loader = YamlLoader::default();
        let err = loader
            .load::<Value>("outer:\n  - plain\n  - !Point {x: 1, y: 2}\n")
            .unwrap_err();

        match err {
            YamlError::UnsafeTag { tag, path } => {
                assert!(tag.contains("Point"));
                assert_eq!(path, "$.outer[1]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tags_pass_when_allowed() {
        let loader = YamlLoader::from_config(&YamlConfig { allow_tags: true });
        assert!(!loader.is_safe());
        let value: Value = loader.load("point: !Point {x: 1}\n").unwrap();
        assert!(matches!(value["point"], Value::Tagged(_)));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let loader = YamlLoader::default();
        let err = loader.load::<Value>("a: [1, 2\n").unwrap_err();
        assert!(matches!(err, YamlError::Parse(_)));
    }
}
