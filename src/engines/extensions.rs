//! Loading extra providers from an `engines.json` file.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use super::{Engine, Registry, RegistryError};

/// Build the registry: built-in table plus whatever `path` adds.
///
/// A missing file means no extensions.
pub fn load_extensions(path: &Path) -> Result<Registry, RegistryError> {
    if !path.exists() {
        debug!("No engines file at {:?}, using built-in registry", path);
        return Ok(Registry::builtin());
    }

    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extensions: BTreeMap<String, Engine> =
        serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let count = extensions.len();
    let registry = Registry::builtin().with_extensions(extensions)?;
    info!("Loaded {} extension engine(s) from {:?}", count, path);

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::Modality;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_builtin() {
        let tmp = tempdir().unwrap();
        let registry = load_extensions(&tmp.path().join("engines.json")).unwrap();
        assert_eq!(registry, Registry::builtin());
    }

    #[test]
    fn test_load_extension_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("engines.json");
        std::fs::write(
            &path,
            r#"{
                "mistral": {
                    "name": "Mistral",
                    "models": {
                        "text": [
                            {
                                "id": "mistral-small",
                                "options": {
                                    "temperature": { "min": 0, "max": 1, "default": 0.7, "step": 0.05 }
                                }
                            }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let registry = load_extensions(&path).unwrap();
        let engine = registry.get("mistral").unwrap();
        assert_eq!(engine.name, "Mistral");
        assert!(engine.models.image.is_empty());
        assert!(engine.models.json.is_empty());
        assert!(registry.engines_for("text").contains_key("mistral"));
    }

    #[test]
    fn test_load_rejects_reserved_key() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("engines.json");
        std::fs::write(&path, r#"{ "google": { "name": "Fake", "models": {} } }"#).unwrap();

        assert!(matches!(
            load_extensions(&path),
            Err(RegistryError::ReservedProvider(_))
        ));
    }

    #[test]
    fn test_load_rejects_duplicate_model_ids() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("engines.json");
        std::fs::write(
            &path,
            r#"{
                "local": {
                    "name": "Local",
                    "models": {
                        "text": [
                            { "id": "local-7b", "options": { "top_k": { "min": 0, "max": 64, "default": 32, "step": 1 } } },
                            { "id": "local-7b" }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        match load_extensions(&path) {
            Err(RegistryError::DuplicateModel { model, modality }) => {
                assert_eq!(model, "local-7b");
                assert_eq!(modality, Modality::Text);
            }
            other => panic!("Expected DuplicateModel, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("engines.json");
        std::fs::write(&path, "not json").unwrap();

        match load_extensions(&path) {
            Err(RegistryError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }
}
