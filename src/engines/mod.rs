//! Language-model engine registry.
//!
//! Describes the third-party providers ("engines") the console can talk to,
//! the models each one offers per modality, and the numeric options every
//! model exposes to the settings UI. The table is built once at startup
//! (see [`crate::runtime`]) and only ever read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;

mod catalog;
mod extensions;
mod query;

pub use extensions::load_extensions;
pub use query::{get_default_options, get_engines, get_options, OptionsPolicy, Prompt};

/// Option name -> option descriptor.
pub type Options = BTreeMap<String, OptionSpec>;

/// Option name -> default value.
pub type DefaultOptions = BTreeMap<String, f64>;

/// Errors raised while building or extending the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    #[error("model '{model}' listed more than once for {modality}")]
    DuplicateModel { model: String, modality: Modality },

    #[error("provider '{0}' is built in and cannot be redefined")]
    ReservedProvider(String),

    #[error("failed to parse engines file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read engines file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Kind of output a model produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Json,
}

impl Modality {
    /// Parse a modality tag. Anything other than `text`, `image` or `json`
    /// is not a modality.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Modality::Text),
            "image" => Some(Modality::Image),
            "json" => Some(Modality::Json),
            _ => None,
        }
    }

    /// JSON mode shares the text model list for filtering purposes.
    pub fn normalize(self) -> Self {
        match self {
            Modality::Json => Modality::Text,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Json => "json",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Range, default and step of one numeric tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl OptionSpec {
    /// Check `min <= default <= max` and `step > 0`.
    pub fn validate(&self, name: &str) -> Result<(), RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidOption {
            name: name.to_string(),
            reason,
        };

        if ![self.min, self.max, self.default, self.step]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("values must be finite".to_string()));
        }
        if self.step <= 0.0 {
            return Err(invalid(format!("step {} must be positive", self.step)));
        }
        if self.min > self.default || self.default > self.max {
            return Err(invalid(format!(
                "default {} outside range [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// One concrete model offered by an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub options: Options,
}

/// Model lists per modality. Every modality always has a list, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsByModality {
    #[serde(default)]
    pub text: Vec<Model>,
    #[serde(default)]
    pub image: Vec<Model>,
    #[serde(default)]
    pub json: Vec<Model>,
}

impl ModelsByModality {
    pub fn get(&self, modality: Modality) -> &[Model] {
        match modality {
            Modality::Text => &self.text,
            Modality::Image => &self.image,
            Modality::Json => &self.json,
        }
    }
}

/// A named provider and the models it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    pub models: ModelsByModality,
}

impl Engine {
    /// Check option ranges and that model ids are unique per modality.
    fn validate(&self) -> Result<(), RegistryError> {
        for modality in [Modality::Text, Modality::Image, Modality::Json] {
            let mut seen = HashSet::new();
            for model in self.models.get(modality) {
                if !seen.insert(model.id.as_str()) {
                    return Err(RegistryError::DuplicateModel {
                        model: model.id.clone(),
                        modality,
                    });
                }
                for (name, spec) in &model.options {
                    spec.validate(&format!("{}/{}", model.id, name))?;
                }
            }
        }
        Ok(())
    }
}

/// The providers every registry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreProvider {
    OpenAi,
    Google,
    Together,
}

impl CoreProvider {
    pub const ALL: [CoreProvider; 3] = [
        CoreProvider::OpenAi,
        CoreProvider::Google,
        CoreProvider::Together,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CoreProvider::OpenAi => "openai",
            CoreProvider::Google => "google",
            CoreProvider::Together => "together",
        }
    }
}

impl fmt::Display for CoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider key: one of the core providers or an extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKey {
    Core(CoreProvider),
    Extension(String),
}

impl From<&str> for ProviderKey {
    fn from(key: &str) -> Self {
        CoreProvider::ALL
            .into_iter()
            .find(|core| core.as_str() == key)
            .map(ProviderKey::Core)
            .unwrap_or_else(|| ProviderKey::Extension(key.to_string()))
    }
}

/// The full provider -> engine table.
///
/// Core providers are fields, so they are always present. Extensions can be
/// merged in before the registry is installed; there is no way to mutate it
/// through a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    openai: Engine,
    google: Engine,
    together: Engine,
    extensions: BTreeMap<String, Engine>,
}

impl Registry {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            openai: catalog::openai(),
            google: catalog::google(),
            together: catalog::together(),
            extensions: BTreeMap::new(),
        }
    }

    /// Merge extension engines into the table.
    ///
    /// Core provider keys are reserved. Every engine is validated before
    /// anything is inserted.
    pub fn with_extensions(
        mut self,
        extensions: BTreeMap<String, Engine>,
    ) -> Result<Self, RegistryError> {
        for (key, engine) in &extensions {
            if let ProviderKey::Core(_) = ProviderKey::from(key.as_str()) {
                return Err(RegistryError::ReservedProvider(key.clone()));
            }
            engine.validate()?;
        }
        self.extensions.extend(extensions);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Engine> {
        match ProviderKey::from(key) {
            ProviderKey::Core(core) => Some(self.known(core)),
            ProviderKey::Extension(key) => self.extensions.get(&key),
        }
    }

    pub fn known(&self, core: CoreProvider) -> &Engine {
        match core {
            CoreProvider::OpenAi => &self.openai,
            CoreProvider::Google => &self.google,
            CoreProvider::Together => &self.together,
        }
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, &Engine)> {
        self.extensions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Core providers first, then extensions in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Engine)> {
        CoreProvider::ALL
            .into_iter()
            .map(move |core| (core.as_str(), self.known(core)))
            .chain(self.extensions())
    }

    pub fn len(&self) -> usize {
        CoreProvider::ALL.len() + self.extensions.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
