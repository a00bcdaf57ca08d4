//! Engine, option and default lookups.
//!
//! Every "not found" along the way (unknown modality, provider not serving
//! that modality, unknown model) is an empty result rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

use super::{DefaultOptions, Engine, Modality, Model, Options, Registry};
use crate::runtime;

/// The slice of a prompt the registry cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Modality tag. Kept as a string so unrecognized values flow through.
    #[serde(rename = "type")]
    pub kind: String,
    pub llm_client: String,
    pub model: String,
}

impl Prompt {
    pub fn new(kind: &str, llm_client: &str, model: &str) -> Self {
        Self {
            kind: kind.to_string(),
            llm_client: llm_client.to_string(),
            model: model.to_string(),
        }
    }
}

/// Which model list a `json` prompt reads its options from.
///
/// Engine filtering always treats `json` as `text`. Option lookup, by
/// default, indexes the `json` list itself, which is empty in the built-in
/// table, so `json` prompts resolve to no options. `TextAlias` applies the
/// alias to option lookup too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionsPolicy {
    #[default]
    Faithful,
    TextAlias,
}

impl FromStr for OptionsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "faithful" => Ok(OptionsPolicy::Faithful),
            "text-alias" | "text_alias" => Ok(OptionsPolicy::TextAlias),
            other => Err(format!(
                "unknown options policy '{}' (expected 'faithful' or 'text-alias')",
                other
            )),
        }
    }
}

impl Registry {
    /// Engines with at least one model for the given modality tag.
    pub fn engines_for(&self, kind: &str) -> BTreeMap<String, Engine> {
        let modality = match Modality::parse(kind) {
            Some(m) => m.normalize(),
            None => return BTreeMap::new(),
        };

        self.iter()
            .filter(|(_, engine)| !engine.models.get(modality).is_empty())
            .map(|(key, engine)| (key.to_string(), engine.clone()))
            .collect()
    }

    /// Find the model a prompt refers to.
    pub fn resolve_model(&self, prompt: &Prompt, policy: OptionsPolicy) -> Option<&Model> {
        let modality = Modality::parse(&prompt.kind)?;
        let engine = self.get(&prompt.llm_client)?;

        // Provider must serve the (aliased) modality at all.
        if engine.models.get(modality.normalize()).is_empty() {
            return None;
        }

        let list = match policy {
            OptionsPolicy::Faithful => modality,
            OptionsPolicy::TextAlias => modality.normalize(),
        };

        engine.models.get(list).iter().find(|m| m.id == prompt.model)
    }

    /// Option descriptors for the prompt's model, empty when nothing matches.
    pub fn options_with(&self, prompt: &Prompt, policy: OptionsPolicy) -> Options {
        match self.resolve_model(prompt, policy) {
            Some(model) => model.options.clone(),
            None => {
                debug!(
                    "No options for {}/{} ({})",
                    prompt.llm_client, prompt.model, prompt.kind
                );
                Options::new()
            }
        }
    }
}

/// Engines serving `kind` in the installed registry.
pub fn get_engines(kind: &str) -> BTreeMap<String, Engine> {
    runtime::registry().engines_for(kind)
}

/// Options for a prompt's model in the installed registry.
pub fn get_options(prompt: &Prompt) -> Options {
    runtime::registry().options_with(prompt, runtime::options_policy())
}

/// Map every option to its default value.
pub fn get_default_options(options: &Options) -> DefaultOptions {
    options
        .iter()
        .map(|(name, spec)| (name.clone(), spec.default))
        .collect()
}
