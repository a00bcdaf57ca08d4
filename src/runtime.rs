//! Process-wide registry singleton.
//!
//! The registry is installed once at startup and read from every request
//! handler and command afterwards:
//!
//! ```ignore
//! // At startup:
//! let registry = engines::load_extensions(&config.engines_file)?;
//! runtime::install(registry, config.json_options);
//!
//! // Anywhere else:
//! let engines = runtime::registry().engines_for("text");
//! ```
//!
//! If nothing was installed, readers get the built-in table with the
//! default options policy.

use std::sync::OnceLock;

use crate::engines::{CoreProvider, OptionsPolicy, Registry};

/// Registry plus the policy used to resolve options from it.
pub struct Runtime {
    pub registry: Registry,
    pub options_policy: OptionsPolicy,
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Install the process registry. Later calls are ignored.
pub fn install(registry: Registry, options_policy: OptionsPolicy) {
    let count = registry.len();
    let core: Vec<String> = CoreProvider::ALL
        .into_iter()
        .map(|core| {
            let engine = registry.known(core);
            format!("{} ({} text model(s))", engine.name, engine.models.text.len())
        })
        .collect();
    let extensions: Vec<String> = registry.extensions().map(|(k, _)| k.to_string()).collect();
    if RUNTIME
        .set(Runtime {
            registry,
            options_policy,
        })
        .is_err()
    {
        tracing::warn!("Registry already installed. Keeping existing.");
        return;
    }
    tracing::debug!(
        "Installed registry with {} engine(s) (core: {:?}, extensions: {:?}), options policy {:?}",
        count,
        core,
        extensions,
        options_policy
    );
}

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| Runtime {
        registry: Registry::builtin(),
        options_policy: OptionsPolicy::default(),
    })
}

/// The installed registry.
pub fn registry() -> &'static Registry {
    &runtime().registry
}

/// The installed options policy.
pub fn options_policy() -> OptionsPolicy {
    runtime().options_policy
}
