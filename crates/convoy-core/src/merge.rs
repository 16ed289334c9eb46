use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentConfig;
use crate::error::{ConvoyError, ConvoyResult};
use crate::name::ConfigName;
use crate::origin::ConfigOrigin;

/// The effective definition of an environment in a preprocessed snapshot.
///
/// `Plain` when a single source declares the environment, `Merged` when the
/// same name is declared by the local configuration and one or more remote
/// sources. Origin lookups are only available on the merged variant; the
/// variant is queried through [`EffectiveEnvironment::as_merged`] rather
/// than downcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectiveEnvironment {
    Plain(EnvironmentConfig),
    Merged(MergedEnvironment),
}

impl EffectiveEnvironment {
    pub fn name(&self) -> &ConfigName {
        match self {
            EffectiveEnvironment::Plain(env) => env.name(),
            EffectiveEnvironment::Merged(merged) => merged.name(),
        }
    }

    /// Union membership check across all contributing sources
    pub fn has_agent(&self, uuid: &str) -> bool {
        match self {
            EffectiveEnvironment::Plain(env) => env.has_agent(uuid),
            EffectiveEnvironment::Merged(merged) => merged.has_agent(uuid),
        }
    }

    /// Union membership check across all contributing sources
    pub fn contains_pipeline(&self, name: &ConfigName) -> bool {
        match self {
            EffectiveEnvironment::Plain(env) => env.contains_pipeline(name),
            EffectiveEnvironment::Merged(merged) => merged.contains_pipeline(name),
        }
    }

    /// Capability accessor for origin-aware queries
    pub fn as_merged(&self) -> Option<&MergedEnvironment> {
        match self {
            EffectiveEnvironment::Plain(_) => None,
            EffectiveEnvironment::Merged(merged) => Some(merged),
        }
    }
}

/// An environment composed from several sources.
///
/// Each part is the declaration contributed by one source, stamped with
/// that source's origin. Parts keep composition order: the local part
/// first, remote contributions after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedEnvironment {
    name: ConfigName,
    parts: Vec<EnvironmentConfig>,
}

impl MergedEnvironment {
    /// Compose a merged environment from per-source parts. All parts must
    /// declare the same environment name.
    pub fn new(parts: Vec<EnvironmentConfig>) -> ConvoyResult<Self> {
        let name = parts
            .first()
            .map(|part| part.name().clone())
            .ok_or_else(|| ConvoyError::environment("merged environment needs at least one part"))?;
        if let Some(stray) = parts.iter().find(|part| part.name() != &name) {
            return Err(ConvoyError::environment(format!(
                "cannot merge environment '{}' with part named '{}'",
                name,
                stray.name()
            )));
        }
        Ok(Self { name, parts })
    }

    pub fn name(&self) -> &ConfigName {
        &self.name
    }

    pub fn parts(&self) -> &[EnvironmentConfig] {
        &self.parts
    }

    pub fn has_agent(&self, uuid: &str) -> bool {
        self.parts.iter().any(|part| part.has_agent(uuid))
    }

    pub fn contains_pipeline(&self, name: &ConfigName) -> bool {
        self.parts.iter().any(|part| part.contains_pipeline(name))
    }

    /// Whether a source other than the local configuration associates this
    /// agent with the environment
    pub fn contains_agent_remotely(&self, uuid: &str) -> bool {
        self.remote_parts().any(|part| part.has_agent(uuid))
    }

    /// Whether a source other than the local configuration associates this
    /// pipeline with the environment
    pub fn contains_pipeline_remotely(&self, name: &ConfigName) -> bool {
        self.remote_parts().any(|part| part.contains_pipeline(name))
    }

    /// Origin of the first part declaring this agent
    pub fn origin_for_agent(&self, uuid: &str) -> Option<&ConfigOrigin> {
        self.parts
            .iter()
            .find(|part| part.has_agent(uuid))
            .map(EnvironmentConfig::origin)
    }

    /// Origin of the first part declaring this pipeline
    pub fn origin_for_pipeline(&self, name: &ConfigName) -> Option<&ConfigOrigin> {
        self.parts
            .iter()
            .find(|part| part.contains_pipeline(name))
            .map(EnvironmentConfig::origin)
    }

    fn remote_parts(&self) -> impl Iterator<Item = &EnvironmentConfig> {
        self.parts.iter().filter(|part| !part.origin().is_local())
    }
}
