use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConvoyError, ConvoyResult};
use crate::name::ConfigName;
use crate::origin::ConfigOrigin;

/// Field-keyed validation annotations attached to a configuration entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ConfigErrors {
    /// Record an error against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    /// Errors recorded against a field
    pub fn on(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All recorded messages, in field order
    pub fn all(&self) -> Vec<&str> {
        self.fields
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop all recorded errors
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

/// A named grouping of pipelines and agents in the configuration tree.
///
/// Pipeline membership is keyed case-insensitively; agents are keyed by
/// their exact uuid string. Both collections keep insertion order and
/// reject duplicates silently (add is idempotent, remove of an absent
/// member is a no-op).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    name: ConfigName,
    #[serde(default)]
    pipelines: Vec<ConfigName>,
    #[serde(default)]
    agents: Vec<String>,
    #[serde(default)]
    origin: ConfigOrigin,
    #[serde(skip)]
    errors: ConfigErrors,
}

impl EnvironmentConfig {
    /// Create a new, empty environment
    pub fn new(name: impl Into<ConfigName>) -> Self {
        Self {
            name: name.into(),
            pipelines: Vec::new(),
            agents: Vec::new(),
            origin: ConfigOrigin::Local,
            errors: ConfigErrors::default(),
        }
    }

    pub fn name(&self) -> &ConfigName {
        &self.name
    }

    pub fn origin(&self) -> &ConfigOrigin {
        &self.origin
    }

    pub fn set_origin(&mut self, origin: ConfigOrigin) {
        self.origin = origin;
    }

    /// Associate an agent with this environment. Idempotent.
    pub fn add_agent(&mut self, uuid: &str) -> ConvoyResult<()> {
        if uuid.trim().is_empty() {
            return Err(ConvoyError::InvalidAgentUuid(uuid.to_string()));
        }
        if !self.has_agent(uuid) {
            self.agents.push(uuid.to_string());
        }
        Ok(())
    }

    /// Remove an agent association. No-op when the agent is not a member.
    pub fn remove_agent(&mut self, uuid: &str) {
        self.agents.retain(|member| member != uuid);
    }

    /// Exact-match membership check for an agent uuid
    pub fn has_agent(&self, uuid: &str) -> bool {
        self.agents.iter().any(|member| member == uuid)
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Associate a pipeline with this environment. Idempotent.
    pub fn add_pipeline(&mut self, name: ConfigName) -> ConvoyResult<()> {
        if !name.is_well_formed() {
            return Err(ConvoyError::InvalidPipelineName(name.to_string()));
        }
        if !self.contains_pipeline(&name) {
            self.pipelines.push(name);
        }
        Ok(())
    }

    /// Remove a pipeline association. No-op when the pipeline is not a member.
    pub fn remove_pipeline(&mut self, name: &ConfigName) {
        self.pipelines.retain(|member| member != name);
    }

    /// Case-insensitive membership check for a pipeline
    pub fn contains_pipeline(&self, name: &ConfigName) -> bool {
        self.pipelines.contains(name)
    }

    pub fn pipelines(&self) -> &[ConfigName] {
        &self.pipelines
    }

    /// Structural validation: the environment name must be a well-formed
    /// identifier. Findings are recorded as entity annotations rather than
    /// returned, so callers can collect them alongside other entities.
    pub fn validate(&mut self) {
        if !self.name.is_well_formed() {
            self.errors.add(
                "name",
                format!(
                    "Environment name '{}' is invalid. It must be non-empty and may contain only letters, digits, '-', '_' and '.'",
                    self.name
                ),
            );
        }
    }

    pub fn errors(&self) -> &ConfigErrors {
        &self.errors
    }

    /// Reset validation annotations, required before re-validating
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

/// The set of environments in one configuration snapshot.
///
/// Environment names are unique within a snapshot, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentsConfig {
    environments: Vec<EnvironmentConfig>,
}

impl EnvironmentsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment, rejecting duplicate names
    pub fn add(&mut self, environment: EnvironmentConfig) -> ConvoyResult<()> {
        if self.find(environment.name()).is_some() {
            return Err(ConvoyError::DuplicateEnvironment(
                environment.name().to_string(),
            ));
        }
        self.environments.push(environment);
        Ok(())
    }

    /// Look up an environment by name
    pub fn find(&self, name: &ConfigName) -> Option<&EnvironmentConfig> {
        self.environments.iter().find(|env| env.name() == name)
    }

    /// Look up an environment that is expected to exist
    pub fn named_mut(&mut self, name: &ConfigName) -> ConvoyResult<&mut EnvironmentConfig> {
        self.environments
            .iter_mut()
            .find(|env| env.name() == name)
            .ok_or_else(|| ConvoyError::EnvironmentNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvironmentConfig> {
        self.environments.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }
}
