//! Patch command for environment membership.
//!
//! Applies an incremental add/remove change to one environment's pipeline
//! and agent associations. The mutation itself is plain set arithmetic;
//! the work is in validating removals against the merged view of the
//! environment, where an association may have been contributed by a remote
//! configuration source the local edit cannot take away.

use std::fmt;

use convoy_core::{
    ConfigName, ConfigTree, EffectiveEnvironment, EnvironmentConfig, EnvironmentPatch, Identity,
    MergedConfigTree,
};
use tracing::{info, warn};

use crate::command::EntityUpdateCommand;
use crate::error::{UpdateError, UpdateResult};
use crate::messages::LocalizedMessage;
use crate::result::{HealthStateTag, OperationResult};
use crate::service::ConfigAccess;

/// Which association category a violation concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    Pipeline,
    Agent,
}

impl AssociationKind {
    fn label(&self) -> &'static str {
        match self {
            AssociationKind::Pipeline => "Pipeline",
            AssociationKind::Agent => "Agent with uuid",
        }
    }
}

/// A removal the validator refused. Validators return the first violation
/// they find; violations are never aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchViolation {
    /// The association is contributed by a remote source, so removing it
    /// locally would not change the effective state
    RemoteAssociation {
        kind: AssociationKind,
        id: String,
        environment: String,
        origin: String,
    },
    /// The element is not a member of the local environment
    AbsentMember {
        kind: AssociationKind,
        id: String,
        environment: String,
    },
}

impl fmt::Display for PatchViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchViolation::RemoteAssociation {
                kind,
                id,
                environment,
                origin,
            } => write!(
                f,
                "{} '{}' cannot be removed from environment '{}' as the association has been defined remotely in [{}]",
                kind.label(),
                id,
                environment,
                origin
            ),
            PatchViolation::AbsentMember {
                kind,
                id,
                environment,
            } => write!(
                f,
                "{} '{}' does not exist in environment '{}'",
                kind.label(),
                id,
                environment
            ),
        }
    }
}

/// Command applying an [`EnvironmentPatch`] to a named environment.
///
/// Holds the local environment instance being edited and owns its
/// [`OperationResult`]; the caller reads the result after the framework
/// has driven the three phases.
pub struct PatchEnvironmentCommand<'a> {
    access: &'a dyn ConfigAccess,
    environment: EnvironmentConfig,
    patch: EnvironmentPatch,
    user: Identity,
    action_failed: LocalizedMessage,
    result: OperationResult,
}

impl<'a> PatchEnvironmentCommand<'a> {
    pub fn new(
        access: &'a dyn ConfigAccess,
        environment: EnvironmentConfig,
        patch: EnvironmentPatch,
        user: Identity,
    ) -> Self {
        let action_failed = LocalizedMessage::env_update_failed(environment.name().to_string());
        Self {
            access,
            environment,
            patch,
            user,
            action_failed,
            result: OperationResult::new(),
        }
    }

    /// Outcome of the last execution
    pub fn result(&self) -> &OperationResult {
        &self.result
    }

    pub fn into_result(self) -> OperationResult {
        self.result
    }

    fn validate_remove_pipelines(
        &self,
        preprocessed: &MergedConfigTree,
    ) -> Result<(), PatchViolation> {
        let environment_name = self.environment.name();
        let effective = preprocessed.find_environment(environment_name);

        if let Some(merged) = effective.and_then(EffectiveEnvironment::as_merged) {
            for pipeline in self.patch.pipelines_to_remove() {
                let candidate = ConfigName::from(pipeline.as_str());
                if merged.contains_pipeline_remotely(&candidate) {
                    let origin = merged
                        .origin_for_pipeline(&candidate)
                        .map(|origin| origin.display_name())
                        .unwrap_or_default();
                    return Err(PatchViolation::RemoteAssociation {
                        kind: AssociationKind::Pipeline,
                        id: pipeline.clone(),
                        environment: environment_name.to_string(),
                        origin,
                    });
                }
            }
        }

        for pipeline in self.patch.pipelines_to_remove() {
            let candidate = ConfigName::from(pipeline.as_str());
            if !self.environment.contains_pipeline(&candidate) {
                return Err(PatchViolation::AbsentMember {
                    kind: AssociationKind::Pipeline,
                    id: pipeline.clone(),
                    environment: environment_name.to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_remove_agents(
        &self,
        preprocessed: &MergedConfigTree,
    ) -> Result<(), PatchViolation> {
        let environment_name = self.environment.name();
        let effective = preprocessed.find_environment(environment_name);

        if let Some(merged) = effective.and_then(EffectiveEnvironment::as_merged) {
            for uuid in self.patch.agents_to_remove() {
                if merged.contains_agent_remotely(uuid) {
                    let origin = merged
                        .origin_for_agent(uuid)
                        .map(|origin| origin.display_name())
                        .unwrap_or_default();
                    return Err(PatchViolation::RemoteAssociation {
                        kind: AssociationKind::Agent,
                        id: uuid.clone(),
                        environment: environment_name.to_string(),
                        origin,
                    });
                }
            }
        }

        for uuid in self.patch.agents_to_remove() {
            if !self.environment.has_agent(uuid) {
                return Err(PatchViolation::AbsentMember {
                    kind: AssociationKind::Agent,
                    id: uuid.clone(),
                    environment: environment_name.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl EntityUpdateCommand for PatchEnvironmentCommand<'_> {
    fn can_continue(&mut self, _current: &ConfigTree) -> bool {
        if !self.access.is_administrator(&self.user) {
            warn!(
                environment = %self.environment.name(),
                user = self.user.username(),
                "environment patch rejected, user is not an administrator"
            );
            let message = LocalizedMessage::no_permission_to_update_environment(
                self.environment.name().to_string(),
                self.user.display_name(),
            );
            self.result.unauthorized(message, HealthStateTag::Unauthorized);
            return false;
        }
        true
    }

    fn is_valid(&mut self, preprocessed: &MergedConfigTree) -> bool {
        // pipeline removals are checked first; a pipeline violation skips
        // the agent checks entirely
        let verdict = self
            .validate_remove_pipelines(preprocessed)
            .and_then(|_| self.validate_remove_agents(preprocessed));

        if let Err(violation) = verdict {
            warn!(environment = %self.environment.name(), %violation, "environment patch rejected");
            let message = self.action_failed.clone().with_param(violation.to_string());
            self.result.bad_request(message);
            return false;
        }

        self.environment.validate();
        if !self.environment.errors().is_empty() {
            let detail = self.environment.errors().all().join("; ");
            self.result.bad_request(self.action_failed.clone().with_param(detail));
            return false;
        }

        true
    }

    fn update(&mut self, config_for_edit: &mut ConfigTree) -> UpdateResult<()> {
        // defense in depth: a result populated by an earlier phase means
        // the framework contract was broken, refuse to touch the tree
        if !self.result.is_successful() {
            warn!(
                environment = %self.environment.name(),
                "refusing to apply environment patch after a failed phase"
            );
            return Err(UpdateError::Precondition(
                "update invoked after a failed permission or validation phase".to_string(),
            ));
        }

        // the editable tree supplied at apply time is authoritative, not
        // the instance held since construction
        let environment = config_for_edit
            .environments_mut()
            .named_mut(self.environment.name())?;

        for uuid in self.patch.agents_to_add() {
            environment.add_agent(uuid)?;
        }
        for uuid in self.patch.agents_to_remove() {
            environment.remove_agent(uuid);
        }
        for pipeline in self.patch.pipelines_to_add() {
            environment.add_pipeline(ConfigName::from(pipeline.as_str()))?;
        }
        for pipeline in self.patch.pipelines_to_remove() {
            environment.remove_pipeline(&ConfigName::from(pipeline.as_str()));
        }

        info!(
            environment = %self.environment.name(),
            agents_added = self.patch.agents_to_add().len(),
            agents_removed = self.patch.agents_to_remove().len(),
            pipelines_added = self.patch.pipelines_to_add().len(),
            pipelines_removed = self.patch.pipelines_to_remove().len(),
            "environment patch applied"
        );
        Ok(())
    }

    fn clear_errors(&mut self) {
        self.environment.clear_errors();
    }
}
