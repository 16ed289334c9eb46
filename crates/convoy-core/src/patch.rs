use serde::{Deserialize, Serialize};

/// An incremental change to one environment's membership.
///
/// Four ordered identifier lists, fixed once constructed. Duplicate
/// entries are tolerated; the underlying collections treat add and remove
/// as idempotent set operations. This is the shape the API layer
/// deserializes from the request body, so every list defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentPatch {
    pipelines_to_add: Vec<String>,
    pipelines_to_remove: Vec<String>,
    agents_to_add: Vec<String>,
    agents_to_remove: Vec<String>,
}

impl EnvironmentPatch {
    pub fn new(
        pipelines_to_add: Vec<String>,
        pipelines_to_remove: Vec<String>,
        agents_to_add: Vec<String>,
        agents_to_remove: Vec<String>,
    ) -> Self {
        Self {
            pipelines_to_add,
            pipelines_to_remove,
            agents_to_add,
            agents_to_remove,
        }
    }

    pub fn pipelines_to_add(&self) -> &[String] {
        &self.pipelines_to_add
    }

    pub fn pipelines_to_remove(&self) -> &[String] {
        &self.pipelines_to_remove
    }

    pub fn agents_to_add(&self) -> &[String] {
        &self.agents_to_add
    }

    pub fn agents_to_remove(&self) -> &[String] {
        &self.agents_to_remove
    }

    /// Whether the patch requests no change at all
    pub fn is_empty(&self) -> bool {
        self.pipelines_to_add.is_empty()
            && self.pipelines_to_remove.is_empty()
            && self.agents_to_add.is_empty()
            && self.agents_to_remove.is_empty()
    }

    /// Whether the patch requests any removal
    pub fn has_removals(&self) -> bool {
        !self.pipelines_to_remove.is_empty() || !self.agents_to_remove.is_empty()
    }
}
