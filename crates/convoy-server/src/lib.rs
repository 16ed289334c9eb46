//! Server-side update commands for the Convoy configuration tree.
//!
//! A command runs in three framework-driven phases: permission check,
//! validation against the preprocessed (merged) snapshot, then mutation of
//! the editable tree. Each phase can short-circuit the rest; rejection
//! details land in the command's [`OperationResult`].

pub mod command;
pub mod error;
pub mod messages;
pub mod result;
pub mod service;
pub mod update;

pub use crate::command::{run_entity_update, EntityUpdateCommand};
pub use crate::error::{UpdateError, UpdateResult};
pub use crate::messages::{EnglishCatalog, LocalizedMessage, MessageCatalog, MessageKey};
pub use crate::result::{HealthStateTag, OperationResult};
pub use crate::service::{AdminList, ConfigAccess};
pub use crate::update::PatchEnvironmentCommand;
