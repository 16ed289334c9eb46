//! Core types for the Convoy configuration server.
//!
//! This crate provides the configuration data model that the server-side
//! update commands operate on: environments and their pipeline/agent
//! associations, the editable configuration tree, and the merged read-only
//! view composed from the local tree plus remote configuration sources.

pub mod environment;
pub mod error;
pub mod identity;
pub mod merge;
pub mod name;
pub mod origin;
pub mod patch;
pub mod tree;

// Re-export commonly used types
pub use crate::environment::{ConfigErrors, EnvironmentConfig, EnvironmentsConfig};
pub use crate::error::{ConvoyError, ConvoyResult};
pub use crate::identity::Identity;
pub use crate::merge::{EffectiveEnvironment, MergedEnvironment};
pub use crate::name::ConfigName;
pub use crate::origin::ConfigOrigin;
pub use crate::patch::EnvironmentPatch;
pub use crate::tree::{ConfigTree, MergedConfigTree, PartialConfig};

/// Initialize the library
pub fn init() {
    // Set up logging if not already configured
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();
}
