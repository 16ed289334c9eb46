use serde::{Deserialize, Serialize};

/// Where a piece of configuration was authored.
///
/// The editable configuration file is the local origin; configuration
/// contributed by a tracked repository is a remote origin. Entities in a
/// merged view carry their origin so edits can be rejected when they would
/// touch an association owned by another source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigOrigin {
    /// The server's own editable configuration file
    Local,
    /// A remote configuration repository contribution
    ConfigRepo {
        /// Repository location
        url: String,
        /// Revision the contribution was read at
        revision: String,
    },
}

impl ConfigOrigin {
    /// Create a remote origin
    pub fn config_repo(url: impl Into<String>, revision: impl Into<String>) -> Self {
        ConfigOrigin::ConfigRepo {
            url: url.into(),
            revision: revision.into(),
        }
    }

    /// Whether this origin is the editable local configuration
    pub fn is_local(&self) -> bool {
        matches!(self, ConfigOrigin::Local)
    }

    /// Human-readable name used in user-facing messages
    pub fn display_name(&self) -> String {
        match self {
            ConfigOrigin::Local => "convoy-config.xml".to_string(),
            ConfigOrigin::ConfigRepo { url, revision } => {
                format!("{} at revision {}", url, revision)
            }
        }
    }
}

impl Default for ConfigOrigin {
    fn default() -> Self {
        ConfigOrigin::Local
    }
}
