//! User-facing message keys and their rendering.
//!
//! Commands never format user-facing text themselves; they record a key
//! plus positional parameters and leave rendering to a catalog, so the
//! API layer can swap in a translated catalog without touching command
//! logic.

/// Keys understood by the message catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Params: environment name, user display name
    NoPermissionToUpdateEnvironment,
    /// Params: environment name, then an optional curried detail
    EnvUpdateFailed,
}

/// A message key plus its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedMessage {
    key: MessageKey,
    params: Vec<String>,
}

impl LocalizedMessage {
    pub fn new(key: MessageKey, params: Vec<String>) -> Self {
        Self { key, params }
    }

    pub fn no_permission_to_update_environment(
        environment: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self::new(
            MessageKey::NoPermissionToUpdateEnvironment,
            vec![environment.into(), user.into()],
        )
    }

    pub fn env_update_failed(environment: impl Into<String>) -> Self {
        Self::new(MessageKey::EnvUpdateFailed, vec![environment.into()])
    }

    /// Curry an extra positional parameter onto the message
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn key(&self) -> MessageKey {
        self.key
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

/// Opaque formatter turning a message into user-facing text
pub trait MessageCatalog {
    fn render(&self, message: &LocalizedMessage) -> String;
}

/// Default English catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn render(&self, message: &LocalizedMessage) -> String {
        let param = |index: usize| message.params().get(index).map(String::as_str).unwrap_or("");
        match message.key() {
            MessageKey::NoPermissionToUpdateEnvironment => format!(
                "Failed to update environment '{}'. User '{}' does not have permission to update environments",
                param(0),
                param(1)
            ),
            MessageKey::EnvUpdateFailed => match message.params().get(1) {
                Some(detail) => {
                    format!("Failed to update environment '{}'. {}", param(0), detail)
                }
                None => format!("Failed to update environment '{}'.", param(0)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_permission_message() {
        let message = LocalizedMessage::no_permission_to_update_environment("uat", "Jay Doe");
        assert_eq!(
            EnglishCatalog.render(&message),
            "Failed to update environment 'uat'. User 'Jay Doe' does not have permission to update environments"
        );
    }

    #[test]
    fn test_curried_detail_is_appended() {
        let message = LocalizedMessage::env_update_failed("uat").with_param("Pipeline 'p' missing");
        assert_eq!(
            EnglishCatalog.render(&message),
            "Failed to update environment 'uat'. Pipeline 'p' missing"
        );
    }
}
