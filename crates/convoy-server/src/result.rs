use crate::messages::{LocalizedMessage, MessageCatalog};

/// Health-state classification attached to authorization failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStateTag {
    Unauthorized,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    BadRequest(LocalizedMessage),
    Unauthorized(LocalizedMessage, HealthStateTag),
}

/// Terminal outcome of one command execution.
///
/// Created empty (successful) by the caller; a command records at most one
/// terminal failure during its permission or validation phase. The first
/// recorded outcome wins, later calls are ignored, matching the
/// first-found-wins rejection policy of the validators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationResult {
    outcome: Option<Outcome>,
}

impl OperationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a client error (HTTP 400 equivalent)
    pub fn bad_request(&mut self, message: LocalizedMessage) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::BadRequest(message));
        }
    }

    /// Record an authorization failure (HTTP 401 equivalent)
    pub fn unauthorized(&mut self, message: LocalizedMessage, tag: HealthStateTag) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Unauthorized(message, tag));
        }
    }

    pub fn is_successful(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn http_code(&self) -> u16 {
        match self.outcome {
            None => 200,
            Some(Outcome::BadRequest(_)) => 400,
            Some(Outcome::Unauthorized(..)) => 401,
        }
    }

    pub fn health_state_tag(&self) -> Option<HealthStateTag> {
        match self.outcome {
            Some(Outcome::Unauthorized(_, tag)) => Some(tag),
            _ => None,
        }
    }

    /// Render the failure message, if any, through the given catalog
    pub fn message(&self, catalog: &dyn MessageCatalog) -> Option<String> {
        match &self.outcome {
            None => None,
            Some(Outcome::BadRequest(message)) | Some(Outcome::Unauthorized(message, _)) => {
                Some(catalog.render(message))
            }
        }
    }
}
