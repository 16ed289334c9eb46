use std::collections::HashSet;

use convoy_core::Identity;

/// Authorization queries the update commands depend on.
///
/// Implemented by the surrounding configuration service; commands only
/// need to ask whether the acting identity administers the server.
pub trait ConfigAccess {
    fn is_administrator(&self, user: &Identity) -> bool;
}

/// Simple username-list implementation of [`ConfigAccess`]
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    admins: HashSet<String>,
}

impl AdminList {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

impl ConfigAccess for AdminList {
    fn is_administrator(&self, user: &Identity) -> bool {
        self.admins.contains(user.username())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_list() {
        let access = AdminList::new(["root", "jdoe"]);
        assert!(access.is_administrator(&Identity::new("jdoe")));
        assert!(!access.is_administrator(&Identity::new("intruder")));
        // username match is exact, display name plays no part
        assert!(!access.is_administrator(&Identity::new("JDOE")));
    }
}
