use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::environment::{EnvironmentConfig, EnvironmentsConfig};
use crate::merge::{EffectiveEnvironment, MergedEnvironment};
use crate::name::ConfigName;
use crate::origin::ConfigOrigin;

/// The editable configuration snapshot owned by an edit session.
///
/// Update commands mutate this tree; the persistence layer is responsible
/// for committing or discarding it as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigTree {
    environments: EnvironmentsConfig,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environments(&self) -> &EnvironmentsConfig {
        &self.environments
    }

    pub fn environments_mut(&mut self) -> &mut EnvironmentsConfig {
        &mut self.environments
    }
}

/// One remote configuration source's contribution to the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialConfig {
    origin: ConfigOrigin,
    environments: EnvironmentsConfig,
}

impl PartialConfig {
    pub fn new(origin: ConfigOrigin, environments: EnvironmentsConfig) -> Self {
        Self { origin, environments }
    }

    pub fn origin(&self) -> &ConfigOrigin {
        &self.origin
    }

    pub fn environments(&self) -> &EnvironmentsConfig {
        &self.environments
    }
}

/// Read-only preprocessed snapshot: the local tree overlaid with every
/// remote contribution. Rebuilt before each validation pass, never mutated
/// by commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedConfigTree {
    environments: Vec<EffectiveEnvironment>,
}

impl MergedConfigTree {
    /// Compose the merged view from the local tree and remote partials.
    ///
    /// Environments declared by a single source stay `Plain`; an
    /// environment declared by several sources becomes `Merged`, its local
    /// part first. Declaration order is preserved: local environments in
    /// tree order, then remote-only environments in contribution order.
    pub fn compose(local: &ConfigTree, remotes: &[PartialConfig]) -> Self {
        let mut grouped: Vec<(ConfigName, Vec<EnvironmentConfig>)> = Vec::new();

        let mut push_part = |part: EnvironmentConfig| {
            match grouped.iter_mut().find(|(name, _)| name == part.name()) {
                Some((_, parts)) => parts.push(part),
                None => grouped.push((part.name().clone(), vec![part])),
            }
        };

        for environment in local.environments().iter() {
            let mut part = environment.clone();
            part.set_origin(ConfigOrigin::Local);
            push_part(part);
        }
        for remote in remotes {
            for environment in remote.environments().iter() {
                let mut part = environment.clone();
                part.set_origin(remote.origin().clone());
                push_part(part);
            }
        }

        let environments = grouped
            .into_iter()
            .map(|(name, mut parts)| {
                if parts.len() == 1 {
                    EffectiveEnvironment::Plain(parts.remove(0))
                } else {
                    debug!(environment = %name, sources = parts.len(), "composed merged environment");
                    // parts share one name by construction
                    let merged = MergedEnvironment::new(parts)
                        .unwrap_or_else(|_| unreachable!("grouped parts share a name"));
                    EffectiveEnvironment::Merged(merged)
                }
            })
            .collect();

        Self { environments }
    }

    /// Look up the effective environment by name
    pub fn find_environment(&self, name: &ConfigName) -> Option<&EffectiveEnvironment> {
        self.environments.iter().find(|env| env.name() == name)
    }

    pub fn environments(&self) -> &[EffectiveEnvironment] {
        &self.environments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(names: &[&str]) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for name in names {
            tree.environments_mut()
                .add(EnvironmentConfig::new(*name))
                .unwrap();
        }
        tree
    }

    fn remote(origin_url: &str, names: &[&str]) -> PartialConfig {
        let mut environments = EnvironmentsConfig::new();
        for name in names {
            environments.add(EnvironmentConfig::new(*name)).unwrap();
        }
        PartialConfig::new(ConfigOrigin::config_repo(origin_url, "head"), environments)
    }

    #[test]
    fn test_single_source_environments_stay_plain() {
        let merged = MergedConfigTree::compose(&tree_with(&["uat"]), &[]);
        let env = merged.find_environment(&ConfigName::from("uat")).unwrap();
        assert!(matches!(env, EffectiveEnvironment::Plain(_)));
    }

    #[test]
    fn test_shared_name_becomes_merged_variant() {
        let remotes = [remote("https://git.example.com/a.git", &["uat", "extra"])];
        let merged = MergedConfigTree::compose(&tree_with(&["uat"]), &remotes);

        let uat = merged.find_environment(&ConfigName::from("UAT")).unwrap();
        let parts = uat.as_merged().expect("uat should be merged").parts();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].origin().is_local());
        assert!(!parts[1].origin().is_local());

        let extra = merged.find_environment(&ConfigName::from("extra")).unwrap();
        assert!(extra.as_merged().is_none());
    }

    #[test]
    fn test_remote_only_environment_keeps_remote_origin() {
        let remotes = [remote("https://git.example.com/a.git", &["edge"])];
        let merged = MergedConfigTree::compose(&ConfigTree::new(), &remotes);
        match merged.find_environment(&ConfigName::from("edge")).unwrap() {
            EffectiveEnvironment::Plain(env) => assert!(!env.origin().is_local()),
            EffectiveEnvironment::Merged(_) => panic!("single-source environment became merged"),
        }
    }
}
