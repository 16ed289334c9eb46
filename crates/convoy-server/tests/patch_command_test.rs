use convoy_core::{
    ConfigName, ConfigOrigin, ConfigTree, EnvironmentConfig, EnvironmentPatch, EnvironmentsConfig,
    Identity, MergedConfigTree, PartialConfig,
};
use convoy_server::{
    run_entity_update, AdminList, EnglishCatalog, EntityUpdateCommand, PatchEnvironmentCommand,
    UpdateError,
};
use proptest::prelude::*;

fn admin() -> Identity {
    Identity::new("admin").with_display_name("The Admin")
}

fn environment(name: &str, pipelines: &[&str], agents: &[&str]) -> EnvironmentConfig {
    let mut env = EnvironmentConfig::new(name);
    for pipeline in pipelines {
        env.add_pipeline(ConfigName::from(*pipeline)).unwrap();
    }
    for agent in agents {
        env.add_agent(agent).unwrap();
    }
    env
}

fn tree_of(env: &EnvironmentConfig) -> ConfigTree {
    let mut tree = ConfigTree::new();
    tree.environments_mut().add(env.clone()).unwrap();
    tree
}

fn remote_partial(env: EnvironmentConfig) -> PartialConfig {
    let mut environments = EnvironmentsConfig::new();
    environments.add(env).unwrap();
    PartialConfig::new(
        ConfigOrigin::config_repo("https://git.example.com/infra.git", "1f4b2"),
        environments,
    )
}

fn patch(
    pipelines_to_add: &[&str],
    pipelines_to_remove: &[&str],
    agents_to_add: &[&str],
    agents_to_remove: &[&str],
) -> EnvironmentPatch {
    let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    EnvironmentPatch::new(
        list(pipelines_to_add),
        list(pipelines_to_remove),
        list(agents_to_add),
        list(agents_to_remove),
    )
}

mod removal_validation {
    use super::*;

    #[test]
    fn removal_free_patch_validates_against_merged_environment() {
        let local = environment("uat", &["local-pipeline"], &[]);
        let remote = environment("uat", &["remote-pipeline"], &["remote-agent"]);
        let view = MergedConfigTree::compose(&tree_of(&local), &[remote_partial(remote)]);

        let access = AdminList::new(["admin"]);
        let mut command = PatchEnvironmentCommand::new(
            &access,
            local,
            patch(&["added"], &[], &["new-agent"], &[]),
            admin(),
        );
        assert!(command.is_valid(&view));
        assert!(command.result().is_successful());
    }

    #[test]
    fn remotely_defined_agent_cannot_be_removed() {
        let local = environment("uat", &[], &[]);
        let agent_uuid = uuid::Uuid::new_v4().to_string();
        let remote = environment("uat", &[], &[agent_uuid.as_str()]);
        let view = MergedConfigTree::compose(&tree_of(&local), &[remote_partial(remote)]);

        let access = AdminList::new(["admin"]);
        let mut command = PatchEnvironmentCommand::new(
            &access,
            local,
            patch(&[], &[], &[], &[agent_uuid.as_str()]),
            admin(),
        );

        assert!(!command.is_valid(&view));
        let message = command.result().message(&EnglishCatalog).unwrap();
        assert!(message.contains(&format!("Agent with uuid '{}'", agent_uuid)));
        assert!(message.contains("environment 'uat'"));
        assert!(message.contains("[https://git.example.com/infra.git at revision 1f4b2]"));
    }

    #[test]
    fn absent_member_removal_is_rejected() {
        let local = environment("uat", &[], &[]);
        let view = MergedConfigTree::compose(&tree_of(&local), &[]);

        let access = AdminList::new(["admin"]);
        let mut command = PatchEnvironmentCommand::new(
            &access,
            local,
            patch(&[], &[], &[], &["never-there"]),
            admin(),
        );

        assert!(!command.is_valid(&view));
        let message = command.result().message(&EnglishCatalog).unwrap();
        assert!(message.contains("Agent with uuid 'never-there' does not exist in environment 'uat'"));
    }
}

mod authorization {
    use super::*;

    #[test]
    fn non_admin_cannot_continue_and_nothing_is_mutated() {
        let local = environment("uat", &[], &[]);
        let mut tree = tree_of(&local);
        let access = AdminList::new(["someone-else"]);
        let mut command = PatchEnvironmentCommand::new(
            &access,
            local.clone(),
            patch(&["sneaky"], &[], &[], &[]),
            Identity::new("mallory"),
        );

        assert!(!command.can_continue(&tree));
        assert_eq!(command.result().http_code(), 401);

        // defense in depth: update invoked out of order still must not
        // touch the tree
        assert!(matches!(
            command.update(&mut tree),
            Err(UpdateError::Precondition(_))
        ));
        let env = tree.environments().find(&ConfigName::from("uat")).unwrap();
        assert!(env.pipelines().is_empty());
    }
}

mod application {
    use super::*;

    #[test]
    fn adding_an_agent_to_an_empty_environment() {
        let local = environment("uat", &[], &[]);
        let mut tree = tree_of(&local);
        let access = AdminList::new(["admin"]);
        let mut command =
            PatchEnvironmentCommand::new(&access, local, patch(&[], &[], &["u1"], &[]), admin());

        let applied =
            run_entity_update(&mut command, &mut tree, |t| MergedConfigTree::compose(t, &[]))
                .unwrap();
        assert!(applied);
        assert!(command.result().is_successful());

        let env = tree.environments().find(&ConfigName::from("uat")).unwrap();
        assert_eq!(env.agents(), &["u1".to_string()]);
    }

    #[test]
    fn pipeline_removal_matches_case_insensitively() {
        let local = environment("uat", &["p1"], &[]);
        let mut tree = tree_of(&local);
        let access = AdminList::new(["admin"]);
        let mut command =
            PatchEnvironmentCommand::new(&access, local, patch(&[], &["P1"], &[], &[]), admin());

        let applied =
            run_entity_update(&mut command, &mut tree, |t| MergedConfigTree::compose(t, &[]))
                .unwrap();
        assert!(applied);

        let env = tree.environments().find(&ConfigName::from("uat")).unwrap();
        assert!(!env.contains_pipeline(&ConfigName::from("p1")));
    }

    #[test]
    fn reapplying_an_add_patch_leaves_membership_unchanged() {
        let local = environment("uat", &[], &[]);
        let mut tree = tree_of(&local);
        let access = AdminList::new(["admin"]);
        let the_patch = patch(&["build"], &[], &["agent-1"], &[]);

        for _ in 0..2 {
            let mut command = PatchEnvironmentCommand::new(
                &access,
                tree.environments()
                    .find(&ConfigName::from("uat"))
                    .unwrap()
                    .clone(),
                the_patch.clone(),
                admin(),
            );
            let applied =
                run_entity_update(&mut command, &mut tree, |t| MergedConfigTree::compose(t, &[]))
                    .unwrap();
            assert!(applied);
        }

        let env = tree.environments().find(&ConfigName::from("uat")).unwrap();
        assert_eq!(env.agents().len(), 1);
        assert_eq!(env.pipelines().len(), 1);
    }

    #[test]
    fn add_and_remove_of_the_same_agent_nets_to_removed() {
        let local = environment("uat", &[], &["u7"]);
        let mut tree = tree_of(&local);
        let access = AdminList::new(["admin"]);
        // adds run before removes within one cycle, so remove wins
        let mut command =
            PatchEnvironmentCommand::new(&access, local, patch(&[], &[], &["u7"], &["u7"]), admin());

        let applied =
            run_entity_update(&mut command, &mut tree, |t| MergedConfigTree::compose(t, &[]))
                .unwrap();
        assert!(applied);

        let env = tree.environments().find(&ConfigName::from("uat")).unwrap();
        assert!(!env.has_agent("u7"));
    }
}

proptest! {
    // removal checks pass vacuously whenever both remove lists are empty,
    // whatever the merge state of the environment
    #[test]
    fn removal_free_patches_always_validate(
        pipelines_to_add in proptest::collection::vec("[a-z0-9-]{1,12}", 0..6),
        agents_to_add in proptest::collection::vec("[a-f0-9]{8}", 0..6),
        remote_pipelines in proptest::collection::vec("[a-z0-9-]{1,12}", 0..4),
    ) {
        let local = environment("uat", &["anchor"], &[]);
        let mut remote = EnvironmentConfig::new("uat");
        for pipeline in &remote_pipelines {
            remote.add_pipeline(ConfigName::from(pipeline.as_str())).unwrap();
        }
        let view = MergedConfigTree::compose(&tree_of(&local), &[remote_partial(remote)]);

        let access = AdminList::new(["admin"]);
        let mut command = PatchEnvironmentCommand::new(
            &access,
            local,
            EnvironmentPatch::new(pipelines_to_add, vec![], agents_to_add, vec![]),
            admin(),
        );
        prop_assert!(command.is_valid(&view));
        prop_assert!(command.result().is_successful());
    }
}
