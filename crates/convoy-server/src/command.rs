use convoy_core::{ConfigTree, MergedConfigTree};
use tracing::debug;

use crate::error::UpdateResult;

/// The three-phase contract every entity update command satisfies.
///
/// The executing framework calls the phases in strict order and
/// short-circuits on the first failure. `can_continue` and `is_valid`
/// report rejections through the command's operation result and return
/// false; `update` propagates apply-time failures as errors.
pub trait EntityUpdateCommand {
    /// Authorization gate against the current configuration
    fn can_continue(&mut self, current: &ConfigTree) -> bool;

    /// Validation against the preprocessed (merged) snapshot. Must not
    /// mutate the snapshot.
    fn is_valid(&mut self, preprocessed: &MergedConfigTree) -> bool;

    /// Apply the change to the editable configuration
    fn update(&mut self, config_for_edit: &mut ConfigTree) -> UpdateResult<()>;

    /// Reset validation annotations on the edited entity
    fn clear_errors(&mut self);
}

/// Run a command through the full three-phase protocol.
///
/// `preprocess` rebuilds the merged view from the editable tree before
/// each validation pass; it is injected so the layering strategy stays
/// with the configuration system, not the command.
///
/// Returns `Ok(true)` when the change was applied, `Ok(false)` when a
/// phase rejected it (details are in the command's operation result), and
/// `Err` for apply-time failures, which void the whole edit.
pub fn run_entity_update<C, F>(
    command: &mut C,
    config_for_edit: &mut ConfigTree,
    preprocess: F,
) -> UpdateResult<bool>
where
    C: EntityUpdateCommand,
    F: Fn(&ConfigTree) -> MergedConfigTree,
{
    if !command.can_continue(config_for_edit) {
        debug!("entity update rejected by permission check");
        return Ok(false);
    }

    command.clear_errors();
    let preprocessed = preprocess(config_for_edit);
    if !command.is_valid(&preprocessed) {
        debug!("entity update rejected by validation");
        return Ok(false);
    }

    command.update(config_for_edit)?;
    Ok(true)
}
