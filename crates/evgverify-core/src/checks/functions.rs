//! Function definition changes.

use crate::changes::{ChangeReason, ChangeSet};
use crate::checks::summarize;
use crate::model::ConfigSnapshot;

/// Flag every function of the patched state that is new or whose body
/// differs from the original. Removed functions are not reported.
pub fn check(original: &ConfigSnapshot, patched: &ConfigSnapshot, changes: &mut ChangeSet) {
    let original_funcs = original.functions();

    let updated: Vec<(&str, ChangeReason)> = patched
        .functions()
        .iter()
        .filter_map(|(name, body)| match original_funcs.get(name) {
            None => Some((name.as_str(), ChangeReason::Added)),
            Some(original_body) if original_body != body => {
                Some((name.as_str(), ChangeReason::DefinitionChanged))
            }
            Some(_) => None,
        })
        .collect();

    for (name, reason) in &updated {
        tracing::debug!(stage = "functions", entity_name = *name, reason = %reason, "Function changed.");
    }
    tracing::info!(
        stage = "functions",
        funcs = %summarize(updated.iter().map(|(name, _)| *name)),
        "Found updated functions."
    );

    for (name, reason) in updated {
        changes.add_function(name, reason);
    }
}
