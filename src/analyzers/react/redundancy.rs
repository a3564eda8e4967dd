//! Flags state updates that are frequently, not necessarily, redundant.
//!
//! Two textual patterns count as redundant:
//! - the setter called with its own state variable as the only argument
//! - two calls of the same setter with no `;` between them
//!
//! Both are matched over raw text, so a `;` inside a string or comment, or
//! calls spread over JSX attributes, can skew the counts.

use super::patterns::SetterRules;
use crate::core::{StateHook, StateUpdateRecord};
use tracing::warn;

/// One record per hook, in the same order as `hooks`.
pub fn analyze_redundancy(hooks: &[StateHook], source: &str) -> Vec<StateUpdateRecord> {
    hooks.iter().map(|hook| analyze_hook(hook, source)).collect()
}

fn analyze_hook(hook: &StateHook, source: &str) -> StateUpdateRecord {
    let rules = match SetterRules::new(&hook.name, &hook.setter_name) {
        Ok(rules) => rules,
        Err(e) => {
            warn!(setter = %hook.setter_name, "Skipping setter with unusable pattern: {e}");
            return record(hook, 0, 0, 0);
        }
    };

    record(
        hook,
        rules.call_site.find_iter(source).count(),
        rules.self_referential.find_iter(source).count(),
        rules.adjacent_calls.find_iter(source).count(),
    )
}

fn record(
    hook: &StateHook,
    update_count: usize,
    self_referential: usize,
    adjacent: usize,
) -> StateUpdateRecord {
    StateUpdateRecord {
        state_name: hook.name.clone(),
        setter_name: hook.setter_name.clone(),
        update_count,
        redundant_updates: self_referential + adjacent,
        self_referential_updates: self_referential,
        adjacent_updates: adjacent,
    }
}
