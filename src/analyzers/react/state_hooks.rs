use super::patterns::STATE_HOOK_DECLARATION;
use crate::core::StateHook;

/// Find every `[value, setValue] = useState(...)` declaration in source
/// order. Repeated declarations are kept as separate entries.
pub fn extract_state_hooks(source: &str) -> Vec<StateHook> {
    STATE_HOOK_DECLARATION
        .captures_iter(source)
        .map(|caps| StateHook::new(&caps[1], &caps[2]))
        .collect()
}
