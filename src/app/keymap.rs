//! Resolved key-to-action mapping.
//!
//! The [`Keymap`] is built once from the validated `[keybindings]` table and
//! answers two questions: which action a key event triggers, and which key to
//! show next to an action in the help overlay and status bar.

use crate::app::actions::Action;
use crate::config::KeyBinding;
use crossterm::event::KeyEvent;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    by_key: HashMap<KeyBinding, Action>,
    by_action: BTreeMap<Action, KeyBinding>,
}

impl Keymap {
    /// Builds a keymap from `action name → key string` pairs.
    ///
    /// Unknown action names and unparsable key strings are skipped; the
    /// configuration loader reports them before this is called. When two
    /// actions claim the same key the first one in table order wins.
    #[must_use]
    pub fn from_bindings(bindings: &BTreeMap<String, String>) -> Self {
        let mut keymap = Self::default();

        for (name, key) in bindings {
            let Some(action) = Action::from_name(name) else {
                tracing::debug!(action = %name, "skipping unknown action");
                continue;
            };
            let Ok(binding) = key.parse::<KeyBinding>() else {
                tracing::debug!(action = %name, key = %key, "skipping unparsable key");
                continue;
            };
            if keymap.by_key.contains_key(&binding) {
                tracing::debug!(action = %name, key = %binding, "skipping conflicting key");
                continue;
            }
            keymap.by_key.insert(binding, action);
            keymap.by_action.insert(action, binding);
        }

        keymap
    }

    /// Keymap with every action on its default key.
    #[must_use]
    pub fn defaults() -> Self {
        let bindings = Action::ALL
            .iter()
            .map(|a| (a.name().to_string(), a.default_key().to_string()))
            .collect();
        Self::from_bindings(&bindings)
    }

    #[must_use]
    pub fn resolve(&self, event: &KeyEvent) -> Option<Action> {
        self.by_key.get(&KeyBinding::from_event(event)).copied()
    }

    #[must_use]
    pub fn key_for(&self, action: Action) -> Option<KeyBinding> {
        self.by_action.get(&action).copied()
    }

    /// Display label for the key bound to `action`, or `"-"` when unbound.
    #[must_use]
    pub fn label(&self, action: Action) -> String {
        self.key_for(action)
            .map_or_else(|| "-".to_string(), |k| k.to_string())
    }
}
