//! Named variables: entity references, strings, and counters.

use std::collections::HashMap;

use gridfall_core::EntityId;

/// The bookkeeping half of the simulation context.
///
/// Three independent namespaces keyed by variable name. Absent keys read as
/// the namespace default: no entity, the empty string, zero.
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
    entities: HashMap<String, EntityId>,
    strings: HashMap<String, String>,
    counters: HashMap<String, i32>,
}

impl State {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.entities.clear();
        self.strings.clear();
        self.counters.clear();
    }

    pub(crate) fn set_entity(&mut self, name: &str, id: EntityId) {
        let _ = self.entities.insert(name.to_string(), id);
    }

    pub(crate) fn entity(&self, name: &str) -> Option<EntityId> {
        self.entities.get(name).copied()
    }

    pub(crate) fn set_string(&mut self, name: &str, value: &str) {
        let _ = self.strings.insert(name.to_string(), value.to_string());
    }

    pub(crate) fn string(&self, name: &str) -> &str {
        self.strings.get(name).map_or("", String::as_str)
    }

    pub(crate) fn set_count(&mut self, name: &str, value: i32) {
        let _ = self.counters.insert(name.to_string(), value);
    }

    pub(crate) fn count(&self, name: &str) -> i32 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Adds `delta` to a counter, treating an absent key as zero.
    pub(crate) fn add(&mut self, name: &str, delta: i32) {
        self.set_count(name, self.count(name) + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::State;
    use gridfall_core::EntityId;

    #[test]
    fn absent_keys_read_as_defaults() {
        let state = State::new();
        assert_eq!(state.entity("PLAYER"), None);
        assert_eq!(state.string("MESSAGE"), "");
        assert_eq!(state.count("SCORE"), 0);
    }

    #[test]
    fn namespaces_do_not_collide() {
        let mut state = State::new();
        state.set_entity("X", EntityId::new(3));
        state.set_string("X", "title");
        state.set_count("X", 9);

        assert_eq!(state.entity("X"), Some(EntityId::new(3)));
        assert_eq!(state.string("X"), "title");
        assert_eq!(state.count("X"), 9);
    }

    #[test]
    fn add_accumulates_from_the_default() {
        let mut state = State::new();
        state.add("MOVES", 1000);
        state.add("MOVES", -1);
        assert_eq!(state.count("MOVES"), 999);

        state.add("SCORE", 10);
        assert_eq!(state.count("SCORE"), 10);
    }

    #[test]
    fn reset_clears_every_namespace() {
        let mut state = State::new();
        state.set_entity("PLAYER", EntityId::new(0));
        state.set_string("TITLE", "Cave");
        state.add("STARS", 4);

        state.reset();

        assert_eq!(state.entity("PLAYER"), None);
        assert_eq!(state.string("TITLE"), "");
        assert_eq!(state.count("STARS"), 0);
    }
}
