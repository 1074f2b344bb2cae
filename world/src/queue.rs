//! Turn ordering: transient actors, persistent agents, the stamped command.

use std::collections::VecDeque;

use gridfall_core::EntityId;

/// The scheduling half of the simulation context.
///
/// `actors` is consumed front-to-back over one turn; `agents` survives
/// across turns and is appended to the actors whenever a turn begins. The
/// cascading trigger protocol pushes excited entities onto the *front* of
/// the actors, which is what turns would-be recursion into a bounded,
/// deterministic unwind.
#[derive(Clone, Debug)]
pub(crate) struct Queue {
    actors: VecDeque<EntityId>,
    agents: VecDeque<EntityId>,
    command: char,
}

impl Queue {
    pub(crate) fn new() -> Self {
        Self {
            actors: VecDeque::new(),
            agents: VecDeque::new(),
            command: '.',
        }
    }

    /// Appends all agents, in their standing order, to the end of the
    /// actors and stamps the command driving this turn.
    pub(crate) fn begin_turn(&mut self, command: char) {
        self.actors.extend(self.agents.iter().copied());
        self.command = command;
    }

    /// The command stamped by the most recent [`Queue::begin_turn`].
    pub(crate) const fn command(&self) -> char {
        self.command
    }

    /// Inserts an actor for the current turn, at the front when `high`.
    pub(crate) fn enqueue(&mut self, id: EntityId, high: bool) {
        if high {
            self.actors.push_front(id);
        } else {
            self.actors.push_back(id);
        }
    }

    /// Registers a persistent agent, at the front when `high`.
    pub(crate) fn register_agent(&mut self, id: EntityId, high: bool) {
        if high {
            self.agents.push_front(id);
        } else {
            self.agents.push_back(id);
        }
    }

    /// Removes an entity from the agents and from the pending actors, so a
    /// stopped entity cannot act again mid-turn.
    pub(crate) fn unregister(&mut self, id: EntityId) {
        self.agents.retain(|agent| *agent != id);
        self.actors.retain(|actor| *actor != id);
    }

    /// Pops the next actor, or `None` when the turn is exhausted.
    pub(crate) fn pull(&mut self) -> Option<EntityId> {
        self.actors.pop_front()
    }

    /// Clears both lists; nothing acts again until the next load.
    pub(crate) fn terminate(&mut self) {
        self.actors.clear();
        self.agents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use gridfall_core::EntityId;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    const A: EntityId = EntityId::new(0);
    const B: EntityId = EntityId::new(1);
    const C: EntityId = EntityId::new(2);

    #[test]
    fn agents_are_pulled_in_registration_order_every_turn() {
        let mut queue = Queue::new();
        queue.register_agent(A, false);
        queue.register_agent(B, false);

        queue.begin_turn('^');
        assert_eq!(queue.command(), '^');
        assert_eq!(queue.pull(), Some(A));
        assert_eq!(queue.pull(), Some(B));
        assert_eq!(queue.pull(), None);
        assert_eq!(queue.pull(), None);

        queue.begin_turn('>');
        assert_eq!(queue.pull(), Some(A));
        assert_eq!(queue.pull(), Some(B));
        assert_eq!(queue.pull(), None);
    }

    #[test]
    fn high_priority_insertion_jumps_the_line() {
        let mut queue = Queue::new();
        queue.register_agent(A, false);
        queue.register_agent(B, false);

        queue.begin_turn('v');
        queue.enqueue(C, true);

        assert_eq!(queue.pull(), Some(C));
        assert_eq!(queue.pull(), Some(A));
        assert_eq!(queue.pull(), Some(B));
        assert_eq!(queue.pull(), None);
    }

    #[test]
    fn high_priority_registration_fronts_the_agents() {
        let mut queue = Queue::new();
        queue.register_agent(A, false);
        queue.register_agent(B, true);

        queue.begin_turn('.');
        assert_eq!(queue.pull(), Some(B));
        assert_eq!(queue.pull(), Some(A));
    }

    #[test]
    fn unregister_purges_pending_actors_too() {
        let mut queue = Queue::new();
        queue.register_agent(A, false);
        queue.register_agent(B, false);

        queue.begin_turn('<');
        queue.unregister(A);

        assert_eq!(queue.pull(), Some(B));
        assert_eq!(queue.pull(), None);

        queue.begin_turn('<');
        assert_eq!(queue.pull(), Some(B));
        assert_eq!(queue.pull(), None);
    }

    #[test]
    fn terminate_silences_the_queue_for_good() {
        let mut queue = Queue::new();
        queue.register_agent(A, false);
        queue.begin_turn('^');
        queue.terminate();

        assert_eq!(queue.pull(), None);
        queue.begin_turn('^');
        assert_eq!(queue.pull(), None);
    }

    proptest! {
        /// Mixed-priority insertion pulls in the same order as a model
        /// double-ended queue.
        #[test]
        fn pull_order_matches_a_deque_model(
            inserts in prop::collection::vec((0u32..32, prop::bool::ANY), 0..48)
        ) {
            let mut queue = Queue::new();
            let mut model: VecDeque<u32> = VecDeque::new();

            for (value, high) in inserts {
                queue.enqueue(EntityId::new(value), high);
                if high {
                    model.push_front(value);
                } else {
                    model.push_back(value);
                }
            }

            while let Some(expected) = model.pop_front() {
                prop_assert_eq!(queue.pull(), Some(EntityId::new(expected)));
            }
            prop_assert_eq!(queue.pull(), None);
        }
    }
}
