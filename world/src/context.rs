//! The simulation context handed to every game lifecycle call.

use gridfall_core::{Direction, EntityId, Position};

use crate::grid::Grid;
use crate::queue::Queue;
use crate::state::State;
use crate::Game;

/// Arena record backing one entity.
struct Slot<P> {
    code: char,
    position: Position,
    payload: P,
}

/// Everything an entity may touch while it runs: the grid, the turn queue,
/// the state table, and the entity arena.
///
/// Entities are addressed by [`EntityId`] throughout; no game code ever
/// holds a reference into the engine. The context is owned by the level and
/// passed by `&mut` into each lifecycle hook, which keeps the whole
/// simulation single-threaded and free of shared-state aliasing.
///
/// Methods that would corrupt the occupancy invariants (double placement,
/// removing an absent entity, reading an empty cell) panic: they signal a
/// bug in entity logic, never a recoverable runtime condition.
pub struct Context<G: Game> {
    grid: Grid,
    queue: Queue,
    state: State,
    slots: Vec<Slot<G::Payload>>,
}

impl<G: Game> Context<G> {
    pub(crate) fn new() -> Self {
        Self {
            grid: Grid::new(),
            queue: Queue::new(),
            state: State::new(),
            slots: Vec::new(),
        }
    }

    /// Clears everything for a fresh level of the given dimensions.
    pub(crate) fn reset(&mut self, width: i32, height: i32) {
        self.grid.reset(width, height);
        self.queue.terminate();
        self.state.reset();
        self.slots.clear();
    }

    /// Builds a dormant entity for `code` at `position` through the game's
    /// factory, or `None` when the game does not know the code.
    pub(crate) fn hatch(&mut self, code: char, position: Position) -> Option<EntityId> {
        let payload = G::hatch(code)?;
        let id = EntityId::new(self.slots.len() as u32);
        self.slots.push(Slot {
            code,
            position,
            payload,
        });
        Some(id)
    }

    pub(crate) fn begin_turn(&mut self, command: char) {
        self.queue.begin_turn(command);
    }

    pub(crate) fn pull(&mut self) -> Option<EntityId> {
        self.queue.pull()
    }

    /// The visible occupant at `position`, `None` when out of bounds or
    /// when the stack there is empty.
    pub(crate) fn front(&self, position: Position) -> Option<EntityId> {
        if !self.grid.in_bounds(position) {
            return None;
        }
        self.grid.front(position)
    }

    /// The visible occupant at an in-bounds position that must have one.
    pub(crate) fn visible(&self, position: Position) -> EntityId {
        match self.grid.front(position) {
            Some(id) => id,
            None => panic!(
                "no visible entity at {},{}",
                position.x(),
                position.y()
            ),
        }
    }

    fn slot(&self, id: EntityId) -> &Slot<G::Payload> {
        match self.slots.get(id.get() as usize) {
            Some(slot) => slot,
            None => panic!("entity {} does not exist in this level", id.get()),
        }
    }

    fn slot_mut(&mut self, id: EntityId) -> &mut Slot<G::Payload> {
        match self.slots.get_mut(id.get() as usize) {
            Some(slot) => slot,
            None => panic!("entity {} does not exist in this level", id.get()),
        }
    }

    /// Hatches a fresh dormant entity, panicking on a code the game does
    /// not know; spawning an unknown code is an entity-logic bug.
    fn spawn_at(&mut self, code: char, position: Position) -> EntityId {
        match self.hatch(code, position) {
            Some(id) => id,
            None => panic!("no entity kind hatches from code {code:?}"),
        }
    }

    fn relocate(&mut self, id: EntityId, destination: Position) {
        let origin = self.position(id);
        self.grid.remove(origin, id);
        self.grid.place_front(destination, id);
        self.slot_mut(id).position = destination;
    }

    /// The immutable type code the entity hatched from.
    #[must_use]
    pub fn code(&self, id: EntityId) -> char {
        self.slot(id).code
    }

    /// Whether the entity's type code is `code`.
    #[must_use]
    pub fn is(&self, id: EntityId, code: char) -> bool {
        self.code(id) == code
    }

    /// The entity's current position; for a dormant entity, its last one.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Position {
        self.slot(id).position
    }

    /// Read access to the entity's game payload.
    #[must_use]
    pub fn payload(&self, id: EntityId) -> &G::Payload {
        &self.slot(id).payload
    }

    /// Write access to the entity's game payload.
    pub fn payload_mut(&mut self, id: EntityId) -> &mut G::Payload {
        &mut self.slot_mut(id).payload
    }

    /// The visible neighbor one step from `id` in `direction`.
    ///
    /// Total on sentineled levels; panics if the neighboring stack is empty.
    #[must_use]
    pub fn find(&self, id: EntityId, direction: Direction) -> EntityId {
        self.visible(self.position(id).step(direction))
    }

    /// The background occupant of the cell `id` is (or was last) in.
    #[must_use]
    pub fn background_of(&self, id: EntityId) -> Option<EntityId> {
        self.grid.back(self.position(id))
    }

    /// Spawns a `code` entity behind `id`, the slot that stays put when the
    /// entity moves away.
    pub fn lay_background(&mut self, id: EntityId, code: char) {
        let position = self.position(id);
        let background = self.spawn_at(code, position);
        self.grid.place_back(position, background);
    }

    /// Moves the entity one step in `direction`: out of its old stack, onto
    /// the front of the destination stack.
    pub fn move_toward(&mut self, id: EntityId, direction: Direction) {
        let destination = self.position(id).step(direction);
        self.relocate(id, destination);
    }

    /// Moves the entity onto `target`'s cell, which may hold a dormant
    /// target; the mover lands on the front of that stack.
    pub fn move_onto(&mut self, id: EntityId, target: EntityId) {
        let destination = self.position(target);
        self.relocate(id, destination);
    }

    /// Exchanges the positions of two visible entities.
    pub fn swap(&mut self, first: EntityId, second: EntityId) {
        let first_position = self.position(first);
        let second_position = self.position(second);
        self.grid.remove(first_position, first);
        self.grid.remove(second_position, second);
        self.grid.place_front(second_position, first);
        self.grid.place_front(first_position, second);
        self.slot_mut(first).position = second_position;
        self.slot_mut(second).position = first_position;
    }

    /// Replaces the entity in place: hides it for good and shows a freshly
    /// spawned `code` entity at its position. The old entity is abandoned
    /// dormant, never deleted.
    pub fn mutate(&mut self, id: EntityId, code: char) {
        let position = self.position(id);
        self.hide(id);
        let replacement = self.spawn_at(code, position);
        self.show(replacement);
    }

    /// Removes the entity from the grid; it remembers its position and can
    /// be shown again.
    pub fn hide(&mut self, id: EntityId) {
        let position = self.position(id);
        self.grid.remove(position, id);
    }

    /// Re-inserts a dormant entity at the front of its remembered cell.
    ///
    /// Panics if the entity is already visible.
    pub fn show(&mut self, id: EntityId) {
        let position = self.position(id);
        if self.grid.contains(position, id) {
            panic!(
                "entity {} at {},{} is already visible",
                id.get(),
                position.x(),
                position.y()
            );
        }
        self.grid.place_front(position, id);
    }

    /// Whether the entity is currently absent from the grid.
    #[must_use]
    pub fn hidden(&self, id: EntityId) -> bool {
        !self.grid.contains(self.position(id), id)
    }

    /// Sets the grid change flag; trigger entities clear it between probes.
    pub fn set_changed(&mut self, changed: bool) {
        self.grid.set_changed(changed);
    }

    /// Whether any grid mutation happened since the flag was last cleared.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.grid.changed()
    }

    /// Inserts the entity into the current turn, at the front when `high`.
    pub fn enqueue(&mut self, id: EntityId, high: bool) {
        self.queue.enqueue(id, high);
    }

    /// Registers the entity to act every turn, at the front when `high`.
    pub fn register_agent(&mut self, id: EntityId, high: bool) {
        self.queue.register_agent(id, high);
    }

    /// Withdraws the entity from the agents and the pending actors.
    pub fn unregister(&mut self, id: EntityId) {
        self.queue.unregister(id);
    }

    /// Ends the level: clears the queue so nothing acts again until the
    /// next load.
    pub fn end_game(&mut self) {
        self.queue.terminate();
    }

    /// The command character driving the current turn.
    #[must_use]
    pub fn command(&self) -> char {
        self.queue.command()
    }

    /// Records the entity under a variable name.
    pub fn set_entity(&mut self, name: &str, id: EntityId) {
        self.state.set_entity(name, id);
    }

    /// The entity recorded under `name`, if any.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<EntityId> {
        self.state.entity(name)
    }

    /// Sets a string variable.
    pub fn set_string(&mut self, name: &str, value: &str) {
        self.state.set_string(name, value);
    }

    /// A string variable; absent keys read as the empty string.
    #[must_use]
    pub fn string(&self, name: &str) -> &str {
        self.state.string(name)
    }

    /// Sets a counter variable.
    pub fn set_count(&mut self, name: &str, value: i32) {
        self.state.set_count(name, value);
    }

    /// A counter variable; absent keys read as zero.
    #[must_use]
    pub fn count(&self, name: &str) -> i32 {
        self.state.count(name)
    }

    /// Adds `delta` to a counter.
    pub fn add(&mut self, name: &str, delta: i32) {
        self.state.add(name, delta);
    }

    /// Subtracts `delta` from a counter.
    pub fn subtract(&mut self, name: &str, delta: i32) {
        self.state.add(name, -delta);
    }
}
