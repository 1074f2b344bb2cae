//! Position-indexed occupancy stacks with a single change flag.

use gridfall_core::{EntityId, Position};

/// The spatial half of the simulation context.
///
/// Every position holds an ordered stack of entity ids: the first element is
/// the visible occupant, the last the background. The grid guarantees an
/// entity appears in at most one stack slot and flips its change flag on
/// every mutation; the turn driver reads that flag to decide whether a
/// pulled actor produced a visible effect.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Vec<EntityId>>,
    changed: bool,
}

impl Grid {
    pub(crate) fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            changed: true,
        }
    }

    /// Drops all stacks and resizes. Dimensions must be positive.
    pub(crate) fn reset(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize_with((width * height) as usize, Vec::new);
    }

    pub(crate) fn in_bounds(&self, position: Position) -> bool {
        position.x() >= 0
            && position.x() < self.width
            && position.y() >= 0
            && position.y() < self.height
    }

    fn stack(&self, position: Position) -> &Vec<EntityId> {
        &self.cells[self.index(position)]
    }

    fn index(&self, position: Position) -> usize {
        if !self.in_bounds(position) {
            panic!(
                "position {},{} outside the {}x{} grid",
                position.x(),
                position.y(),
                self.width,
                self.height
            );
        }
        (position.y() * self.width + position.x()) as usize
    }

    /// The visible occupant at a position, if the stack is non-empty.
    pub(crate) fn front(&self, position: Position) -> Option<EntityId> {
        self.stack(position).first().copied()
    }

    /// The background occupant at a position, if the stack is non-empty.
    pub(crate) fn back(&self, position: Position) -> Option<EntityId> {
        self.stack(position).last().copied()
    }

    pub(crate) fn contains(&self, position: Position, id: EntityId) -> bool {
        self.stack(position).contains(&id)
    }

    /// Inserts `id` as the visible occupant at `position`.
    ///
    /// Panics if `id` is already in that stack; a double placement is an
    /// entity-logic bug, never a recoverable condition.
    pub(crate) fn place_front(&mut self, position: Position, id: EntityId) {
        let index = self.index(position);
        if self.cells[index].contains(&id) {
            panic!(
                "entity {} is already in the stack at {},{}",
                id.get(),
                position.x(),
                position.y()
            );
        }
        self.cells[index].insert(0, id);
        self.changed = true;
    }

    /// Inserts `id` as the background occupant at `position`.
    ///
    /// Panics on double placement, like [`Grid::place_front`].
    pub(crate) fn place_back(&mut self, position: Position, id: EntityId) {
        let index = self.index(position);
        if self.cells[index].contains(&id) {
            panic!(
                "entity {} is already in the stack at {},{}",
                id.get(),
                position.x(),
                position.y()
            );
        }
        self.cells[index].push(id);
        self.changed = true;
    }

    /// Removes `id` from the stack at `position`.
    ///
    /// Panics if it is not there.
    pub(crate) fn remove(&mut self, position: Position, id: EntityId) {
        let index = self.index(position);
        let slot = match self.cells[index].iter().position(|other| *other == id) {
            Some(slot) => slot,
            None => panic!(
                "entity {} is not in the stack at {},{}",
                id.get(),
                position.x(),
                position.y()
            ),
        };
        let _ = self.cells[index].remove(slot);
        self.changed = true;
    }

    pub(crate) fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    pub(crate) const fn changed(&self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use gridfall_core::{EntityId, Position};
    use proptest::prelude::*;

    fn grid_3x3() -> Grid {
        let mut grid = Grid::new();
        grid.reset(3, 3);
        grid
    }

    #[test]
    fn placements_layer_front_over_back() {
        let mut grid = grid_3x3();
        let position = Position::new(1, 1);
        let space = EntityId::new(0);
        let boulder = EntityId::new(1);

        grid.place_back(position, space);
        grid.place_front(position, boulder);

        assert_eq!(grid.front(position), Some(boulder));
        assert_eq!(grid.back(position), Some(space));
    }

    #[test]
    fn removal_reveals_the_background() {
        let mut grid = grid_3x3();
        let position = Position::new(0, 2);
        let space = EntityId::new(0);
        let rock = EntityId::new(1);

        grid.place_back(position, space);
        grid.place_front(position, rock);
        grid.remove(position, rock);

        assert_eq!(grid.front(position), Some(space));
        assert!(!grid.contains(position, rock));
    }

    #[test]
    fn mutations_raise_the_change_flag() {
        let mut grid = grid_3x3();
        let position = Position::new(2, 0);
        let id = EntityId::new(7);

        grid.set_changed(false);
        assert!(!grid.changed());
        grid.place_front(position, id);
        assert!(grid.changed());

        grid.set_changed(false);
        grid.remove(position, id);
        assert!(grid.changed());
    }

    #[test]
    fn reset_replaces_all_stacks() {
        let mut grid = grid_3x3();
        grid.place_front(Position::new(2, 2), EntityId::new(3));

        grid.reset(2, 4);

        assert!(grid.in_bounds(Position::new(1, 3)));
        assert!(!grid.in_bounds(Position::new(2, 2)));
        assert_eq!(grid.front(Position::new(1, 3)), None);
    }

    #[test]
    #[should_panic(expected = "already in the stack")]
    fn double_placement_panics() {
        let mut grid = grid_3x3();
        let position = Position::new(1, 0);
        let id = EntityId::new(4);
        grid.place_front(position, id);
        grid.place_front(position, id);
    }

    #[test]
    #[should_panic(expected = "is not in the stack")]
    fn removing_an_absent_entity_panics() {
        let mut grid = grid_3x3();
        grid.remove(Position::new(1, 1), EntityId::new(9));
    }

    proptest! {
        /// Random place/remove sequences keep every placed entity in
        /// exactly one stack slot, at its recorded position.
        #[test]
        fn occupancy_stays_single_slot(
            ops in prop::collection::vec((0u32..6, 0i32..4, 0i32..4), 1..64)
        ) {
            let mut grid = Grid::new();
            grid.reset(4, 4);
            let mut placed: [Option<Position>; 6] = [None; 6];

            for (entity, x, y) in ops {
                let id = EntityId::new(entity);
                match placed[entity as usize] {
                    None => {
                        let position = Position::new(x, y);
                        grid.place_front(position, id);
                        placed[entity as usize] = Some(position);
                    }
                    Some(position) => {
                        grid.remove(position, id);
                        placed[entity as usize] = None;
                    }
                }
            }

            for (entity, expected) in placed.iter().enumerate() {
                let id = EntityId::new(entity as u32);
                let mut occurrences = 0;
                for x in 0..4 {
                    for y in 0..4 {
                        let position = Position::new(x, y);
                        if grid.contains(position, id) {
                            occurrences += 1;
                            prop_assert_eq!(Some(position), *expected);
                        }
                    }
                }
                prop_assert_eq!(occurrences, u32::from(expected.is_some()));
            }
        }
    }
}
