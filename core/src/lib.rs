#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the Gridfall engine.
//!
//! This crate defines the small, dependency-free types that connect game
//! definitions, the authoritative world, and adapters: grid positions and
//! directions, entity identifiers, and the standard variable names games
//! store in the world's state table. Everything here is pure data; all
//! behavior lives in `gridfall-world` and the game crates.

/// The nine grid directions: the eight neighbors plus staying in place.
///
/// Directions carry their own offset arithmetic and the left/right/back
/// rotations used by wall-following and deflection logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// No movement.
    Here,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing columns and decreasing rows.
    UpRight,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing columns and rows.
    DownRight,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing columns and increasing rows.
    DownLeft,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward decreasing columns and rows.
    UpLeft,
}

impl Direction {
    /// Horizontal component of the offset, in columns.
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Self::Here | Self::Up | Self::Down => 0,
            Self::UpRight | Self::Right | Self::DownRight => 1,
            Self::DownLeft | Self::Left | Self::UpLeft => -1,
        }
    }

    /// Vertical component of the offset, in rows.
    #[must_use]
    pub const fn dy(self) -> i32 {
        match self {
            Self::Here | Self::Left | Self::Right => 0,
            Self::Up | Self::UpRight | Self::UpLeft => -1,
            Self::Down | Self::DownRight | Self::DownLeft => 1,
        }
    }

    /// The direction a quarter turn counter-clockwise from this one.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::Here => Self::Here,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
            Self::UpLeft => Self::DownLeft,
            Self::DownLeft => Self::DownRight,
            Self::DownRight => Self::UpRight,
            Self::UpRight => Self::UpLeft,
        }
    }

    /// The direction a quarter turn clockwise from this one.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::Here => Self::Here,
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::UpLeft => Self::UpRight,
            Self::UpRight => Self::DownRight,
            Self::DownRight => Self::DownLeft,
            Self::DownLeft => Self::UpLeft,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn back(self) -> Self {
        self.left().left()
    }

    /// Maps a command character to its direction.
    ///
    /// The command alphabet is `^ v < > .`; any other character yields
    /// `None` and is a caller error.
    #[must_use]
    pub const fn from_command(command: char) -> Option<Self> {
        match command {
            '^' => Some(Self::Up),
            'v' => Some(Self::Down),
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '.' => Some(Self::Here),
            _ => None,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Playable levels are sentineled by a border of wall entities, so offset
/// arithmetic from any interior cell stays within bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from column and row indices.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// The position one step away in the given direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        Self {
            x: self.x + direction.dx(),
            y: self.y + direction.dy(),
        }
    }
}

/// Unique identifier assigned to an entity within one loaded level.
///
/// Identifiers index the level's entity arena and are invalidated by the
/// next load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Standard variable names games store in the world state table.
pub mod vars {
    /// Short name of the loaded level.
    pub const NAME: &str = "NAME";
    /// Title line of the loaded level.
    pub const TITLE: &str = "TITLE";
    /// Remaining move allowance; counted down by the controlled entity.
    pub const MOVES: &str = "MOVES";
    /// The controlled entity.
    pub const PLAYER: &str = "PLAYER";
    /// Accumulated score.
    pub const SCORE: &str = "SCORE";
    /// Nonzero once the level has been completed.
    pub const SUCCESS: &str = "SUCCESS";
}

#[cfg(test)]
mod tests {
    use super::{Direction, Position};

    const ALL: [Direction; 9] = [
        Direction::Here,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    #[test]
    fn back_negates_both_offset_components() {
        for direction in ALL {
            assert_eq!(direction.dx() + direction.back().dx(), 0);
            assert_eq!(direction.dy() + direction.back().dy(), 0);
        }
    }

    #[test]
    fn four_left_turns_return_to_the_start() {
        for direction in ALL {
            assert_eq!(direction.left().left().left().left(), direction);
        }
    }

    #[test]
    fn right_inverts_left() {
        for direction in ALL {
            assert_eq!(direction.left().right(), direction);
            assert_eq!(direction.right().left(), direction);
        }
    }

    #[test]
    fn command_characters_map_to_their_directions() {
        assert_eq!(Direction::from_command('^'), Some(Direction::Up));
        assert_eq!(Direction::from_command('v'), Some(Direction::Down));
        assert_eq!(Direction::from_command('<'), Some(Direction::Left));
        assert_eq!(Direction::from_command('>'), Some(Direction::Right));
        assert_eq!(Direction::from_command('.'), Some(Direction::Here));
        assert_eq!(Direction::from_command('x'), None);
    }

    #[test]
    fn stepping_applies_the_direction_offset() {
        let origin = Position::new(3, 5);
        assert_eq!(origin.step(Direction::UpLeft), Position::new(2, 4));
        assert_eq!(origin.step(Direction::Here), origin);
        assert_eq!(
            origin.step(Direction::Down).step(Direction::Up),
            origin
        );
    }
}
