#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The full boulder-and-monsters game for the Gridfall engine.
//!
//! A player digs through earth collecting stars while boulders fall, arrows
//! fly, balloons rise, and monsters give chase. Gravity and flight are not
//! simulated continuously: a mover takes one step each time a background
//! space next to it is excited into action, so every chain reaction unwinds
//! through the world's actor queue in a fixed order.
//!
//! The crate plugs into `gridfall-world` through the [`Game`] trait. Each
//! entity carries a [`Brain`] payload with its mutable state; what an entity
//! does to a neighbor is decided by matching on the neighbor's type code.

mod creatures;
mod movers;
mod player;
mod terrain;
mod trigger;

use gridfall_core::{Direction, EntityId};
use gridfall_world::{Context, Game};

/// Type codes of every Rockfall entity kind.
pub mod codes {
    /// Background space.
    pub const SPACE: char = '.';
    /// Immovable wall, also the sentinel border around every level.
    pub const WALL: char = '#';
    /// Decorative rock, as immovable as a wall.
    pub const ROCK: char = '=';
    /// Earth the player digs through.
    pub const EARTH: char = ':';
    /// A star the player must collect before the exit opens.
    pub const STAR: char = '*';
    /// A cage that turns a baby monster into a star.
    pub const CAGE: char = '+';
    /// A time capsule worth 250 extra moves.
    pub const TIME: char = 'C';
    /// A landmine, lethal to step on.
    pub const LANDMINE: char = '!';
    /// The teleport arrival marker, at most one per level.
    pub const ARRIVAL: char = 'A';
    /// A teleport pad.
    pub const TELEPORT: char = 'T';
    /// The level exit.
    pub const EXIT: char = 'X';
    /// Deflector shedding falling boulders to the down-left.
    pub const LEFT_DEFLECTOR: char = '/';
    /// Deflector shedding falling boulders to the down-right.
    pub const RIGHT_DEFLECTOR: char = '\\';
    /// The corpse left where the player died.
    pub const DEAD: char = '?';
    /// A boulder that falls and slides off obstacles.
    pub const BOULDER: char = 'O';
    /// A balloon that rises and slides off obstacles.
    pub const BALLOON: char = '^';
    /// An arrow flying left.
    pub const LEFT_ARROW: char = '<';
    /// An arrow flying right.
    pub const RIGHT_ARROW: char = '>';
    /// The monster that chases the player.
    pub const MONSTER: char = 'M';
    /// A baby monster that follows walls.
    pub const BABY: char = 'S';
    /// The player.
    pub const PLAYER: char = '@';
}

/// Stars still to collect before the exit opens.
pub(crate) const STARS: &str = "STARS";
/// The teleport arrival entity.
pub(crate) const ARRIVAL: &str = "ARRIVAL";
/// The message shown in the status line.
pub(crate) const MESSAGE: &str = "MESSAGE";

/// Per-entity state: which kind of entity this is, plus the mutable fields
/// that kind needs between turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brain {
    /// Furniture with no behavior of its own.
    Inert,
    /// A boulder; `moving` says whether it fell on the previous step.
    Boulder {
        /// Set while the boulder is in flight; only a moving boulder kills.
        moving: bool,
    },
    /// A balloon. Rising is harmless, so no flag is needed.
    Balloon,
    /// An arrow; `moving` says whether it flew on the previous step.
    Arrow {
        /// Set while the arrow is in flight; only a moving arrow kills.
        moving: bool,
    },
    /// The monster chasing the player.
    Monster,
    /// A baby monster and the direction it is walking.
    Baby {
        /// Current wall-following direction.
        heading: Direction,
    },
    /// The player.
    Player,
}

/// The Rockfall game definition.
pub struct Rockfall;

impl Game for Rockfall {
    type Payload = Brain;

    fn hatch(code: char) -> Option<Brain> {
        let brain = match code {
            codes::SPACE | codes::WALL | codes::ROCK | codes::EARTH | codes::STAR
            | codes::CAGE | codes::TIME | codes::LANDMINE | codes::ARRIVAL
            | codes::TELEPORT | codes::EXIT | codes::LEFT_DEFLECTOR
            | codes::RIGHT_DEFLECTOR | codes::DEAD => Brain::Inert,
            codes::BOULDER => Brain::Boulder { moving: false },
            codes::BALLOON => Brain::Balloon,
            codes::LEFT_ARROW | codes::RIGHT_ARROW => Brain::Arrow { moving: false },
            codes::MONSTER => Brain::Monster,
            codes::BABY => Brain::Baby {
                heading: Direction::Right,
            },
            codes::PLAYER => Brain::Player,
            _ => return None,
        };
        Some(brain)
    }

    fn wake(ctx: &mut Context<Self>, id: EntityId) {
        match *ctx.payload(id) {
            Brain::Inert => terrain::wake(ctx, id),
            Brain::Boulder { .. } | Brain::Balloon | Brain::Arrow { .. } => {
                ctx.lay_background(id, codes::SPACE);
            }
            Brain::Monster => creatures::wake_monster(ctx, id),
            Brain::Baby { .. } => creatures::wake_baby(ctx, id),
            Brain::Player => player::wake(ctx, id),
        }
    }

    fn act(ctx: &mut Context<Self>, id: EntityId) {
        match *ctx.payload(id) {
            Brain::Inert => {
                if ctx.is(id, codes::SPACE) {
                    trigger::scan(ctx, id);
                }
            }
            Brain::Boulder { moving } => movers::act_boulder(ctx, id, moving),
            Brain::Balloon => movers::act_balloon(ctx, id),
            Brain::Arrow { moving } => movers::act_arrow(ctx, id, moving),
            Brain::Monster => creatures::act_monster(ctx, id),
            Brain::Baby { heading } => creatures::act_baby(ctx, id, heading),
            Brain::Player => player::act(ctx, id),
        }
    }

    fn status(ctx: &Context<Self>) -> String {
        use gridfall_core::vars;

        let mut progress = ctx.string(MESSAGE).to_string();
        if progress.is_empty() {
            progress = format!("Stars: {}", ctx.count(STARS));
        }
        format!(
            "Level {}: {}     {}     Score: {}     Moves: {}",
            ctx.string(vars::NAME),
            ctx.string(vars::TITLE),
            progress,
            ctx.count(vars::SCORE),
            ctx.count(vars::MOVES),
        )
    }
}

/// Asset path of the sprite drawn for a type code.
///
/// Panics on a code outside the Rockfall alphabet; callers are expected to
/// pass codes read back from a loaded level.
#[must_use]
pub fn sprite_path(code: char) -> &'static str {
    match code {
        codes::SPACE => "images/space.png",
        codes::WALL => "images/wall.png",
        codes::ROCK => "images/rock.png",
        codes::EARTH => "images/earth.png",
        codes::STAR => "images/star.png",
        codes::CAGE => "images/cage.png",
        codes::TIME => "images/time.png",
        codes::LANDMINE => "images/landmine.png",
        codes::ARRIVAL => "images/arrival.png",
        codes::TELEPORT => "images/teleport.png",
        codes::EXIT => "images/exit.png",
        codes::LEFT_DEFLECTOR => "images/left_deflector.png",
        codes::RIGHT_DEFLECTOR => "images/right_deflector.png",
        codes::DEAD => "images/dead.png",
        codes::BOULDER => "images/boulder.png",
        codes::BALLOON => "images/balloon.png",
        codes::LEFT_ARROW => "images/left_arrow.png",
        codes::RIGHT_ARROW => "images/right_arrow.png",
        codes::MONSTER => "images/monster.png",
        codes::BABY => "images/baby.png",
        codes::PLAYER => "images/player.png",
        _ => panic!("no sprite for type code {code:?}"),
    }
}
