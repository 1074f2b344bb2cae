#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Starmaze, a four-code maze game on the Gridfall engine.
//!
//! The player wanders a walled maze collecting stars; the level is solved
//! when none remain. Movement swaps the player with the cell ahead instead
//! of stacking entities, so the game doubles as the smallest worked example
//! of writing a [`Game`] implementation.

use gridfall_core::{vars, Direction, EntityId};
use gridfall_world::{Context, Game};

/// The four type codes of the maze alphabet.
pub mod codes {
    /// The player, steered by command characters.
    pub const PLAYER: char = '@';
    /// An open cell the player may step into.
    pub const SPACE: char = '.';
    /// An impenetrable barrier; also the level border.
    pub const WALL: char = '#';
    /// A collectable. The level is solved when every star is gone.
    pub const STAR: char = '*';
}

const STARS: &str = "STARS";

/// The maze game definition.
pub struct Starmaze;

impl Game for Starmaze {
    type Payload = ();

    fn hatch(code: char) -> Option<()> {
        match code {
            codes::PLAYER | codes::SPACE | codes::WALL | codes::STAR => Some(()),
            _ => None,
        }
    }

    fn wake(ctx: &mut Context<Self>, id: EntityId) {
        if ctx.is(id, codes::STAR) {
            ctx.add(STARS, 1);
        } else if ctx.is(id, codes::PLAYER) {
            ctx.set_entity(vars::PLAYER, id);
            ctx.register_agent(id, true);
        }
    }

    fn act(ctx: &mut Context<Self>, id: EntityId) {
        if !ctx.is(id, codes::PLAYER) {
            return;
        }
        let go = match Direction::from_command(ctx.command()) {
            Some(direction) => direction,
            None => return,
        };
        let target = ctx.find(id, go);
        if !ctx.is(target, codes::SPACE) && !ctx.is(target, codes::STAR) {
            return;
        }
        let starred = ctx.is(target, codes::STAR);
        ctx.swap(id, target);
        if starred {
            ctx.mutate(target, codes::SPACE);
            ctx.subtract(STARS, 1);
            if ctx.count(STARS) == 0 {
                ctx.add(vars::SUCCESS, 1);
            }
        }
    }

    fn status(ctx: &Context<Self>) -> String {
        let stars = ctx.count(STARS);
        if stars > 0 {
            format!("Stars: {stars}")
        } else {
            "Success!".to_owned()
        }
    }
}

/// The image file for a type code, relative to the asset root.
#[must_use]
pub fn sprite_path(code: char) -> &'static str {
    match code {
        codes::PLAYER => "images/player.png",
        codes::SPACE => "images/space.png",
        codes::WALL => "images/wall.png",
        codes::STAR => "images/star.png",
        _ => panic!("no sprite for type code {code:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_alphabet_hatches_and_nothing_else() {
        for code in ['@', '.', '#', '*'] {
            assert!(Starmaze::hatch(code).is_some(), "code {code:?}");
        }
        for code in ['O', 'M', ' ', 'x'] {
            assert!(Starmaze::hatch(code).is_none(), "code {code:?}");
        }
    }

    #[test]
    fn every_code_has_a_sprite() {
        for code in ['@', '.', '#', '*'] {
            assert!(sprite_path(code).starts_with("images/"));
        }
    }

    #[test]
    #[should_panic(expected = "no sprite")]
    fn unknown_codes_have_no_sprite() {
        let _ = sprite_path('!');
    }
}
