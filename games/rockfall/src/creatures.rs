//! The monster that hunts the player and the wall-following baby monsters.

use gridfall_core::{vars, Direction, EntityId};
use gridfall_world::Context;

use crate::{codes, trigger, Brain, Rockfall, MESSAGE};

/// Monster startup: it slots itself in as an agent right after the player,
/// ahead of any monster that woke before it.
pub(crate) fn wake_monster(ctx: &mut Context<Rockfall>, id: EntityId) {
    ctx.lay_background(id, codes::SPACE);
    let player = ctx.entity(vars::PLAYER);
    if let Some(player) = player {
        ctx.unregister(player);
    }
    ctx.register_agent(id, true);
    if let Some(player) = player {
        ctx.register_agent(player, true);
    }
}

/// One monster step toward the player: prefer the axis with the greater
/// distance, fall back to the other, enter only space or the player, and
/// stand still when both ways are blocked.
pub(crate) fn act_monster(ctx: &mut Context<Rockfall>, id: EntityId) {
    let player = match ctx.entity(vars::PLAYER) {
        Some(player) => player,
        None => panic!("monster {} has no player to chase", id.get()),
    };
    let here = ctx.position(id);
    let there = ctx.position(player);
    let mut dx = there.x() - here.x();
    let mut dy = there.y() - here.y();
    let mut horizontal = Direction::Right;
    let mut vertical = Direction::Down;
    if dx < 0 {
        horizontal = Direction::Left;
        dx = -dx;
    }
    if dy < 0 {
        vertical = Direction::Up;
        dy = -dy;
    }
    let open_horizontal = open_for_monster(ctx, id, horizontal);
    let open_vertical = open_for_monster(ctx, id, vertical);
    let go = if dx > dy && open_horizontal {
        horizontal
    } else if open_vertical {
        vertical
    } else if open_horizontal {
        horizontal
    } else {
        return;
    };
    let target = ctx.find(id, go);
    if ctx.is(target, codes::PLAYER) {
        ctx.set_string(MESSAGE, "Killed by a hungry monster");
        ctx.mutate(target, codes::DEAD);
        ctx.end_game();
    } else {
        // A plain relocation: monster steps excite nothing.
        ctx.move_onto(id, target);
    }
}

fn open_for_monster(ctx: &Context<Rockfall>, id: EntityId, direction: Direction) -> bool {
    let target = ctx.find(id, direction);
    ctx.is(target, codes::SPACE) || ctx.is(target, codes::PLAYER)
}

/// Baby startup: set off along the first blocked side, checked in the
/// order Up, Right, Down, Left, and join the agents at low priority so
/// babies move after the player and the monsters.
pub(crate) fn wake_baby(ctx: &mut Context<Rockfall>, id: EntityId) {
    ctx.lay_background(id, codes::SPACE);
    let heading = if !walkable(ctx, id, Direction::Up) {
        Direction::Right
    } else if !walkable(ctx, id, Direction::Right) {
        Direction::Down
    } else if !walkable(ctx, id, Direction::Down) {
        Direction::Left
    } else if !walkable(ctx, id, Direction::Left) {
        Direction::Up
    } else {
        Direction::Right
    };
    *ctx.payload_mut(id) = Brain::Baby { heading };
    ctx.register_agent(id, false);
}

/// One baby turn.
///
/// A hidden baby only resurfaces. A visible one re-fronts its cell, turns
/// in wall-following order, then either kills the player, gets caught in a
/// cage, or steps onto the target cell and goes dormant until the knock-on
/// effects of its own move have run their course.
pub(crate) fn act_baby(ctx: &mut Context<Rockfall>, id: EntityId, heading: Direction) {
    if ctx.hidden(id) {
        ctx.show(id);
        return;
    }
    ctx.hide(id);
    ctx.show(id);
    let heading = match follow(ctx, id, heading) {
        Some(heading) => heading,
        None => return,
    };
    *ctx.payload_mut(id) = Brain::Baby { heading };
    let target = ctx.find(id, heading);
    match ctx.code(target) {
        codes::PLAYER => {
            ctx.hide(id);
            ctx.unregister(id);
            ctx.set_string(MESSAGE, "Killed by the little monsters");
            ctx.mutate(target, codes::DEAD);
            ctx.end_game();
        }
        codes::CAGE => {
            ctx.hide(id);
            ctx.unregister(id);
            ctx.add(vars::SCORE, 20);
            ctx.mutate(target, codes::STAR);
        }
        _ => {
            ctx.enqueue(id, true);
            trigger::advance(ctx, id, heading);
            // The target cell may be occupied; a boxed-in baby still moves
            // and simply lands on top.
            ctx.move_onto(id, target);
            ctx.hide(id);
        }
    }
}

/// Left-wall following: turn left if possible, else straight on, else
/// right, else double back through anything but a wall.
fn follow(ctx: &Context<Rockfall>, id: EntityId, heading: Direction) -> Option<Direction> {
    if walkable(ctx, id, heading.left()) {
        Some(heading.left())
    } else if walkable(ctx, id, heading) {
        Some(heading)
    } else if walkable(ctx, id, heading.right()) {
        Some(heading.right())
    } else if !ctx.is(ctx.find(id, heading.back()), codes::WALL) {
        Some(heading.back())
    } else {
        None
    }
}

fn walkable(ctx: &Context<Rockfall>, id: EntityId, direction: Direction) -> bool {
    matches!(
        ctx.code(ctx.find(id, direction)),
        codes::SPACE | codes::EARTH | codes::PLAYER | codes::CAGE | codes::BABY
    )
}
