//! The player: command handling, collecting, pushing, dying.

use gridfall_core::{vars, Direction, EntityId};
use gridfall_world::Context;

use crate::{codes, trigger, Rockfall, ARRIVAL, MESSAGE, STARS};

pub(crate) fn wake(ctx: &mut Context<Rockfall>, id: EntityId) {
    ctx.lay_background(id, codes::SPACE);
    ctx.set_entity(vars::PLAYER, id);
    ctx.register_agent(id, true);
    ctx.set_string(MESSAGE, "Use arrow keys to move, space to stand still");
}

/// The player's turn: spend a move, time out below zero, then look up the
/// stamped command and react to whatever is one step that way.
pub(crate) fn act(ctx: &mut Context<Rockfall>, id: EntityId) {
    ctx.subtract(vars::MOVES, 1);
    if ctx.count(vars::MOVES) < 0 {
        ctx.set_string(MESSAGE, "Killed by running out of time");
        die(ctx, id);
        return;
    }
    ctx.set_string(MESSAGE, "");
    let command = ctx.command();
    let go = match Direction::from_command(command) {
        Some(direction) => direction,
        None => panic!("player cannot act on command {command:?}"),
    };
    if go == Direction::Here {
        return;
    }
    let target = ctx.find(id, go);
    match ctx.code(target) {
        codes::SPACE => walk(ctx, id, go),
        codes::EARTH => {
            ctx.add(vars::SCORE, 1);
            ctx.hide(target);
            walk(ctx, id, go);
        }
        codes::STAR => {
            ctx.add(vars::SCORE, 10);
            ctx.subtract(STARS, 1);
            ctx.hide(target);
            walk(ctx, id, go);
        }
        codes::TIME => {
            ctx.add(vars::SCORE, 5);
            ctx.add(vars::MOVES, 250);
            ctx.hide(target);
            walk(ctx, id, go);
        }
        codes::LANDMINE => perish(ctx, id, go, "Killed by an exploding landmine"),
        codes::BABY => perish(ctx, id, go, "Killed by the little monsters"),
        codes::TELEPORT => teleport(ctx, id, target),
        codes::EXIT => leave(ctx, id),
        codes::BOULDER | codes::BALLOON => {
            if matches!(go, Direction::Left | Direction::Right) {
                push(ctx, id, target, go);
            }
        }
        codes::LEFT_ARROW | codes::RIGHT_ARROW => {
            if matches!(go, Direction::Up | Direction::Down) {
                push(ctx, id, target, go);
            }
        }
        _ => {}
    }
}

/// Move one step, waking the trail left behind.
fn walk(ctx: &mut Context<Rockfall>, id: EntityId, go: Direction) {
    trigger::advance(ctx, id, go);
    ctx.move_toward(id, go);
}

/// Step onto something lethal and die there.
fn perish(ctx: &mut Context<Rockfall>, id: EntityId, go: Direction, message: &str) {
    trigger::advance(ctx, id, go);
    ctx.move_toward(id, go);
    ctx.set_string(MESSAGE, message);
    die(ctx, id);
}

fn die(ctx: &mut Context<Rockfall>, id: EntityId) {
    ctx.mutate(id, codes::DEAD);
    ctx.end_game();
}

/// Jump to the arrival point: wake the neighborhood on both ends, sweep
/// the arrival cell clear of anything that landed there, and relocate.
fn teleport(ctx: &mut Context<Rockfall>, id: EntityId, gate: EntityId) {
    ctx.add(vars::SCORE, 20);
    ctx.hide(gate);
    let arrival = match ctx.entity(ARRIVAL) {
        Some(arrival) => arrival,
        None => panic!("teleport fired in a level with no arrival point"),
    };
    for corner in [
        Direction::UpLeft,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::UpRight,
    ] {
        let neighbor = ctx.find(arrival, corner);
        trigger::excite(ctx, neighbor);
    }
    trigger::excite(ctx, id);
    trigger::excite(ctx, gate);
    loop {
        let squatter = ctx.find(arrival, Direction::Here);
        if ctx.is(squatter, codes::SPACE) {
            break;
        }
        ctx.hide(squatter);
    }
    ctx.move_onto(id, arrival);
}

/// Step through the exit, once every star has been collected.
fn leave(ctx: &mut Context<Rockfall>, id: EntityId) {
    if ctx.count(STARS) > 0 {
        return;
    }
    ctx.hide(id);
    ctx.add(vars::SCORE, 250);
    ctx.set_string(MESSAGE, "Success!");
    ctx.add(vars::SUCCESS, 1);
    ctx.end_game();
}

/// Push a boulder, balloon, or arrow one cell. The cell past it must hold
/// space, except that a boulder may be driven into a monster.
fn push(ctx: &mut Context<Rockfall>, id: EntityId, cargo: EntityId, go: Direction) {
    let next = ctx.find(cargo, go);
    let crushes = ctx.is(cargo, codes::BOULDER) && ctx.is(next, codes::MONSTER);
    if !ctx.is(next, codes::SPACE) && !crushes {
        return;
    }
    if ctx.is(next, codes::MONSTER) {
        ctx.add(vars::SCORE, 100);
        ctx.hide(next);
        ctx.unregister(next);
    }
    ctx.move_onto(cargo, next);
    trigger::advance(ctx, id, go);
    ctx.move_toward(id, go);
    ctx.enqueue(cargo, true);
}
