//! The cascading trigger protocol that stands in for gravity.
//!
//! Movement is not polled. A mover advances only when the background space
//! of a nearby cell is excited onto the actor queue; when that space gets
//! its turn it scans its surroundings and delegates one step to a mover
//! headed its way. Excited spaces are pushed to the *front* of the queue,
//! which unwinds each chain reaction depth-first without recursion.

use gridfall_core::{Direction, EntityId};
use gridfall_world::{Context, Game};

use crate::{codes, Rockfall};

/// The six cells behind an upward move, nearest first.
const UP_TRAIL: [Direction; 6] = [
    Direction::Here,
    Direction::Down,
    Direction::Right,
    Direction::Left,
    Direction::DownRight,
    Direction::DownLeft,
];
/// The six cells behind a downward move, nearest first.
const DOWN_TRAIL: [Direction; 6] = [
    Direction::Here,
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::UpLeft,
    Direction::UpRight,
];
/// The six cells behind a leftward move, nearest first.
const LEFT_TRAIL: [Direction; 6] = [
    Direction::Here,
    Direction::Right,
    Direction::Down,
    Direction::Up,
    Direction::DownRight,
    Direction::UpRight,
];
/// The six cells behind a rightward move, nearest first.
const RIGHT_TRAIL: [Direction; 6] = [
    Direction::Here,
    Direction::Left,
    Direction::Up,
    Direction::Down,
    Direction::UpLeft,
    Direction::DownLeft,
];

/// Excites the trail of cells an entity is about to vacate by moving in
/// `direction`. Iterated in reverse so the queue ends up in trail order.
pub(crate) fn advance(ctx: &mut Context<Rockfall>, id: EntityId, direction: Direction) {
    let trail = match direction {
        Direction::Up => &UP_TRAIL,
        Direction::Down => &DOWN_TRAIL,
        Direction::Left => &LEFT_TRAIL,
        Direction::Right => &RIGHT_TRAIL,
        direction => panic!("no trigger trail for direction {direction:?}"),
    };
    for offset in trail.iter().rev() {
        let neighbor = ctx.find(id, *offset);
        excite(ctx, neighbor);
    }
}

/// Excites the cell ahead of an entity that just moved, so a mover in
/// flight is offered its next step.
pub(crate) fn going(ctx: &mut Context<Rockfall>, id: EntityId, direction: Direction) {
    let ahead = ctx.find(id, direction);
    excite(ctx, ahead);
}

/// Queues the background space of `target`'s cell, high priority. Cells
/// without a space background, such as the wall border, are left alone.
pub(crate) fn excite(ctx: &mut Context<Rockfall>, target: EntityId) {
    if let Some(background) = ctx.background_of(target) {
        if ctx.is(background, codes::SPACE) {
            ctx.enqueue(background, true);
        }
    }
}

/// A space's turn: probe the four major directions for a mover headed into
/// this cell and delegate one step to the first that can take it.
///
/// The change flag is cleared before each probe; the first probe that
/// moves anything ends the scan, so at most one entity enters the cell.
pub(crate) fn scan(ctx: &mut Context<Rockfall>, id: EntityId) {
    const PROBES: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];
    for direction in PROBES {
        ctx.set_changed(false);
        let mover = ctx.find(id, direction.back());
        let fires = matches!(
            (ctx.code(mover), direction),
            (codes::BOULDER, Direction::Down)
                | (codes::LEFT_ARROW, Direction::Left)
                | (codes::RIGHT_ARROW, Direction::Right)
                | (codes::BALLOON, Direction::Up)
        );
        if fires {
            Rockfall::act(ctx, mover);
        }
        if ctx.changed() {
            return;
        }
    }
}
