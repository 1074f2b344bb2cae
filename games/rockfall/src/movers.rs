//! Boulders, balloons, and arrows: the entities that travel in straight
//! lines and slide around obstacles.

use gridfall_core::{vars, Direction, EntityId};
use gridfall_world::Context;

use crate::{codes, trigger, Brain, Rockfall, MESSAGE};

/// One boulder step. A boulder drops through space, slides off another
/// boulder or a deflector, crushes a monster, and kills the player only
/// while already falling.
pub(crate) fn act_boulder(ctx: &mut Context<Rockfall>, id: EntityId, moving: bool) {
    let below = ctx.find(id, Direction::Down);
    match ctx.code(below) {
        codes::SPACE => drop_toward(ctx, id, Direction::Down),
        codes::MONSTER => {
            crush(ctx, below);
            drop_toward(ctx, id, Direction::Down);
        }
        codes::PLAYER => {
            if moving {
                ctx.set_string(MESSAGE, "Killed by a falling boulder");
                ctx.mutate(below, codes::DEAD);
                ctx.end_game();
            }
        }
        codes::BOULDER => {
            if side_open(ctx, id, Direction::Left, Direction::DownLeft) {
                drop_toward(ctx, id, Direction::DownLeft);
            } else if side_open(ctx, id, Direction::Right, Direction::DownRight) {
                drop_toward(ctx, id, Direction::DownRight);
            } else {
                mark_moving(ctx, id, false);
            }
        }
        codes::LEFT_DEFLECTOR => {
            if side_open(ctx, id, Direction::Left, Direction::DownLeft) {
                drop_toward(ctx, id, Direction::DownLeft);
            } else {
                mark_moving(ctx, id, false);
            }
        }
        codes::RIGHT_DEFLECTOR => {
            if side_open(ctx, id, Direction::Right, Direction::DownRight) {
                drop_toward(ctx, id, Direction::DownRight);
            } else {
                mark_moving(ctx, id, false);
            }
        }
        _ => mark_moving(ctx, id, false),
    }
}

/// One balloon step: the mirror image of a boulder, rising instead of
/// falling. Balloons never kill, so there is no flight flag to track.
pub(crate) fn act_balloon(ctx: &mut Context<Rockfall>, id: EntityId) {
    let above = ctx.find(id, Direction::Up);
    match ctx.code(above) {
        codes::SPACE => rise_toward(ctx, id, Direction::Up),
        codes::BOULDER => {
            if side_open(ctx, id, Direction::Left, Direction::UpLeft) {
                rise_toward(ctx, id, Direction::UpLeft);
            } else if side_open(ctx, id, Direction::Right, Direction::UpRight) {
                rise_toward(ctx, id, Direction::UpRight);
            }
        }
        codes::RIGHT_DEFLECTOR => {
            if side_open(ctx, id, Direction::Left, Direction::UpLeft) {
                rise_toward(ctx, id, Direction::UpLeft);
            }
        }
        codes::LEFT_DEFLECTOR => {
            if side_open(ctx, id, Direction::Right, Direction::UpRight) {
                rise_toward(ctx, id, Direction::UpRight);
            }
        }
        _ => {}
    }
}

/// One arrow step. An arrow flies along its natural heading, slides over
/// or under boulders and deflectors, pops balloons, crushes monsters, and
/// kills the player only while already flying.
pub(crate) fn act_arrow(ctx: &mut Context<Rockfall>, id: EntityId, moving: bool) {
    let normal = if ctx.is(id, codes::LEFT_ARROW) {
        Direction::Left
    } else {
        Direction::Right
    };
    let ahead = ctx.find(id, normal);
    match ctx.code(ahead) {
        codes::SPACE => fly(ctx, id, normal, normal),
        codes::MONSTER => {
            crush(ctx, ahead);
            fly(ctx, id, normal, normal);
        }
        codes::BALLOON => {
            ctx.hide(ahead);
            fly(ctx, id, normal, normal);
        }
        codes::PLAYER => {
            if moving {
                ctx.set_string(MESSAGE, "Killed by a speeding arrow");
                ctx.mutate(ahead, codes::DEAD);
                ctx.end_game();
            }
        }
        codes::BOULDER => {
            let deflect = deflected(ctx, id, normal, Direction::Up, false)
                .or_else(|| deflected(ctx, id, normal, Direction::Down, false));
            match deflect {
                Some(diagonal) => fly(ctx, id, normal, diagonal),
                None => mark_moving(ctx, id, false),
            }
        }
        codes::LEFT_DEFLECTOR => {
            let side = if normal == Direction::Left {
                Direction::Down
            } else {
                Direction::Up
            };
            glance(ctx, id, normal, side);
        }
        codes::RIGHT_DEFLECTOR => {
            let side = if normal == Direction::Left {
                Direction::Up
            } else {
                Direction::Down
            };
            glance(ctx, id, normal, side);
        }
        _ => mark_moving(ctx, id, false),
    }
}

/// Scores a crushed monster and takes it out of play.
fn crush(ctx: &mut Context<Rockfall>, monster: EntityId) {
    ctx.add(vars::SCORE, 100);
    ctx.hide(monster);
    ctx.unregister(monster);
}

/// Whether both the orthogonal side cell and the diagonal past it hold
/// space, leaving room to slide that way.
fn side_open(
    ctx: &Context<Rockfall>,
    id: EntityId,
    side: Direction,
    diagonal: Direction,
) -> bool {
    ctx.is(ctx.find(id, side), codes::SPACE) && ctx.is(ctx.find(id, diagonal), codes::SPACE)
}

/// The diagonal an arrow would take around an obstacle: the side cell must
/// be space, and the diagonal must be space or, when `through_balloons`, a
/// balloon the caller will pop.
fn deflected(
    ctx: &Context<Rockfall>,
    id: EntityId,
    normal: Direction,
    side: Direction,
    through_balloons: bool,
) -> Option<Direction> {
    let diagonal = diagonal_of(normal, side);
    let side_entity = ctx.find(id, side);
    let diagonal_entity = ctx.find(id, diagonal);
    let open = ctx.is(diagonal_entity, codes::SPACE)
        || (through_balloons && ctx.is(diagonal_entity, codes::BALLOON));
    if ctx.is(side_entity, codes::SPACE) && open {
        Some(diagonal)
    } else {
        None
    }
}

/// An arrow meeting a deflector: slide to the glyph's side, popping any
/// balloon resting on the diagonal, or stop dead.
fn glance(ctx: &mut Context<Rockfall>, id: EntityId, normal: Direction, side: Direction) {
    match deflected(ctx, id, normal, side, true) {
        Some(diagonal) => {
            let target = ctx.find(id, diagonal);
            if ctx.is(target, codes::BALLOON) {
                ctx.hide(target);
            }
            fly(ctx, id, normal, diagonal);
        }
        None => mark_moving(ctx, id, false),
    }
}

fn diagonal_of(horizontal: Direction, vertical: Direction) -> Direction {
    match (horizontal, vertical) {
        (Direction::Left, Direction::Up) => Direction::UpLeft,
        (Direction::Left, Direction::Down) => Direction::DownLeft,
        (Direction::Right, Direction::Up) => Direction::UpRight,
        (Direction::Right, Direction::Down) => Direction::DownRight,
        (horizontal, vertical) => {
            panic!("no diagonal between {horizontal:?} and {vertical:?}")
        }
    }
}

/// One falling step: excite the trail, move, offer the next step down.
fn drop_toward(ctx: &mut Context<Rockfall>, id: EntityId, step: Direction) {
    mark_moving(ctx, id, true);
    trigger::advance(ctx, id, Direction::Down);
    ctx.move_toward(id, step);
    trigger::going(ctx, id, Direction::Down);
}

/// One rising step: excite the trail, move, offer the next step up.
fn rise_toward(ctx: &mut Context<Rockfall>, id: EntityId, step: Direction) {
    trigger::advance(ctx, id, Direction::Up);
    ctx.move_toward(id, step);
    trigger::going(ctx, id, Direction::Up);
}

/// One flying step along `normal`, displaced to `step` when deflected.
fn fly(ctx: &mut Context<Rockfall>, id: EntityId, normal: Direction, step: Direction) {
    mark_moving(ctx, id, true);
    trigger::advance(ctx, id, normal);
    ctx.move_toward(id, step);
    trigger::going(ctx, id, normal);
}

/// Updates the flight flag of a boulder or an arrow.
fn mark_moving(ctx: &mut Context<Rockfall>, id: EntityId, moving: bool) {
    match ctx.payload_mut(id) {
        Brain::Boulder { moving: flag } | Brain::Arrow { moving: flag } => *flag = moving,
        _ => panic!("entity {} carries no flight flag", id.get()),
    }
}
