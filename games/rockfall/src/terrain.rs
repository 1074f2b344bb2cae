//! Startup behavior of the inert furniture: walls, rocks, earth, stars,
//! cages, capsules, mines, deflectors, teleports, exits, corpses.

use gridfall_core::EntityId;
use gridfall_world::Context;

use crate::{codes, Rockfall, ARRIVAL, STARS};

/// Lay a space behind anything that can be consumed, vacated, or walked
/// over, count the collectibles, and tuck the arrival marker out of sight.
pub(crate) fn wake(ctx: &mut Context<Rockfall>, id: EntityId) {
    if !ctx.is(id, codes::SPACE) && !ctx.is(id, codes::WALL) {
        ctx.lay_background(id, codes::SPACE);
    }
    if ctx.is(id, codes::STAR) || ctx.is(id, codes::CAGE) {
        ctx.add(STARS, 1);
    } else if ctx.is(id, codes::ARRIVAL) {
        ctx.set_entity(ARRIVAL, id);
        ctx.hide(id);
    }
}
