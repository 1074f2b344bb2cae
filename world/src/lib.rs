#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation engine for the Gridfall workspace.
//!
//! The engine owns the spatial grid with its layered occupancy stacks, the
//! turn/priority queue, the named state table, and the entity arena, and it
//! drives them through the level orchestrator: [`Level::load`] parses level
//! text and hatches entities through a game's factory, [`Level::command`]
//! begins a turn, and repeated [`Level::step`] calls pull one actor at a
//! time until the turn's effects are exhausted. Everything a game entity may
//! do happens through the [`Context`] handed to its lifecycle hooks, so the
//! engine stays free of game knowledge and the whole simulation stays
//! single-threaded and deterministic.
//!
//! Games plug in through the [`Game`] trait and are exercised end to end by
//! the golden-trace replay harness in this crate.

mod context;
mod grid;
mod harness;
mod level;
mod queue;
mod state;

pub use context::Context;
pub use harness::{replay_suite, ReplayCase};
pub use level::{Level, LoadError, ReplayError};

use gridfall_core::EntityId;

/// A complete game definition the engine can run.
///
/// Implementations are stateless; all per-level data lives in the entity
/// payloads and the state table reached through the [`Context`]. The engine
/// calls [`Game::hatch`] while loading, [`Game::wake`] once per visible
/// entity after the whole grid is populated, and [`Game::act`] every time an
/// entity is pulled from the actor queue.
pub trait Game: Sized {
    /// Game-specific data carried by every hatched entity.
    type Payload;

    /// Builds the payload for a type code, or `None` for codes the game
    /// does not know. Loading fails on the first unknown code.
    fn hatch(code: char) -> Option<Self::Payload>;

    /// Startup hook, run once per entity in row-major order after every
    /// entity of the level exists.
    fn wake(ctx: &mut Context<Self>, id: EntityId);

    /// Turn hook: perform at most one discrete action, then return.
    fn act(ctx: &mut Context<Self>, id: EntityId);

    /// The status line shown by front ends, built from the state table.
    fn status(ctx: &Context<Self>) -> String;
}
