//! Player movement over the tile grid.

use serde::Serialize;

use crate::action::Direction;
use crate::ledger::ResourceLedger;
use crate::structures::Base;
use crate::world::{Grid, Position, Tile};

/// What stopped a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocker {
    Wall,
    Building,
}

/// Result of one movement input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    Moved {
        from: Position,
        to: Position,
        /// A salvage cache was emptied
        scavenged: bool,
        /// The destination is a terminal
        terminal: bool,
    },
    Blocked(Blocker),
}

/// Move the player one tile.
///
/// The target is clamped to the grid, so pushing against the edge lands on
/// the current tile. Walls and buildings reject the move. Entering a cache
/// turns it into floor and credits one food, water and scrap.
pub fn step(
    grid: &mut Grid,
    base: &Base,
    player: &mut Position,
    ledger: &mut ResourceLedger,
    direction: Direction,
) -> MoveOutcome {
    let target = grid.clamp(player.step(direction));

    match grid.get(target) {
        Some(tile) if !tile.is_passable() => return MoveOutcome::Blocked(Blocker::Wall),
        _ if base.is_occupied(target) => return MoveOutcome::Blocked(Blocker::Building),
        _ => {}
    }

    let scavenged = grid.get(target) == Some(Tile::Resource);
    if scavenged {
        grid.set(target, Tile::Floor);
        ledger.collect_cache();
    }

    let from = *player;
    *player = target;

    MoveOutcome::Moved {
        from,
        to: target,
        scavenged,
        terminal: grid.get(target) == Some(Tile::Terminal),
    }
}
