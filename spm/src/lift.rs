use crate::game::{Game, Player, VertexId};
use crate::index::IndexedVec;
use crate::measure::{Bound, Measure};

/// The least measure that `v` needs to make progress along the edge `v -> w`,
/// given the current measure of `w`.
pub fn prog(
    game: &Game,
    bound: &Bound,
    measures: &IndexedVec<VertexId, Measure>,
    v: VertexId,
    w: VertexId,
) -> Measure {
    let Measure::Finite(mw) = &measures[w] else {
        return Measure::Top;
    };
    let p = game.priority_of(v);
    let mut slots = vec![0; mw.len()];

    if p % 2 == 0 {
        slots[p..].copy_from_slice(&mw[p..]);
        return Measure::Finite(slots.into_boxed_slice());
    }

    // Find the least significant slot at or above p that can still grow.
    // Everything below it restarts from zero.
    for i in (p..mw.len()).step_by(2) {
        debug_assert!(mw[i] <= bound[i], "slot {i} of {w} exceeds its bound");
        if mw[i] < bound[i] {
            slots[i] = mw[i] + 1;
            slots[i + 1..].copy_from_slice(&mw[i + 1..]);
            return Measure::Finite(slots.into_boxed_slice());
        }
    }

    Measure::Top
}

/// The measure `v` should get given the current measures of its successors:
/// the minimum of `prog` for Even vertices, the maximum for Odd ones.
pub fn lift(
    game: &Game,
    bound: &Bound,
    measures: &IndexedVec<VertexId, Measure>,
    v: VertexId,
) -> Measure {
    let player = game.player_of(v);

    // A player looping on a priority of its own parity wins right away.
    if game.has_self_loop(v) && Player::of_priority(game.priority_of(v)) == player {
        return match player {
            Player::Even => bound.bottom(),
            Player::Odd => Measure::Top,
        };
    }

    let mut best: Option<Measure> = None;
    for w in game.successors_of(v) {
        let progress = prog(game, bound, measures, v, w);
        let improves = match (&best, player) {
            (None, _) => true,
            (Some(best), Player::Even) => best.greater(&progress, true, 0),
            (Some(best), Player::Odd) => progress.greater(best, true, 0),
        };
        if improves {
            best = Some(progress);
        }

        let settled = match (&best, player) {
            (Some(best), Player::Even) => best.is_bottom(),
            (Some(best), Player::Odd) => best.is_top(),
            (None, _) => false,
        };
        if settled {
            break;
        }
    }

    // Sinks are rejected by `GameBuilder`, so some successor was visited.
    best.unwrap_or(Measure::Top)
}
