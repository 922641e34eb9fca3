use std::fmt;

use crate::game::{Game, Player, VertexId};
use crate::index::{AsIndex, IndexedVec};
use crate::lift::lift;
use crate::measure::{Bound, Measure};
use crate::order::VertexOrder;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The winner of every vertex.
    #[default]
    Partition,
    /// Only whether Even wins the given vertex.
    Vertex(VertexId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub order: VertexOrder,
    pub output: OutputMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// `true` for the vertices won by Even.
    Partition(IndexedVec<VertexId, bool>),
    Vertex(bool),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub rounds: usize,
    /// Calls to `lift`, including those that changed nothing.
    pub lift_attempts: usize,
    /// Lifts that strictly increased a measure.
    pub lifts: usize,
}

impl fmt::Display for SolveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { rounds, lift_attempts, lifts } = self;
        write!(f, "{rounds} rounds, {lifts} lifts ({lift_attempts} attempted)")
    }
}

/// Solves `game` with the configured vertex order.
///
/// Panics if `config.output` queries a vertex that is not in the game.
pub fn solve(game: &Game, config: &SolverConfig) -> Output {
    if let OutputMode::Vertex(v) = config.output {
        assert!(v.to_usize() < game.vertex_count(), "vertex {v} is not in the game");
    }

    let order = config.order.vertices(game);
    let mut spm = Spm::new(game);
    spm.run(&order);

    match config.output {
        OutputMode::Partition => Output::Partition(spm.into_solution().even_wins),
        OutputMode::Vertex(v) => Output::Vertex(!spm.measure(v).is_top()),
    }
}

/// Small progress measures fixpoint computation.
///
/// Measures start at bottom and are only ever replaced by strictly greater
/// ones, so after the last round every vertex whose measure is `Top` is won
/// by Odd and every other vertex by Even.
pub struct Spm<'a> {
    game: &'a Game,
    bound: Bound,
    measures: IndexedVec<VertexId, Measure>,
    stats: SolveStats,
}

impl<'a> Spm<'a> {
    pub fn new(game: &'a Game) -> Self {
        let bound = Bound::of(game);
        let measures = IndexedVec::from_elem(bound.bottom(), game.vertex_count());
        Self { game, bound, measures, stats: SolveStats::default() }
    }

    /// Lifts every vertex once, in the given order. Later lifts see the
    /// updates of earlier ones. Returns whether any measure increased.
    pub fn round(&mut self, order: &[VertexId]) -> bool {
        let mut increased = false;
        self.stats.rounds += 1;

        for &v in order {
            let candidate = lift(self.game, &self.bound, &self.measures, v);
            self.stats.lift_attempts += 1;

            if candidate.greater(&self.measures[v], true, 0) {
                log::trace!("lifted {v} from {:?} to {:?}", self.measures[v], candidate);
                self.measures[v] = candidate;
                self.stats.lifts += 1;
                increased = true;
            }
        }

        log::debug!("round {} done, {} lifts so far", self.stats.rounds, self.stats.lifts);
        increased
    }

    /// Runs rounds until none of them increases a measure.
    ///
    /// Panics if `order` is not a permutation of the vertices of the game.
    pub fn run(&mut self, order: &[VertexId]) -> SolveStats {
        assert_eq!(order.len(), self.game.vertex_count(), "order must cover the game");
        let mut seen: IndexedVec<VertexId, bool> = IndexedVec::from_elem(false, order.len());
        for &v in order {
            assert!(!seen[v], "vertex {v} appears twice in the order");
            seen[v] = true;
        }

        while self.round(order) {}

        log::info!("solved {} vertices: {}", self.game.vertex_count(), self.stats);
        self.stats
    }

    pub fn measure(&self, v: VertexId) -> &Measure {
        &self.measures[v]
    }

    pub fn bound(&self) -> &Bound {
        &self.bound
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    pub fn into_solution(self) -> Solution {
        let even_wins = self.measures.iter().map(|m| !m.is_top()).collect();
        Solution { even_wins, stats: self.stats }
    }
}

#[derive(Clone, Debug)]
pub struct Solution {
    even_wins: IndexedVec<VertexId, bool>,
    pub stats: SolveStats,
}

impl Solution {
    pub fn even_wins(&self, v: VertexId) -> bool {
        self.even_wins[v]
    }

    pub fn winner(&self, v: VertexId) -> Player {
        match self.even_wins[v] {
            true => Player::Even,
            false => Player::Odd,
        }
    }

    pub fn winning_set(&self, player: Player) -> impl Iterator<Item = VertexId> + '_ {
        self.even_wins.enumerate().filter(move |&(v, _)| self.winner(v) == player).map(|(v, _)| v)
    }

    pub fn partition(&self) -> &IndexedVec<VertexId, bool> {
        &self.even_wins
    }
}
