pub mod game;
pub mod index;
pub mod lift;
pub mod measure;
pub mod order;
pub mod solve;

#[cfg(test)]
mod test;

pub use game::{Game, GameBuilder, GameError, Player, Priority, VertexId};
pub use measure::{Bound, Counter, Measure};
pub use order::VertexOrder;
pub use solve::{solve, Output, OutputMode, Solution, SolveStats, SolverConfig, Spm};

pub type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
pub type Map<K, V> = rustc_hash::FxHashMap<K, V>;
