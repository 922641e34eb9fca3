use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::{Game, VertexId};
use crate::index::IndexedVec;

/// The order in which the solver visits vertices during each round.
///
/// This only affects how fast the solver converges, never its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VertexOrder {
    /// Ascending vertex id.
    #[default]
    Input,
    /// A fresh uniform shuffle on every call.
    Random,
    /// Descending number of predecessors, ties by ascending id.
    InDegree,
    /// Breadth-first over the predecessor relation, rooted at the lowest
    /// vertex not yet visited.
    BreadthFirst,
}

impl VertexOrder {
    pub fn vertices(self, game: &Game) -> Vec<VertexId> {
        match self {
            VertexOrder::Input => game.vertices().collect(),
            VertexOrder::Random => random_with(game, &mut rand::thread_rng()),
            VertexOrder::InDegree => in_degree(game),
            VertexOrder::BreadthFirst => breadth_first(game),
        }
    }
}

pub fn random_with(game: &Game, rng: &mut impl Rng) -> Vec<VertexId> {
    let mut order = game.vertices().collect::<Vec<_>>();
    order.shuffle(rng);
    order
}

fn in_degree(game: &Game) -> Vec<VertexId> {
    let mut buckets = Vec::<Vec<VertexId>>::new();
    for v in game.vertices() {
        let degree = game.in_degree(v);
        if degree >= buckets.len() {
            buckets.resize_with(degree + 1, Vec::new);
        }
        buckets[degree].push(v);
    }

    buckets.into_iter().rev().flatten().collect()
}

fn breadth_first(game: &Game) -> Vec<VertexId> {
    let mut order = Vec::with_capacity(game.vertex_count());
    let mut colored = IndexedVec::<VertexId, bool>::from_elem(false, game.vertex_count());
    let mut queue = VecDeque::new();

    for root in game.vertices() {
        if colored[root] {
            continue;
        }

        colored[root] = true;
        queue.push_back(root);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for p in game.predecessors_of(u) {
                if !colored[p] {
                    colored[p] = true;
                    queue.push_back(p);
                }
            }
        }
    }

    order
}
