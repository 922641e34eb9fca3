use crate::index::{new_index, IndexedVec};
use crate::measure::Counter;
use crate::{Map, Set};

new_index!(pub index VertexId);

pub type Priority = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Even,
    Odd,
}

impl Player {
    /// The player that wins a play whose highest recurring priority is `p`.
    pub fn of_priority(p: Priority) -> Player {
        match p % 2 {
            0 => Player::Even,
            _ => Player::Odd,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Even => Player::Odd,
            Player::Odd => Player::Even,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game has no vertices")]
    Empty,
    #[error("vertex {0} is declared more than once")]
    DuplicateVertex(usize),
    #[error("vertex {0} is missing, vertex ids must be contiguous from 0")]
    MissingVertex(usize),
    #[error("vertex {0} has no successors")]
    NoSuccessors(usize),
    #[error("vertex {from} has undeclared successor {to}")]
    DanglingSuccessor { from: usize, to: usize },
    #[error("the game has {0} vertices, more than the measure counters can hold")]
    TooManyVertices(usize),
}

/// A parity game. It can only be obtained through [`GameBuilder`], which
/// guarantees that ids are dense, every vertex has a successor and the
/// predecessor lists are the inverse of the successor lists.
#[derive(Debug)]
pub struct Game {
    players: IndexedVec<VertexId, Player>,
    priorities: IndexedVec<VertexId, Priority>,
    // Both sorted by ascending id, this is the order in which they are visited.
    successors: IndexedVec<VertexId, Vec<VertexId>>,
    predecessors: IndexedVec<VertexId, Vec<VertexId>>,
    self_loops: IndexedVec<VertexId, bool>,
    // Indexed by priority, from 0 to max_priority inclusive.
    priority_count: Vec<usize>,
}

impl Game {
    pub fn vertex_count(&self) -> usize {
        self.players.len()
    }

    pub fn vertices(
        &self,
    ) -> impl Iterator<Item = VertexId> + DoubleEndedIterator + ExactSizeIterator {
        self.players.indexes()
    }

    pub fn player_of(&self, v: VertexId) -> Player {
        self.players[v]
    }

    pub fn priority_of(&self, v: VertexId) -> Priority {
        self.priorities[v]
    }

    pub fn successors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.successors[v].iter().copied()
    }

    pub fn predecessors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.predecessors[v].iter().copied()
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.predecessors[v].len()
    }

    pub fn has_self_loop(&self, v: VertexId) -> bool {
        self.self_loops[v]
    }

    pub fn max_priority(&self) -> Priority {
        self.priority_count.len() - 1
    }

    /// Number of vertices with priority `p`.
    pub fn priority_count(&self, p: Priority) -> usize {
        self.priority_count.get(p).copied().unwrap_or(0)
    }
}

struct VertexDecl {
    priority: Priority,
    player: Player,
    successors: Set<usize>,
}

/// Collects vertex declarations, in any order, and validates them into a [`Game`].
#[derive(Default)]
pub struct GameBuilder {
    decls: Map<usize, VertexDecl>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(
        &mut self,
        id: usize,
        priority: Priority,
        player: Player,
        successors: impl IntoIterator<Item = usize>,
    ) -> Result<&mut Self, GameError> {
        if self.decls.contains_key(&id) {
            return Err(GameError::DuplicateVertex(id));
        }

        let successors = successors.into_iter().collect();
        self.decls.insert(id, VertexDecl { priority, player, successors });
        Ok(self)
    }

    pub fn build(mut self) -> Result<Game, GameError> {
        let n = self.decls.len();
        if n == 0 {
            return Err(GameError::Empty);
        }
        // Bounds are at most n, and prog needs room for bound + 1.
        if n >= Counter::MAX as usize {
            return Err(GameError::TooManyVertices(n));
        }

        let mut players = IndexedVec::new();
        let mut priorities = IndexedVec::new();
        let mut successors = IndexedVec::<VertexId, Vec<VertexId>>::new();
        let mut predecessors = IndexedVec::from_elem(Vec::new(), n);
        let mut self_loops = IndexedVec::from_elem(false, n);
        let mut priority_count = Vec::new();

        for id in 0..n {
            // Since there are n distinct declarations, a hole means some id is >= n.
            let decl = self.decls.remove(&id).ok_or(GameError::MissingVertex(id))?;
            if decl.successors.is_empty() {
                return Err(GameError::NoSuccessors(id));
            }

            let mut succs = Vec::with_capacity(decl.successors.len());
            for to in decl.successors {
                if to >= n {
                    return Err(GameError::DanglingSuccessor { from: id, to });
                }
                succs.push(VertexId(to));
            }
            succs.sort_unstable();

            if priority_count.len() <= decl.priority {
                priority_count.resize(decl.priority + 1, 0);
            }
            priority_count[decl.priority] += 1;

            players.push(decl.player);
            priorities.push(decl.priority);
            successors.push(succs);
        }

        // Visiting sources in ascending order keeps every predecessor list sorted.
        for (v, succs) in successors.enumerate() {
            for &w in succs {
                predecessors[w].push(v);
                if v == w {
                    self_loops[v] = true;
                }
            }
        }

        log::debug!(
            "built game with {} vertices, {} edges, max priority {}",
            n,
            successors.iter().map(Vec::len).sum::<usize>(),
            priority_count.len() - 1
        );

        Ok(Game { players, priorities, successors, predecessors, self_loops, priority_count })
    }
}
