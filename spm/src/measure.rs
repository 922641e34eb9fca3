use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::game::{Game, Priority};

/// Width of a single measure slot. `GameBuilder` rejects games whose bounds
/// could make `bound + 1` overflow it.
pub type Counter = u32;

/// A progress measure.
///
/// Finite measures have one slot per priority, `0..=max_priority`. Only the
/// odd slots are ever non-zero; the even ones keep slot `i` aligned with
/// priority `i`. The higher the slot, the more significant it is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Measure {
    Finite(Box<[Counter]>),
    /// No finite measure exists: Odd wins from here.
    Top,
}

impl Measure {
    pub fn bottom(len: usize) -> Measure {
        Measure::Finite(vec![0; len].into_boxed_slice())
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Measure::Top)
    }

    pub fn is_bottom(&self) -> bool {
        match self {
            Measure::Finite(slots) => odd_slots(slots.len(), 0).all(|i| slots[i] == 0),
            Measure::Top => false,
        }
    }

    /// Whether `self` is lexicographically greater than `other` (or equal,
    /// when `strict` is false), looking only at odd slots `>= floor`.
    pub fn greater(&self, other: &Measure, strict: bool, floor: Priority) -> bool {
        match (self, other) {
            (Measure::Top, Measure::Top) => !strict,
            (Measure::Top, _) => true,
            (_, Measure::Top) => false,
            (Measure::Finite(a), Measure::Finite(b)) => {
                debug_assert_eq!(a.len(), b.len(), "comparing measures of different games");
                for i in odd_slots(a.len(), floor) {
                    match a[i].cmp(&b[i]) {
                        Ordering::Greater => return true,
                        Ordering::Less => return false,
                        Ordering::Equal => {}
                    }
                }
                !strict
            }
        }
    }

    pub fn greater_eq(&self, other: &Measure) -> bool {
        self.greater(other, false, 0)
    }
}

/// Odd slot indexes of a measure of length `len`, at least `floor`, most
/// significant first.
fn odd_slots(len: usize, floor: Priority) -> impl Iterator<Item = usize> {
    (floor..len).rev().filter(|i| i % 2 == 1)
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Finite(slots) => {
                let odd = odd_slots(slots.len(), 0).map(|i| slots[i]);
                f.debug_list().entries(odd).finish()
            }
            Measure::Top => f.write_str("Top"),
        }
    }
}

/// Componentwise upper bound of finite measures: slot `i` holds the number of
/// vertices with odd priority `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bound(Box<[Counter]>);

impl Bound {
    pub fn of(game: &Game) -> Bound {
        let slots = (0..=game.max_priority())
            .map(|p| match p % 2 {
                // The builder caps the vertex count below Counter::MAX.
                1 => game.priority_count(p) as Counter,
                _ => 0,
            })
            .collect();
        Bound(slots)
    }

    /// Length of every finite measure for this game.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn bottom(&self) -> Measure {
        Measure::bottom(self.len())
    }

    /// Number of finite measures whose slots below `p` are all zero, i.e.
    /// the most times a vertex with priority `p` can be lifted.
    pub fn lift_capacity(&self, p: Priority) -> u128 {
        odd_slots(self.len(), p).fold(1u128, |acc, i| acc.saturating_mul(self.0[i] as u128 + 1))
    }
}

impl Index<usize> for Bound {
    type Output = Counter;

    fn index(&self, index: usize) -> &Counter {
        &self.0[index]
    }
}
