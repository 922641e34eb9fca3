use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::ops::{Deref, Index, IndexMut};

/// A `Vec` addressed by a typed index, e.g. one entry per vertex.
///
/// It only derefs immutably so that the length, which mirrors the number of
/// indexes of the owning structure, can't be changed by accident.
pub struct IndexedVec<I, T> {
    vec: Vec<T>,
    _marker: PhantomData<I>,
}

impl<I, T> Deref for IndexedVec<I, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<I: AsIndex, T> IndexedVec<I, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elem(elem: T, len: usize) -> Self
    where
        T: Clone,
    {
        vec![elem; len].into()
    }

    pub fn push(&mut self, value: T) -> I {
        let index = I::from_usize(self.vec.len());
        self.vec.push(value);
        index
    }

    pub fn indexes(&self) -> impl Iterator<Item = I> + DoubleEndedIterator + ExactSizeIterator {
        (0..self.vec.len()).map(I::from_usize)
    }

    pub fn enumerate(
        &self,
    ) -> impl Iterator<Item = (I, &T)> + DoubleEndedIterator + ExactSizeIterator {
        self.vec.iter().enumerate().map(|(i, t)| (I::from_usize(i), t))
    }

    pub fn into_vec(self) -> Vec<T> {
        self.vec
    }
}

impl<I, T> Default for IndexedVec<I, T> {
    fn default() -> Self {
        Vec::new().into()
    }
}

impl<I, T: Clone> Clone for IndexedVec<I, T> {
    fn clone(&self) -> Self {
        self.vec.clone().into()
    }
}

impl<I, T: PartialEq> PartialEq for IndexedVec<I, T> {
    fn eq(&self, other: &Self) -> bool {
        self.vec == other.vec
    }
}

impl<I, T: Eq> Eq for IndexedVec<I, T> {}

impl<I, T: fmt::Debug> fmt::Debug for IndexedVec<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.vec).finish()
    }
}

impl<I: AsIndex, T> Index<I> for IndexedVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.vec[index.to_usize()]
    }
}

impl<I: AsIndex, T> IndexMut<I> for IndexedVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.vec[index.to_usize()]
    }
}

impl<I, T> From<Vec<T>> for IndexedVec<I, T> {
    fn from(value: Vec<T>) -> Self {
        Self { vec: value, _marker: PhantomData }
    }
}

impl<I, T> FromIterator<T> for IndexedVec<I, T> {
    fn from_iter<IT: IntoIterator<Item = T>>(iter: IT) -> Self {
        Vec::from_iter(iter).into()
    }
}

pub trait AsIndex: Copy {
    fn to_usize(&self) -> usize;
    fn from_usize(index: usize) -> Self;
}

/// A `usize` that is never `usize::MAX`, so that `Option<NonMaxUsize>` is
/// pointer sized.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonMaxUsize(NonZeroUsize);

impl NonMaxUsize {
    pub const fn new(n: usize) -> Self {
        match NonZeroUsize::new(n.wrapping_add(1)) {
            Some(n) => Self(n),
            None => panic!("index out of range"),
        }
    }

    pub const fn to_usize(self) -> usize {
        self.0.get() - 1
    }
}

impl Default for NonMaxUsize {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for NonMaxUsize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_usize(), f)
    }
}

macro_rules! new_index {
    ($(#[$($meta:tt)*])* $vis:vis index $ty:ident) => {
        $(#[$($meta)*])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $ty { index: $crate::index::NonMaxUsize }

        #[allow(non_snake_case)]
        $vis const fn $ty(index: usize) -> $ty {
            $ty { index: $crate::index::NonMaxUsize::new(index) }
        }

        impl $crate::index::AsIndex for $ty {
            fn to_usize(&self) -> usize {
                self.index.to_usize()
            }

            fn from_usize(index: usize) -> Self {
                $ty(index)
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.index.to_usize(), f)
            }
        }
    };
}
pub(crate) use new_index;
