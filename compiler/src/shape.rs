//! Concrete tensor shapes.

use std::fmt;

use smallvec::SmallVec;

/// Static tensor shape, outermost dimension first.
///
/// Inline capacity of 4 covers NCHW without a heap allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shape(SmallVec<[usize; 4]>);

impl Shape {
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Self {
        Self(dims.into_iter().collect())
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.0.get(axis).copied()
    }

    /// Number of elements.
    pub fn numel(&self) -> u64 {
        self.0.iter().map(|&d| d as u64).product()
    }

    /// Copy of this shape with `axis` resized. Out-of-range axes are ignored.
    pub fn with_dim(&self, axis: usize, size: usize) -> Self {
        let mut dims = self.0.clone();
        if let Some(d) = dims.get_mut(axis) {
            *d = size;
        }
        Self(dims)
    }

    /// Whether both shapes agree on every axis but `axis`.
    pub fn matches_except(&self, other: &Shape, axis: usize) -> bool {
        self.rank() == other.rank() && self.0.iter().zip(&other.0).enumerate().all(|(i, (a, b))| i == axis || a == b)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.as_slice())
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.into_iter().collect())
    }
}
