use std::fmt;

/// Half-open interval `[lo, hi)` over the 1-D domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Range {
    pub lo: usize,
    pub hi: usize,
}

impl Range {
    /// Create a range. Callers guarantee `lo < hi`.
    pub const fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo < hi);
        Self { lo, hi }
    }

    pub const fn len(&self) -> usize {
        self.hi - self.lo
    }

    /// Whether `hi <= lo`; never true for ranges the builder creates.
    pub const fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }

    pub const fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Split at an interior cut point `k`, `lo < k < hi`.
    pub fn split_at(&self, k: usize) -> Option<(Range, Range)> {
        (self.lo < k && k < self.hi).then(|| (Range::new(self.lo, k), Range::new(k, self.hi)))
    }

    /// Interior cut points, left to right.
    pub fn cuts(&self) -> std::ops::Range<usize> {
        self.lo + 1..self.hi
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lo, self.hi)
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}
