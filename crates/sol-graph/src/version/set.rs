//! Fixed-width bit vector over a [`VersionDomain`](super::VersionDomain).

use std::fmt;
use std::ops::{BitAndAssign, BitOrAssign};

const WORD_BITS: usize = u64::BITS as usize;

/// Subset of a version domain, one bit per domain index.
///
/// Bit `i` set means the version at index `i` is not excluded by the
/// constraints folded into this set so far. A fresh set is all ones.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VersionSet {
    words: Box<[u64]>,
    width: usize,
}

impl VersionSet {
    /// All-ones set (no constraint yet).
    pub fn full(width: usize) -> Self {
        let mut words = vec![u64::MAX; width.div_ceil(WORD_BITS)].into_boxed_slice();
        let tail = width % WORD_BITS;
        if tail != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        Self { words, width }
    }

    /// All-zeros set.
    pub fn empty(width: usize) -> Self {
        Self {
            words: vec![0; width.div_ceil(WORD_BITS)].into_boxed_slice(),
            width,
        }
    }

    /// Set containing every index for which `predicate` holds.
    pub fn from_fn(width: usize, mut predicate: impl FnMut(usize) -> bool) -> Self {
        let mut set = Self::empty(width);
        for index in 0..width {
            if predicate(index) {
                set.set(index);
            }
        }
        set
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_set(&self, index: usize) -> bool {
        index < self.width && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Set bit `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.width {
            self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
        }
    }

    /// Clear bit `index`. Out-of-range indices are ignored.
    pub fn clear(&mut self, index: usize) {
        if index < self.width {
            self.words[index / WORD_BITS] &= !(1 << (index % WORD_BITS));
        }
    }

    /// Intersection of two sets of the same width.
    ///
    /// # Panics
    ///
    /// When the widths differ; sets from different domains do not mix.
    pub fn and(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out &= other;
        out
    }

    /// Union of two sets of the same width.
    ///
    /// # Panics
    ///
    /// When the widths differ.
    pub fn or(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out |= other;
        out
    }

    /// Highest set index, scanning from the top of the domain down.
    ///
    /// Used for "prefer the newest compatible version" selection.
    pub fn highest_set_index(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, word)| **word != 0)
            .map(|(i, word)| i * WORD_BITS + (WORD_BITS - 1 - word.leading_zeros() as usize))
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn is_full(&self) -> bool {
        self.count() == self.width
    }

    /// Set indices in ascending order.
    pub fn iter_set(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..self.width).filter(move |i| self.is_set(*i))
    }
}

/// Panics when the widths differ, like [`VersionSet::and`].
impl BitAndAssign<&VersionSet> for VersionSet {
    fn bitand_assign(&mut self, rhs: &VersionSet) {
        assert_eq!(self.width, rhs.width, "version sets of different widths");
        for (lhs, rhs) in self.words.iter_mut().zip(rhs.words.iter()) {
            *lhs &= rhs;
        }
    }
}

/// Panics when the widths differ, like [`VersionSet::or`].
impl BitOrAssign<&VersionSet> for VersionSet {
    fn bitor_assign(&mut self, rhs: &VersionSet) {
        assert_eq!(self.width, rhs.width, "version sets of different widths");
        for (lhs, rhs) in self.words.iter_mut().zip(rhs.words.iter()) {
            *lhs |= rhs;
        }
    }
}

impl fmt::Debug for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VersionSet(")?;
        for index in 0..self.width {
            f.write_str(if self.is_set(index) { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_has_no_bits_past_width() {
        let set = VersionSet::full(70);
        assert_eq!(set.count(), 70);
        assert!(set.is_set(69));
        assert!(!set.is_set(70));
        assert_eq!(set.highest_set_index(), Some(69));
    }

    #[test]
    fn empty_has_no_highest() {
        let set = VersionSet::empty(5);
        assert!(set.is_empty());
        assert_eq!(set.highest_set_index(), None);
    }

    #[test]
    fn zero_width_sets() {
        let full = VersionSet::full(0);
        assert!(full.is_empty());
        assert!(full.is_full());
        assert_eq!(full.highest_set_index(), None);
    }

    #[test]
    #[should_panic(expected = "version sets of different widths")]
    fn and_rejects_mismatched_widths() {
        let _ = VersionSet::full(3).and(&VersionSet::full(70));
    }

    #[test]
    #[should_panic(expected = "version sets of different widths")]
    fn or_rejects_mismatched_widths() {
        let mut wide = VersionSet::empty(70);
        wide |= &VersionSet::full(3);
    }

    #[test]
    fn and_or_across_word_boundary() {
        let evens = VersionSet::from_fn(130, |i| i % 2 == 0);
        let high = VersionSet::from_fn(130, |i| i >= 64);

        let both = evens.and(&high);
        assert_eq!(both.iter_set().next(), Some(64));
        assert_eq!(both.highest_set_index(), Some(128));

        let either = evens.or(&high);
        assert_eq!(either.count(), 32 + 66);
    }

    #[test]
    fn set_and_clear_ignore_out_of_range() {
        let mut set = VersionSet::empty(3);
        set.set(7);
        assert!(set.is_empty());
        set.set(2);
        set.clear(9);
        assert_eq!(set.iter_set().collect::<Vec<_>>(), vec![2]);
        set.clear(2);
        assert!(set.is_empty());
    }

    #[test]
    fn debug_renders_bits_low_to_high() {
        let set = VersionSet::from_fn(4, |i| i == 1);
        assert_eq!(format!("{set:?}"), "VersionSet(0100)");
    }
}
