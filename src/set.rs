use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// A sorted, duplicate-free sequence.
///
/// Every constructor keeps the backing vector sorted, so the derived
/// `PartialEq`/`Hash` are set equality regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderedSet<T: Ord + Copy>(Vec<T>);

/// A set of NFA state indices; doubles as the label of a DFA state.
pub type StateSet = OrderedSet<usize>;

/// The distinct non-epsilon symbols of an automaton.
pub type Vocabulary = OrderedSet<char>;

impl<T: Ord + Copy> OrderedSet<T> {
    pub fn new() -> Self {
        OrderedSet(Vec::new())
    }

    pub fn singleton(value: T) -> Self {
        OrderedSet(vec![value])
    }

    /// Inserts `value` at its sorted position. Returns `false` if it was
    /// already present.
    pub fn insert(&mut self, value: T) -> bool {
        match self.0.binary_search(&value) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, value);
                true
            }
        }
    }

    /// Adds every element of `other` to `self`.
    pub fn union_with(&mut self, other: &OrderedSet<T>) {
        if other.0.is_empty() {
            return;
        }
        if self.0.is_empty() {
            self.0.extend_from_slice(&other.0);
            return;
        }
        let mut merged = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            let (a, b) = (self.0[i], other.0[j]);
            if a < b {
                merged.push(a);
                i += 1;
            } else if b < a {
                merged.push(b);
                j += 1;
            } else {
                merged.push(a);
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&self.0[i..]);
        merged.extend_from_slice(&other.0[j..]);
        self.0 = merged;
    }

    pub fn contains(&self, value: T) -> bool {
        self.0.binary_search(&value).is_ok()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Ord + Copy> Default for OrderedSet<T> {
    fn default() -> Self {
        OrderedSet::new()
    }
}

impl<T: Ord + Copy> Deref for OrderedSet<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Ord + Copy> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v: Vec<T> = iter.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        OrderedSet(v)
    }
}

impl<'a, T: Ord + Copy> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Ord + Copy + fmt::Display> fmt::Display for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let mut s = StateSet::new();
        assert!(s.insert(5));
        assert!(s.insert(1));
        assert!(s.insert(3));
        assert!(!s.insert(3));
        assert_eq!(s.as_slice(), &[1, 3, 5]);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn equality_ignores_construction_order() {
        let a: StateSet = vec![4, 2, 9].into_iter().collect();
        let mut b = StateSet::new();
        b.insert(9);
        b.insert(4);
        b.insert(2);
        b.insert(4);
        assert_eq!(a, b);
        assert_ne!(a, StateSet::singleton(2));
    }

    #[test]
    fn union_merges_overlapping_sets() {
        let mut a: StateSet = vec![1, 3, 5].into_iter().collect();
        let b: StateSet = vec![2, 3, 6].into_iter().collect();
        a.union_with(&b);
        assert_eq!(a.as_slice(), &[1, 2, 3, 5, 6]);

        let mut empty = StateSet::new();
        empty.union_with(&b);
        assert_eq!(empty, b);
    }

    #[test]
    fn contains_and_display() {
        let s: Vocabulary = "cab".chars().collect();
        assert!(s.contains('a'));
        assert!(!s.contains('d'));
        assert_eq!(s.to_string(), "{a,b,c}");
        assert_eq!(StateSet::new().to_string(), "{}");
    }
}
