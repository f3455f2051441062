pub mod serde;

use std::cmp::Ordering;
use std::fmt::{self, Debug};

use num::Float;

/// SparseVec is a sparse term -> weight vector.
/// Only the terms a document actually carries are stored.
///
/// Entries are kept sorted by term (ascending byte order) with exactly one
/// entry per term. Equality therefore does not depend on the order in which
/// entries were inserted, and every reduction (dot product, norm) sums in
/// term order so results are reproducible bit for bit.
#[derive(Clone, PartialEq)]
pub struct SparseVec<N = f64>
where
    N: Float,
{
    entries: Vec<(Box<str>, N)>,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    #[inline]
    pub fn new() -> Self {
        SparseVec { entries: Vec::new() }
    }

    /// Build a vector from arbitrary `(term, value)` pairs.
    /// Duplicate terms are merged by summing their values.
    pub fn from_entries<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, N)>,
        T: Into<Box<str>>,
    {
        let mut raw: Vec<(Box<str>, N)> = entries
            .into_iter()
            .map(|(term, value)| (term.into(), value))
            .collect();
        raw.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries: Vec<(Box<str>, N)> = Vec::with_capacity(raw.len());
        for (term, value) in raw {
            match entries.last_mut() {
                Some((last, acc)) if *last == term => *acc = *acc + value,
                _ => entries.push((term, value)),
            }
        }
        SparseVec { entries }
    }

    #[inline]
    fn search(&self, term: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(t, _)| t.as_ref().cmp(term))
    }

    /// number of stored terms
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<N> {
        self.search(term).ok().map(|idx| self.entries[idx].1)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.search(term).is_ok()
    }

    /// Set the value of `term`, replacing any previous value.
    /// Returns the previous value if the term was present.
    pub fn insert<T>(&mut self, term: T, value: N) -> Option<N>
    where
        T: Into<Box<str>>,
    {
        let term = term.into();
        match self.search(&term) {
            Ok(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                self.entries.insert(idx, (term, value));
                None
            }
        }
    }

    pub fn remove(&mut self, term: &str) -> Option<N> {
        self.search(term).ok().map(|idx| self.entries.remove(idx).1)
    }

    /// Iterate `(term, value)` in ascending term order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, N)> + '_ {
        self.entries.iter().map(|(t, v)| (t.as_ref(), *v))
    }

    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(t, _)| t.as_ref())
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = N> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// Sum of all values
    pub fn sum(&self) -> N {
        self.values().fold(N::zero(), |acc, v| acc + v)
    }

    /// Dot product over the shared terms.
    /// Merge join over both sorted entry lists, so `a.dot(b) == b.dot(a)`.
    pub fn dot(&self, other: &Self) -> N {
        let mut a_it = self.entries.iter();
        let mut b_it = other.entries.iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut result = N::zero();
        while let (Some((ta, va)), Some((tb, vb))) = (a_next, b_next) {
            match ta.cmp(tb) {
                Ordering::Equal => {
                    result = result + *va * *vb;
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    /// Squared euclidean norm
    pub fn norm_sq(&self) -> N {
        self.values().fold(N::zero(), |acc, v| acc + v * v)
    }

    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Largest absolute value, zero for an empty vector
    pub fn max_abs(&self) -> N {
        self.values().fold(N::zero(), |acc, v| acc.max(v.abs()))
    }

    /// Map every value, keeping the key set.
    /// The weight type may change on the way.
    pub fn map_values<M, F>(&self, mut f: F) -> SparseVec<M>
    where
        M: Float,
        F: FnMut(&str, N) -> M,
    {
        SparseVec {
            entries: self
                .entries
                .iter()
                .map(|(t, v)| (t.clone(), f(t, *v)))
                .collect(),
        }
    }
}

impl<N> Default for SparseVec<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T> FromIterator<(T, N)> for SparseVec<N>
where
    N: Float,
    T: Into<Box<str>>,
{
    fn from_iter<I: IntoIterator<Item = (T, N)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Float + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(t, v)| (t, v)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_sorted_and_merged() {
        let v: SparseVec = SparseVec::from_entries([("b", 1.0), ("a", 2.0), ("b", 0.5)]);
        let collected: Vec<(&str, f64)> = v.iter().collect();
        assert_eq!(collected, vec![("a", 2.0), ("b", 1.5)]);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: SparseVec = [("x", 1.0), ("y", 2.0)].into_iter().collect();
        let mut b: SparseVec = SparseVec::new();
        b.insert("y", 2.0);
        b.insert("x", 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn insert_replaces_and_remove_deletes() {
        let mut v: SparseVec = SparseVec::new();
        assert_eq!(v.insert("t", 1.0), None);
        assert_eq!(v.insert("t", 3.0), Some(1.0));
        assert_eq!(v.get("t"), Some(3.0));
        assert_eq!(v.remove("t"), Some(3.0));
        assert!(v.is_empty());
        assert_eq!(v.get("t"), None);
    }

    #[test]
    fn dot_uses_shared_terms_only() {
        let a: SparseVec = [("a", 1.0), ("b", 2.0), ("c", 3.0)].into_iter().collect();
        let b: SparseVec = [("b", 4.0), ("d", 5.0)].into_iter().collect();
        assert_eq!(a.dot(&b), 8.0);
        assert_eq!(b.dot(&a), 8.0);
    }

    #[test]
    fn norm_of_empty_is_zero() {
        let v: SparseVec<f32> = SparseVec::new();
        assert_eq!(v.norm(), 0.0);
        assert_eq!(v.sum(), 0.0);
    }

    #[test]
    fn max_abs_ignores_sign() {
        let v: SparseVec = [("a", -3.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(v.max_abs(), 3.0);
        assert_eq!(SparseVec::<f64>::new().max_abs(), 0.0);
    }

    #[test]
    fn map_values_can_widen() {
        let v: SparseVec<f32> = [("a", 0.5_f32)].into_iter().collect();
        let wide: SparseVec<f64> = v.map_values(|_, x| f64::from(x) * 2.0);
        assert_eq!(wide.get("a"), Some(1.0));
    }

    #[test]
    fn norm_matches_pythagoras() {
        let v: SparseVec = [("a", 3.0), ("b", 4.0)].into_iter().collect();
        assert_eq!(v.norm(), 5.0);
    }
}
