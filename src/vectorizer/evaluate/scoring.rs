use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use serde::Serialize;

/// Identifies a document inside one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocKey {
    /// 0-based position in the working set
    pub index: usize,
    pub name: Arc<str>,
}

impl DocKey {
    pub fn new(index: usize, name: impl Into<Arc<str>>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Similarity of one unordered document pair, `left.index < right.index`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairHit {
    pub left: DocKey,
    pub right: DocKey,
    pub score: f64,
}

impl PairHit {
    /// `(left index, right index, score)`
    pub fn as_tuple(&self) -> (usize, usize, f64) {
        (self.left.index, self.right.index, self.score)
    }
}

/// Pairwise comparison results
///
/// Produced in ascending `(left, right)` order; sorting and filtering are up
/// to the caller.
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct PairHits {
    pub list: Vec<PairHit>,
}

impl PairHits {
    pub fn new(list: Vec<PairHit>) -> Self {
        PairHits { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PairHit> {
        self.list.iter()
    }

    /// Find the hit for documents `i` and `j` in either order
    pub fn get(&self, i: usize, j: usize) -> Option<&PairHit> {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        self.list
            .iter()
            .find(|hit| hit.left.index == lo && hit.right.index == hi)
    }

    /// Sort by descending score
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Sort by ascending score
    pub fn sort_by_score_asc(&mut self) -> &mut Self {
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| a.score.total_cmp(&b.score));
        self
    }

    /// Keep hits with `score >= threshold`
    pub fn filter_threshold(&self, threshold: f64) -> PairHits {
        PairHits {
            list: self
                .list
                .iter()
                .filter(|hit| hit.score >= threshold)
                .cloned()
                .collect(),
        }
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.list.iter().map(|hit| hit.score)
    }
}

impl IntoIterator for PairHits {
    type Item = PairHit;
    type IntoIter = std::vec::IntoIter<PairHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a> IntoIterator for &'a PairHits {
    type Item = &'a PairHit;
    type IntoIter = std::slice::Iter<'a, PairHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl Debug for PairHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "PairHits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?} <-> {:?}: {:.6}", hit.left.name, hit.right.name, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(self.list.iter().map(|h| h.as_tuple())).finish()
        }
    }
}

impl Display for PairHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{}\t{}\t{:.6}", hit.left, hit.right, hit.score)?;
        }
        Ok(())
    }
}
