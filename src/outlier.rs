//! Outcast detection: the term least related to the rest of a group.

use serde::{Deserialize, Serialize};

use crate::error::{LexnetError, Result};
use crate::vocabulary::VocabularyGraph;

/// Anything that can measure the distance between two terms.
pub trait DistanceOracle {
    /// Non-negative distance between `a` and `b`.
    fn distance(&self, a: &str, b: &str) -> Result<usize>;
}

impl DistanceOracle for VocabularyGraph {
    fn distance(&self, a: &str, b: &str) -> Result<usize> {
        VocabularyGraph::distance(self, a, b)
    }
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &T {
    fn distance(&self, a: &str, b: &str) -> Result<usize> {
        (**self).distance(a, b)
    }
}

/// A term together with its summed distance to every other term in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermScore {
    pub term: String,
    pub total_distance: usize,
}

/// Per-term scores plus the winning outcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub outcast: String,
    /// Position of the outcast in the input.
    pub position: usize,
    /// One entry per input term, in input order.
    pub scores: Vec<TermScore>,
}

/// Finds the term whose summed distance to the others is greatest.
#[derive(Debug, Clone)]
pub struct OutlierFinder<O> {
    oracle: O,
}

impl<O: DistanceOracle> OutlierFinder<O> {
    pub fn new(oracle: O) -> Self {
        OutlierFinder { oracle }
    }

    /// The outcast among `terms`.
    ///
    /// Ties keep the earliest maximal term. Fails with a boundary error for
    /// fewer than two terms, where every sum is zero and no outcast exists.
    pub fn outcast<'t, S: AsRef<str>>(&self, terms: &'t [S]) -> Result<&'t str> {
        let report = self.report(terms)?;
        Ok(terms[report.position].as_ref())
    }

    /// Summed distances for every term and the resulting outcast.
    pub fn report<S: AsRef<str>>(&self, terms: &[S]) -> Result<OutlierReport> {
        if terms.len() < 2 {
            return Err(LexnetError::boundary(format!(
                "an outcast needs at least two terms, got {}",
                terms.len()
            )));
        }

        let mut scores = Vec::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            let mut total_distance = 0;
            for (j, other) in terms.iter().enumerate() {
                if i == j {
                    continue;
                }
                total_distance += self.oracle.distance(term.as_ref(), other.as_ref())?;
            }
            scores.push(TermScore {
                term: term.as_ref().to_string(),
                total_distance,
            });
        }

        let mut position = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if score.total_distance > scores[position].total_distance {
                position = i;
            }
        }

        Ok(OutlierReport {
            outcast: scores[position].term.clone(),
            position,
            scores,
        })
    }
}
