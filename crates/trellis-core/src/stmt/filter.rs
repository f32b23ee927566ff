use super::{Clause, Conjunction};
use crate::{Error, Result};

use serde::{Deserialize, Serialize};

/// An ordered clause list sharing a single conjunction.
///
/// A filter starts out neutral. The first logical combination fixes its
/// conjunction, after which combining with the other kind fails with a
/// mixed conjunction error. A neutral filter is evaluated as AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    clauses: Vec<Clause>,
    conjunction: Option<Conjunction>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty filter whose conjunction is already fixed.
    pub fn with_conjunction(conjunction: Conjunction) -> Self {
        Self {
            clauses: vec![],
            conjunction: Some(conjunction),
        }
    }

    /// A filter holding one clause and no conjunction of its own.
    pub fn single(clause: Clause) -> Self {
        let mut filter = Self::new();
        filter.push(clause);
        filter
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// The conjunction clauses combine with; AND when none was fixed.
    pub fn conjunction(&self) -> Conjunction {
        self.conjunction.unwrap_or(Conjunction::And)
    }

    /// Whether a logical combination has fixed the conjunction.
    pub fn is_neutral(&self) -> bool {
        self.conjunction.is_none()
    }

    /// Appends a clause, tagging it with the filter's conjunction.
    pub fn push(&mut self, mut clause: Clause) {
        clause.conjunction = self.conjunction();
        self.clauses.push(clause);
    }

    /// Fixes the conjunction, failing if a different one is already in use.
    pub fn require(&mut self, conjunction: Conjunction) -> Result<()> {
        match self.conjunction {
            Some(existing) if existing != conjunction => Err(Error::mixed_conjunction(
                existing.as_str(),
                conjunction.as_str(),
            )),
            Some(_) => Ok(()),
            None => {
                self.conjunction = Some(conjunction);
                for clause in &mut self.clauses {
                    clause.conjunction = conjunction;
                }
                Ok(())
            }
        }
    }

    /// Appends `other`'s clauses under `conjunction`.
    ///
    /// Fails if either side already uses the other conjunction.
    pub fn merge(&mut self, conjunction: Conjunction, other: Filter) -> Result<()> {
        if let Some(theirs) = other.conjunction {
            if theirs != conjunction {
                return Err(Error::mixed_conjunction(
                    theirs.as_str(),
                    conjunction.as_str(),
                ));
            }
        }

        self.require(conjunction)?;
        for clause in other.clauses {
            self.push(clause);
        }
        Ok(())
    }

    /// Appends `other` without fixing a conjunction when either side is neutral.
    pub fn extend(&mut self, other: Filter) -> Result<()> {
        match (self.conjunction, other.conjunction) {
            (_, None) => {
                for clause in other.clauses {
                    self.push(clause);
                }
                Ok(())
            }
            (_, Some(theirs)) => self.merge(theirs, other),
        }
    }

    /// Builder-style AND of one more clause.
    pub fn and(mut self, clause: Clause) -> Result<Self> {
        self.merge(Conjunction::And, Filter::single(clause))?;
        Ok(self)
    }

    /// Builder-style OR of one more clause.
    pub fn or(mut self, clause: Clause) -> Result<Self> {
        self.merge(Conjunction::Or, Filter::single(clause))?;
        Ok(self)
    }
}
