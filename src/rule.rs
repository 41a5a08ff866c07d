use crate::Term;
use core::fmt::{self, Display};

/// Oriented rewrite rule.
///
/// The left-hand side is strictly greater than the right-hand side
/// under the term order,
/// so applying a rule strictly decreases a term.
///
/// Rules are never removed from a rewrite system:
/// a rule subsumed by a more general one is only flagged as deleted,
/// which keeps rule indices stable.
/// Once set, the flag is never cleared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule<P, L> {
    /// left-hand side (term to replace)
    pub lhs: Term<P, L>,
    /// right-hand side (replacement)
    pub rhs: Term<P, L>,
    deleted: bool,
    /// divergence measure, monotone along derivations
    depth: usize,
}

impl<P, L> Rule<P, L> {
    pub(crate) fn new(lhs: Term<P, L>, rhs: Term<P, L>) -> Self {
        let deleted = false;
        let depth = lhs.len().max(rhs.len());
        Self {
            lhs,
            rhs,
            deleted,
            depth,
        }
    }

    /// Return whether the rule has been flagged as deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.deleted = true
    }

    /// Raise the rule's depth to that of a parent it was derived from.
    pub(crate) fn inherit_depth(&mut self, parent: usize) {
        self.depth = self.depth.max(parent)
    }

    /// Divergence measure of the rule:
    /// the size of its deeper side, or the depth of the deepest rule
    /// in its derivation, whichever is greater.
    ///
    /// A rule derived from a critical pair is at least as deep as either
    /// parent, so a derivation that keeps producing short rules still
    /// shows up in the depth of its descendants.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<P: Clone + Eq, L: Clone + Eq> Rule<P, L> {
    /// Rewrite the first occurrence of the rule's left-hand side in a term.
    pub fn apply(&self, term: &mut Term<P, L>) -> bool {
        term.rewrite_subterm(&self.lhs, &self.rhs)
    }

    /// Return whether the other rule's left-hand side
    /// occurs in this rule's left-hand side.
    ///
    /// Such a rule is subsumed by the other rule and can be retired.
    pub fn reducible_by(&self, other: &Self) -> bool {
        self.lhs.find_subterm(&other.lhs).is_some()
    }
}

impl<P: Display, L: Display> Display for Rule<P, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} => {}", self.lhs, self.rhs)?;
        if self.deleted {
            write!(f, " [deleted]")?;
        }
        Ok(())
    }
}
