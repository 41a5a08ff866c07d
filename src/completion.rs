//! Confluent completion of a rewrite system.

use crate::{ProtocolGraph, RewriteSystem};
use core::fmt::Display;

/// Outcome of a completion run.
///
/// The budget outcomes are ordinary results, not errors:
/// the rules computed so far are valid,
/// but the system may not be confluent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Completion {
    /// all critical pairs are joinable
    Success,
    /// the iteration budget was exhausted
    MaxIterations,
    /// a derived rule exceeded the depth bound
    MaxDepth,
}

impl<P, L, G> RewriteSystem<P, L, G>
where
    P: Clone + Eq + Display,
    L: Clone + Ord + Display,
    G: ProtocolGraph<P>,
{
    /// Close the rule set under critical pairs.
    ///
    /// Queued pairs of rules are examined oldest first.
    /// When two left-hand sides overlap, the overlap witness is rewritten
    /// once with either rule, and the two results are inserted as a new rule
    /// unless they already share a normal form.
    /// A new rule retires every rule whose left-hand side it reduces, and
    /// associated type merges are processed before the next pair.
    ///
    /// `max_iterations` bounds the number of rules inserted for critical
    /// pairs; `max_depth` bounds the [depth](crate::Rule::depth) of any such rule.
    /// Because a derived rule inherits the depth of its deeper parent,
    /// the depth bound also catches derivations whose rules stay short
    /// while the derivation itself keeps growing.
    /// Exhausting either budget aborts completion with the corresponding
    /// outcome, leaving the rules inserted so far in place.
    ///
    /// On success, the system is locally confluent and
    /// [`simplify`](RewriteSystem::simplify) computes unique normal forms.
    /// The rules are then also brought into a canonical shape:
    /// every right-hand side is re-simplified, and
    /// the rule vector is sorted by left-hand side.
    ///
    /// Reference:
    /// Knuth, D. E.; Bendix, P. B. (1970).
    /// "Simple Word Problems in Universal Algebras".
    /// *Computational Problems in Abstract Algebra*, 263–297.
    /// doi: [10.1016/B978-0-08-012975-4.50028-X](https://doi.org/10.1016/B978-0-08-012975-4.50028-X).
    pub fn complete(&mut self, mut max_iterations: usize, max_depth: usize) -> Completion {
        while let Some((i, j)) = self.worklist.pop_front() {
            let rule1 = &self.rules[i];
            let rule2 = &self.rules[j];

            if rule1.is_deleted() || rule2.is_deleted() {
                continue;
            }

            // critical pair: rewrite the overlap witness once with either rule
            let mut first = match rule1.lhs.check_for_overlap(&rule2.lhs) {
                Some(term) => term,
                None => continue,
            };
            let mut second = first.clone();
            let parent_depth = rule1.depth().max(rule2.depth());
            rule1.apply(&mut first);
            rule2.apply(&mut second);

            let new = self.rules.len();
            if !self.add_rule_from(first, second, parent_depth) {
                continue;
            }

            if max_iterations == 0 {
                return Completion::MaxIterations;
            }
            max_iterations -= 1;

            if self.rules[new].depth() > max_depth {
                return Completion::MaxDepth;
            }

            // retire rules subsumed by the new one
            let new_rule = self.rules[new].clone();
            for (k, rule) in self.rules.iter_mut().enumerate() {
                if k == new || rule.is_deleted() {
                    continue;
                }
                if rule.reducible_by(&new_rule) {
                    rule.mark_deleted();
                }
            }

            self.process_merged_associated_types();
        }

        // cosmetic: normalise right-hand sides and order rules by
        // left-hand side; neither is required for confluence
        for i in 0..self.rules.len() {
            if self.rules[i].is_deleted() {
                continue;
            }
            let mut rhs = self.rules[i].rhs.clone();
            self.simplify(&mut rhs);
            self.rules[i].rhs = rhs;
        }

        let graph = &self.graph;
        self.rules.sort_by(|r1, r2| r1.lhs.compare(&r2.lhs, graph));

        Completion::Success
    }
}
