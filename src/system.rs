//! Rewrite systems: rule storage, simplification, and oriented insertion.

use crate::{Atom, ProtocolGraph, Rule, Term};
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Display};

/// Flags controlling diagnostic output.
///
/// Enabled flags emit through the `log` crate;
/// they never affect the computed rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugFlags {
    /// report every inserted rule
    pub add: bool,
    /// report every simplification step
    pub simplify: bool,
    /// report associated type merges
    pub merge: bool,
}

/// Rewrite system over terms, with insertion keeping rules oriented.
///
/// The rule vector is append-only, so rule indices remain stable and
/// the worklist can refer to rules by index across later insertions.
/// Deleted rules stay in the vector, flagged, until the system is dropped.
pub struct RewriteSystem<P, L, G> {
    pub(crate) graph: G,
    pub(crate) rules: Vec<Rule<P, L>>,
    /// pairs of rule indices whose overlaps have yet to be examined
    pub(crate) worklist: VecDeque<(usize, usize)>,
    /// rule sides that differ only in their final associated type atom
    pub(crate) merged_associated_types: Vec<(Term<P, L>, Term<P, L>)>,
    /// diagnostic output flags
    pub debug: DebugFlags,
}

impl<P, L, G> RewriteSystem<P, L, G> {
    /// Construct an empty rewrite system over the given protocol graph.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            rules: Vec::new(),
            worklist: VecDeque::new(),
            merged_associated_types: Vec::new(),
            debug: DebugFlags::default(),
        }
    }

    /// Return the rules of the system, including deleted ones.
    pub fn rules(&self) -> &[Rule<P, L>] {
        &self.rules
    }

    /// Return the protocol graph of the system.
    pub fn graph(&self) -> &G {
        &self.graph
    }
}

impl<P, L, G> RewriteSystem<P, L, G>
where
    P: Clone + Eq + Display,
    L: Clone + Ord + Display,
    G: ProtocolGraph<P>,
{
    /// Orient and insert the given seed rules.
    ///
    /// Seeds are sorted by their first component beforehand;
    /// this is not required for correctness,
    /// but makes the completed system independent of seed order.
    pub fn initialize(&mut self, mut seeds: Vec<(Term<P, L>, Term<P, L>)>) {
        seeds.sort_by(|s1, s2| s1.0.compare(&s2.0, &self.graph));
        for (lhs, rhs) in seeds {
            self.add_rule(lhs, rhs);
        }
    }

    /// Reduce a term to its normal form with respect to the current rules.
    ///
    /// Rules are tried in insertion order until no rule applies anymore.
    /// Every application strictly decreases the term under the term order,
    /// so the loop terminates.
    /// Return whether the term was changed.
    pub fn simplify(&self, term: &mut Term<P, L>) -> bool {
        if self.debug.simplify {
            trace!("simplify: {}", term);
        }

        let mut changed = false;
        loop {
            let mut try_again = false;
            for rule in self.rules.iter().filter(|rule| !rule.is_deleted()) {
                if rule.apply(term) {
                    if self.debug.simplify {
                        trace!("rewrite: {} yields {}", rule, term);
                    }
                    changed = true;
                    try_again = true;
                }
            }
            if !try_again {
                break;
            }
        }
        changed
    }

    /// Simplify both sides of a rule, orient it, and insert it.
    ///
    /// Return false if both sides simplify to the same term:
    /// such a rule would never apply, and
    /// a critical pair whose sides share a normal form is already joinable.
    ///
    /// Insertion queues the new rule against every existing rule for overlap
    /// examination, and queues the rule for associated type merging if its
    /// sides differ only in their final associated type atom.
    pub fn add_rule(&mut self, lhs: Term<P, L>, rhs: Term<P, L>) -> bool {
        self.add_rule_from(lhs, rhs, 0)
    }

    /// Like [`add_rule`](RewriteSystem::add_rule), for a rule derived from
    /// a critical pair: the new rule's depth is raised to `parent_depth`,
    /// the depth of the deeper parent, keeping depth monotone along
    /// derivations.
    pub(crate) fn add_rule_from(
        &mut self,
        mut lhs: Term<P, L>,
        mut rhs: Term<P, L>,
        parent_depth: usize,
    ) -> bool {
        self.simplify(&mut lhs);
        self.simplify(&mut rhs);

        match lhs.compare(&rhs, &self.graph) {
            Ordering::Equal => return false,
            Ordering::Less => core::mem::swap(&mut lhs, &mut rhs),
            Ordering::Greater => (),
        }

        if self.debug.add {
            debug!("adding rule {} => {}", lhs, rhs);
        }

        if lhs.len() == rhs.len() && merge_candidate(&lhs, &rhs) {
            self.merged_associated_types.push((lhs.clone(), rhs.clone()));
        }

        let i = self.rules.len();
        let mut rule = Rule::new(lhs, rhs);
        rule.inherit_depth(parent_depth);
        self.rules.push(rule);

        for j in 0..i {
            self.worklist.push_back((i, j));
            self.worklist.push_back((j, i));
        }

        true
    }

    /// Merge two associated type atoms of the same name into one
    /// qualified by the inheritance-minimal union of their protocols.
    ///
    /// The first atom must be the greater one, which means that
    /// it is qualified by at most as many protocols as the second.
    /// The merged atom sorts below both inputs.
    pub(crate) fn merge_associated_types(&self, lhs: &Atom<P, L>, rhs: &Atom<P, L>) -> Atom<P, L> {
        let (protos, other_protos, name) = match (lhs, rhs) {
            (Atom::AssociatedType(ps, name), Atom::AssociatedType(qs, other_name)) => {
                debug_assert_eq!(name, other_name);
                (ps, qs, name)
            }
            _ => unreachable!("merge of non-associated type atoms"),
        };

        // follows from lhs > rhs
        debug_assert!(protos.len() <= other_protos.len());

        // merge the two sorted protocol lists; duplicates stay adjacent
        let mut merged = Vec::with_capacity(protos.len() + other_protos.len());
        let mut others = other_protos.iter().peekable();
        for p in protos {
            while let Some(&q) = others.peek() {
                if self.graph.compare_protocols(q, p).is_lt() {
                    merged.push(q.clone());
                    others.next();
                } else {
                    break;
                }
            }
            merged.push(p.clone());
        }
        merged.extend(others.cloned());

        // drop duplicates, and drop every protocol
        // that another protocol of the union inherits from
        let mut minimal: Vec<P> = Vec::new();
        for (i, q) in merged.iter().enumerate() {
            if i > 0 && merged[i - 1] == *q {
                continue;
            }
            if merged.iter().any(|p| p != q && self.graph.inherits_from(p, q)) {
                continue;
            }
            minimal.push(q.clone());
        }

        debug_assert!(minimal.len() >= protos.len());
        debug_assert!(minimal.len() >= other_protos.len());

        Atom::AssociatedType(minimal, name.clone())
    }

    /// Drain the queue of rules whose sides differ only in
    /// their final associated type atom.
    ///
    /// For a queued pair `…[P1:T] => …[P2:T]`, insert the two rules
    /// `…[P1:T] => …[P1&P2:T]` and `…[P2:T] => …[P1&P2:T]`, and lift every
    /// conformance rule `x.[Q] => x` of either original atom `x` to the
    /// merged atom.
    /// Inserted rules may queue further pairs, which are drained in turn;
    /// lifting only ever examines the rules present before it runs,
    /// so it cannot feed on its own output.
    pub(crate) fn process_merged_associated_types(&mut self) {
        let mut i = 0;
        while i < self.merged_associated_types.len() {
            let (lhs, rhs) = self.merged_associated_types[i].clone();
            i += 1;

            if self.debug.merge {
                debug!("merge candidate {} => {}", lhs, rhs);
            }

            let merged_atom = match (lhs.last(), rhs.last()) {
                (Some(a @ Atom::AssociatedType(..)), Some(b @ Atom::AssociatedType(..))) => {
                    self.merge_associated_types(a, b)
                }
                _ => unreachable!("queued rule sides must end in associated types"),
            };

            if self.debug.merge {
                debug!("merged atom {}", merged_atom);
            }

            let mut merged_term = lhs.clone();
            if let Some(last) = merged_term.last_mut() {
                *last = merged_atom.clone();
            }

            self.add_rule(lhs.clone(), merged_term.clone());
            self.add_rule(rhs.clone(), merged_term);

            // lift conformance rules of either original atom to the merged atom
            let mut lifted = Vec::new();
            for rule in self.rules.iter().filter(|rule| !rule.is_deleted()) {
                if rule.lhs.len() != 2 || rule.rhs.len() != 1 {
                    continue;
                }
                let (x, p) = match (rule.lhs.get(0), rule.lhs.get(1)) {
                    (Some(x), Some(Atom::Protocol(p))) => (x, p),
                    _ => continue,
                };
                if rule.rhs.get(0) != Some(x) {
                    continue;
                }
                if Some(x) != lhs.last() && Some(x) != rhs.last() {
                    continue;
                }

                if self.debug.merge {
                    debug!("lifting conformance rule {}", rule);
                }

                let mut new_lhs = Term::from(merged_atom.clone());
                new_lhs.push(Atom::Protocol(p.clone()));
                lifted.push((new_lhs, Term::from(merged_atom.clone())));
            }
            for (new_lhs, new_rhs) in lifted {
                self.add_rule(new_lhs, new_rhs);
            }
        }

        self.merged_associated_types.clear();
    }
}

/// Do the rule sides differ only in their final atom,
/// both being associated types of the same name?
fn merge_candidate<P: Eq, L: Eq>(lhs: &Term<P, L>, rhs: &Term<P, L>) -> bool {
    let butlast = lhs.len() - 1;
    if !lhs.iter().zip(rhs.iter()).take(butlast).all(|(a, b)| a == b) {
        return false;
    }
    match (lhs.last(), rhs.last()) {
        (Some(Atom::AssociatedType(_, name)), Some(Atom::AssociatedType(_, other_name))) => {
            name == other_name
        }
        _ => false,
    }
}

impl<P: Display, L: Display, G> Display for RewriteSystem<P, L, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Rewrite system: {{")?;
        for rule in &self.rules {
            writeln!(f, "- {}", rule)?;
        }
        writeln!(f, "}}")
    }
}
